//! `jdex` binary entry point

use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = jdex_cli::cli().get_matches();
    jdex_cli::init_logging(matches.get_flag("verbose"));

    match jdex_cli::run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("Command failed: {err:?}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
