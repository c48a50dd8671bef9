//! Text editor discovery and launch

use anyhow::Context;
use std::path::Path;
use std::process::Command;

/// Editor to use when none is configured
///
/// `EDITOR`, then `notepad.exe` on Windows or `nano` from `PATH`.
fn fallback_editor() -> anyhow::Result<String> {
    if let Ok(editor) = std::env::var("EDITOR") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    if cfg!(windows) {
        return Ok("notepad.exe".to_string());
    }

    let nano = which::which("nano").context("couldn't find a suitable text editor")?;
    Ok(nano.to_string_lossy().into_owned())
}

/// Open `file` in `configured`, or the fallback editor, and wait for it
pub(crate) fn open(configured: Option<&str>, file: &Path) -> anyhow::Result<()> {
    let editor = match configured {
        Some(editor) => editor.to_string(),
        None => fallback_editor()?,
    };

    tracing::info!("Opening {} with {editor}", file.display());
    let status = Command::new(&editor)
        .arg(file)
        .status()
        .with_context(|| format!("editor {editor:?} failed to run"))?;

    anyhow::ensure!(status.success(), "editor {editor:?} exited with {status}");
    Ok(())
}
