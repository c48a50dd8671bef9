//! Subcommand implementations

use crate::editor;
use crate::settings::Settings;
use anyhow::Context;
use jdex_acid::Acid;
use jdex_index::{Entry, Index};
use jdex_store::{Store, StoreError};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// `jdex new`
pub(crate) fn new(settings: &Settings) -> anyhow::Result<()> {
    let root = &settings.store.root;
    std::fs::create_dir_all(root)
        .with_context(|| format!("failed to create {}", root.display()))?;

    let store = Store::create(root.clone())?;
    println!("Created store at {}", store.root().display());
    Ok(())
}

/// `jdex list`
pub(crate) fn list(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let store = open_store(settings)?;
    let mut stdout = io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut stdout, &IndexView::new(store.index()))?;
        writeln!(stdout)?;
    } else {
        jdex_format::write(store.index(), &mut stdout)?;
    }

    Ok(())
}

/// `jdex path <ID>`
pub(crate) fn path(settings: &Settings, id: &str) -> anyhow::Result<()> {
    let id = parse_id(id)?;
    let store = open_store(settings)?;

    println!("{}", store.entry_path(&id)?.display());
    Ok(())
}

/// `jdex check`
pub(crate) fn check(settings: &Settings) -> anyhow::Result<()> {
    let store = Store::open(settings.store.root.clone())?;

    println!(
        "{}: {} entries",
        store.index_path().display(),
        store.index().len()
    );
    Ok(())
}

/// `jdex edit <ID> [NAME]`
pub(crate) fn edit(settings: &Settings, id: &str, name: Option<&str>) -> anyhow::Result<()> {
    let id = parse_id(id)?;
    let mut store = open_store(settings)?;

    if let Some(name) = name {
        store.rename_entry(&id, name)?;
        store.save()?;
    }

    let file = store.prepare_entry(&id)?;
    editor::open(settings.store.editor.as_deref(), &file)
}

fn parse_id(text: &str) -> anyhow::Result<Acid> {
    Acid::parse(text).with_context(|| format!("invalid ID {text:?}"))
}

/// Open the configured store, offering to create it when missing
fn open_store(settings: &Settings) -> anyhow::Result<Store> {
    if settings.non_interactive {
        return Ok(Store::open(settings.store.root.clone())?);
    }

    match Store::open_or_create(&settings.store, confirm_create) {
        Err(StoreError::Cancelled) => anyhow::bail!("no store was created"),
        other => Ok(other?),
    }
}

/// Ask on the terminal; without one the answer is no
fn confirm_create(root: &Path) -> bool {
    if !io::stdin().is_terminal() {
        tracing::warn!("No terminal to confirm creating {}", root.display());
        return false;
    }

    inquire::Confirm::new(&format!("Create a new store at {}?", root.display()))
        .with_help_message("A new Johnny.Decimal system will be created there")
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}

/// JSON rendering of an index, in identifier order
#[derive(Debug, Serialize)]
struct IndexView<'a> {
    areas: Vec<AreaView<'a>>,
}

#[derive(Debug, Serialize)]
struct AreaView<'a> {
    range: String,
    name: &'a str,
    categories: Vec<CategoryView<'a>>,
}

#[derive(Debug, Serialize)]
struct CategoryView<'a> {
    code: String,
    name: &'a str,
    entries: Vec<&'a Entry>,
}

impl<'a> IndexView<'a> {
    fn new(index: &'a Index) -> Self {
        let areas = index
            .areas()
            .map(|area| AreaView {
                range: area.area_range(),
                name: index.area_name(&area).unwrap_or_default(),
                categories: index
                    .categories(&area)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|category| CategoryView {
                        code: category.category_code(),
                        name: index.category_name(&category).unwrap_or_default(),
                        entries: index.entries(&category).unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        Self { areas }
    }
}
