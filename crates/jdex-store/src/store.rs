//! Store backed by a directory tree
//!
//! ```text
//! <root>/
//!   00-09 System/00 Index/00.00 System Index/Index.txt    index file
//!   10-19 <Area>/11 <Category>/11.10 <Entry>/Index.txt    entry notes
//! ```
//!
//! Directory names are derived from the index on demand; the store never
//! scans the tree.

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::naming::{entry_dir_name, sanitize_file_name, ENTRY_INDEX_FILE_NAME};
use jdex_acid::Acid;
use jdex_index::{Entry, Index};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Johnny.Decimal store rooted at a directory
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
    index: Index,
    /// Directory of the system index entry, fixed by the bootstrap names
    system_path: PathBuf,
}

impl Store {
    /// Create a store in the existing directory `root`
    ///
    /// Writes a fresh index file, creating its parent directories.
    ///
    /// # Errors
    /// [`StoreError::NotADirectory`], [`StoreError::AlreadyExists`] if an
    /// index file is present, or [`StoreError::Write`].
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::at(root.into())?;

        if store.index_path().exists() {
            return Err(StoreError::AlreadyExists(store.root));
        }

        tracing::info!("Creating store at {}", store.root.display());
        store.save()?;

        Ok(store)
    }

    /// Open the store in `root`
    ///
    /// # Errors
    /// [`StoreError::NotADirectory`], [`StoreError::Io`] if the index file
    /// cannot be opened, or [`StoreError::Read`] if it cannot be parsed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self::at(root.into())?;

        let index_path = store.index_path();
        let file = File::open(&index_path).map_err(|err| StoreError::io(&index_path, err))?;
        store.index = jdex_format::read(file).map_err(|source| StoreError::Read {
            path: index_path,
            source,
        })?;

        tracing::debug!(
            entries = store.index.len(),
            "Opened store at {}",
            store.root.display()
        );

        Ok(store)
    }

    /// Open the configured store, creating it if its root does not exist
    ///
    /// `confirm` is asked before anything is created.
    ///
    /// # Errors
    /// [`StoreError::Cancelled`] if `confirm` declines, otherwise as
    /// [`Store::open`] and [`Store::create`].
    pub fn open_or_create<F>(config: &StoreConfig, confirm: F) -> Result<Self>
    where
        F: FnOnce(&Path) -> bool,
    {
        let root = &config.root;

        match fs::metadata(root) {
            Ok(_) => Self::open(root.clone()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if !confirm(root) {
                    return Err(StoreError::Cancelled);
                }

                fs::create_dir_all(root).map_err(|err| StoreError::io(root, err))?;
                Self::create(root.clone())
            }
            Err(err) => Err(StoreError::io(root, err)),
        }
    }

    fn at(root: PathBuf) -> Result<Self> {
        if !root.is_dir() {
            return Err(StoreError::NotADirectory(root));
        }

        let index = Index::new();
        let system_path = entry_dir(&root, &index, &Acid::system_index())?;

        Ok(Self {
            root,
            index,
            system_path,
        })
    }

    /// Rewrite the index file from the in-memory index
    ///
    /// # Errors
    /// [`StoreError::Write`].
    pub fn save(&self) -> Result<()> {
        let path = self.index_path();

        write_index(&path, &self.index).map_err(|source| StoreError::Write { path, source })?;
        tracing::debug!("Saved index with {} entries", self.index.len());

        Ok(())
    }

    /// Name or rename an entry
    ///
    /// An existing entry keeps its metadata and, if its directory exists, the
    /// directory is renamed to match. Returns the entry's directory path.
    /// Nothing changes if any step fails.
    ///
    /// The index file is not saved.
    ///
    /// # Errors
    /// [`StoreError::EntryNotFound`] if the area or category is missing,
    /// [`StoreError::Rejected`] for reserved or invalid identifiers and
    /// unstorable names, or [`StoreError::Io`] if the directory cannot be
    /// renamed.
    pub fn rename_entry(&mut self, id: &Acid, name: &str) -> Result<PathBuf> {
        let old_path = self.entry_path(id).ok();

        let entry = match self.index.entry(id) {
            Ok(existing) => Entry {
                name: name.to_string(),
                ..existing.clone()
            },
            Err(_) => Entry::new(id.clone(), name),
        };

        let mut renamed = self.index.clone();
        renamed.put_entry(entry).map_err(|err| {
            if err.is_not_found() {
                StoreError::EntryNotFound(err)
            } else {
                StoreError::Rejected(err)
            }
        })?;

        let new_path = entry_dir(&self.root, &renamed, id)?;
        if let Some(old_path) = old_path.filter(|old| *old != new_path && old.is_dir()) {
            tracing::info!(
                "Renaming {} to {}",
                old_path.display(),
                new_path.display()
            );
            if new_path.exists() {
                return Err(StoreError::io(
                    &new_path,
                    io::Error::new(io::ErrorKind::AlreadyExists, "path already exists"),
                ));
            }
            fs::rename(&old_path, &new_path).map_err(|err| StoreError::io(&old_path, err))?;
        }

        self.index = renamed;
        Ok(new_path)
    }

    /// Create the entry's directory, returning the path of its index file
    ///
    /// # Errors
    /// [`StoreError::EntryNotFound`] or [`StoreError::Io`].
    pub fn prepare_entry(&self, id: &Acid) -> Result<PathBuf> {
        let entry_path = self.entry_path(id)?;
        fs::create_dir_all(&entry_path).map_err(|err| StoreError::io(&entry_path, err))?;

        Ok(entry_path.join(ENTRY_INDEX_FILE_NAME))
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Index backing the store
    #[inline]
    #[must_use]
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Mutable index; call [`Store::save`] to persist changes
    #[inline]
    pub fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    /// Path of the index file
    ///
    /// Always under `00-09 System/00 Index/00.00 System Index`, whatever the
    /// index file names the system area and category.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.system_path.join(ENTRY_INDEX_FILE_NAME)
    }

    /// Directory of the area of `id`
    ///
    /// # Errors
    /// [`StoreError::EntryNotFound`].
    pub fn area_path(&self, id: &Acid) -> Result<PathBuf> {
        area_dir(&self.root, &self.index, id)
    }

    /// Directory of the category of `id`
    ///
    /// # Errors
    /// [`StoreError::EntryNotFound`].
    pub fn category_path(&self, id: &Acid) -> Result<PathBuf> {
        category_dir(&self.root, &self.index, id)
    }

    /// Directory of the entry `id`
    ///
    /// The system index entry always resolves to the directory holding the
    /// index file.
    ///
    /// # Errors
    /// [`StoreError::EntryNotFound`].
    pub fn entry_path(&self, id: &Acid) -> Result<PathBuf> {
        if id.is_protected() {
            return Ok(self.system_path.clone());
        }

        entry_dir(&self.root, &self.index, id)
    }

    /// Index file inside the directory of the entry `id`
    ///
    /// # Errors
    /// [`StoreError::EntryNotFound`].
    pub fn entry_index_path(&self, id: &Acid) -> Result<PathBuf> {
        Ok(self.entry_path(id)?.join(ENTRY_INDEX_FILE_NAME))
    }
}

fn area_dir(root: &Path, index: &Index, id: &Acid) -> Result<PathBuf> {
    let name = index.area_name(id)?;

    Ok(root.join(format!("{} {}", id.area_range(), sanitize_file_name(name))))
}

fn category_dir(root: &Path, index: &Index, id: &Acid) -> Result<PathBuf> {
    let area_dir = area_dir(root, index, id)?;
    let name = index.category_name(id)?;

    Ok(area_dir.join(format!(
        "{} {}",
        id.category_code(),
        sanitize_file_name(name)
    )))
}

fn entry_dir(root: &Path, index: &Index, id: &Acid) -> Result<PathBuf> {
    let category_dir = category_dir(root, index, id)?;
    let entry = index.entry(id)?;

    Ok(category_dir.join(entry_dir_name(entry)))
}

fn write_index(path: &Path, index: &Index) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    jdex_format::write(index, &mut writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdex_index::IndexError;
    use jdex_test_utils::{acid, sample_index};
    use tempfile::TempDir;

    fn sample_store(dir: &TempDir) -> Store {
        let mut store = Store::create(dir.path()).unwrap();
        *store.index_mut() = sample_index();
        store.save().unwrap();
        store
    }

    #[test]
    fn create_requires_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        assert!(matches!(
            Store::create(&missing),
            Err(StoreError::NotADirectory(path)) if path == missing
        ));
    }

    #[test]
    fn create_writes_index_file() {
        let dir = TempDir::new().unwrap();
        let store = Store::create(dir.path()).unwrap();

        let expected = dir
            .path()
            .join("00-09 System")
            .join("00 Index")
            .join("00.00 System Index")
            .join("Index.txt");
        assert_eq!(store.index_path(), expected);
        assert!(expected.is_file());
    }

    #[test]
    fn create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Store::create(dir.path()).unwrap();

        assert!(matches!(
            Store::create(dir.path()),
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[test]
    fn paths_follow_names() {
        let dir = TempDir::new().unwrap();
        let store = sample_store(&dir);

        assert_eq!(
            store.entry_path(&acid("11.10")).unwrap(),
            dir.path()
                .join("10-19 Life Admin")
                .join("11 Me & Other Living Things")
                .join("11.10 Personal Records")
        );
        assert_eq!(
            store.entry_index_path(&acid("12.12+SNX")).unwrap(),
            dir.path()
                .join("10-19 Life Admin")
                .join("12 Household")
                .join("12.12+SNX Home Insurance (Southern Cross)")
                .join("Index.txt")
        );
    }

    #[test]
    fn paths_sanitize_area_and_category_names() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::create(dir.path()).unwrap();
        let id = acid("21.10");
        store.index_mut().put_area(&id, "Work/Play").unwrap();
        store.index_mut().put_category(&id, "Q&A?").unwrap();

        assert_eq!(
            store.category_path(&id).unwrap(),
            dir.path().join("20-29 Work_Play").join("21 Q&A_")
        );
    }

    #[test]
    fn missing_entry_path() {
        let dir = TempDir::new().unwrap();
        let store = sample_store(&dir);

        let err = store.entry_path(&acid("11.99")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn rename_entry_keeps_metadata_and_moves_directory() {
        let dir = TempDir::new().unwrap();
        let mut store = sample_store(&dir);
        let id = acid("11.10");

        let old_path = store.prepare_entry(&id).unwrap();
        fs::write(&old_path, "notes").unwrap();

        let new_path = store.rename_entry(&id, "Records").unwrap();
        assert!(new_path.ends_with("11.10 Records"));
        assert_eq!(
            fs::read_to_string(new_path.join(ENTRY_INDEX_FILE_NAME)).unwrap(),
            "notes"
        );

        let entry = store.index().entry(&id).unwrap();
        assert_eq!(entry.name, "Records");
        assert_eq!(
            entry.metadata.get("Location").map(String::as_str),
            Some("Proton Drive")
        );
    }

    #[test]
    fn rename_entry_creates_new_entry() {
        let dir = TempDir::new().unwrap();
        let mut store = sample_store(&dir);

        let path = store.rename_entry(&acid("11.30"), "Pets").unwrap();
        assert!(path.ends_with("11.30 Pets"));
        assert!(!path.exists());
        assert_eq!(store.index().entry(&acid("11.30")).unwrap().name, "Pets");
    }

    #[test]
    fn rename_entry_requires_category() {
        let dir = TempDir::new().unwrap();
        let mut store = sample_store(&dir);

        assert!(matches!(
            store.rename_entry(&acid("13.10"), "Nowhere"),
            Err(StoreError::EntryNotFound(_))
        ));
    }

    #[test]
    fn rename_system_index_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = sample_store(&dir);

        assert!(matches!(
            store.rename_entry(&Acid::system_index(), "Mine"),
            Err(StoreError::Rejected(_))
        ));
    }

    #[test]
    fn prepare_system_index_points_at_index_file() {
        let dir = TempDir::new().unwrap();
        let store = Store::create(dir.path()).unwrap();

        assert_eq!(
            store.prepare_entry(&Acid::system_index()).unwrap(),
            store.index_path()
        );
    }

    #[test]
    fn renamed_system_area_keeps_index_file_in_place() {
        let dir = TempDir::new().unwrap();
        let store = Store::create(dir.path()).unwrap();
        let index_path = store.index_path();
        fs::write(
            &index_path,
            "00-09 Meta\n00 Index\n00.00 System Index\n10-19 A\n11 C\n",
        )
        .unwrap();

        let mut store = Store::open(dir.path()).unwrap();
        assert_eq!(store.index_path(), index_path);
        assert_eq!(
            store.entry_index_path(&Acid::system_index()).unwrap(),
            index_path
        );

        store.rename_entry(&acid("11.10"), "New").unwrap();
        store.save().unwrap();
        assert!(!dir.path().join("00-09 Meta").exists());

        let reopened = Store::open(dir.path()).unwrap();
        assert_eq!(reopened.index().entry(&acid("11.10")).unwrap().name, "New");
    }

    #[test]
    fn failed_directory_rename_leaves_index_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut store = sample_store(&dir);
        let id = acid("11.10");

        let old_dir = store.entry_path(&id).unwrap();
        fs::create_dir_all(&old_dir).unwrap();
        let blocker = old_dir.with_file_name("11.10 Records");
        fs::write(&blocker, "in the way").unwrap();

        assert!(matches!(
            store.rename_entry(&id, "Records"),
            Err(StoreError::Io { .. })
        ));
        assert_eq!(store.index().entry(&id).unwrap().name, "Personal Records");
        assert_eq!(store.entry_path(&id).unwrap(), old_dir);
        assert!(old_dir.is_dir());
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "in the way");
    }

    #[test]
    fn rename_entry_rejects_unstorable_name() {
        let dir = TempDir::new().unwrap();
        let mut store = sample_store(&dir);

        assert!(matches!(
            store.rename_entry(&acid("11.30"), "Notes /* draft"),
            Err(StoreError::Rejected(IndexError::InvalidName(_)))
        ));
        assert!(!store.index().contains(&acid("11.30")));
    }
}
