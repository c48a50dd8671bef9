//! The entry index
//!
//! Provides [`Index`], the hierarchical record of areas, categories and
//! entries stored in "00.00 System Index".

use indexmap::IndexMap;
use jdex_acid::{Acid, AcidError};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Index of every identifier in a system
///
/// Areas own their categories, categories hold the identifiers of their
/// entries, and the entries themselves live in a flat map keyed by the
/// rendered identifier. An entry can only be inserted once its area and
/// category exist.
///
/// Enumeration order is the ASCII order of the identifiers, which keeps
/// serialized output stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Rendered identifier -> entry
    entries: HashMap<String, Entry>,

    /// Area character -> area
    areas: BTreeMap<char, IndexArea>,
}

/// A single entry in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Entry's AC.ID
    pub id: Acid,

    /// Entry's name
    pub name: String,

    /// Entry's immediate metadata
    pub metadata: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexArea {
    name: String,
    categories: BTreeMap<String, IndexCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexCategory {
    name: String,
    entries: BTreeSet<String>,
}

impl Entry {
    /// Create entry without metadata
    #[inline]
    #[must_use]
    pub fn new(id: Acid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            metadata: IndexMap::new(),
        }
    }

    /// Add a metadata pair, replacing any previous value for `key`
    #[inline]
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl Index {
    /// Create an index holding only the system index entry
    #[must_use]
    pub fn new() -> Self {
        let mut index = Self {
            entries: HashMap::new(),
            areas: BTreeMap::new(),
        };

        let bootstrapped = index.bootstrap();
        debug_assert!(bootstrapped.is_ok(), "system index names are storable");

        index
    }

    fn bootstrap(&mut self) -> Result<(), IndexError> {
        let id = Acid::system_index();

        self.put_area(&id, "System")?;
        self.put_category(&id, "Index")?;
        self.put_entry_unchecked(Entry::new(id, "System Index").with_metadata("Format", "jdex"))
    }

    /// Look up an entry
    ///
    /// # Errors
    /// [`IndexError::InvalidId`] for non-local identifiers,
    /// [`IndexError::EntryNotFound`] if absent.
    pub fn entry(&self, id: &Acid) -> Result<&Entry, IndexError> {
        check_local(id)?;

        self.entries
            .get(&id.to_string())
            .ok_or_else(|| IndexError::EntryNotFound(id.to_string()))
    }

    /// Look up the name of the area containing `id`
    ///
    /// # Errors
    /// [`IndexError::InvalidId`] or [`IndexError::AreaNotFound`].
    pub fn area_name(&self, id: &Acid) -> Result<&str, IndexError> {
        self.area(id).map(|area| area.name.as_str())
    }

    /// Look up the name of the category containing `id`
    ///
    /// # Errors
    /// [`IndexError::InvalidId`], [`IndexError::AreaNotFound`] or
    /// [`IndexError::CategoryNotFound`].
    pub fn category_name(&self, id: &Acid) -> Result<&str, IndexError> {
        self.category(id).map(|category| category.name.as_str())
    }

    /// Check whether an entry exists
    #[must_use]
    pub fn contains(&self, id: &Acid) -> bool {
        self.entry(id).is_ok()
    }

    /// Number of entries, including the system index
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the system index entry is never removed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or rename the area of `id`
    ///
    /// Renaming keeps the area's categories.
    ///
    /// # Errors
    /// [`IndexError::InvalidId`] for non-local identifiers,
    /// [`IndexError::InvalidName`] for names the index file cannot hold.
    pub fn put_area(&mut self, id: &Acid, name: impl Into<String>) -> Result<(), IndexError> {
        check_local(id)?;

        let name = name.into();
        check_name(&name)?;
        self.areas
            .entry(id.area())
            .and_modify(|area| area.name.clone_from(&name))
            .or_insert_with(|| IndexArea {
                name,
                categories: BTreeMap::new(),
            });

        Ok(())
    }

    /// Insert or rename the category of `id`
    ///
    /// Renaming keeps the category's entries.
    ///
    /// # Errors
    /// [`IndexError::InvalidId`], [`IndexError::InvalidName`] or
    /// [`IndexError::AreaNotFound`].
    pub fn put_category(&mut self, id: &Acid, name: impl Into<String>) -> Result<(), IndexError> {
        let name = name.into();
        check_name(&name)?;

        let area = self.area_mut(id)?;
        area.categories
            .entry(id.category().to_string())
            .and_modify(|category| category.name.clone_from(&name))
            .or_insert_with(|| IndexCategory {
                name,
                entries: BTreeSet::new(),
            });

        Ok(())
    }

    /// Insert or replace an entry
    ///
    /// # Errors
    /// [`IndexError::ProtectedId`] for reserved identifiers,
    /// [`IndexError::InvalidId`], [`IndexError::InvalidName`],
    /// [`IndexError::InvalidMetadata`], [`IndexError::AreaNotFound`] or
    /// [`IndexError::CategoryNotFound`] otherwise.
    pub fn put_entry(&mut self, entry: Entry) -> Result<(), IndexError> {
        if entry.id.is_protected() {
            return Err(IndexError::ProtectedId(entry.id.to_string()));
        }

        self.put_entry_unchecked(entry)
    }

    /// Insert an entry without the reserved-identifier check
    fn put_entry_unchecked(&mut self, entry: Entry) -> Result<(), IndexError> {
        check_name(&entry.name)?;
        for (key, value) in &entry.metadata {
            check_metadata(key, value)?;
        }

        let key = entry.id.to_string();

        self.category_mut(&entry.id)?.entries.insert(key.clone());
        self.entries.insert(key, entry);

        Ok(())
    }

    /// Identifiers of every area, in order
    pub fn areas(&self) -> impl Iterator<Item = Acid> + '_ {
        self.areas.keys().map(|&area| Acid::for_area(area))
    }

    /// Identifiers of the categories in the area of `id`, in order
    ///
    /// # Errors
    /// [`IndexError::InvalidId`] or [`IndexError::AreaNotFound`].
    pub fn categories(&self, id: &Acid) -> Result<Vec<Acid>, IndexError> {
        let area = self.area(id)?;

        Ok(area
            .categories
            .keys()
            .map(|category| Acid::for_category(id.area(), category.as_str()))
            .collect())
    }

    /// Entries in the category of `id`, in order
    ///
    /// # Errors
    /// [`IndexError::InvalidId`], [`IndexError::AreaNotFound`] or
    /// [`IndexError::CategoryNotFound`].
    pub fn entries(&self, id: &Acid) -> Result<Vec<&Entry>, IndexError> {
        let category = self.category(id)?;

        Ok(category
            .entries
            .iter()
            .filter_map(|key| self.entries.get(key))
            .collect())
    }

    fn area(&self, id: &Acid) -> Result<&IndexArea, IndexError> {
        check_local(id)?;

        self.areas
            .get(&id.area())
            .ok_or_else(|| IndexError::AreaNotFound(id.area_range()))
    }

    fn area_mut(&mut self, id: &Acid) -> Result<&mut IndexArea, IndexError> {
        check_local(id)?;

        self.areas
            .get_mut(&id.area())
            .ok_or_else(|| IndexError::AreaNotFound(id.area_range()))
    }

    fn category(&self, id: &Acid) -> Result<&IndexCategory, IndexError> {
        self.area(id)?
            .categories
            .get(id.category())
            .ok_or_else(|| IndexError::CategoryNotFound(id.category_code()))
    }

    fn category_mut(&mut self, id: &Acid) -> Result<&mut IndexCategory, IndexError> {
        self.area_mut(id)?
            .categories
            .get_mut(id.category())
            .ok_or_else(|| IndexError::CategoryNotFound(id.category_code()))
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::new()
    }
}

fn check_local(id: &Acid) -> Result<(), IndexError> {
    id.validate_local().map_err(IndexError::InvalidId)
}

/// Comment markers of the index file
const COMMENT_MARKERS: [&str; 3] = ["//", "/*", "*/"];

/// True if `text` survives a trip through an index file line unchanged
fn is_storable(text: &str) -> bool {
    !text.is_empty()
        && text.trim() == text
        && !text.contains(['\n', '\r'])
        && !COMMENT_MARKERS.iter().any(|marker| text.contains(marker))
}

fn check_name(name: &str) -> Result<(), IndexError> {
    if is_storable(name) {
        Ok(())
    } else {
        Err(IndexError::InvalidName(name.to_string()))
    }
}

fn check_metadata(key: &str, value: &str) -> Result<(), IndexError> {
    if is_storable(key) && !key.contains(':') && is_storable(value) {
        Ok(())
    } else {
        Err(IndexError::InvalidMetadata {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// Errors for index operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// Identifier is not usable as a local key
    #[error("entry ID is invalid: {0}")]
    InvalidId(#[source] AcidError),

    /// Identifier is reserved by the system
    #[error("entry ID {0} is used by the system")]
    ProtectedId(String),

    /// Name is empty, padded, multi-line or holds a comment marker
    #[error("name {0:?} cannot be stored in the index")]
    InvalidName(String),

    /// Metadata pair the index cannot store
    #[error("metadata {key:?}: {value:?} cannot be stored in the index")]
    InvalidMetadata {
        /// Metadata key
        key: String,
        /// Metadata value
        value: String,
    },

    /// Area does not exist
    #[error("area {0} does not exist")]
    AreaNotFound(String),

    /// Category does not exist
    #[error("category {0} does not exist")]
    CategoryNotFound(String),

    /// Entry does not exist
    #[error("entry {0} does not exist")]
    EntryNotFound(String),
}

impl IndexError {
    /// True for the lookup failures
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AreaNotFound(_) | Self::CategoryNotFound(_) | Self::EntryNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acid(text: &str) -> Acid {
        Acid::parse(text).unwrap()
    }

    #[test]
    fn new_index_has_system_index() {
        let index = Index::new();
        let id = Acid::system_index();

        assert_eq!(index.area_name(&id).unwrap(), "System");
        assert_eq!(index.category_name(&id).unwrap(), "Index");
        assert_eq!(
            index.entry(&id).unwrap(),
            &Entry::new(acid("00.00"), "System Index").with_metadata("Format", "jdex")
        );
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn put_entry_rejects_system_index() {
        let mut index = Index::new();
        let result = index.put_entry(Entry::new(acid("00.00"), "Hijack"));

        assert!(matches!(result, Err(IndexError::ProtectedId(_))));
        assert_eq!(index.entry(&acid("00.00")).unwrap().name, "System Index");
    }

    #[test]
    fn put_entry_rejects_remote_id() {
        let id = acid("W01.11.11");
        let mut index = Index::new();
        index.put_area(&acid("11.11"), "Name").unwrap();
        index.put_category(&acid("11.11"), "Name").unwrap();

        let result = index.put_entry(Entry::new(id, "Name"));
        assert_eq!(result, Err(IndexError::InvalidId(AcidError::Remote)));
    }

    #[test]
    fn put_entry_requires_area() {
        let mut index = Index::new();
        let result = index.put_entry(Entry::new(acid("11.11"), "Name"));

        assert!(matches!(result, Err(IndexError::AreaNotFound(_))));
    }

    #[test]
    fn put_entry_requires_category() {
        let mut index = Index::new();
        let id = acid("11.11");
        index.put_area(&id, "Name").unwrap();

        let result = index.put_entry(Entry::new(id, "Name"));
        assert!(matches!(result, Err(IndexError::CategoryNotFound(_))));
    }

    #[test]
    fn put_entry_after_area_and_category() {
        let mut index = Index::new();
        let id = acid("11.11");
        index.put_area(&id, "Life Admin").unwrap();
        index.put_category(&id, "Me").unwrap();
        index.put_entry(Entry::new(id.clone(), "Birth Certs")).unwrap();

        assert_eq!(index.entry(&id).unwrap().name, "Birth Certs");
        assert!(index.contains(&id));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn put_entry_replaces_existing() {
        let mut index = Index::new();
        let id = acid("11.11");
        index.put_area(&id, "Name").unwrap();
        index.put_category(&id, "Name").unwrap();
        index.put_entry(Entry::new(id.clone(), "Old")).unwrap();
        index
            .put_entry(Entry::new(id.clone(), "New").with_metadata("Location", "Drive"))
            .unwrap();

        let entry = index.entry(&id).unwrap();
        assert_eq!(entry.name, "New");
        assert_eq!(entry.metadata.get("Location").map(String::as_str), Some("Drive"));
        assert_eq!(index.entries(&id).unwrap().len(), 1);
    }

    #[test]
    fn put_category_requires_area() {
        let mut index = Index::new();
        let result = index.put_category(&acid("11.11"), "Me");

        assert_eq!(result, Err(IndexError::AreaNotFound("10-19".to_string())));
    }

    #[test]
    fn rename_area_keeps_categories() {
        let mut index = Index::new();
        let id = acid("11.11");
        index.put_area(&id, "Old").unwrap();
        index.put_category(&id, "Me").unwrap();
        index.put_area(&id, "New").unwrap();

        assert_eq!(index.area_name(&id).unwrap(), "New");
        assert_eq!(index.category_name(&id).unwrap(), "Me");
    }

    #[test]
    fn rename_category_keeps_entries() {
        let mut index = Index::new();
        let id = acid("11.11");
        index.put_area(&id, "Name").unwrap();
        index.put_category(&id, "Old").unwrap();
        index.put_entry(Entry::new(id.clone(), "Entry")).unwrap();
        index.put_category(&id, "New").unwrap();

        assert_eq!(index.category_name(&id).unwrap(), "New");
        assert_eq!(index.entries(&id).unwrap()[0].name, "Entry");
    }

    #[test]
    fn lookups_reject_remote_id() {
        let index = Index::new();
        let remote = acid("W01.00.00");

        assert_eq!(
            index.entry(&remote).unwrap_err(),
            IndexError::InvalidId(AcidError::Remote)
        );
        assert_eq!(
            index.area_name(&remote).unwrap_err(),
            IndexError::InvalidId(AcidError::Remote)
        );
        assert_eq!(
            index.category_name(&remote).unwrap_err(),
            IndexError::InvalidId(AcidError::Remote)
        );
    }

    #[test]
    fn lookups_report_missing_levels() {
        let index = Index::new();

        assert!(matches!(
            index.area_name(&acid("11.11")),
            Err(IndexError::AreaNotFound(_))
        ));
        assert!(matches!(
            index.category_name(&acid("01.11")),
            Err(IndexError::CategoryNotFound(_))
        ));
        assert!(matches!(
            index.entry(&acid("00.01")),
            Err(IndexError::EntryNotFound(_))
        ));
        assert!(index.entry(&acid("00.01")).unwrap_err().is_not_found());
    }

    #[test]
    fn enumeration_is_ordered() {
        let mut index = Index::new();
        for (id, name) in [("B1.10", "B"), ("21.10", "Two"), ("11.10", "One")] {
            let id = acid(id);
            index.put_area(&id, name).unwrap();
            index.put_category(&id, name).unwrap();
        }
        let category = acid("11.10");
        index.put_category(&acid("1A.10"), "Alpha").unwrap();
        for id in ["11.20", "11.10+SUB", "11.10"] {
            index.put_entry(Entry::new(acid(id), id)).unwrap();
        }

        let areas: Vec<String> = index.areas().map(|a| a.area_range()).collect();
        assert_eq!(areas, ["00-09", "10-19", "20-29", "B0-B9"]);

        let categories: Vec<String> = index
            .categories(&category)
            .unwrap()
            .iter()
            .map(Acid::category_code)
            .collect();
        assert_eq!(categories, ["11", "1A"]);

        let entries: Vec<String> = index
            .entries(&category)
            .unwrap()
            .iter()
            .map(|e| e.id.to_string())
            .collect();
        assert_eq!(entries, ["11.10", "11.10+SUB", "11.20"]);
    }

    #[test]
    fn put_rejects_unstorable_names() {
        let id = acid("11.10");
        for name in ["", " Padded", "Padded ", "Notes /* draft", "a // b", "end */", "two\nlines"] {
            let mut index = Index::new();
            assert_eq!(
                index.put_area(&id, name),
                Err(IndexError::InvalidName(name.to_string()))
            );

            index.put_area(&id, "Area").unwrap();
            assert!(matches!(
                index.put_category(&id, name),
                Err(IndexError::InvalidName(_))
            ));

            index.put_category(&id, "Category").unwrap();
            assert!(matches!(
                index.put_entry(Entry::new(id.clone(), name)),
                Err(IndexError::InvalidName(_))
            ));
            assert!(!index.contains(&id));
        }
    }

    #[test]
    fn put_rejected_area_name_leaves_old_name() {
        let mut index = Index::new();
        let id = acid("11.10");
        index.put_area(&id, "Life Admin").unwrap();

        assert!(index.put_area(&id, "").is_err());
        assert_eq!(index.area_name(&id).unwrap(), "Life Admin");
    }

    #[test]
    fn put_entry_rejects_unstorable_metadata() {
        let mut index = Index::new();
        let id = acid("11.10");
        index.put_area(&id, "Area").unwrap();
        index.put_category(&id, "Category").unwrap();

        for (key, value) in [
            ("Link", "https://example.org"),
            ("Time:Zone", "UTC"),
            ("", "value"),
            ("Key", ""),
            ("Key", " padded"),
        ] {
            let entry = Entry::new(id.clone(), "Entry").with_metadata(key, value);
            assert!(matches!(
                index.put_entry(entry),
                Err(IndexError::InvalidMetadata { .. })
            ));
        }

        let entry = Entry::new(id.clone(), "Entry").with_metadata("Host", "example.org:8080");
        index.put_entry(entry).unwrap();
    }

    #[test]
    fn names_may_hold_inner_punctuation() {
        let mut index = Index::new();
        let id = acid("11.10");
        index.put_area(&id, "Life / Admin").unwrap();
        index.put_category(&id, "Me & Other * Things").unwrap();
        index.put_entry(Entry::new(id.clone(), "Notes: 2025  (draft)")).unwrap();

        assert_eq!(index.entry(&id).unwrap().name, "Notes: 2025  (draft)");
    }
}
