//! AC.ID identifiers
//!
//! Provides [`Acid`], the `[SYSTEM.]AC.ID[+SUB]` identifier used to address
//! areas, categories and entries of a Johnny.Decimal system.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Valid characters for every part of an identifier.
pub const ACID_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Identifier of the system index, reserved by the system.
pub const SYSTEM_INDEX_ID: &str = "00.00";

/// Check whether `c` belongs to [`ACID_CHARSET`]
#[inline]
#[must_use]
pub fn is_acid_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_uppercase()
}

/// Identifier of an item in the system
///
/// Decodes `SYS.AC.ID+SUB`, where only `AC.ID` is required. The first
/// character of `AC` is the area, the remainder is the category.
///
/// # Examples
/// - `12.34` → area `1`, category `2`, entry `34`
/// - `W01.15.14` → system `W01`, area `1`, category `5`, entry `14`
/// - `11.11+VLD` → area `1`, category `1`, entry `11`, sub `VLD`
///
/// See <https://johnnydecimal.com/10-19-concepts/12-advanced/12.05-acid-notation/>
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Acid {
    system: Option<String>,
    area: char,
    category: String,
    entry: String,
    sub: Option<String>,
}

impl Acid {
    /// Create identifier from its local parts (unvalidated)
    #[inline]
    #[must_use]
    pub fn new(area: char, category: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            system: None,
            area,
            category: category.into(),
            entry: entry.into(),
            sub: None,
        }
    }

    /// Identifier addressing a whole area
    #[inline]
    #[must_use]
    pub fn for_area(area: char) -> Self {
        Self::new(area, "", "")
    }

    /// Identifier addressing a whole category
    #[inline]
    #[must_use]
    pub fn for_category(area: char, category: impl Into<String>) -> Self {
        Self::new(area, category, "")
    }

    /// The reserved `00.00` system index identifier
    #[inline]
    #[must_use]
    pub fn system_index() -> Self {
        Self::new('0', "0", "00")
    }

    /// Set the remote system tag
    #[inline]
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the sub-entry suffix
    #[inline]
    #[must_use]
    pub fn with_sub(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// Parse an identifier
    ///
    /// # Errors
    /// - [`AcidError::BadSeparatorCount`] unless there are 2 or 3 dot separated segments
    /// - [`AcidError::EmptyPart`] if a present part is empty
    /// - [`AcidError::InvalidChars`] if a character is outside [`ACID_CHARSET`]
    pub fn parse(input: &str) -> Result<Self, AcidError> {
        let segments: Vec<&str> = input.split('.').collect();

        let (system, ac, id) = match segments.as_slice() {
            [ac, id] => (None, *ac, *id),
            [system, ac, id] => (Some(*system), *ac, *id),
            _ => return Err(AcidError::BadSeparatorCount),
        };

        let mut ac_chars = ac.chars();
        let area = ac_chars.next().ok_or(AcidError::EmptyPart { part: "area" })?;
        let category = ac_chars.as_str();

        let (entry, sub) = match id.split_once('+') {
            Some((entry, sub)) => (entry, Some(sub)),
            None => (id, None),
        };

        let acid = Self {
            system: system.map(str::to_string),
            area,
            category: category.to_string(),
            entry: entry.to_string(),
            sub: sub.map(str::to_string),
        };

        acid.validate()?;

        if acid.system.as_deref() == Some("") {
            return Err(AcidError::EmptyPart { part: "system" });
        }
        if acid.category.is_empty() {
            return Err(AcidError::EmptyPart { part: "category" });
        }
        if acid.entry.is_empty() {
            return Err(AcidError::EmptyPart { part: "entry" });
        }
        if acid.sub.as_deref() == Some("") {
            return Err(AcidError::EmptyPart { part: "sub" });
        }

        Ok(acid)
    }

    /// Check that every character belongs to [`ACID_CHARSET`]
    ///
    /// # Errors
    /// Returns [`AcidError::InvalidChars`] on the first offending character.
    pub fn validate(&self) -> Result<(), AcidError> {
        let parts = [
            self.system.as_deref().unwrap_or_default(),
            &self.category,
            &self.entry,
            self.sub.as_deref().unwrap_or_default(),
        ];

        if !is_acid_char(self.area) || !parts.iter().all(|part| part.chars().all(is_acid_char)) {
            return Err(AcidError::InvalidChars);
        }

        Ok(())
    }

    /// Check that this identifier is usable as a key in the local system
    ///
    /// # Errors
    /// Returns [`AcidError::Remote`] if a system tag is present, otherwise
    /// whatever [`Acid::validate`] returns.
    pub fn validate_local(&self) -> Result<(), AcidError> {
        if self.is_remote() {
            return Err(AcidError::Remote);
        }
        self.validate()
    }

    /// Remote system tag
    #[inline]
    #[must_use]
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    /// Area character
    #[inline]
    #[must_use]
    pub fn area(&self) -> char {
        self.area
    }

    /// Category part (without the area character)
    #[inline]
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Entry part
    #[inline]
    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Sub-entry suffix
    #[inline]
    #[must_use]
    pub fn sub(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// True if the identifier references another system
    #[inline]
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.system.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// True for identifiers reserved by the system
    #[inline]
    #[must_use]
    pub fn is_protected(&self) -> bool {
        *self == Self::system_index()
    }

    /// Area range in the form `A0-A9`
    #[must_use]
    pub fn area_range(&self) -> String {
        format!("{area}0-{area}9", area = self.area)
    }

    /// Category code in the form `AC`
    #[must_use]
    pub fn category_code(&self) -> String {
        format!("{}{}", self.area, self.category)
    }

    /// True if both identifiers live in the same area
    #[inline]
    #[must_use]
    pub fn same_area(&self, other: &Self) -> bool {
        self.area == other.area
    }

    /// True if both identifiers live in the same category
    #[inline]
    #[must_use]
    pub fn same_category(&self, other: &Self) -> bool {
        self.same_area(other) && self.category == other.category
    }
}

impl Display for Acid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(system) = &self.system {
            write!(f, "{system}.")?;
        }
        write!(f, "{}{}.{}", self.area, self.category, self.entry)?;
        if let Some(sub) = &self.sub {
            write!(f, "+{sub}")?;
        }
        Ok(())
    }
}

impl FromStr for Acid {
    type Err = AcidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Acid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Acid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Errors related to identifiers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcidError {
    /// Wrong number of `.` separated segments
    #[error("ID is expected to have 2 or 3 dot separated parts")]
    BadSeparatorCount,

    /// Character outside the charset
    #[error("ID contains invalid characters")]
    InvalidChars,

    /// A part that is present is empty
    #[error("ID has an empty {part} part")]
    EmptyPart {
        /// Name of the empty part
        part: &'static str,
    },

    /// Remote identifier where a local one is needed
    #[error("ID contains a remote when a local one is needed")]
    Remote,
}
