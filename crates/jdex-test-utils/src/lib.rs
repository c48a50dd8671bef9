//! Testing utilities for the jdex workspace
//!
//! Shared fixtures: a small "Life Admin" index, both as an [`Index`] and as
//! the commented file text that reads back to it.

#![allow(missing_docs)]

use jdex_acid::Acid;
use jdex_index::{Entry, Index};

/// Index file text equivalent to [`sample_index`]
pub const SAMPLE_INDEX_TEXT: &str = "\
// Personal index
00-09 System
  00 Index
    00.00 System Index

10-19 Life Admin
  11 Me & Other Living Things
    11.10 Personal Records
      - Location: Proton Drive
    11.11 Birth Certs & Proof of Name // originals in the safe
      - Location: Proton Drive
    11.20 Physical Health & Wellbeing
    11.21 Health Insurance & Claims
  /* Everything about
     the house itself */
  12 Household
    12.10 Home Records
    12.11 Official Documents
    12.12 Home Insurance
    12.12+SNX Home Insurance (Southern Cross)
    12.13 Moving
      - Location: Google Sheets
";

/// Parse `text`, panicking on a malformed ID
pub fn acid(text: &str) -> Acid {
    Acid::parse(text).unwrap_or_else(|err| panic!("bad test ID {text:?}: {err}"))
}

pub fn sample_index() -> Index {
    let mut index = Index::new();

    let area = acid("10.00");
    index.put_area(&area, "Life Admin").unwrap();

    index
        .put_category(&acid("11.00"), "Me & Other Living Things")
        .unwrap();
    index.put_category(&acid("12.00"), "Household").unwrap();

    let entries = [
        Entry::new(acid("11.10"), "Personal Records").with_metadata("Location", "Proton Drive"),
        Entry::new(acid("11.11"), "Birth Certs & Proof of Name")
            .with_metadata("Location", "Proton Drive"),
        Entry::new(acid("11.20"), "Physical Health & Wellbeing"),
        Entry::new(acid("11.21"), "Health Insurance & Claims"),
        Entry::new(acid("12.10"), "Home Records"),
        Entry::new(acid("12.11"), "Official Documents"),
        Entry::new(acid("12.12"), "Home Insurance"),
        Entry::new(acid("12.12+SNX"), "Home Insurance (Southern Cross)"),
        Entry::new(acid("12.13"), "Moving").with_metadata("Location", "Google Sheets"),
    ];

    for entry in entries {
        index.put_entry(entry).unwrap();
    }

    index
}
