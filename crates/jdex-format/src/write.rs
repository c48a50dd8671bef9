//! Index file writer

use jdex_index::Index;
use std::io::{self, Write};

/// Write `index` in the index file format
///
/// Areas, categories and entries are emitted in identifier order, indented
/// by two, four and six spaces for categories, entries and metadata.
///
/// # Errors
/// The first error returned by `writer`, unchanged.
pub fn write<W: Write>(index: &Index, mut writer: W) -> io::Result<()> {
    for area in index.areas() {
        let area_name = index.area_name(&area).unwrap_or_default();
        writeln!(writer, "{} {}", area.area_range(), area_name)?;

        for category in index.categories(&area).unwrap_or_default() {
            let category_name = index.category_name(&category).unwrap_or_default();
            writeln!(writer, "  {} {}", category.category_code(), category_name)?;

            for entry in index.entries(&category).unwrap_or_default() {
                writeln!(writer, "    {} {}", entry.id, entry.name)?;

                for (key, value) in &entry.metadata {
                    writeln!(writer, "      - {key}: {value}")?;
                }
            }
        }
    }

    Ok(())
}

/// Render `index` in the index file format
#[must_use]
pub fn write_string(index: &Index) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write(index, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdex_acid::Acid;
    use jdex_index::Entry;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_new_index() {
        assert_eq!(
            write_string(&Index::new()),
            "00-09 System\n  00 Index\n    00.00 System Index\n      - Format: jdex\n"
        );
    }

    #[test]
    fn write_keeps_metadata_insertion_order() {
        let mut index = Index::new();
        let id = Acid::parse("11.10").unwrap();
        index.put_area(&id, "A").unwrap();
        index.put_category(&id, "C").unwrap();
        index
            .put_entry(
                Entry::new(id, "E")
                    .with_metadata("Zeta", "1")
                    .with_metadata("Alpha", "2"),
            )
            .unwrap();

        let text = write_string(&index);
        let zeta = text.find("- Zeta: 1").unwrap();
        let alpha = text.find("- Alpha: 2").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn write_surfaces_io_error_unwrapped() {
        let err = write(&Index::new(), FailingWriter).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
