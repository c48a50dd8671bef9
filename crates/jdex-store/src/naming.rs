//! Directory and file names derived from the index

use jdex_index::Entry;

/// File inside every entry directory; the system index entry's copy is the
/// index file itself
pub const ENTRY_INDEX_FILE_NAME: &str = "Index.txt";

/// Characters that are unsafe in file names on common filesystems
const UNSAFE_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '$', '*'];

/// Replace characters unsafe in file names with `_`
#[must_use]
pub fn sanitize_file_name(text: &str) -> String {
    text.chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Directory name of an entry, `"<id> <name>"`
#[must_use]
pub fn entry_dir_name(entry: &Entry) -> String {
    format!("{} {}", entry.id, sanitize_file_name(&entry.name))
}
