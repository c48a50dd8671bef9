//! Line preprocessing and classification
//!
//! Comment stripping works on one line at a time given whether a block
//! comment is still open. Classification is a fixed list of rules, each a
//! pure function that either extracts the parts of its line shape or
//! declines; the first rule that accepts a line wins.

use jdex_acid::is_acid_char;

/// A significant line, split into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// `X0-Y9 Name`
    Area {
        range: &'a str,
        first: char,
        last: char,
        name: &'a str,
    },

    /// `AC Name`
    Category {
        code: &'a str,
        area: char,
        category: &'a str,
        name: &'a str,
    },

    /// `AC.ID[+SUB] Name`
    Entry { id: &'a str, name: &'a str },

    /// `- Key: Value`
    Metadata { key: &'a str, value: &'a str },
}

type Rule = fn(&str) -> Option<Line<'_>>;

const RULES: [Rule; 4] = [area_line, category_line, entry_line, metadata_line];

/// Classify a trimmed, comment-free, non-empty line
pub(crate) fn classify(line: &str) -> Option<Line<'_>> {
    RULES.iter().find_map(|rule| rule(line))
}

/// Remove comments from `line`
///
/// Returns the trimmed remainder and whether a block comment is open at the
/// end of the line.
pub(crate) fn strip_comments(line: &str, mut in_block: bool) -> (String, bool) {
    let line = line.trim();
    let mut rest = line.find("//").map_or(line, |start| &line[..start]);
    let mut kept = String::with_capacity(rest.len());

    loop {
        if in_block {
            let Some(end) = rest.find("*/") else { break };
            rest = &rest[end + 2..];
            in_block = false;
        } else if let Some(start) = rest.find("/*") {
            kept.push_str(&rest[..start]);
            rest = &rest[start + 2..];
            in_block = true;
        } else {
            kept.push_str(rest);
            break;
        }
    }

    (kept.trim().to_string(), in_block)
}

/// Split `CODE  Name` at the first run of whitespace
fn code_and_name(line: &str) -> Option<(&str, &str)> {
    let (code, name) = line.split_once(char::is_whitespace)?;
    let name = name.trim_start();

    (!code.is_empty() && !name.is_empty()).then_some((code, name))
}

fn area_line(line: &str) -> Option<Line<'_>> {
    let (range, name) = code_and_name(line)?;
    let chars: Vec<char> = range.chars().collect();

    match chars.as_slice() {
        &[first, '0', '-', last, '9'] if is_acid_char(first) && is_acid_char(last) => {
            Some(Line::Area {
                range,
                first,
                last,
                name,
            })
        }
        _ => None,
    }
}

fn category_line(line: &str) -> Option<Line<'_>> {
    let (code, name) = code_and_name(line)?;
    if !code.chars().all(is_acid_char) {
        return None;
    }

    let mut chars = code.chars();
    let area = chars.next()?;
    let category = chars.as_str();
    if category.is_empty() {
        return None;
    }

    Some(Line::Category {
        code,
        area,
        category,
        name,
    })
}

fn entry_line(line: &str) -> Option<Line<'_>> {
    let (id, name) = code_and_name(line)?;
    if !id.chars().all(|c| is_acid_char(c) || c == '.' || c == '+') {
        return None;
    }

    Some(Line::Entry { id, name })
}

fn metadata_line(line: &str) -> Option<Line<'_>> {
    let (key, value) = line.strip_prefix('-')?.split_once(':')?;
    let (key, value) = (key.trim(), value.trim());

    (!key.is_empty() && !value.is_empty()).then_some(Line::Metadata { key, value })
}
