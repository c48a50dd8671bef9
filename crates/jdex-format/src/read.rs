//! Index file reader
//!
//! Reading is a fold over the lines of the input. The accumulator,
//! [`ReadState`], carries whether a block comment is still open and the most
//! recently declared area, category or entry. Declarations are checked
//! against that context so that every category sits under its area, every
//! entry under its category and every metadata line under an entry.

use crate::error::{LineError, ReadError};
use crate::lines::{classify, strip_comments, Line};
use jdex_acid::Acid;
use jdex_index::{Entry, Index};
use std::io::{BufRead, BufReader, Read};

/// Read an index file
///
/// The returned index always contains the system index entry. Reading stops
/// at the first offending line.
///
/// # Errors
/// [`ReadError::Line`] naming the 1-based line number and its cause, or
/// [`ReadError::Io`] naming the line at which the stream failed, including
/// lines that are not valid UTF-8.
pub fn read<R: Read>(reader: R) -> Result<Index, ReadError> {
    let mut index = Index::new();

    BufReader::new(reader)
        .lines()
        .enumerate()
        .try_fold(ReadState::default(), |state, (number, line)| {
            let line = line.map_err(|source| ReadError::Io {
                line: number + 1,
                source,
            })?;

            state
                .advance(&mut index, &line)
                .map_err(|source| ReadError::Line {
                    line: number + 1,
                    source,
                })
        })?;

    Ok(index)
}

/// Read an index file held in memory
///
/// # Errors
/// See [`read`].
pub fn read_str(text: &str) -> Result<Index, ReadError> {
    read(text.as_bytes())
}

/// State carried from one line to the next
#[derive(Debug, Default)]
struct ReadState {
    in_block_comment: bool,
    context: Context,
}

/// Most recent declaration
#[derive(Debug, Default)]
enum Context {
    #[default]
    Start,
    Area(Acid),
    Category(Acid),
    Entry(Entry),
}

impl Context {
    fn id(&self) -> Option<&Acid> {
        match self {
            Self::Start => None,
            Self::Area(id) | Self::Category(id) => Some(id),
            Self::Entry(entry) => Some(&entry.id),
        }
    }

    fn describe(&self, view: fn(&Acid) -> String) -> String {
        self.id().map_or_else(|| "nothing".to_string(), view)
    }
}

impl ReadState {
    /// Consume one raw line
    fn advance(self, index: &mut Index, raw: &str) -> Result<Self, LineError> {
        let (text, in_block_comment) = strip_comments(raw, self.in_block_comment);

        let context = if text.is_empty() {
            self.context
        } else {
            apply_line(index, &text, self.context)?
        };

        Ok(Self {
            in_block_comment,
            context,
        })
    }
}

fn apply_line(index: &mut Index, text: &str, context: Context) -> Result<Context, LineError> {
    let line = classify(text).ok_or_else(|| LineError::UnrecognizedLine(text.to_string()))?;

    match line {
        Line::Area {
            range,
            first,
            last,
            name,
        } => {
            if first != last {
                return Err(LineError::AreaRangeMismatch(range.to_string()));
            }

            let id = Acid::for_area(first);
            index.put_area(&id, name)?;
            Ok(Context::Area(id))
        }

        Line::Category {
            code,
            area,
            category,
            name,
        } => {
            if context.id().map(Acid::area) != Some(area) {
                return Err(LineError::orphaned_category(
                    code,
                    context.describe(Acid::area_range),
                ));
            }

            let id = Acid::for_category(area, category);
            index.put_category(&id, name)?;
            Ok(Context::Category(id))
        }

        Line::Entry { id: id_text, name } => {
            let id = Acid::parse(id_text)?;

            if !context.id().is_some_and(|current| current.same_category(&id)) {
                return Err(LineError::orphaned_entry(
                    id_text,
                    context.describe(Acid::category_code),
                ));
            }

            // The bootstrapped system index is authoritative; its line only
            // establishes context.
            if id.is_protected() {
                return Ok(Context::Entry(index.entry(&id)?.clone()));
            }

            let entry = Entry::new(id, name);
            index.put_entry(entry.clone())?;
            Ok(Context::Entry(entry))
        }

        Line::Metadata { key, value } => {
            let Context::Entry(mut entry) = context else {
                return Err(LineError::MetadataWithoutEntry);
            };

            if !entry.id.is_protected() {
                entry.metadata.insert(key.to_string(), value.to_string());
                index.put_entry(entry.clone())?;
            }

            Ok(Context::Entry(entry))
        }
    }
}
