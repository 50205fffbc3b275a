//! Line-oriented journal format of the JSON store
//!
//! The store file is JSON Lines: a header entry, then one entry per
//! mutation. Appending a version writes a single line, so the cost of a
//! push does not grow with the size of the store. Replaying the lines in
//! order rebuilds the [`Collection`].
//!
//! ```text
//! {"header":{"format":1}}
//! {"append":{"project":"notes","path":"a.md","version":1,...}}
//! {"delete":{"project":"notes","path":"a.md"}}
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::collection::Collection;
use crate::model::Document;
use crate::Result;

/// Current journal format
pub const FORMAT_VERSION: u32 = 1;

/// One line of the journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry<'a> {
    Header { format: u32 },
    Append(Cow<'a, Document>),
    Delete { project: Cow<'a, str>, path: Cow<'a, str> },
}

impl Entry<'_> {
    /// Serialized line including the trailing newline.
    pub fn to_line(&self) -> Result<Vec<u8>> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}

/// Outcome of reading a journal.
#[derive(Debug, Default)]
pub struct Replay {
    pub collection: Collection,
    /// Delete entries seen; their appends are dead weight in the file.
    pub deletes: usize,
    /// The file does not end on a line boundary, as left by an interrupted append.
    pub unterminated: bool,
}

impl Replay {
    /// Whether the file should be rewritten from the replayed collection.
    pub fn needs_compaction(&self) -> bool {
        self.deletes > 0 || self.unterminated
    }
}

/// Rebuild a collection from journal text.
///
/// An unterminated final line after the header that does not parse is the
/// remains of an interrupted append and is dropped. Any other malformed line fails the
/// replay with a message naming its line number.
pub fn replay(content: &str) -> std::result::Result<Replay, String> {
    let mut replay = Replay::default();
    let mut saw_header = false;
    let terminated = content.is_empty() || content.ends_with('\n');
    replay.unterminated = !terminated;
    let lines: Vec<&str> = content.lines().collect();

    for (idx, line) in lines.iter().enumerate() {
        let lineno = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let entry: Entry<'static> = match serde_json::from_str(line) {
            Ok(entry) => entry,
            Err(e) if saw_header && !terminated && lineno == lines.len() => {
                tracing::warn!(line = lineno, error = %e, "Dropping incomplete journal entry");
                break;
            }
            Err(e) => return Err(format!("line {}: {}", lineno, e)),
        };

        match entry {
            Entry::Header { format } if !saw_header => {
                if format != FORMAT_VERSION {
                    return Err(format!("unsupported store format {}", format));
                }
                saw_header = true;
            }
            Entry::Header { .. } => return Err(format!("line {}: repeated header", lineno)),
            _ if !saw_header => return Err(format!("line {}: missing header", lineno)),
            Entry::Append(document) => replay
                .collection
                .insert(document.into_owned())
                .map_err(|e| format!("line {}: {}", lineno, e))?,
            Entry::Delete { project, path } => {
                replay.collection.delete_chain(&project, &path);
                replay.deletes += 1;
            }
        }
    }

    Ok(replay)
}

/// Journal text holding exactly the documents of `collection`.
pub fn snapshot(collection: &Collection) -> Result<Vec<u8>> {
    let mut out = Entry::Header {
        format: FORMAT_VERSION,
    }
    .to_line()?;
    for document in collection.documents() {
        out.extend(Entry::Append(Cow::Borrowed(document)).to_line()?);
    }
    Ok(out)
}
