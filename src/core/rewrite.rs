//! Ordered, non-overlapping text replacement.

use std::ops::Range;

use thiserror::Error;

/// One replacement of a byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl Edit {
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    #[error("edits {first:?} and {second:?} overlap")]
    Overlap {
        first: Range<usize>,
        second: Range<usize>,
    },
    #[error("edit {range:?} is outside the document (length {len})")]
    OutOfBounds { range: Range<usize>, len: usize },
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

/// Apply `edits` to `text`.
///
/// Edits are validated up front and applied from the highest start offset
/// down, so every pending edit still addresses the original text. Two edits
/// may touch at a boundary but may not share any byte, and two empty edits may
/// not share an offset.
pub fn rewrite(text: &str, edits: &[Edit]) -> Result<String, RewriteError> {
    if edits.is_empty() {
        return Ok(text.to_string());
    }

    for edit in edits {
        if edit.range.start > edit.range.end || edit.range.end > text.len() {
            return Err(RewriteError::OutOfBounds {
                range: edit.range.clone(),
                len: text.len(),
            });
        }
        for offset in [edit.range.start, edit.range.end] {
            if !text.is_char_boundary(offset) {
                return Err(RewriteError::NotCharBoundary { offset });
            }
        }
    }

    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by(|a, b| b.range.start.cmp(&a.range.start).then(b.range.end.cmp(&a.range.end)));

    for pair in ordered.windows(2) {
        let (later, earlier) = (pair[0], pair[1]);
        let same_point = later.range.start == earlier.range.start
            && later.range.is_empty()
            && earlier.range.is_empty();
        if earlier.range.end > later.range.start || same_point {
            return Err(RewriteError::Overlap {
                first: earlier.range.clone(),
                second: later.range.clone(),
            });
        }
    }

    let mut result = text.to_string();
    for edit in ordered {
        result.replace_range(edit.range.clone(), &edit.replacement);
    }
    Ok(result)
}
