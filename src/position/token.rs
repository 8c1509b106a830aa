//! Position token parsing.

use super::Position;

/// Location of a `_p<code>_` token inside a dataset name.
///
/// Parsed once per name; renames are span edits on the original string so
/// the case of the `p` prefix and all surrounding characters are preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionToken {
    /// Resolved position.
    pub position: Position,
    /// Byte offset of the leading underscore.
    pub start: usize,
    /// Byte offset just past the trailing underscore.
    pub end: usize,
    /// The prefix character as written, `p` or `P`.
    pub prefix: char,
}

impl PositionToken {
    /// Find the position token in `name`.
    ///
    /// Positions are tried in declaration order and the first one whose
    /// token occurs anywhere in the name wins.
    pub fn parse(name: &str) -> Option<Self> {
        // ASCII lowering keeps byte offsets aligned with `name`.
        let lower = name.to_ascii_lowercase();

        Position::ALL.iter().find_map(|&position| {
            let needle = format!("_p{}_", position.code());
            lower.find(&needle).map(|start| {
                let prefix = if name.as_bytes()[start + 1] == b'P' { 'P' } else { 'p' };
                PositionToken {
                    position,
                    start,
                    end: start + needle.len(),
                    prefix,
                }
            })
        })
    }

    /// Byte range of the numeric code.
    fn code_range(&self) -> std::ops::Range<usize> {
        self.start + 2..self.end - 1
    }

    /// `name` with the position code replaced by `position`'s code.
    pub fn with_position(&self, name: &str, position: Position) -> String {
        let range = self.code_range();
        format!("{}{}{}", &name[..range.start], position.code(), &name[range.end..])
    }

    /// `name` with the whole token replaced by `_<prefix><code>_<tag>_`.
    pub fn with_combined(&self, name: &str, position: Position, tag: &str) -> String {
        format!(
            "{}_{}{}_{}_{}",
            &name[..self.start],
            self.prefix,
            position.code(),
            tag,
            &name[self.end..]
        )
    }
}
