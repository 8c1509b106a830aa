//! Detector positions and the naming convention that links partner scans.
//!
//! Scan files carry their detector placement in the stem, e.g.
//! `ds1_0000_p1_0000`. Two placements that cover each other's angular gaps
//! are merge partners; combining them yields a higher-order position.

pub mod token;

pub use token::PositionToken;

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Detector placement that produced a scan.
///
/// Variants are declared in ascending code order, which is both the search
/// order used when parsing names and the ordering used to pick the primary
/// dataset of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    P1,
    P2,
    P3,
    P4,
    P12,
    P34,
    P1234,
}

impl Position {
    /// All positions in search order.
    pub const ALL: [Position; 7] = [
        Position::P1,
        Position::P2,
        Position::P3,
        Position::P4,
        Position::P12,
        Position::P34,
        Position::P1234,
    ];

    /// The numeric code as it appears in file names.
    pub fn code(&self) -> &'static str {
        match self {
            Position::P1 => "1",
            Position::P2 => "2",
            Position::P3 => "3",
            Position::P4 => "4",
            Position::P12 => "12",
            Position::P34 => "34",
            Position::P1234 => "1234",
        }
    }

    /// The other member of this position's merge pair, if any.
    pub fn partner(&self) -> Option<Position> {
        MergePartners::containing(*self).map(|pair| {
            let (a, b) = pair.pair();
            if a == *self {
                b
            } else {
                a
            }
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.code())
    }
}

/// The closed set of position pairs that may be combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergePartners {
    /// P1 + P2.
    P12,
    /// P3 + P4.
    P34,
    /// P12 + P34.
    P1234,
}

impl MergePartners {
    pub const ALL: [MergePartners; 3] =
        [MergePartners::P12, MergePartners::P34, MergePartners::P1234];

    /// The two positions of the pair, lower first.
    pub fn pair(&self) -> (Position, Position) {
        match self {
            MergePartners::P12 => (Position::P1, Position::P2),
            MergePartners::P34 => (Position::P3, Position::P4),
            MergePartners::P1234 => (Position::P12, Position::P34),
        }
    }

    /// Position assigned to the combined dataset.
    pub fn resulting_position(&self) -> Position {
        match self {
            MergePartners::P12 => Position::P12,
            MergePartners::P34 => Position::P34,
            MergePartners::P1234 => Position::P1234,
        }
    }

    /// The pair a position belongs to.
    pub fn containing(position: Position) -> Option<MergePartners> {
        match position {
            Position::P1 | Position::P2 => Some(MergePartners::P12),
            Position::P3 | Position::P4 => Some(MergePartners::P34),
            Position::P12 | Position::P34 => Some(MergePartners::P1234),
            Position::P1234 => None,
        }
    }

    /// The pair formed by `a` and `b`, in either order.
    pub fn of(a: Position, b: Position) -> Option<MergePartners> {
        MergePartners::containing(a)
            .filter(|pair| a != b && MergePartners::containing(b) == Some(*pair))
    }
}

/// Errors raised while resolving positions and partners.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    #[error("Cannot determine detector position of dataset '{0}'")]
    Unresolved(String),
    #[error("Position {0} has no merge partner")]
    NoPartner(Position),
    #[error("Positions {} and {} are not merge partners", .0.code(), .1.code())]
    Incompatible(Position, Position),
    #[error("Dataset '{0}' has no source path to derive a partner path from")]
    MissingSource(String),
}

/// Sibling path of `source` whose stem is replaced by `stem`, keeping the extension.
pub(crate) fn sibling_path(source: &std::path::Path, stem: &str) -> PathBuf {
    let file_name = match source.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_string(),
    };
    source.with_file_name(file_name)
}
