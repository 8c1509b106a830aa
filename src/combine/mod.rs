//! Combination of partner scans into one continuous sweep.

pub mod gaps;
pub mod merge;
pub mod splice;

pub use gaps::{find_gaps, remove_gap_neighbors, DEFAULT_GAP_THRESHOLD, DEFAULT_SHAVE_COUNT};
pub use merge::{merge, merge_arrays};
pub use splice::{splice, splice_with, SPLICE_TAG};

use serde::{Deserialize, Serialize};

use crate::data::DataSet;
use crate::position::PositionError;

/// Tag inserted after the position code of a merged dataset's name.
pub const MERGE_TAG: &str = "m";

/// How a partner pair is combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMethod {
    /// Keep the primary scan and patch its gaps from the secondary.
    #[default]
    Splice,
    /// Interleave both scans and drop repeated angles.
    Merge,
}

impl CombineMethod {
    /// Tag used in the combined dataset's name.
    pub fn tag(&self) -> &'static str {
        match self {
            CombineMethod::Splice => SPLICE_TAG,
            CombineMethod::Merge => MERGE_TAG,
        }
    }
}

/// Gap handling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CombineOptions {
    pub gap_threshold: f64,
    pub shave_count: usize,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            shave_count: DEFAULT_SHAVE_COUNT,
        }
    }
}

/// Combine a partner pair with the given method.
///
/// Merging cleans both scans the same way splicing does, then interleaves
/// them with the primary scan's samples winning on identical angles.
pub fn combine(
    a: &DataSet,
    b: &DataSet,
    method: CombineMethod,
    options: &CombineOptions,
) -> Result<DataSet, PositionError> {
    match method {
        CombineMethod::Splice => splice_with(a, b, options),
        CombineMethod::Merge => {
            let (primary, secondary, pair) = splice::order_pair(a, b)?;
            let clean = |ds: &DataSet| {
                remove_gap_neighbors(
                    ds.to_array().view(),
                    options.gap_threshold,
                    options.shave_count,
                )
            };
            let merged = merge::merge_rows(clean(primary).view(), clean(secondary).view());
            let name = splice::combined_name(primary, pair, MERGE_TAG);

            log::info!(
                "Merged {} and {} into {} ({} samples)",
                primary.name(),
                secondary.name(),
                name,
                merged.nrows()
            );
            Ok(DataSet::from_columns(name, merged.view()))
        }
    }
}
