//! Interleave-and-dedupe combination of two scans.

use ndarray::{Array2, ArrayView2, ErrorKind, ShapeError};

use crate::data::DataSet;

/// Merge two arrays with the same column count into one angle-sorted array.
///
/// Rows of `first` are placed before rows of `second` and then stably sorted
/// by angle (column 0). A row is dropped when its angle is not strictly
/// greater than the previous row's, so on equal angles the row from `first`
/// survives. Values are never averaged.
///
/// Fails with [`ErrorKind::IncompatibleShape`] when the column counts differ.
pub fn merge_arrays(
    first: ArrayView2<f64>,
    second: ArrayView2<f64>,
) -> Result<Array2<f64>, ShapeError> {
    if first.ncols() != second.ncols() {
        return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape));
    }
    Ok(merge_rows(first, second))
}

/// Angle used for ordering; `-0.0` and `0.0` compare equal.
#[inline]
fn sort_key(angle: f64) -> f64 {
    if angle == 0.0 {
        0.0
    } else {
        angle
    }
}

/// Merge for arrays whose column counts are already known to agree.
pub(crate) fn merge_rows(first: ArrayView2<f64>, second: ArrayView2<f64>) -> Array2<f64> {
    let split = first.nrows();
    let value = |i: usize, c: usize| {
        if i < split {
            first[[i, c]]
        } else {
            second[[i - split, c]]
        }
    };

    let mut order: Vec<usize> = (0..split + second.nrows()).collect();
    // `sort_by` is stable, which keeps `first` ahead of `second` on ties.
    order.sort_by(|&a, &b| sort_key(value(a, 0)).total_cmp(&sort_key(value(b, 0))));
    order.dedup_by(|later, earlier| value(*later, 0) - value(*earlier, 0) <= 0.0);

    Array2::from_shape_fn((order.len(), first.ncols()), |(r, c)| value(order[r], c))
}

/// Merge two datasets, giving `d1`'s samples priority on identical angles.
pub fn merge(d1: &DataSet, d2: &DataSet) -> Array2<f64> {
    merge_rows(d1.to_array().view(), d2.to_array().view())
}
