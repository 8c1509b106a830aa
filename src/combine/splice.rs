//! Gap-aware combination of a partner pair.

use ndarray::{Array2, Axis};

use super::gaps::{find_gaps, remove_gap_neighbors};
use super::merge::merge_rows;
use super::CombineOptions;
use crate::data::DataSet;
use crate::position::{MergePartners, Position, PositionError};

/// Tag inserted after the position code of a spliced dataset's name.
pub const SPLICE_TAG: &str = "s";

/// Resolve a partner pair, returning it as `(primary, secondary, pair)`.
///
/// The primary dataset is the one with the lower position, so the result
/// does not depend on argument order.
pub(crate) fn order_pair<'a>(
    a: &'a DataSet,
    b: &'a DataSet,
) -> Result<(&'a DataSet, &'a DataSet, MergePartners), PositionError> {
    let pa = resolve(a)?;
    let pb = resolve(b)?;
    let pair = MergePartners::of(pa, pb).ok_or(PositionError::Incompatible(pa, pb))?;

    if pa < pb {
        Ok((a, b, pair))
    } else {
        Ok((b, a, pair))
    }
}

fn resolve(dataset: &DataSet) -> Result<Position, PositionError> {
    dataset
        .position()
        .ok_or_else(|| PositionError::Unresolved(dataset.name().to_string()))
}

/// Name of the dataset produced by combining `primary` into `pair`'s result.
pub(crate) fn combined_name(primary: &DataSet, pair: MergePartners, tag: &str) -> String {
    match primary.position_token() {
        Some(token) => token.with_combined(primary.name(), pair.resulting_position(), tag),
        None => primary.name().to_string(),
    }
}

/// Splice a partner pair with the default gap settings.
pub fn splice(a: &DataSet, b: &DataSet) -> Result<DataSet, PositionError> {
    splice_with(a, b, &CombineOptions::default())
}

/// Splice a partner pair.
///
/// Both scans are gap-cleaned. The primary scan is kept as is outside its
/// gaps; each gap is filled with the secondary samples lying strictly inside
/// it. The result is named after the primary with its position token
/// rewritten to the combined position and tagged `s`.
pub fn splice_with(
    a: &DataSet,
    b: &DataSet,
    options: &CombineOptions,
) -> Result<DataSet, PositionError> {
    let (primary, secondary, pair) = order_pair(a, b)?;

    let base = remove_gap_neighbors(
        primary.to_array().view(),
        options.gap_threshold,
        options.shave_count,
    );
    let patch = remove_gap_neighbors(
        secondary.to_array().view(),
        options.gap_threshold,
        options.shave_count,
    );

    let patch_angle = patch.column(0);
    let mut result = base.clone();
    for i in find_gaps(base.column(0), options.gap_threshold) {
        let (low, high) = (base[[i, 0]], base[[i + 1, 0]]);
        let inside: Vec<usize> = patch_angle
            .iter()
            .enumerate()
            .filter(|(_, &x)| x > low && x < high)
            .map(|(j, _)| j)
            .collect();

        log::debug!(
            "Patching gap {low:.4}..{high:.4} of {} with {} samples from {}",
            primary.name(),
            inside.len(),
            secondary.name()
        );

        let segment: Array2<f64> = patch.select(Axis(0), &inside);
        result = merge_rows(result.view(), segment.view());
    }

    let name = combined_name(primary, pair, SPLICE_TAG);
    let spliced = DataSet::from_columns(name, result.view());

    log::info!(
        "Spliced {} and {} into {} ({} samples)",
        primary.name(),
        secondary.name(),
        spliced.name(),
        spliced.len()
    );
    Ok(spliced)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scan over `start..end` in `step` increments with a hole `hole.0..hole.1`.
    fn scan(name: &str, start: f64, end: f64, step: f64, hole: (f64, f64), level: f64) -> DataSet {
        let n = ((end - start) / step).round() as usize;
        let angle: Vec<f64> = (0..=n)
            .map(|i| start + i as f64 * step)
            .filter(|x| *x <= hole.0 + 1e-9 || *x >= hole.1 - 1e-9)
            .collect();
        let len = angle.len();
        DataSet::new(name, angle, vec![level; len], vec![level.sqrt(); len]).unwrap()
    }

    fn empty(name: &str) -> DataSet {
        DataSet::new(name, vec![], vec![], vec![]).unwrap()
    }

    #[test]
    fn test_splice_empty_named_pair() {
        let result = splice(&empty("ds1_0000_p1_0000"), &empty("ds1_0000_p2_0000")).unwrap();

        assert_eq!(result.name(), "ds1_0000_p12_s_0000");
        assert!(result.is_empty());
        assert!(result.source().is_none());
        assert_eq!(result.position(), Some(Position::P12));
    }

    #[test]
    fn test_splice_unresolved_names_offender() {
        let err = splice(&empty("foo_bar"), &empty("foo_p1_bar")).unwrap_err();
        assert_eq!(err, PositionError::Unresolved("foo_bar".to_string()));
        assert!(err.to_string().contains("foo_bar"));
    }

    #[test]
    fn test_splice_incompatible_positions() {
        let err = splice(&empty("foo_p1_bar"), &empty("foo_p3_bar")).unwrap_err();
        assert_eq!(err, PositionError::Incompatible(Position::P1, Position::P3));

        let msg = err.to_string();
        assert!(msg.contains('1'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_splice_same_position_rejected() {
        let err = splice(&empty("a_p2_0"), &empty("b_p2_0")).unwrap_err();
        assert_eq!(err, PositionError::Incompatible(Position::P2, Position::P2));
    }

    #[test]
    fn test_splice_fills_gap_from_secondary() {
        let primary = scan("run_p1_0001", 0.0, 4.0, 0.05, (1.5, 2.0), 100.0);
        let secondary = scan("run_p2_0001", 0.0, 4.0, 0.05, (3.0, 3.5), 200.0);

        let spliced = splice(&primary, &secondary).unwrap();
        assert_eq!(spliced.name(), "run_p12_s_0001");

        let angle = spliced.angle();
        assert!(angle.windows(2).all(|w| w[1] > w[0]));
        assert!(find_gaps(ndarray::ArrayView1::from(angle), 0.1).is_empty());

        // Outside the shaved gap every sample comes from the primary scan.
        for (x, y) in angle.iter().zip(spliced.intensity()) {
            let in_primary_hole = *x > 1.25 + 1e-9 && *x < 2.25 - 1e-9;
            let expected = if in_primary_hole { 200.0 } else { 100.0 };
            assert_eq!(*y, expected, "angle {x}");
        }
    }

    #[test]
    fn test_splice_is_order_independent() {
        let primary = scan("run_P3_0002", 10.0, 14.0, 0.05, (11.0, 11.5), 5.0);
        let secondary = scan("run_P4_0002", 10.0, 14.0, 0.05, (12.5, 13.0), 7.0);

        let forward = splice(&primary, &secondary).unwrap();
        let backward = splice(&secondary, &primary).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward.name(), "run_P34_s_0002");
    }

    #[test]
    fn test_splice_without_gaps_keeps_primary() {
        let primary = scan("x_p12_s_0", 0.0, 1.0, 0.05, (2.0, 2.0), 1.0);
        let secondary = scan("x_p34_s_0", 0.0, 1.0, 0.05, (2.0, 2.0), 2.0);

        let spliced = splice(&secondary, &primary).unwrap();
        assert_eq!(spliced.name(), "x_p1234_s_s_0");
        assert_eq!(spliced.angle(), primary.angle());
        assert_eq!(spliced.intensity(), primary.intensity());
    }

    #[test]
    fn test_splice_custom_options() {
        let primary = scan("run_p1_0003", 0.0, 4.0, 0.05, (1.5, 2.0), 1.0);
        let secondary = scan("run_p2_0003", 0.0, 4.0, 0.05, (3.0, 3.5), 2.0);
        let options = CombineOptions {
            gap_threshold: 0.1,
            shave_count: 0,
        };

        let spliced = splice_with(&primary, &secondary, &options).unwrap();
        // Hole 1.5..2.0 holds 9 secondary samples strictly inside it.
        assert_eq!(spliced.len(), primary.len() + 9);
    }
}
