//! Detector gap detection and cleaning.

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

/// Angular step above which two adjacent samples are separated by a gap.
///
/// Detector gaps are around 0.5 degrees while the nominal sample spacing is
/// about 0.00375 degrees.
pub const DEFAULT_GAP_THRESHOLD: f64 = 0.1;

/// Samples removed on each side of a gap.
pub const DEFAULT_SHAVE_COUNT: usize = 5;

/// Indices `i` where `angle[i + 1] - angle[i]` exceeds `gap_threshold`.
pub fn find_gaps(angle: ArrayView1<f64>, gap_threshold: f64) -> Vec<usize> {
    angle
        .iter()
        .zip(angle.iter().skip(1))
        .enumerate()
        .filter(|(_, (a, b))| *b - *a > gap_threshold)
        .map(|(i, _)| i)
        .collect()
}

/// Drop the samples next to every gap in angle-sorted `(n, 3)` data.
///
/// For a gap at index `i` the rows `i - shave_count + 1 ..= i + shave_count`
/// are removed, clamped to the array. Ranges from nearby gaps may overlap.
pub fn remove_gap_neighbors(
    data: ArrayView2<f64>,
    gap_threshold: f64,
    shave_count: usize,
) -> Array2<f64> {
    let n = data.nrows();
    let gaps = find_gaps(data.column(0), gap_threshold);
    if gaps.is_empty() || shave_count == 0 {
        return data.to_owned();
    }

    let mut keep = vec![true; n];
    for &i in &gaps {
        let first = (i + 1).saturating_sub(shave_count);
        let last = i.saturating_add(shave_count).min(n - 1);
        keep[first..=last].iter_mut().for_each(|k| *k = false);
    }

    let kept: Vec<usize> = (0..n).filter(|&i| keep[i]).collect();
    log::debug!(
        "Removed {} samples around {} gap(s)",
        n - kept.len(),
        gaps.len()
    );

    data.select(Axis(0), &kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    /// Rows with angle `x`, intensity `x` and stdev `x`.
    fn rows(angles: &[f64]) -> Array2<f64> {
        let mut data = Array2::zeros((angles.len(), 3));
        for (i, &x) in angles.iter().enumerate() {
            data.row_mut(i).fill(x);
        }
        data
    }

    #[test]
    fn test_find_gaps() {
        let angle = array![0.0, 0.05, 0.1, 0.7, 0.75, 1.5];
        assert_eq!(find_gaps(angle.view(), 0.1), vec![2, 4]);
    }

    #[test]
    fn test_find_gaps_short_input() {
        assert!(find_gaps(Array1::<f64>::zeros(0).view(), 0.1).is_empty());
        assert!(find_gaps(array![1.0].view(), 0.1).is_empty());
    }

    #[test]
    fn test_no_gaps_is_identity() {
        let angles: Vec<f64> = (0..50).map(|i| i as f64 * 0.05).collect();
        let data = rows(&angles);

        let cleaned = remove_gap_neighbors(data.view(), DEFAULT_GAP_THRESHOLD, DEFAULT_SHAVE_COUNT);
        assert_eq!(cleaned, data);
    }

    #[test]
    fn test_single_gap_shaved() {
        // 0..=9 then a jump, then 20..=29
        let angles: Vec<f64> = (0..10).chain(20..30).map(|i| i as f64 * 0.05).collect();
        let data = rows(&angles);

        let cleaned = remove_gap_neighbors(data.view(), 0.1, 3);
        let kept: Vec<f64> = cleaned.column(0).to_vec();

        // Gap at index 9: rows 7..=12 go.
        let expected: Vec<f64> = (0..7).chain(23..30).map(|i| i as f64 * 0.05).collect();
        assert_eq!(kept, expected);
        assert_eq!(cleaned.ncols(), 3);
    }

    #[test]
    fn test_gap_near_edges_is_clamped() {
        let data = rows(&[0.0, 1.0, 1.05, 1.1, 1.15, 1.2, 1.25, 1.3, 1.35, 2.5]);

        let cleaned = remove_gap_neighbors(data.view(), 0.1, 2);
        assert_eq!(cleaned.column(0).to_vec(), vec![1.1, 1.15, 1.2, 1.25]);
    }

    #[test]
    fn test_overlapping_ranges_coalesce() {
        let data = rows(&[0.0, 0.05, 0.1, 0.15, 0.5, 0.55, 1.0, 1.05, 1.1, 1.15]);

        let cleaned = remove_gap_neighbors(data.view(), 0.1, 2);
        // Gaps at 3 and 5: rows 2..=5 and 4..=7 removed.
        assert_eq!(cleaned.column(0).to_vec(), vec![0.0, 0.05, 1.1, 1.15]);
    }

    #[test]
    fn test_huge_shave_count_clears_everything() {
        let data = rows(&[0.0, 0.05, 1.0, 1.05]);

        let cleaned = remove_gap_neighbors(data.view(), 0.1, usize::MAX);
        assert_eq!(cleaned.shape(), &[0, 3]);
    }

    #[test]
    fn test_zero_shave_keeps_everything() {
        let data = rows(&[0.0, 1.0, 2.0]);
        assert_eq!(remove_gap_neighbors(data.view(), 0.1, 0), data);
    }

    #[test]
    fn test_empty_input() {
        let data = Array2::<f64>::zeros((0, 3));
        let cleaned = remove_gap_neighbors(data.view(), 0.1, 5);
        assert_eq!(cleaned.shape(), &[0, 3]);
    }
}
