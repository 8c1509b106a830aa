//! Diffraction scan data structure.

use std::path::{Path, PathBuf};

use ndarray::{Array2, ArrayView2, Axis};
use thiserror::Error;

use crate::position::{sibling_path, Position, PositionError, PositionToken};

/// Number of columns in the array projection (angle, intensity, stdev).
pub const COLUMNS: usize = 3;

/// One detector scan: angle, intensity and intensity uncertainty.
///
/// Fields are private so the three arrays always have the same length and
/// the cached position token always matches the name.
#[derive(Clone, Debug, PartialEq)]
pub struct DataSet {
    name: String,
    angle: Vec<f64>,
    intensity: Vec<f64>,
    intensity_stdev: Vec<f64>,
    source: Option<PathBuf>,
    token: Option<PositionToken>,
}

impl DataSet {
    /// Create a new dataset.
    pub fn new(
        name: impl Into<String>,
        angle: Vec<f64>,
        intensity: Vec<f64>,
        intensity_stdev: Vec<f64>,
    ) -> Result<Self, DataSetError> {
        let len = angle.len();
        if intensity.len() != len || intensity_stdev.len() != len {
            return Err(DataSetError::LengthMismatch {
                angle_len: len,
                intensity_len: intensity.len(),
                stdev_len: intensity_stdev.len(),
            });
        }

        let name = name.into();
        let token = PositionToken::parse(&name);

        Ok(Self {
            name,
            angle,
            intensity,
            intensity_stdev,
            source: None,
            token,
        })
    }

    /// Create from an `(n, 3)` array of angle, intensity, stdev rows.
    pub fn from_array(
        name: impl Into<String>,
        data: ArrayView2<f64>,
    ) -> Result<Self, DataSetError> {
        if data.ncols() != COLUMNS {
            return Err(DataSetError::ColumnCount(data.ncols()));
        }
        Ok(Self::from_columns(name.into(), data))
    }

    /// Build from data whose column count is already known to be three.
    pub(crate) fn from_columns(name: String, data: ArrayView2<f64>) -> Self {
        let token = PositionToken::parse(&name);
        Self {
            name,
            angle: data.column(0).to_vec(),
            intensity: data.column(1).to_vec(),
            intensity_stdev: data.column(2).to_vec(),
            source: None,
            token,
        }
    }

    /// Attach the file this dataset was read from.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn angle(&self) -> &[f64] {
        &self.angle
    }

    #[inline]
    pub fn intensity(&self) -> &[f64] {
        &self.intensity
    }

    #[inline]
    pub fn intensity_stdev(&self) -> &[f64] {
        &self.intensity_stdev
    }

    #[inline]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Get the number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.angle.len()
    }

    /// Check if the dataset has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.angle.is_empty()
    }

    /// Smallest and largest angle, or `None` for an empty dataset.
    pub fn angle_range(&self) -> Option<(f64, f64)> {
        if self.angle.is_empty() {
            return None;
        }
        let min = self.angle.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.angle.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    /// Owned `(n, 3)` copy of the data with columns angle, intensity, stdev.
    pub fn to_array(&self) -> Array2<f64> {
        let mut data = Array2::zeros((self.len(), COLUMNS));
        for (i, mut row) in data.axis_iter_mut(Axis(0)).enumerate() {
            row[0] = self.angle[i];
            row[1] = self.intensity[i];
            row[2] = self.intensity_stdev[i];
        }
        data
    }

    /// The parsed position token, if the name carries one.
    #[inline]
    pub fn position_token(&self) -> Option<&PositionToken> {
        self.token.as_ref()
    }

    /// Detector position encoded in the name.
    #[inline]
    pub fn position(&self) -> Option<Position> {
        self.token.map(|t| t.position)
    }

    /// Name of the dataset this one should be combined with.
    pub fn partner_name(&self) -> Result<String, PositionError> {
        let token = self
            .token
            .ok_or_else(|| PositionError::Unresolved(self.name.clone()))?;
        let partner = token
            .position
            .partner()
            .ok_or(PositionError::NoPartner(token.position))?;

        Ok(token.with_position(&self.name, partner))
    }

    /// Path of the partner file, next to this dataset's source.
    pub fn partner_path(&self) -> Result<PathBuf, PositionError> {
        let source = self
            .source
            .as_deref()
            .ok_or_else(|| PositionError::MissingSource(self.name.clone()))?;
        let partner = self.partner_name()?;

        Ok(sibling_path(source, &partner))
    }
}

/// Errors that can occur when creating datasets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataSetError {
    #[error("Array length mismatch: angle={angle_len}, intensity={intensity_len}, stdev={stdev_len}")]
    LengthMismatch {
        angle_len: usize,
        intensity_len: usize,
        stdev_len: usize,
    },
    #[error("Expected 3 data columns, found {0}")]
    ColumnCount(usize),
}
