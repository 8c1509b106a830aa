//! Whitespace-delimited `.xye` files: angle, intensity and stdev per line.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::dataset::{DataSet, DataSetError};

/// Errors that can occur while reading or writing `.xye` files.
#[derive(Debug, Error)]
pub enum XyeError {
    #[error("XYE file IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not open XYE file because {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Could not derive a dataset name from {0:?}")]
    BadFileName(PathBuf),
    #[error("{path:?} line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("XYE file produced an invalid dataset: {0}")]
    DataSet(#[from] DataSetError),
}

/// Source of datasets for the batch runtime.
pub trait DataSetLoader: Send + Sync {
    /// Load the dataset stored at `path`.
    fn load(&self, path: &Path) -> Result<DataSet, XyeError>;
}

/// Loader for `.xye` text files.
#[derive(Debug, Default, Clone, Copy)]
pub struct XyeLoader;

impl DataSetLoader for XyeLoader {
    fn load(&self, path: &Path) -> Result<DataSet, XyeError> {
        read_xye(path)
    }
}

/// Read a dataset from an `.xye` file.
///
/// Blank lines and lines starting with `#` are skipped. Every other line must
/// hold exactly three numbers. The dataset is named after the file stem.
pub fn read_xye(path: &Path) -> Result<DataSet, XyeError> {
    if !path.exists() {
        return Err(XyeError::BadFilePath(path.to_path_buf()));
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| XyeError::BadFileName(path.to_path_buf()))?
        .to_string();

    let reader = BufReader::new(File::open(path)?);
    let mut angle = Vec::new();
    let mut intensity = Vec::new();
    let mut stdev = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parse_error = |message: String| XyeError::Parse {
            path: path.to_path_buf(),
            line: line_no + 1,
            message,
        };

        let values = trimmed
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>()
                    .map_err(|_| parse_error(format!("'{tok}' is not a number")))
            })
            .collect::<Result<Vec<f64>, XyeError>>()?;

        match values.as_slice() {
            [x, y, e] => {
                angle.push(*x);
                intensity.push(*y);
                stdev.push(*e);
            }
            other => {
                return Err(parse_error(format!("expected 3 columns, found {}", other.len())));
            }
        }
    }

    log::debug!("Read {} samples from {}", angle.len(), path.display());

    Ok(DataSet::new(name, angle, intensity, stdev)?.with_source(path))
}

/// Write a dataset as an `.xye` file, one `angle intensity stdev` line per sample.
pub fn write_xye(dataset: &DataSet, path: &Path) -> Result<(), XyeError> {
    let mut writer = BufWriter::new(File::create(path)?);

    let rows = dataset
        .angle()
        .iter()
        .zip(dataset.intensity())
        .zip(dataset.intensity_stdev());
    for ((x, y), e) in rows {
        writeln!(writer, "{x} {y} {e}")?;
    }
    writer.flush()?;

    log::debug!("Wrote {} samples to {}", dataset.len(), path.display());
    Ok(())
}
