//! Powder diffraction merge runtime - combine detector-position scans.
//!
//! A powder diffractometer records each scan with the detector at one of
//! several placements, and every placement leaves angular gaps. This crate
//! pairs scans by their file-naming convention and combines each pair into a
//! continuous sweep:
//!
//! - Position tokens (`_p1_`, `_P34_`, ...) parsed from dataset names
//! - Removal of corrupted samples next to detector gaps
//! - Merge (interleave and dedupe) or splice (patch the primary scan's gaps)
//! - Parallel batch combination using rayon
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Runtime (batch, rayon pool)     │
//! │  load partners → pair → combine     │
//! └─────────────────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────┐
//! │           Combine engine            │
//! │  ┌───────────┐  ┌───────────────┐  │
//! │  │   Gaps    │  │ Merge / Splice│  │
//! │  └───────────┘  └───────────────┘  │
//! │  ┌───────────┐  ┌───────────────┐  │
//! │  │ Position  │  │   DataSet     │  │
//! │  │  tokens   │  │  (+ .xye I/O) │  │
//! │  └───────────┘  └───────────────┘  │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use pxrdrs::{read_xye, splice};
//!
//! let p1 = read_xye(Path::new("ds1_0000_p1_0000.xye")).unwrap();
//! let p2 = read_xye(&p1.partner_path().unwrap()).unwrap();
//! let p12 = splice(&p1, &p2).unwrap();
//! assert_eq!(p12.name(), "ds1_0000_p12_s_0000");
//! ```

pub mod combine;
pub mod config;
pub mod data;
pub mod position;
pub mod runtime;

// Re-export commonly used items
pub use combine::{
    combine, find_gaps, merge, merge_arrays, remove_gap_neighbors, splice, splice_with,
    CombineMethod, CombineOptions,
};
pub use config::{ConfigError, SpliceConfig};
pub use data::{
    read_xye, write_xye, DataSet, DataSetCollection, DataSetError, DataSetLoader, XyeError,
    XyeLoader,
};
pub use position::{MergePartners, Position, PositionError, PositionToken};
pub use runtime::{load_partners, Runtime, RuntimeError};
