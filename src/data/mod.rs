//! Data structures for diffraction scans.

pub mod collection;
pub mod dataset;
pub mod xye;

pub use collection::DataSetCollection;
pub use dataset::{DataSet, DataSetError};
pub use xye::{read_xye, write_xye, DataSetLoader, XyeError, XyeLoader};
