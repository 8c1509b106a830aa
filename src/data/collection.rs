//! Ordered collection of datasets.

use super::dataset::DataSet;

/// The datasets currently loaded, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct DataSetCollection {
    datasets: Vec<DataSet>,
}

impl DataSetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dataset.
    pub fn push(&mut self, dataset: DataSet) {
        self.datasets.push(dataset);
    }

    /// Append several datasets.
    pub fn extend(&mut self, datasets: impl IntoIterator<Item = DataSet>) {
        self.datasets.extend(datasets);
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DataSet> {
        self.datasets.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataSet> {
        self.datasets.iter()
    }

    /// Index of the first dataset called `name`.
    pub fn position_of_name(&self, name: &str) -> Option<usize> {
        self.datasets.iter().position(|ds| ds.name() == name)
    }

    /// Check if a dataset called `name` is present.
    pub fn contains_name(&self, name: &str) -> bool {
        self.position_of_name(name).is_some()
    }

    /// Angular interval covered by every dataset.
    ///
    /// `low` is the largest per-dataset minimum and `high` the smallest
    /// per-dataset maximum. Datasets without samples are ignored. The result
    /// may have `low > high` when the datasets do not overlap.
    pub fn common_angle_span(&self) -> Option<(f64, f64)> {
        self.datasets
            .iter()
            .filter_map(DataSet::angle_range)
            .fold(None, |span, (min, max)| match span {
                None => Some((min, max)),
                Some((low, high)) => Some((f64::max(low, min), f64::min(high, max))),
            })
    }

    pub fn into_vec(self) -> Vec<DataSet> {
        self.datasets
    }
}

impl From<Vec<DataSet>> for DataSetCollection {
    fn from(datasets: Vec<DataSet>) -> Self {
        Self { datasets }
    }
}

impl FromIterator<DataSet> for DataSetCollection {
    fn from_iter<I: IntoIterator<Item = DataSet>>(iter: I) -> Self {
        Self {
            datasets: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DataSetCollection {
    type Item = &'a DataSet;
    type IntoIter = std::slice::Iter<'a, DataSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.datasets.iter()
    }
}
