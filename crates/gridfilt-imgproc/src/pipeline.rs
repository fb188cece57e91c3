use std::collections::BTreeMap;

use gridfilt_image::{Grid, GridDtype, GridError};
use num_traits::Zero;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::FilterError,
    filter::{
        gaussian_filter_with, median_filter_with, sobel_filter_with, DEFAULT_MEDIAN_KERNEL_SIZE,
    },
    parallel::ExecutionStrategy,
};

/// The filters run by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// 3x3 gaussian smoothing.
    Gaussian,
    /// 3x3 sobel gradient magnitude.
    Sobel,
    /// median denoising.
    Median,
}

impl FilterKind {
    /// All filters, in the order the pipeline runs them.
    pub const ALL: [FilterKind; 3] = [FilterKind::Gaussian, FilterKind::Sobel, FilterKind::Median];

    /// The canonical name of the filter, used as result key and file prefix.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Gaussian => "gaussian",
            FilterKind::Sobel => "sobel",
            FilterKind::Median => "median",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration of the [`FilterPipeline`].
///
/// Can be read from JSON; missing fields take their default value.
///
/// ```
/// use gridfilt_imgproc::{parallel::ExecutionStrategy, pipeline::PipelineConfig};
///
/// let config: PipelineConfig =
///     serde_json::from_str(r#"{ "strategy": "parallel_rows" }"#).unwrap();
/// assert_eq!(config.median_kernel_size, 3);
/// assert_eq!(config.strategy, ExecutionStrategy::ParallelRows);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Side length of the median window. Must be odd.
    pub median_kernel_size: usize,
    /// How the filters and the batch are evaluated.
    pub strategy: ExecutionStrategy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            median_kernel_size: DEFAULT_MEDIAN_KERNEL_SIZE,
            strategy: ExecutionStrategy::Serial,
        }
    }
}

impl PipelineConfig {
    /// Set the side length of the median window.
    pub fn with_median_kernel_size(mut self, kernel_size: usize) -> Self {
        self.median_kernel_size = kernel_size;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// The outputs of every filter for one grid, keyed by filter.
///
/// Gaussian and sobel outputs are unclamped; the median output is widened
/// to `f32` from the input sample type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterResults {
    results: BTreeMap<FilterKind, Grid<f32>>,
}

impl FilterResults {
    /// Get the output of a filter.
    pub fn get(&self, kind: FilterKind) -> Option<&Grid<f32>> {
        self.results.get(&kind)
    }

    /// Iterate over the outputs in filter order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterKind, &Grid<f32>)> {
        self.results.iter().map(|(&kind, grid)| (kind, grid))
    }

    /// Number of filter outputs.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no filter output is stored.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl IntoIterator for FilterResults {
    type Item = (FilterKind, Grid<f32>);
    type IntoIter = std::collections::btree_map::IntoIter<FilterKind, Grid<f32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// The outputs of a batch run, keyed by item identifier.
///
/// Items that failed are kept apart from the successful ones so a failure can
/// never be mistaken for, or leak into, another item's results.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResults<K: Ord> {
    results: BTreeMap<K, FilterResults>,
    failures: BTreeMap<K, FilterError>,
}

impl<K: Ord> Default for BatchResults<K> {
    fn default() -> Self {
        Self {
            results: BTreeMap::new(),
            failures: BTreeMap::new(),
        }
    }
}

impl<K: Ord> BatchResults<K> {
    /// Get the outputs of one item.
    pub fn get(&self, key: &K) -> Option<&FilterResults> {
        self.results.get(key)
    }

    /// Successful items and their outputs, in key order.
    pub fn results(&self) -> &BTreeMap<K, FilterResults> {
        &self.results
    }

    /// Failed items and their errors, in key order.
    pub fn failures(&self) -> &BTreeMap<K, FilterError> {
        &self.failures
    }

    /// Number of successful items.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no item produced results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over the successful items in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &FilterResults)> {
        self.results.iter()
    }

    fn record(&mut self, key: K, outcome: Result<FilterResults, FilterError>) {
        match outcome {
            Ok(results) => {
                self.results.insert(key, results);
            }
            Err(err) => {
                self.failures.insert(key, err);
            }
        }
    }
}

/// Conversion of batch inputs into grids.
///
/// Implemented for ready grids and for raw rows handed over by an external
/// source, which are validated on conversion.
pub trait IntoGrid<T> {
    /// Convert into a grid, rejecting inputs that violate the grid invariants.
    fn into_grid(self) -> Result<Grid<T>, GridError>;
}

impl<T> IntoGrid<T> for Grid<T> {
    fn into_grid(self) -> Result<Grid<T>, GridError> {
        Ok(self)
    }
}

impl<T: Clone> IntoGrid<T> for Vec<Vec<T>> {
    fn into_grid(self) -> Result<Grid<T>, GridError> {
        Grid::from_rows(&self)
    }
}

/// Runs the gaussian, sobel and median filters over the same input grid.
///
/// No filter consumes the output of another; all three read the original
/// grid.
///
/// # Example
///
/// ```
/// use gridfilt_image::Grid;
/// use gridfilt_imgproc::pipeline::{FilterKind, FilterPipeline};
///
/// let pipeline = FilterPipeline::default();
/// let src = Grid::from_size_val([4, 4].into(), 100u8).unwrap();
///
/// let results = pipeline.apply_filters(&src).unwrap();
/// assert_eq!(results.len(), 3);
/// assert_eq!(results.get(FilterKind::Median).unwrap()[(1, 1)], 100.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    config: PipelineConfig,
}

impl FilterPipeline {
    /// Create a new pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if the median kernel size is zero
    /// or even.
    pub fn new(config: PipelineConfig) -> Result<Self, FilterError> {
        let k = config.median_kernel_size;
        if k % 2 == 0 {
            return Err(FilterError::InvalidKernel { rows: k, cols: k });
        }
        Ok(Self { config })
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Apply every filter to a grid.
    pub fn apply_filters<T>(&self, src: &Grid<T>) -> Result<FilterResults, FilterError>
    where
        T: GridDtype + Zero,
    {
        let strategy = self.config.strategy;
        let mut results = BTreeMap::new();

        for kind in FilterKind::ALL {
            let dst = match kind {
                FilterKind::Gaussian => gaussian_filter_with(src, strategy)?,
                FilterKind::Sobel => sobel_filter_with(src, strategy)?,
                FilterKind::Median => {
                    median_filter_with(src, self.config.median_kernel_size, strategy)?.to_f32()
                }
            };
            results.insert(kind, dst);
        }

        Ok(FilterResults { results })
    }

    /// Apply every filter to a grid given as a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidGrid`] before any filter runs if the rows
    /// are empty or of unequal length.
    pub fn apply_filters_rows<T, R>(&self, rows: &[R]) -> Result<FilterResults, FilterError>
    where
        T: GridDtype + Zero,
        R: AsRef<[T]>,
    {
        let src = Grid::from_rows(rows)?;
        self.apply_filters(&src)
    }

    /// Apply every filter to each item of a batch.
    ///
    /// Each item is processed independently: a failing item is recorded in
    /// [`BatchResults::failures`] and the remaining items are still processed.
    /// An identifier given to more than one item is not filtered at all; it is
    /// recorded once as [`FilterError::DuplicateKey`]. An empty batch yields
    /// empty results.
    pub fn apply_batch<K, T, G, I>(&self, items: I) -> BatchResults<K>
    where
        K: Ord + std::fmt::Debug + Send,
        T: GridDtype + Zero,
        G: IntoGrid<T> + Send,
        I: IntoIterator<Item = (K, G)>,
    {
        let items = items.into_iter().collect::<Vec<_>>();

        let duplicated = {
            let mut counts = BTreeMap::<&K, usize>::new();
            for (key, _) in &items {
                *counts.entry(key).or_default() += 1;
            }
            items
                .iter()
                .map(|(key, _)| counts.get(key).is_some_and(|&n| n > 1))
                .collect::<Vec<_>>()
        };

        let run = |key: &K, item: G, duplicated: bool| -> Result<FilterResults, FilterError> {
            if duplicated {
                return Err(FilterError::DuplicateKey);
            }
            log::debug!("applying filters to {key:?}");
            let src = item.into_grid()?;
            self.apply_filters(&src)
        };

        let outcomes: Vec<(K, Result<FilterResults, FilterError>)> = match self.config.strategy {
            ExecutionStrategy::Serial => items
                .into_iter()
                .zip(duplicated)
                .map(|((key, item), duplicated)| {
                    let outcome = run(&key, item, duplicated);
                    (key, outcome)
                })
                .collect(),
            ExecutionStrategy::ParallelRows => items
                .into_par_iter()
                .zip(duplicated)
                .map(|((key, item), duplicated)| {
                    let outcome = run(&key, item, duplicated);
                    (key, outcome)
                })
                .collect(),
        };

        let mut batch = BatchResults::default();
        for (key, outcome) in outcomes {
            if let Err(err) = &outcome {
                log::warn!("filtering {key:?} failed: {err}");
            }
            batch.record(key, outcome);
        }

        log::debug!(
            "batch done: {} succeeded, {} failed",
            batch.len(),
            batch.failures.len()
        );

        batch
    }
}

/// Apply every filter to a grid with the default configuration.
pub fn apply_filters<T>(src: &Grid<T>) -> Result<FilterResults, FilterError>
where
    T: GridDtype + Zero,
{
    FilterPipeline::default().apply_filters(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_kind_names() -> Result<(), serde_json::Error> {
        let names = FilterKind::ALL.map(|k| k.name());
        assert_eq!(names, ["gaussian", "sobel", "median"]);
        assert_eq!(FilterKind::Sobel.to_string(), "sobel");
        assert_eq!(serde_json::to_string(&FilterKind::Median)?, "\"median\"");
        Ok(())
    }

    #[test]
    fn test_pipeline_rejects_even_median() {
        let config = PipelineConfig::default().with_median_kernel_size(4);
        assert_eq!(
            FilterPipeline::new(config).err(),
            Some(FilterError::InvalidKernel { rows: 4, cols: 4 })
        );
    }

    #[test]
    fn test_config_roundtrip_defaults() -> Result<(), serde_json::Error> {
        let config: PipelineConfig = serde_json::from_str("{}")?;
        assert_eq!(config, PipelineConfig::default());

        let config: PipelineConfig = serde_json::from_str(r#"{ "median_kernel_size": 5 }"#)?;
        assert_eq!(config.median_kernel_size, 5);
        assert_eq!(config.strategy, ExecutionStrategy::Serial);
        Ok(())
    }

    #[test]
    fn test_apply_filters_rows_invalid() {
        let pipeline = FilterPipeline::default();

        let ragged = [vec![1u8, 2, 3], vec![4, 5]];
        assert_eq!(
            pipeline.apply_filters_rows(&ragged),
            Err(FilterError::InvalidGrid(GridError::RaggedRows {
                row: 1,
                len: 2,
                expected: 3
            }))
        );

        let empty: [Vec<u8>; 0] = [];
        assert_eq!(
            pipeline.apply_filters_rows(&empty),
            Err(FilterError::InvalidGrid(GridError::EmptyGrid))
        );

        let no_width: [Vec<u8>; 2] = [vec![], vec![]];
        assert_eq!(
            pipeline.apply_filters_rows(&no_width),
            Err(FilterError::InvalidGrid(GridError::ZeroWidth))
        );
    }

    #[test]
    fn test_apply_filters_median_widened() -> Result<(), FilterError> {
        let src = Grid::from_rows(&[vec![10u8, 20, 30], vec![40, 50, 60], vec![70, 80, 90]])?;
        let results = apply_filters(&src)?;
        let median = results
            .get(FilterKind::Median)
            .expect("median output is always present");
        assert_eq!(median[(1, 1)], 50.0);
        assert_eq!(median[(0, 0)], 0.0);
        Ok(())
    }

    #[test]
    fn test_empty_batch() {
        let pipeline = FilterPipeline::default();
        let batch = pipeline.apply_batch(Vec::<(String, Grid<u8>)>::new());
        assert!(batch.is_empty());
        assert!(batch.failures().is_empty());
        assert_eq!(batch, BatchResults::default());
    }
}
