//! Per-generation progress reports.

use serde::{Deserialize, Serialize};

use crate::selection::Individual;

/// Summary of the fitness values of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl FitnessSummary {
    /// Computes the summary of `values`.
    ///
    /// Returns `None` if `values` is empty.
    ///
    /// ```
    /// use intercept_training::progress::FitnessSummary;
    ///
    /// let summary = FitnessSummary::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_eq!(summary.min, 2.0);
    /// assert_eq!(summary.max, 9.0);
    /// assert_eq!(summary.mean, 5.0);
    /// assert_eq!(summary.std_dev, 2.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let count = values.len();
        let min = values.iter().copied().reduce(f64::min)?;
        let max = values.iter().copied().reduce(f64::max)?;
        #[expect(clippy::cast_precision_loss)]
        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            count,
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}

/// What happened in one generation, as handed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Zero-based generation index.
    pub generation: usize,
    /// Number of offspring bred in this generation.
    pub population_size: usize,
    /// Best offspring of this generation.
    pub generation_best: Individual,
    /// Best individual of the whole run so far (including this generation).
    pub best_ever: Individual,
    /// Whether this generation replaced the best-ever record.
    pub improved: bool,
    /// Whether the best-ever candidate hits the target.
    pub hit: bool,
    pub fitness: FitnessSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_summary() {
        assert_eq!(FitnessSummary::new([]), None);
    }

    #[test]
    fn test_single_value() {
        let summary = FitnessSummary::new([0.25]).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.min, 0.25);
        assert_eq!(summary.max, 0.25);
        assert_eq!(summary.mean, 0.25);
        assert_eq!(summary.std_dev, 0.0);
    }
}
