//! Mean and standard deviation across folds

use serde::{Deserialize, Serialize};

/// Mean and standard deviation of one indicator across folds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub std: f64,
}

impl Summary {
    /// Summary with the sample standard deviation (fold indicators)
    pub fn sample(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            std: sample_std(values),
        }
    }

    /// Summary with the population standard deviation (AUC)
    pub fn population(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            std: population_std(values),
        }
    }
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with an n-1 denominator, 0 below two values
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Standard deviation with an n denominator, 0 below two values
pub fn population_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
