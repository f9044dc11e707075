//! Statistics over cycle timings
//!
//! Cycle means are reduced to min/max/mean and a *population* standard
//! deviation (divide by `n`, not `n - 1`). The input is always the engine's
//! fixed-size cycle storage, so unfilled slots (zeros) take part in the
//! calculation.

use serde::{Deserialize, Serialize};

/// min/avg/max/stddev of a sequence of timings, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub stddev: f64,
}

/// Reduces probe timings into cycle averages and run summaries
pub struct StatisticsAggregator;

impl StatisticsAggregator {
    /// Normalized cycle mean: `total / port_count / ops_per_cycle`.
    ///
    /// The port count is part of the divisor, so a cycle's cost is spread
    /// over the whole multi-port run rather than the port being probed.
    pub fn cycle_average(total_ms: f64, port_count: usize, ops_per_cycle: u32) -> f64 {
        if port_count == 0 || ops_per_cycle == 0 {
            return 0.0;
        }
        total_ms / port_count as f64 / f64::from(ops_per_cycle)
    }

    /// Arithmetic mean
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Population standard deviation around a precomputed mean
    pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
        if values.is_empty() {
            return 0.0;
        }

        let variance = values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / values.len() as f64;

        variance.sqrt()
    }

    /// Summarize the cycle storage
    pub fn summarize(values: &[f64]) -> Summary {
        if values.is_empty() {
            return Summary::default();
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &value in values {
            if value < min {
                min = value;
            }
            if value > max {
                max = value;
            }
        }

        let mean = Self::mean(values);
        // Rounding in the mean would otherwise leave a tiny non-zero spread
        let stddev = if min == max {
            0.0
        } else {
            Self::population_std_dev(values, mean)
        };

        Summary { min, max, mean, stddev }
    }
}
