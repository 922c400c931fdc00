use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::warn;

pub struct MarketAnalyzer;

impl MarketAnalyzer {
    /// Day-over-day fractional changes: `p[i] / p[i-1] - 1`.
    pub fn pct_change(prices: &[f64]) -> Vec<f64> {
        prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
    }

    pub fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Sample standard deviation (n - 1 denominator). NaN for fewer than two values.
    pub fn sample_std_dev(values: &[f64]) -> f64 {
        if values.len() < 2 {
            return f64::NAN;
        }
        let mean = Self::mean(values);
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
        variance.sqrt()
    }

    /// Trailing simple moving average aligned with `data`: entry `i` is the
    /// mean of `data[i + 1 - window ..= i]`, `None` while the window fills.
    pub fn moving_average(data: &[f64], window_size: usize) -> Vec<Option<f64>> {
        let mut out = vec![None; data.len()];
        if window_size == 0 || data.len() < window_size {
            return out;
        }
        for (i, window) in data.windows(window_size).enumerate() {
            out[i + window_size - 1] = Some(window.iter().sum::<f64>() / window_size as f64);
        }
        out
    }

    /// Calculates the Pearson correlation coefficient between two slices.
    /// Returns None if slices have different lengths, fewer than two points,
    /// or either side has zero variance.
    pub fn compute_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
        if x.len() != y.len() || x.len() < 2 {
            return None;
        }
        let mean_x = Self::mean(x);
        let mean_y = Self::mean(y);
        let numerator: f64 = x.iter().zip(y.iter()).map(|(xi, yi)| (xi - mean_x) * (yi - mean_y)).sum();
        let denominator_x: f64 = x.iter().map(|xi| (xi - mean_x).powi(2)).sum();
        let denominator_y: f64 = y.iter().map(|yi| (yi - mean_y).powi(2)).sum();
        let denominator = (denominator_x * denominator_y).sqrt();
        if denominator == 0.0 || !denominator.is_finite() {
            None
        } else {
            // rounding can push |r| a hair past 1
            Some((numerator / denominator).clamp(-1.0, 1.0))
        }
    }

    /// Two-sided p-value for H0: r = 0, from Student's t with n - 2 degrees of freedom.
    pub fn correlation_p_value(r: f64, n: usize) -> f64 {
        if n <= 2 {
            // two points always lie on a line
            return 1.0;
        }
        if r.abs() >= 1.0 {
            return 0.0;
        }
        let df = (n - 2) as f64;
        let t = r * (df / (1.0 - r * r)).sqrt();
        match StudentsT::new(0.0, 1.0, df) {
            Ok(dist) => (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0),
            Err(e) => {
                warn!("Failed to build t-distribution (df = {}): {}", df, e);
                f64::NAN
            }
        }
    }
}
