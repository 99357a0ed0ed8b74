use crate::analyzers::types::CorrelationSummary;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the population standard deviation given a pre-computed mean.
/// Returns 0.0 for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

/// Pearson correlation of two equally long series.
///
/// `None` with fewer than two points or when either series is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let (mx, my) = (mean(xs), mean(ys));
    let (sx, sy) = (stddev(xs, mx), stddev(ys, my));
    if sx == 0.0 || sy == 0.0 {
        return None;
    }
    let cov = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mx) * (y - my))
        .sum::<f64>()
        / xs.len() as f64;

    Some((cov / (sx * sy)).clamp(-1.0, 1.0))
}

pub fn correlation_summary(xs: &[f64], ys: &[f64]) -> CorrelationSummary {
    CorrelationSummary {
        points: xs.len(),
        mean_x: mean(xs),
        mean_y: mean(ys),
        pearson: pearson(xs, ys),
    }
}
