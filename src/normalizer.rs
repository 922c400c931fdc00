use crate::model::{PricePoint, TimeSeries};

/// Trims and upper-cases a ticker symbol. Blank input means "no ticker".
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let ticker = raw.trim();
    if ticker.is_empty() {
        None
    } else {
        Some(ticker.to_uppercase())
    }
}

/// Restores the series invariants: dates strictly increasing, one point per
/// date (the last observation wins), only finite positive closes.
pub fn normalize_series(series: &mut TimeSeries) {
    series.points.retain(|p| p.close.is_finite() && p.close > 0.0);
    // stable sort keeps arrival order among equal dates
    series.points.sort_by_key(|p| p.date);

    let mut deduped: Vec<PricePoint> = Vec::with_capacity(series.points.len());
    for point in series.points.drain(..) {
        match deduped.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => deduped.push(point),
        }
    }
    series.points = deduped;
}
