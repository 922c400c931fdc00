use crate::model::{CombinedRow, CombinedSeries, TimeSeries};
use std::cmp::Ordering;

/// Inner-joins two date-ordered series, keeping only dates present in both.
pub fn inner_join(a: &TimeSeries, b: &TimeSeries) -> CombinedSeries {
    let mut rows = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < a.points.len() && j < b.points.len() {
        let (pa, pb) = (&a.points[i], &b.points[j]);
        match pa.date.cmp(&pb.date) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                rows.push(CombinedRow {
                    date: pa.date,
                    first: pa.close,
                    second: pb.close,
                });
                i += 1;
                j += 1;
            }
        }
    }

    CombinedSeries {
        first_ticker: a.ticker.clone(),
        second_ticker: b.ticker.clone(),
        rows,
    }
}
