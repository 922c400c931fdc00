// Text line charts built from unicode block sparklines.

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub const CHART_WIDTH: usize = 60;

/// A labelled chart column.
pub type Column = (String, Vec<Option<f64>>);

/// Averages `values` into at most `width` buckets. Missing values are ignored;
/// a bucket with nothing in it stays missing.
pub fn downsample(values: &[Option<f64>], width: usize) -> Vec<Option<f64>> {
    if width == 0 || values.len() <= width {
        return values.to_vec();
    }
    (0..width)
        .map(|i| {
            let from = i * values.len() / width;
            let to = (i + 1) * values.len() / width;
            let present: Vec<f64> = values[from..to].iter().flatten().copied().collect();
            if present.is_empty() {
                None
            } else {
                Some(present.iter().sum::<f64>() / present.len() as f64)
            }
        })
        .collect()
}

/// Min and max over every finite value of every column.
pub fn bounds<'a>(columns: impl IntoIterator<Item = &'a [Option<f64>]>) -> Option<(f64, f64)> {
    columns
        .into_iter()
        .flat_map(|c| c.iter().flatten().copied())
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// One character per value, scaled into `[min, max]`. Missing values are blanks.
pub fn sparkline(values: &[Option<f64>], min: f64, max: f64) -> String {
    let span = max - min;
    values
        .iter()
        .map(|v| match v {
            Some(v) if v.is_finite() => {
                if span <= 0.0 {
                    BARS[BARS.len() / 2]
                } else {
                    let level = ((v - min) / span * (BARS.len() - 1) as f64).round();
                    BARS[(level.max(0.0) as usize).min(BARS.len() - 1)]
                }
            }
            _ => ' ',
        })
        .collect()
}

/// Renders labelled columns as sparkline rows. With `shared_scale` all rows
/// use one min/max so overlays line up; otherwise each row is scaled alone.
pub fn line_chart(columns: &[Column], width: usize, shared_scale: bool) -> Vec<String> {
    let label_width = columns.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let shared = bounds(columns.iter().map(|(_, v)| v.as_slice()));

    columns
        .iter()
        .map(|(label, values)| {
            let own = bounds([values.as_slice()]);
            let range = if shared_scale { own.and(shared) } else { own };
            match range {
                Some((lo, hi)) => format!(
                    "{:<label_width$}  {}  {:.2} .. {:.2}",
                    label,
                    sparkline(&downsample(values, width), lo, hi),
                    lo,
                    hi
                ),
                None => format!("{:<label_width$}  (no data)", label),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn sparkline_spans_all_levels() {
        let line = sparkline(&some(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]), 0.0, 7.0);
        assert_eq!(line, "▁▂▃▄▅▆▇█");
    }

    #[test]
    fn flat_series_and_gaps() {
        assert_eq!(sparkline(&some(&[3.0, 3.0]), 3.0, 3.0), "▅▅");
        assert_eq!(sparkline(&[None, Some(1.0)], 0.0, 1.0), " █");
    }

    #[test]
    fn downsample_averages_buckets() {
        let values = some(&[1.0, 3.0, 5.0, 7.0]);
        assert_eq!(downsample(&values, 2), some(&[2.0, 6.0]));
        assert_eq!(downsample(&values, 10), values);
        assert_eq!(downsample(&[None, None, Some(4.0), None], 2), vec![None, Some(4.0)]);
    }

    #[test]
    fn shared_scale_uses_global_bounds() {
        let cols = vec![
            ("price".to_string(), some(&[10.0, 20.0])),
            ("MA".to_string(), vec![None, Some(15.0)]),
        ];
        let lines = line_chart(&cols, CHART_WIDTH, true);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "price  ▁█  10.00 .. 20.00");
        assert_eq!(lines[1], "MA      ▅  10.00 .. 20.00");
    }

    #[test]
    fn empty_column_has_no_data() {
        let cols = vec![("X".to_string(), Vec::new())];
        assert_eq!(line_chart(&cols, CHART_WIDTH, false), vec!["X  (no data)".to_string()]);
    }
}
