use std::cmp::Ordering;

#[derive(PartialEq, Clone, Debug)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(PartialEq, Clone, Debug)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut data_sorted: Vec<f64> = values.iter().cloned().filter(|v| v.is_finite()).collect();
    data_sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    data_sorted
}

/// Linearly interpolated percentile of already sorted data.
pub fn percentile(data_sorted: &[f64], fraction: f64) -> Option<f64> {
    if data_sorted.is_empty() {
        return None;
    }

    let position = (data_sorted.len() - 1) as f64 * fraction;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;

    let weight = position - lower as f64;
    let (low, high) = (data_sorted[lower], data_sorted[upper]);

    match span(low, high) {
        Some(distance) => Some(low + distance * weight),
        None => Some(low * (1.0 - weight) + high * weight),
    }
}

/// `max - min`, `None` if the distance does not fit into an f64.
pub fn span(min: f64, max: f64) -> Option<f64> {
    let distance = max - min;

    if distance.is_finite() {
        Some(distance)
    } else {
        None
    }
}

pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let data_sorted = sorted_finite(values);

    let q1 = percentile(&data_sorted, 0.25)?;
    let median = percentile(&data_sorted, 0.5)?;
    let q3 = percentile(&data_sorted, 0.75)?;

    let reach = span(q1, q3).map_or(std::f64::INFINITY, |iqr| iqr * 1.5);
    let inside = |v: &&f64| **v >= q1 - reach && **v <= q3 + reach;

    let lower_whisker = data_sorted.iter().find(inside).cloned().unwrap_or(q1);
    let upper_whisker = data_sorted.iter().rev().find(inside).cloned().unwrap_or(q3);

    let outliers = data_sorted
        .iter()
        .cloned()
        .filter(|v| *v < lower_whisker || *v > upper_whisker)
        .collect();

    Some(BoxSummary {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    })
}

/// Equal-width bins over the value range, Sturges' rule for the bin count.
pub fn histogram_bins(values: &[f64]) -> Vec<Bin> {
    let data_sorted = sorted_finite(values);

    let (min, max) = match (data_sorted.first(), data_sorted.last()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => return vec![],
    };

    if min == max {
        let pad = 0.5f64.max(min.abs() * 1e-9);
        return vec![Bin {
            start: (min - pad).max(std::f64::MIN),
            end: (max + pad).min(std::f64::MAX),
            count: data_sorted.len(),
        }];
    }

    let bin_count = (data_sorted.len() as f64).log2().ceil() as usize + 1;

    // Halved so that values at both ends of the f64 range don't overflow
    let half_width = (max / 2.0 - min / 2.0) / bin_count as f64;
    let edge = |i: usize| {
        if i == bin_count {
            max
        } else {
            min + half_width * i as f64 + half_width * i as f64
        }
    };

    let mut bins: Vec<Bin> = (0..bin_count)
        .map(|i| Bin {
            start: edge(i),
            end: edge(i + 1),
            count: 0,
        })
        .collect();

    for value in data_sorted {
        // The last bin is closed on the right
        let index = (((value / 2.0 - min / 2.0) / half_width) as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    bins
}

/// Occurrences of each distinct value, in order of first appearance.
pub fn value_counts(values: &[f64]) -> Vec<(f64, usize)> {
    let mut counts: Vec<(f64, usize)> = Vec::new();

    for value in values.iter().filter(|v| !v.is_nan()) {
        match counts.iter_mut().find(|(seen, _)| seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((*value, 1)),
        }
    }

    counts
}

/// Smallest and largest finite value.
pub fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .cloned()
        .filter(|v| v.is_finite())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}
