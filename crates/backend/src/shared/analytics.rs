//! Простые вычисления над временными рядами отчётов

/// Относительный прирост `current` к `previous` (0.1 = +10%).
/// Для нулевой базы прирост не определён.
pub fn compute_growth(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous)
    }
}

/// Скользящее среднее с окном `window`.
/// Первые точки усредняются по тому, что уже накоплено.
pub fn moving_average(series: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 {
        return series.to_vec();
    }
    series
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let start = (i + 1).saturating_sub(window);
            let subset = &series[start..=i];
            subset.iter().sum::<f64>() / subset.len() as f64
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub sum: f64,
    pub avg: f64,
}

pub fn summarize(values: &[f64]) -> Summary {
    if values.is_empty() {
        return Summary { sum: 0.0, avg: 0.0 };
    }
    let sum: f64 = values.iter().sum();
    Summary {
        sum,
        avg: sum / values.len() as f64,
    }
}
