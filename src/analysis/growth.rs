//! Period-over-period growth

pub use crate::types::Growth;

/// Growth from `previous` to `current`
///
/// - both zero → [`Growth::Undefined`]
/// - previous zero, current positive → [`Growth::FromZero`] (+100%)
/// - previous zero, current negative → `Percent(-100.0)`
/// - otherwise `(current - previous) / previous * 100`
///
/// # Examples
/// ```
/// use sales_analytics::analysis::growth::{growth, Growth};
///
/// assert_eq!(growth(150.0, 100.0), Growth::Percent(50.0));
/// assert_eq!(growth(100.0, 0.0), Growth::FromZero);
/// assert_eq!(growth(0.0, 0.0), Growth::Undefined);
/// ```
pub fn growth(current: f64, previous: f64) -> Growth {
    if previous == 0.0 {
        return if current == 0.0 {
            Growth::Undefined
        } else if current > 0.0 {
            Growth::FromZero
        } else {
            Growth::Percent(-100.0)
        };
    }
    let change = (current - previous) / previous * 100.0;
    if change.is_finite() {
        Growth::Percent(change)
    } else {
        Growth::Undefined
    }
}

/// Growth for every column of `values`, given each column's predecessor index
pub fn growth_series<F>(values: &[f64], previous_index: F) -> Vec<Option<Growth>>
where
    F: Fn(usize) -> Option<usize>,
{
    (0..values.len())
        .map(|i| previous_index(i).map(|p| growth(values[i], values[p])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_to_zero_is_undefined() {
        let result = growth(0.0, 0.0);
        assert_eq!(result, Growth::Undefined);
        assert_ne!(result, Growth::Percent(0.0));
        assert_eq!(result.display(), "—");
    }

    #[test]
    fn test_from_zero_is_plus_hundred_not_infinity() {
        let result = growth(100.0, 0.0);
        assert_eq!(result, Growth::FromZero);
        assert_eq!(result.as_percent(), Some(100.0));
        assert_eq!(result.display(), "+100%");
    }

    #[test]
    fn test_regular_growth() {
        assert_eq!(growth(150.0, 100.0), Growth::Percent(50.0));
        assert_eq!(growth(50.0, 100.0), Growth::Percent(-50.0));
        assert_eq!(growth(0.0, 80.0), Growth::Percent(-100.0));
        assert_eq!(growth(100.0, 100.0), Growth::Percent(0.0));
    }

    #[test]
    fn test_negative_from_zero() {
        assert_eq!(growth(-20.0, 0.0), Growth::Percent(-100.0));
    }

    #[test]
    fn test_growth_series() {
        let values = [100.0, 0.0, 0.0, 50.0];
        let series = growth_series(&values, |i| i.checked_sub(1));
        assert_eq!(
            series,
            vec![
                None,
                Some(Growth::Percent(-100.0)),
                Some(Growth::Undefined),
                Some(Growth::FromZero),
            ]
        );
    }
}
