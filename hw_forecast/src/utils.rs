//! Utility functions for the hw_forecast crate

use crate::error::{ForecastError, Result};

/// Split off the last `holdout` values as a test tail
///
/// Returns `(train, test)` borrowing from `series`.
pub fn holdout_split(series: &[f64], holdout: usize) -> Result<(&[f64], &[f64])> {
    if holdout == 0 || holdout >= series.len() {
        return Err(ForecastError::InsufficientData(format!(
            "Cannot hold out {} of {} observations",
            holdout,
            series.len()
        )));
    }

    Ok(series.split_at(series.len() - holdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holdout_split() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0];
        let (train, test) = holdout_split(&series, 2).unwrap();
        assert_eq!(train, &[1.0, 2.0, 3.0]);
        assert_eq!(test, &[4.0, 5.0]);

        assert!(holdout_split(&series, 0).is_err());
        assert!(holdout_split(&series, 5).is_err());
    }
}
