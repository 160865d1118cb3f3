//! Ordered train/test split.
//!
//! Time-series rows are never shuffled: the first rows train, the last rows
//! test. The held-out size is rounded *up*, so a 0.2 fraction of 11 rows
//! holds out 3.

use nalgebra::{DMatrix, DVector};

use crate::domain::PriceTable;
use crate::error::AppError;

/// One partition of a feature matrix and its targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// Number of held-out rows for `n` rows and fraction `test_fraction`.
pub fn test_size(n: usize, test_fraction: f64) -> Result<usize, AppError> {
    if !(test_fraction.is_finite() && test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(AppError::input(format!(
            "Invalid test fraction {test_fraction} (must be in (0, 1))."
        )));
    }
    Ok((n as f64 * test_fraction).ceil() as usize)
}

/// Split `table` into `(train, test)` keeping row order.
pub fn train_test_split(table: &PriceTable, test_fraction: f64) -> Result<(Partition, Partition), AppError> {
    let n = table.len();
    let n_test = test_size(n, test_fraction)?;
    if n_test == 0 || n_test >= n {
        return Err(AppError::insufficient_data(format!(
            "Cannot split {n} rows with test fraction {test_fraction}: both partitions must be non-empty."
        )));
    }
    let n_train = n - n_test;

    let train = Partition {
        x: table.features.rows(0, n_train).into_owned(),
        y: table.target.rows(0, n_train).into_owned(),
    };
    let test = Partition {
        x: table.features.rows(n_train, n_test).into_owned(),
        y: table.target.rows(n_train, n_test).into_owned(),
    };
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn table(n: usize) -> PriceTable {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceTable {
            dates: (0..n).map(|i| start + chrono::Days::new(i as u64)).collect(),
            feature_names: vec!["Close".to_string()],
            features: DMatrix::from_iterator(n, 1, (0..n).map(|i| i as f64)),
            target: DVector::from_iterator(n, (0..n).map(|i| i as f64 + 1.0)),
        }
    }

    #[test]
    fn test_size_rounds_up() {
        assert_eq!(test_size(10, 0.2).unwrap(), 2);
        assert_eq!(test_size(11, 0.2).unwrap(), 3);
        assert!(test_size(10, 0.0).is_err());
        assert!(test_size(10, 1.0).is_err());
    }

    #[test]
    fn split_keeps_order() {
        let (train, test) = train_test_split(&table(11), 0.2).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 3);
        assert_eq!(train.x[(7, 0)], 7.0);
        assert_eq!(test.x[(0, 0)], 8.0);
        assert_eq!(test.y[2], 11.0);
    }

    #[test]
    fn split_needs_both_partitions() {
        let err = train_test_split(&table(1), 0.2).unwrap_err();
        assert_eq!(err.exit_code(), AppError::INSUFFICIENT_DATA);
    }
}
