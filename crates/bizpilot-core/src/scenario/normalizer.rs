//! Standard-score feature normalizer

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Per-column mean and scale, fit once at training time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit column statistics on a row-major matrix
    ///
    /// Uses the population standard deviation. Columns with zero variance get
    /// scale 1 so transforming them only centers.
    pub fn fit(x: &[Vec<f64>]) -> Result<Self> {
        let Some(first) = x.first() else {
            return Err(Error::InsufficientData(
                "cannot fit normalizer on zero rows".to_string(),
            ));
        };
        let width = first.len();
        if x.iter().any(|row| row.len() != width) {
            return Err(Error::InvalidData("ragged feature matrix".to_string()));
        }

        let n = x.len() as f64;
        let mut mean = vec![0.0; width];
        for row in x {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut scale = vec![0.0; width];
        for row in x {
            for ((s, v), m) in scale.iter_mut().zip(row).zip(&mean) {
                *s += (v - m).powi(2);
            }
        }
        for s in scale.iter_mut() {
            let std = (*s / n).sqrt();
            *s = if std > f64::EPSILON { std } else { 1.0 };
        }

        Ok(Self { mean, scale })
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// Transform one feature row
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.width() {
            return Err(Error::InvalidData(format!(
                "expected {} features, got {}",
                self.width(),
                row.len()
            )));
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }

    pub fn transform(&self, x: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        x.iter().map(|row| self.transform_row(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_mean_and_population_std() {
        let x = vec![vec![1.0, 10.0], vec![3.0, 30.0]];
        let scaler = StandardScaler::fit(&x).unwrap();
        assert_eq!(scaler.mean, vec![2.0, 20.0]);
        assert_eq!(scaler.scale, vec![1.0, 10.0]);
    }

    #[test]
    fn test_transform_centers_and_scales() {
        let x = vec![vec![1.0, 10.0], vec![3.0, 30.0]];
        let scaler = StandardScaler::fit(&x).unwrap();
        let t = scaler.transform(&x).unwrap();
        assert_eq!(t, vec![vec![-1.0, -1.0], vec![1.0, 1.0]]);
    }

    #[test]
    fn test_zero_variance_column_scale_one() {
        let x = vec![vec![5.0, 1.0], vec![5.0, 2.0], vec![5.0, 3.0]];
        let scaler = StandardScaler::fit(&x).unwrap();
        assert_eq!(scaler.scale[0], 1.0);
        assert_eq!(scaler.transform_row(&[7.0, 2.0]).unwrap()[0], 2.0);
    }

    #[test]
    fn test_fit_empty() {
        assert!(matches!(
            StandardScaler::fit(&[]),
            Err(Error::InsufficientData(_))
        ));
    }

    #[test]
    fn test_transform_wrong_width() {
        let scaler = StandardScaler::fit(&[vec![1.0, 2.0, 3.0]]).unwrap();
        assert!(scaler.transform_row(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_ragged_matrix() {
        let x = vec![vec![1.0, 2.0], vec![1.0]];
        assert!(matches!(
            StandardScaler::fit(&x),
            Err(Error::InvalidData(_))
        ));
    }
}
