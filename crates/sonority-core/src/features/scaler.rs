use crate::error::{Error, Result};
use crate::model::FeatureVector;

/// Per-column standardization to zero mean and unit variance.
///
/// Uses the population standard deviation. Columns with zero variance keep
/// a scale of 1.0, so they are centered but not divided.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit the scaler on a set of rows, all of dimension `dim`.
    ///
    /// An empty row set yields the identity transform.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if a row has the wrong dimension.
    pub fn fit<'a, I>(dim: usize, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a FeatureVector>,
    {
        let rows: Vec<&FeatureVector> = rows.into_iter().collect();
        if rows.iter().any(|row| row.len() != dim) {
            return Err(Error::InvalidData(format!(
                "cannot fit scaler: expected rows of dimension {dim}"
            )));
        }

        if rows.is_empty() {
            return Ok(Self {
                mean: vec![0.0; dim],
                scale: vec![1.0; dim],
            });
        }

        let count = rows.len() as f64;
        let mut mean = vec![0.0; dim];
        for row in &rows {
            for (m, v) in mean.iter_mut().zip(row.as_slice()) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= count;
        }

        let mut variance = vec![0.0; dim];
        for row in &rows {
            for ((var, v), m) in variance.iter_mut().zip(row.as_slice()).zip(&mean) {
                *var += (v - m).powi(2);
            }
        }

        let scale = variance
            .into_iter()
            .map(|var| {
                let std = (var / count).sqrt();
                if std > f64::EPSILON * 10.0 {
                    std
                } else {
                    1.0
                }
            })
            .collect();

        Ok(Self { mean, scale })
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    /// Standardize one vector with the fitted statistics.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if the vector has the wrong dimension.
    pub fn transform(&self, vector: &FeatureVector) -> Result<FeatureVector> {
        if vector.len() != self.mean.len() {
            return Err(Error::InvalidData(format!(
                "cannot scale vector of dimension {} with scaler of dimension {}",
                vector.len(),
                self.mean.len()
            )));
        }

        Ok(vector
            .as_slice()
            .iter()
            .zip(&self.mean)
            .zip(&self.scale)
            .map(|((v, m), s)| (v - m) / s)
            .collect::<Vec<_>>()
            .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<FeatureVector> {
        vec![
            FeatureVector::new(vec![1.0, 10.0, 5.0]),
            FeatureVector::new(vec![2.0, 20.0, 5.0]),
            FeatureVector::new(vec![3.0, 60.0, 5.0]),
        ]
    }

    #[test]
    fn test_fit_mean_and_population_std() {
        let scaler = StandardScaler::fit(3, &rows()).unwrap();
        assert_eq!(scaler.mean(), &[2.0, 30.0, 5.0]);
        // population std of [1, 2, 3] is sqrt(2/3)
        assert!((scaler.scale()[0] - (2.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_column_uses_unit_scale() {
        let scaler = StandardScaler::fit(3, &rows()).unwrap();
        assert!((scaler.scale()[2] - 1.0).abs() < f64::EPSILON);
        let scaled = scaler.transform(&rows()[0]).unwrap();
        assert!(scaled.as_slice()[2].abs() < f64::EPSILON);
    }

    #[test]
    fn test_transformed_columns_are_standardized() {
        let data = rows();
        let scaler = StandardScaler::fit(3, &data).unwrap();
        let scaled: Vec<FeatureVector> = data.iter().map(|r| scaler.transform(r).unwrap()).collect();

        for col in 0..2 {
            let values: Vec<f64> = scaled.iter().map(|r| r.as_slice()[col]).collect();
            let mean = values.iter().sum::<f64>() / 3.0;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 3.0;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_fit_is_identity() {
        let scaler = StandardScaler::fit(2, std::iter::empty()).unwrap();
        let v = FeatureVector::new(vec![4.0, -1.0]);
        assert_eq!(scaler.transform(&v).unwrap(), v);
    }

    #[test]
    fn test_dimension_mismatch() {
        let scaler = StandardScaler::fit(3, &rows()).unwrap();
        let result = scaler.transform(&FeatureVector::new(vec![1.0]));
        assert!(matches!(result, Err(Error::InvalidData(_))));

        let result = StandardScaler::fit(2, &rows());
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }
}
