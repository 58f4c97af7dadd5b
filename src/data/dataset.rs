use nalgebra::{DMatrix, DVector};
use num_traits::{FromPrimitive, Num, ToPrimitive};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::error::{ModelError, Result};

pub trait DataValue:
    Debug + Clone + Copy + Num + FromPrimitive + ToPrimitive + Send + Sync + Display + 'static
{
}

impl<T> DataValue for T where
    T: Debug + Clone + Copy + Num + FromPrimitive + ToPrimitive + Send + Sync + Display + 'static
{
}

/// Feature values: anything numeric and ordered.
pub trait Number: DataValue + PartialOrd {}
impl<T> Number for T where T: DataValue + PartialOrd {}

/// Class labels: integer-like values that can be hashed and compared exactly.
pub trait WholeNumber: Number + Eq + Hash {}
impl<T> WholeNumber for T where T: Number + Eq + Hash {}

/// A feature matrix paired with one label per row.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset<XT: Number, YT: WholeNumber> {
    pub x: DMatrix<XT>,
    pub y: DVector<YT>,
}

impl<XT: Number, YT: WholeNumber> Dataset<XT, YT> {
    pub fn new(x: DMatrix<XT>, y: DVector<YT>) -> Self {
        Self { x, y }
    }

    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.x.ncols()
    }

    /// Checks the dataset can be used for training.
    ///
    /// # Errors
    ///
    /// Fails on an empty matrix, a matrix without columns, a label vector whose
    /// length differs from the row count, a feature value that is not finite,
    /// or a negative label.
    pub fn validate(&self) -> Result<()> {
        if self.x.nrows() == 0 {
            return Err(ModelError::EmptyDataset);
        }
        if self.x.ncols() == 0 {
            return Err(ModelError::ZeroFeatures);
        }
        if self.y.len() != self.x.nrows() {
            return Err(ModelError::LabelCountMismatch {
                rows: self.x.nrows(),
                labels: self.y.len(),
            });
        }
        for sample_index in 0..self.x.nrows() {
            for feature_index in 0..self.x.ncols() {
                let value = self.x[(sample_index, feature_index)];
                if !value.to_f64().is_some_and(f64::is_finite) {
                    return Err(ModelError::NonFiniteValue {
                        sample_index,
                        feature_index,
                    });
                }
            }
        }
        if let Some(sample_index) = self.y.iter().position(|label| *label < YT::zero()) {
            return Err(ModelError::NegativeLabel { sample_index });
        }
        Ok(())
    }

    /// Builds a new dataset from the given rows, in the given order. Repeated
    /// indices produce repeated rows.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self::new(self.x.select_rows(indices), self.y.select_rows(indices))
    }

    /// Splits `rows` into those whose `feature_index` value is at most
    /// `threshold` and the rest, preserving order.
    pub fn partition_rows(
        &self,
        rows: &[usize],
        feature_index: usize,
        threshold: XT,
    ) -> (Vec<usize>, Vec<usize>) {
        rows.iter()
            .copied()
            .partition(|&row| self.x[(row, feature_index)] <= threshold)
    }

    pub fn train_test_split(&self, train_size: f64, seed: Option<u64>) -> Result<(Self, Self)> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(ModelError::InvalidTrainSize { train_size });
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.x.nrows()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.x.nrows() as f64 * train_size).floor() as usize;

        Ok((
            self.select_rows(&indices[..train_size]),
            self.select_rows(&indices[train_size..]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_rows() -> Dataset<i32, u8> {
        let x = DMatrix::from_row_slice(4, 2, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let y = DVector::from_vec(vec![9, 10, 11, 12]);
        Dataset::new(x, y)
    }

    #[test]
    fn test_validate_accepts_well_formed_data() {
        assert!(four_rows().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        let empty = Dataset::new(DMatrix::<f64>::zeros(0, 2), DVector::<u8>::zeros(0));
        assert!(matches!(empty.validate(), Err(ModelError::EmptyDataset)));
    }

    #[test]
    fn test_validate_rejects_zero_columns() {
        let dataset = Dataset::new(DMatrix::<f64>::zeros(3, 0), DVector::<u8>::zeros(3));
        assert!(matches!(dataset.validate(), Err(ModelError::ZeroFeatures)));
    }

    #[test]
    fn test_validate_rejects_label_mismatch() {
        let dataset = Dataset::new(
            DMatrix::from_row_slice(3, 1, &[1.0, 2.0, 3.0]),
            DVector::from_vec(vec![0u8, 1]),
        );
        assert!(matches!(
            dataset.validate(),
            Err(ModelError::LabelCountMismatch { rows: 3, labels: 2 })
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let dataset = Dataset::new(
            DMatrix::from_row_slice(2, 2, &[1.0, 2.0, f64::NAN, 4.0]),
            DVector::from_vec(vec![0u8, 1]),
        );
        assert!(matches!(
            dataset.validate(),
            Err(ModelError::NonFiniteValue {
                sample_index: 1,
                feature_index: 0
            })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_label() {
        let dataset = Dataset::new(
            DMatrix::from_row_slice(2, 1, &[1.0, 2.0]),
            DVector::from_vec(vec![0i32, -1]),
        );
        assert!(matches!(
            dataset.validate(),
            Err(ModelError::NegativeLabel { sample_index: 1 })
        ));
    }

    #[test]
    fn test_select_rows_keeps_duplicates_and_order() {
        let selected = four_rows().select_rows(&[3, 0, 3]);
        assert_eq!(selected.x, DMatrix::from_row_slice(3, 2, &[7, 8, 1, 2, 7, 8]));
        assert_eq!(selected.y, DVector::from_vec(vec![12, 9, 12]));
    }

    #[test]
    fn test_partition_rows() {
        let dataset = four_rows();
        let (left, right) = dataset.partition_rows(&[0, 1, 2, 3], 0, 4);
        assert_eq!(left, vec![0, 1]);
        assert_eq!(right, vec![2, 3]);

        let (left, right) = dataset.partition_rows(&[0, 1, 2, 3], 0, 9);
        assert_eq!(left.len(), 4);
        assert!(right.is_empty());
    }

    #[test]
    fn test_dataset_train_test_split() {
        let (train_dataset, test_dataset) = four_rows().train_test_split(0.75, None).unwrap();
        assert_eq!(train_dataset.x.nrows(), 3);
        assert_eq!(test_dataset.x.nrows(), 1);
    }

    #[test]
    fn test_dataset_train_test_split_is_seeded() {
        let dataset = four_rows();
        let first = dataset.train_test_split(0.5, Some(7)).unwrap();
        let second = dataset.train_test_split(0.5, Some(7)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_dataset_train_test_split_rejects_bad_size() {
        assert!(matches!(
            four_rows().train_test_split(1.5, None),
            Err(ModelError::InvalidTrainSize { .. })
        ));
    }
}
