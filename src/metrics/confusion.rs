use nalgebra::{DMatrix, DVector};

use crate::{
    data::dataset::WholeNumber,
    error::{ModelError, Result},
};

pub type ConfusionMatrix = DMatrix<usize>;

/// Evaluation metrics for classifiers. Rows of the confusion matrix are true
/// classes, columns are predicted classes, both in ascending label order.
pub trait ClassificationMetrics<T: WholeNumber> {
    /// Computes the confusion matrix based on the true labels and predicted labels.
    ///
    /// # Errors
    ///
    /// Fails if the two vectors differ in length.
    fn confusion_matrix(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<ConfusionMatrix> {
        if y_true.len() != y_pred.len() {
            return Err(ModelError::LengthMismatch {
                predictions: y_pred.len(),
                labels: y_true.len(),
            });
        }

        let mut classes: Vec<T> = y_true.iter().chain(y_pred.iter()).copied().collect();
        classes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        classes.dedup();

        let class_index = |label: &T| classes.iter().position(|class| class == label).unwrap_or(0);
        let mut matrix = DMatrix::zeros(classes.len(), classes.len());
        for (y_t, y_p) in y_true.iter().zip(y_pred.iter()) {
            matrix[(class_index(y_t), class_index(y_p))] += 1;
        }

        Ok(matrix)
    }

    /// Share of predictions equal to the true label.
    fn accuracy(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        if y_true.is_empty() {
            return Err(ModelError::UndefinedMetric("Accuracy of an empty prediction set is undefined."));
        }
        Ok(matrix.diagonal().sum() as f64 / y_true.len() as f64)
    }

    /// Precision of the larger of the two labels for binary problems, otherwise the
    /// macro average over classes.
    fn precision(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        Ok(averaged_ratio(&matrix, |matrix, class| matrix.column(class).sum()))
    }

    /// Recall of the larger of the two labels for binary problems, otherwise the
    /// macro average over classes.
    fn recall(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        Ok(averaged_ratio(&matrix, |matrix, class| matrix.row(class).sum()))
    }

    /// Harmonic mean of precision and recall.
    fn f1_score(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64> {
        let precision = self.precision(y_true, y_pred)?;
        let recall = self.recall(y_true, y_pred)?;

        if (precision + recall).abs() < f64::EPSILON {
            return Err(ModelError::UndefinedMetric(
                "Precision and recall are both 0, F1 score undefined.",
            ));
        }
        Ok(2.0 * (precision * recall) / (precision + recall))
    }
}

/// `tp / denominator(class)`, for the positive class of a binary matrix or
/// averaged over all classes. Classes with a zero denominator count as 0.
fn averaged_ratio(
    matrix: &ConfusionMatrix,
    denominator: impl Fn(&ConfusionMatrix, usize) -> usize,
) -> f64 {
    let num_classes = matrix.nrows();
    let ratio = |class: usize| {
        let total = denominator(matrix, class);
        if total > 0 {
            matrix[(class, class)] as f64 / total as f64
        } else {
            0.0
        }
    };

    if num_classes == 2 && denominator(matrix, 1) > 0 {
        return ratio(1);
    }
    if num_classes == 0 {
        return 0.0;
    }
    (0..num_classes).map(ratio).sum::<f64>() / num_classes as f64
}
