/// Errors returned by the tree and forest classifiers.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Returned when `predict` is called before a successful `fit`.
    #[error("model not trained: call fit before predict")]
    NotFitted,

    /// Returned when the training dataset has zero samples.
    #[error("dataset has zero samples")]
    EmptyDataset,

    /// Returned when the training dataset has zero feature columns.
    #[error("dataset has zero feature columns")]
    ZeroFeatures,

    /// Returned when the feature matrix and label vector disagree on row count.
    #[error("feature matrix has {rows} rows but {labels} labels were given")]
    LabelCountMismatch {
        /// Rows in the feature matrix.
        rows: usize,
        /// Entries in the label vector.
        labels: usize,
    },

    /// Returned when prediction input has a different column count than the fitted data.
    #[error("input has {got} features, expected {expected}")]
    FeatureCountMismatch {
        /// Column count seen during fit.
        expected: usize,
        /// Column count of the offending input.
        got: usize,
    },

    /// Returned when a feature value is NaN, infinite or not representable as `f64`.
    #[error("non-finite value at sample {sample_index}, feature {feature_index}")]
    NonFiniteValue {
        /// Zero-based row of the offending value.
        sample_index: usize,
        /// Zero-based column of the offending value.
        feature_index: usize,
    },

    /// Returned when a label is below zero.
    #[error("label at sample {sample_index} is negative")]
    NegativeLabel {
        /// Zero-based row of the offending label.
        sample_index: usize,
    },

    /// Returned when the selected split sends every sample to one side.
    #[error("degenerate split at depth {depth} on feature {feature_index}: one side is empty")]
    DegenerateSplit {
        /// Depth of the node that could not be split.
        depth: usize,
        /// Feature chosen for the split.
        feature_index: usize,
    },

    /// Returned when a forest member cannot be fitted within the attempt budget.
    #[error("tree {tree_index} failed to fit after {attempts} attempts")]
    ForestTrainingFailed {
        /// Index of the member that kept failing.
        tree_index: usize,
        /// Number of attempts made.
        attempts: usize,
        /// Error of the last attempt.
        #[source]
        source: Box<ModelError>,
    },

    #[error("max_depth must be at least 1, got {max_depth}")]
    InvalidMaxDepth { max_depth: usize },

    #[error("min_samples_split must be at least 2, got {min_samples_split}")]
    InvalidMinSamplesSplit { min_samples_split: usize },

    #[error("num_trees must be at least 1, got {num_trees}")]
    InvalidTreeCount { num_trees: usize },

    #[error("max_fit_attempts must be at least 1, got {max_fit_attempts}")]
    InvalidFitAttempts { max_fit_attempts: usize },

    #[error("train size must be between 0.0 and 1.0, got {train_size}")]
    InvalidTrainSize { train_size: f64 },

    /// Returned when true and predicted label vectors differ in length.
    #[error("predictions and labels are of different sizes ({predictions} vs {labels})")]
    LengthMismatch { predictions: usize, labels: usize },

    /// Returned when a metric has no defined value for the given input.
    #[error("{0}")]
    UndefinedMetric(&'static str),
}

pub type Result<T> = std::result::Result<T, ModelError>;
