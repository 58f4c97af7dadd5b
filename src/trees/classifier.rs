//! Decision Tree Classifier
use super::{
    entropy::{information_gain, majority_class},
    node::TreeNode,
    params::{SplitPolicy, TreeParams},
};
use crate::{
    data::dataset::{Dataset, Number, WholeNumber},
    error::{ModelError, Result},
    metrics::confusion::ClassificationMetrics,
};
use nalgebra::{DMatrix, DVector};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::{debug, info, instrument};

struct SplitData<XT: Number> {
    feature_index: usize,
    threshold: XT,
    information_gain: f64,
}

/// Labels of a training set mapped onto dense class indices.
struct EncodedTargets<YT: WholeNumber> {
    classes: Vec<YT>,
    targets: Vec<usize>,
}

impl<YT: WholeNumber> EncodedTargets<YT> {
    fn new(y: &DVector<YT>) -> Self {
        let mut classes: Vec<YT> = y.iter().copied().collect();
        classes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        classes.dedup();
        let targets = y
            .iter()
            .map(|label| classes.iter().position(|class| class == label).unwrap_or(0))
            .collect();
        Self { classes, targets }
    }

    fn class_counts(&self, rows: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.classes.len()];
        for &row in rows {
            counts[self.targets[row]] += 1;
        }
        counts
    }
}

/// Decision Tree Classifier
///
/// Grows a binary tree by repeatedly picking the feature/threshold pair with
/// the highest information gain (entropy criterion).
#[derive(Clone, Debug)]
pub struct DecisionTreeClassifier<XT: Number, YT: WholeNumber> {
    root: Option<Box<TreeNode<XT, YT>>>,
    tree_params: TreeParams,
    num_features: usize,
}

impl<XT: Number, YT: WholeNumber> ClassificationMetrics<YT> for DecisionTreeClassifier<XT, YT> {}

impl<XT: Number, YT: WholeNumber> Default for DecisionTreeClassifier<XT, YT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<XT: Number, YT: WholeNumber> DecisionTreeClassifier<XT, YT> {
    /// Creates a new, unfitted tree with default parameters.
    pub fn new() -> Self {
        Self::with_tree_params(TreeParams::new())
    }

    /// Creates a new, unfitted tree with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `min_samples_split` - Nodes with fewer samples become leaves. Defaults to 2.
    /// * `max_depth` - Nodes deeper than this become leaves. Defaults to 100.
    ///
    /// # Errors
    ///
    /// Fails if `min_samples_split` is less than 2 or `max_depth` is less than 1.
    pub fn with_params(min_samples_split: Option<usize>, max_depth: Option<usize>) -> Result<Self> {
        let mut tree = Self::new();
        if let Some(min_samples_split) = min_samples_split {
            tree.set_min_samples_split(min_samples_split)?;
        }
        if let Some(max_depth) = max_depth {
            tree.set_max_depth(max_depth)?;
        }
        Ok(tree)
    }

    pub fn with_tree_params(tree_params: TreeParams) -> Self {
        Self {
            root: None,
            tree_params,
            num_features: 0,
        }
    }

    pub fn set_min_samples_split(&mut self, min_samples_split: usize) -> Result<()> {
        self.tree_params.set_min_samples_split(min_samples_split)
    }

    pub fn set_max_depth(&mut self, max_depth: usize) -> Result<()> {
        self.tree_params.set_max_depth(max_depth)
    }

    pub fn set_split_policy(&mut self, split_policy: SplitPolicy) {
        self.tree_params.set_split_policy(split_policy)
    }

    pub fn tree_params(&self) -> &TreeParams {
        &self.tree_params
    }

    pub fn root(&self) -> Option<&TreeNode<XT, YT>> {
        self.root.as_deref()
    }

    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Builds the tree from a dataset, shuffling feature order with a
    /// `StdRng` seeded from `seed` (or from entropy when `None`).
    ///
    /// # Errors
    ///
    /// Fails if the dataset is malformed, or with
    /// [`ModelError::DegenerateSplit`] if a zero-gain split empties one side.
    pub fn fit(&mut self, dataset: &Dataset<XT, YT>, seed: Option<u64>) -> Result<()> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.fit_with_rng(dataset, &mut rng)
    }

    /// Builds the tree from a dataset using the given random source.
    ///
    /// Any previously fitted tree is discarded first, so a failed fit leaves
    /// the classifier unfitted.
    #[instrument(skip_all, fields(n_samples = dataset.nrows(), n_features = dataset.ncols()))]
    pub fn fit_with_rng<R: Rng>(&mut self, dataset: &Dataset<XT, YT>, rng: &mut R) -> Result<()> {
        self.root = None;
        dataset.validate()?;

        let encoded = EncodedTargets::new(&dataset.y);
        let rows: Vec<usize> = (0..dataset.nrows()).collect();
        let root = self.build_tree(dataset, &encoded, rows, 0, rng)?;

        info!(
            depth = root.depth(),
            leaves = root.leaf_count(),
            n_classes = encoded.classes.len(),
            "fitted decision tree"
        );
        self.num_features = dataset.ncols();
        self.root = Some(Box::new(root));
        Ok(())
    }

    /// Predicts a label for every row of `prediction_features`.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::NotFitted`] before a successful `fit`, and with
    /// [`ModelError::FeatureCountMismatch`] if the column count differs from
    /// the training data.
    pub fn predict(&self, prediction_features: &DMatrix<XT>) -> Result<DVector<YT>> {
        let root = self.root.as_ref().ok_or(ModelError::NotFitted)?;
        if prediction_features.ncols() != self.num_features {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.num_features,
                got: prediction_features.ncols(),
            });
        }
        let predictions: Vec<_> = (0..prediction_features.nrows())
            .map(|row| Self::make_prediction(prediction_features, row, root))
            .collect();

        Ok(DVector::from_vec(predictions))
    }

    fn make_prediction(features: &DMatrix<XT>, row: usize, node: &TreeNode<XT, YT>) -> YT {
        match node {
            TreeNode::Leaf { value } => *value,
            TreeNode::Internal {
                feature_index,
                threshold,
                left,
                right,
            } => {
                if features[(row, *feature_index)] <= *threshold {
                    Self::make_prediction(features, row, left)
                } else {
                    Self::make_prediction(features, row, right)
                }
            }
        }
    }

    fn build_tree<R: Rng>(
        &self,
        dataset: &Dataset<XT, YT>,
        encoded: &EncodedTargets<YT>,
        rows: Vec<usize>,
        depth: usize,
        rng: &mut R,
    ) -> Result<TreeNode<XT, YT>> {
        let counts = encoded.class_counts(&rows);
        let num_labels = counts.iter().filter(|&&count| count > 0).count();
        let leaf = || TreeNode::leaf(encoded.classes[majority_class(&counts)]);

        if depth > self.tree_params.max_depth()
            || rows.len() < self.tree_params.min_samples_split()
            || num_labels == 1
        {
            return Ok(leaf());
        }

        let mut features: Vec<usize> = (0..dataset.ncols()).collect();
        features.shuffle(rng);

        let best_split = match self.get_best_split(dataset, encoded, &rows, &counts, &features) {
            Some(split) => split,
            None => return Ok(leaf()),
        };
        if self.tree_params.split_policy() == SplitPolicy::RequireGain
            && best_split.information_gain <= 0.0
        {
            return Ok(leaf());
        }

        let (left_rows, right_rows) =
            dataset.partition_rows(&rows, best_split.feature_index, best_split.threshold);
        if left_rows.is_empty() || right_rows.is_empty() {
            return Err(ModelError::DegenerateSplit {
                depth,
                feature_index: best_split.feature_index,
            });
        }
        debug!(
            depth,
            feature_index = best_split.feature_index,
            threshold = ?best_split.threshold,
            gain = best_split.information_gain,
            left = left_rows.len(),
            right = right_rows.len(),
            "split node"
        );

        let left_node = self.build_tree(dataset, encoded, left_rows, depth + 1, rng)?;
        let right_node = self.build_tree(dataset, encoded, right_rows, depth + 1, rng)?;
        Ok(TreeNode::internal(
            best_split.feature_index,
            best_split.threshold,
            left_node,
            right_node,
        ))
    }

    /// Scans every feature in `features` order and every distinct value of it
    /// in ascending order. The first candidate with the strictly highest gain
    /// wins.
    fn get_best_split(
        &self,
        dataset: &Dataset<XT, YT>,
        encoded: &EncodedTargets<YT>,
        rows: &[usize],
        parent_counts: &[usize],
        features: &[usize],
    ) -> Option<SplitData<XT>> {
        let mut best_split: Option<SplitData<XT>> = None;

        for &feature_index in features {
            let value_of = |row: usize| dataset.x[(row, feature_index)];
            let mut sorted_rows = rows.to_vec();
            sorted_rows.sort_by(|&a, &b| {
                value_of(a)
                    .partial_cmp(&value_of(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let mut left_counts = vec![0; parent_counts.len()];
            let mut right_counts = parent_counts.to_vec();
            let mut position = 0;
            while position < sorted_rows.len() {
                let threshold = value_of(sorted_rows[position]);
                while position < sorted_rows.len() && value_of(sorted_rows[position]) <= threshold {
                    let class = encoded.targets[sorted_rows[position]];
                    left_counts[class] += 1;
                    right_counts[class] -= 1;
                    position += 1;
                }

                let current_information_gain =
                    information_gain(parent_counts, &left_counts, &right_counts);
                if best_split
                    .as_ref()
                    .map_or(true, |best| current_information_gain > best.information_gain)
                {
                    best_split = Some(SplitData {
                        feature_index,
                        threshold,
                        information_gain: current_information_gain,
                    });
                }
            }
        }
        best_split
    }
}
