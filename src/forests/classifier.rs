//! Random Forest Classifier
use nalgebra::{DMatrix, DVector};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use super::{bootstrap::BootstrapSampler, params::ForestParams};
use crate::{
    data::dataset::{Dataset, Number, WholeNumber},
    error::{ModelError, Result},
    metrics::confusion::ClassificationMetrics,
    trees::{classifier::DecisionTreeClassifier, params::SplitPolicy},
};

/// Random Forest Classifier
///
/// Each member tree is fitted on its own bootstrap sample; predictions are
/// combined by plurality vote.
#[derive(Clone, Debug)]
pub struct RandomForestClassifier<XT: Number, YT: WholeNumber> {
    trees: Vec<DecisionTreeClassifier<XT, YT>>,
    forest_params: ForestParams,
}

impl<XT: Number, YT: WholeNumber> ClassificationMetrics<YT> for RandomForestClassifier<XT, YT> {}

impl<XT: Number, YT: WholeNumber> Default for RandomForestClassifier<XT, YT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<XT: Number, YT: WholeNumber> RandomForestClassifier<XT, YT> {
    pub fn new() -> Self {
        Self::with_forest_params(ForestParams::new())
    }

    /// Creates a new, unfitted forest with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `num_trees` - Number of member trees. Defaults to 25.
    /// * `min_samples_split` - Forwarded to every member. Defaults to 2.
    /// * `max_depth` - Forwarded to every member. Defaults to 5.
    ///
    /// # Errors
    ///
    /// Fails if any value is outside its valid range.
    pub fn with_params(
        num_trees: Option<usize>,
        min_samples_split: Option<usize>,
        max_depth: Option<usize>,
    ) -> Result<Self> {
        let mut forest_params = ForestParams::new();
        if let Some(num_trees) = num_trees {
            forest_params.set_num_trees(num_trees)?;
        }
        if let Some(min_samples_split) = min_samples_split {
            forest_params.set_min_samples_split(min_samples_split)?;
        }
        if let Some(max_depth) = max_depth {
            forest_params.set_max_depth(max_depth)?;
        }
        Ok(Self::with_forest_params(forest_params))
    }

    pub fn with_forest_params(forest_params: ForestParams) -> Self {
        Self {
            trees: Vec::with_capacity(forest_params.num_trees()),
            forest_params,
        }
    }

    pub fn set_num_trees(&mut self, num_trees: usize) -> Result<()> {
        self.forest_params.set_num_trees(num_trees)
    }

    pub fn set_max_fit_attempts(&mut self, max_fit_attempts: usize) -> Result<()> {
        self.forest_params.set_max_fit_attempts(max_fit_attempts)
    }

    pub fn set_min_samples_split(&mut self, min_samples_split: usize) -> Result<()> {
        self.forest_params.set_min_samples_split(min_samples_split)
    }

    pub fn set_max_depth(&mut self, max_depth: usize) -> Result<()> {
        self.forest_params.set_max_depth(max_depth)
    }

    pub fn set_split_policy(&mut self, split_policy: SplitPolicy) {
        self.forest_params.set_split_policy(split_policy)
    }

    pub fn forest_params(&self) -> &ForestParams {
        &self.forest_params
    }

    pub fn trees(&self) -> &[DecisionTreeClassifier<XT, YT>] {
        &self.trees
    }

    /// Fits the forest, seeding the master `StdRng` from `seed` (or from
    /// entropy when `None`).
    ///
    /// # Errors
    ///
    /// Fails if the dataset is malformed, or with
    /// [`ModelError::ForestTrainingFailed`] if some member cannot be fitted
    /// within `max_fit_attempts` bootstrap samples.
    pub fn fit(&mut self, dataset: &Dataset<XT, YT>, seed: Option<u64>) -> Result<()> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.fit_with_rng(dataset, &mut rng)
    }

    /// Fits the forest using `rng` to derive one seed per member. Members are
    /// trained in parallel; the result does not depend on scheduling.
    #[instrument(skip_all, fields(num_trees = self.forest_params.num_trees(), n_samples = dataset.nrows()))]
    pub fn fit_with_rng<R: Rng>(&mut self, dataset: &Dataset<XT, YT>, rng: &mut R) -> Result<()> {
        self.trees.clear();
        dataset.validate()?;

        info!(
            num_trees = self.forest_params.num_trees(),
            n_samples = dataset.nrows(),
            n_features = dataset.ncols(),
            max_depth = self.forest_params.tree_params().max_depth(),
            "training random forest"
        );

        let seeds = (0..self.forest_params.num_trees())
            .map(|_| rng.gen::<u64>())
            .collect::<Vec<_>>();

        let trees = seeds
            .into_par_iter()
            .enumerate()
            .map(|(tree_index, tree_seed)| self.fit_member(dataset, tree_index, tree_seed))
            .collect::<Result<Vec<_>>>()?;

        info!(num_trees = trees.len(), "random forest trained");
        self.trees = trees;
        Ok(())
    }

    /// Fits one member, drawing a fresh bootstrap sample after every failed
    /// attempt.
    fn fit_member(
        &self,
        dataset: &Dataset<XT, YT>,
        tree_index: usize,
        tree_seed: u64,
    ) -> Result<DecisionTreeClassifier<XT, YT>> {
        let mut rng = StdRng::seed_from_u64(tree_seed);
        let max_fit_attempts = self.forest_params.max_fit_attempts();
        let mut attempt = 1;
        loop {
            let subset = BootstrapSampler::sample(dataset, &mut rng);
            let mut tree =
                DecisionTreeClassifier::with_tree_params(self.forest_params.tree_params().clone());
            match tree.fit_with_rng(&subset, &mut rng) {
                Ok(()) => {
                    debug!(tree_index, attempt, "fitted forest member");
                    return Ok(tree);
                }
                Err(error) if attempt < max_fit_attempts => {
                    warn!(tree_index, attempt, %error, "forest member failed to fit, resampling");
                    attempt += 1;
                }
                Err(error) => {
                    return Err(ModelError::ForestTrainingFailed {
                        tree_index,
                        attempts: attempt,
                        source: Box::new(error),
                    });
                }
            }
        }
    }

    /// Predicts a label for every row by plurality vote over the members.
    ///
    /// Ties go to the label predicted by the lowest-indexed member among the
    /// tied labels.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::NotFitted`] if the forest holds no trees, or
    /// with any error a member's `predict` returns.
    pub fn predict(&self, features: &DMatrix<XT>) -> Result<DVector<YT>> {
        if self.trees.is_empty() {
            return Err(ModelError::NotFitted);
        }
        let tree_predictions = self
            .trees
            .par_iter()
            .map(|tree| tree.predict(features))
            .collect::<Result<Vec<_>>>()?;

        let predictions = (0..features.nrows())
            .map(|row| majority_vote(tree_predictions.iter().map(|prediction| prediction[row])))
            .collect::<Option<Vec<_>>>()
            .ok_or(ModelError::NotFitted)?;

        Ok(DVector::from_vec(predictions))
    }
}

/// Most frequent value; among equally frequent values the first one seen wins.
fn majority_vote<YT: WholeNumber>(votes: impl Iterator<Item = YT>) -> Option<YT> {
    let mut class_counts: Vec<(YT, usize)> = Vec::new();
    for vote in votes {
        match class_counts.iter_mut().find(|(class, _)| *class == vote) {
            Some((_, count)) => *count += 1,
            None => class_counts.push((vote, 1)),
        }
    }

    let mut chosen: Option<(YT, usize)> = None;
    for (class, count) in class_counts {
        if chosen.map_or(true, |(_, best)| count > best) {
            chosen = Some((class, count));
        }
    }
    chosen.map(|(class, _)| class)
}
