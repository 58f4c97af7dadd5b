use crate::{
    error::{ModelError, Result},
    trees::params::{SplitPolicy, TreeParams},
};

#[derive(Clone, Debug, PartialEq)]
pub struct ForestParams {
    num_trees: usize,
    max_fit_attempts: usize,
    tree_params: TreeParams,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ForestParams {
    /// 25 trees of depth at most 5, each allowed 10 fit attempts.
    pub fn new() -> Self {
        Self {
            num_trees: 25,
            max_fit_attempts: 10,
            tree_params: TreeParams {
                max_depth: 5,
                ..TreeParams::new()
            },
        }
    }

    pub fn set_num_trees(&mut self, num_trees: usize) -> Result<()> {
        if num_trees < 1 {
            return Err(ModelError::InvalidTreeCount { num_trees });
        }
        self.num_trees = num_trees;
        Ok(())
    }

    /// Sets how many bootstrap samples a single member may try before the
    /// whole forest fit is abandoned.
    pub fn set_max_fit_attempts(&mut self, max_fit_attempts: usize) -> Result<()> {
        if max_fit_attempts < 1 {
            return Err(ModelError::InvalidFitAttempts { max_fit_attempts });
        }
        self.max_fit_attempts = max_fit_attempts;
        Ok(())
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

    pub fn num_trees(&self) -> usize {
        self.num_trees
    }

    pub fn max_fit_attempts(&self) -> usize {
        self.max_fit_attempts
    }

    pub fn tree_params(&self) -> &TreeParams {
        &self.tree_params
    }
}
