use crate::error::{ModelError, Result};

/// What to do when the best split of a node does not reduce entropy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitPolicy {
    /// Split on the best candidate even when its gain is zero.
    #[default]
    AcceptZeroGain,
    /// Turn the node into a leaf unless some split has positive gain.
    RequireGain,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreeParams {
    pub min_samples_split: usize,
    pub max_depth: usize,
    pub split_policy: SplitPolicy,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParams {
    pub fn new() -> Self {
        Self {
            min_samples_split: 2,
            max_depth: 100,
            split_policy: SplitPolicy::AcceptZeroGain,
        }
    }

    pub fn set_min_samples_split(&mut self, min_samples_split: usize) -> Result<()> {
        if min_samples_split < 2 {
            return Err(ModelError::InvalidMinSamplesSplit { min_samples_split });
        }
        self.min_samples_split = min_samples_split;
        Ok(())
    }

    pub fn set_max_depth(&mut self, max_depth: usize) -> Result<()> {
        if max_depth < 1 {
            return Err(ModelError::InvalidMaxDepth { max_depth });
        }
        self.max_depth = max_depth;
        Ok(())
    }

    pub fn set_split_policy(&mut self, split_policy: SplitPolicy) {
        self.split_policy = split_policy;
    }

    pub fn min_samples_split(&self) -> usize {
        self.min_samples_split
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn split_policy(&self) -> SplitPolicy {
        self.split_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = TreeParams::default();
        assert_eq!(params.min_samples_split(), 2);
        assert_eq!(params.max_depth(), 100);
        assert_eq!(params.split_policy(), SplitPolicy::AcceptZeroGain);
    }

    #[test]
    fn test_rejects_small_min_samples_split() {
        let mut params = TreeParams::new();
        assert!(matches!(
            params.set_min_samples_split(1),
            Err(ModelError::InvalidMinSamplesSplit { min_samples_split: 1 })
        ));
        assert_eq!(params.min_samples_split(), 2);
    }

    #[test]
    fn test_rejects_zero_depth() {
        let mut params = TreeParams::new();
        assert!(params.set_max_depth(0).is_err());
        assert!(params.set_max_depth(3).is_ok());
        assert_eq!(params.max_depth(), 3);
    }
}
