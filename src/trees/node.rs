use crate::data::dataset::{Number, WholeNumber};

/// Decision tree node
///
/// A node is either a leaf carrying the predicted class or an internal node
/// carrying a split rule. Children are owned by their parent.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode<XT: Number, YT: WholeNumber> {
    Leaf {
        value: YT,
    },
    Internal {
        feature_index: usize,
        threshold: XT,
        left: Box<TreeNode<XT, YT>>,
        right: Box<TreeNode<XT, YT>>,
    },
}

impl<XT: Number, YT: WholeNumber> TreeNode<XT, YT> {
    pub fn leaf(value: YT) -> Self {
        Self::Leaf { value }
    }

    pub fn internal(feature_index: usize, threshold: XT, left: Self, right: Self) -> Self {
        Self::Internal {
            feature_index,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Number of split levels below this node; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_valued_leaf_is_a_leaf() {
        let node: TreeNode<f64, u8> = TreeNode::leaf(0);
        assert!(node.is_leaf());
        assert_eq!(node.depth(), 0);
        assert_eq!(node.leaf_count(), 1);
    }

    #[test]
    fn test_internal_node_shape() {
        let node: TreeNode<f64, u8> = TreeNode::internal(
            0,
            0.0,
            TreeNode::leaf(0),
            TreeNode::internal(1, 2.5, TreeNode::leaf(1), TreeNode::leaf(2)),
        );
        assert!(!node.is_leaf());
        assert_eq!(node.depth(), 2);
        assert_eq!(node.leaf_count(), 3);
    }
}
