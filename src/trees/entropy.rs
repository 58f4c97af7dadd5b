//! Entropy and information gain over per-class sample counts.

/// Shannon entropy (base 2) of a label set given its class counts.
///
/// Classes with a zero count do not contribute. An empty set has entropy 0.
pub fn entropy(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    -counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p_class = count as f64 / total;
            p_class * p_class.log2()
        })
        .sum::<f64>()
}

/// Entropy of the parent minus the size-weighted entropy of both children.
///
/// Returns exactly 0 when either child is empty, and never a negative value.
pub fn information_gain(parent: &[usize], left: &[usize], right: &[usize]) -> f64 {
    let left_len: usize = left.iter().sum();
    let right_len: usize = right.iter().sum();
    if left_len == 0 || right_len == 0 {
        return 0.0;
    }
    let total = (left_len + right_len) as f64;
    let child_entropy = left_len as f64 / total * entropy(left)
        + right_len as f64 / total * entropy(right);
    // rounding can push an uninformative split a hair below zero
    (entropy(parent) - child_entropy).max(0.0)
}

/// Index of the largest count; the lowest index wins ties.
pub fn majority_class(counts: &[usize]) -> usize {
    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_entropy_of_pure_set_is_zero() {
        assert_eq!(entropy(&[0, 7, 0]), 0.0);
        assert_eq!(entropy(&[]), 0.0);
    }

    #[test]
    fn test_entropy_of_uniform_set_is_log2_k() {
        assert_relative_eq!(entropy(&[5, 5]), 1.0, epsilon = 1e-12);
        assert_relative_eq!(entropy(&[3, 3, 3, 3]), 2.0, epsilon = 1e-12);
        assert_relative_eq!(entropy(&[2, 2, 2]), 3f64.log2(), epsilon = 1e-12);
    }

    #[test]
    fn test_entropy_is_bounded() {
        for counts in [[1, 2, 3], [10, 1, 0], [4, 4, 1], [0, 0, 9]] {
            let distinct = counts.iter().filter(|&&c| c > 0).count() as f64;
            let value = entropy(&counts);
            assert!(value >= 0.0);
            assert!(value <= distinct.log2() + 1e-12);
        }
    }

    #[test]
    fn test_perfect_split_gain_equals_parent_entropy() {
        let gain = information_gain(&[2, 2], &[2, 0], &[0, 2]);
        assert_relative_eq!(gain, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_partial_split_gain() {
        // parent [2, 2], left holds one sample of class 0
        let expected = 1.0 - 0.75 * (-(1.0 / 3.0) * (1.0f64 / 3.0).log2()
            - (2.0 / 3.0) * (2.0f64 / 3.0).log2());
        let gain = information_gain(&[2, 2], &[1, 0], &[1, 2]);
        assert_relative_eq!(gain, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_side_has_zero_gain() {
        assert_eq!(information_gain(&[2, 2], &[2, 2], &[0, 0]), 0.0);
        assert_eq!(information_gain(&[2, 2], &[0, 0], &[2, 2]), 0.0);
    }

    #[test]
    fn test_uninformative_split_gain_is_not_negative() {
        let gain = information_gain(&[3, 6, 9], &[1, 2, 3], &[2, 4, 6]);
        assert!(gain >= 0.0);
        assert_relative_eq!(gain, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_majority_class_prefers_lowest_index_on_ties() {
        assert_eq!(majority_class(&[1, 3, 3]), 1);
        assert_eq!(majority_class(&[2, 2]), 0);
        assert_eq!(majority_class(&[0, 0, 1]), 2);
    }
}
