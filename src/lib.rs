//! # tree-models
//!
//! `tree-models` implements an entropy-based decision tree classifier and a
//! bootstrap-aggregated random forest built on top of it, using Rust.
//! It also contains a dataset type and classification metrics.
//!
//! ## Getting Started
//!
//! To use `tree-models`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! tree-models = "*"
//! ```
//!
//! ## Example Usage
//!
//! Here's how to train a decision tree and a random forest on a tiny dataset:
//!
//! ```rust
//! use nalgebra::{DMatrix, DVector};
//! use tree_models::data::dataset::Dataset;
//! use tree_models::forests::classifier::RandomForestClassifier;
//! use tree_models::trees::classifier::DecisionTreeClassifier;
//!
//! let x = DMatrix::from_row_slice(4, 1, &[0.0, 1.0, 2.0, 3.0]);
//! let y = DVector::from_vec(vec![0u8, 0, 1, 1]);
//! let dataset = Dataset::new(x, y);
//!
//! let mut tree = DecisionTreeClassifier::with_params(Some(2), Some(10)).unwrap();
//! tree.fit(&dataset, Some(42)).unwrap();
//!
//! let test_x = DMatrix::from_row_slice(2, 1, &[0.5, 2.5]);
//! assert_eq!(tree.predict(&test_x).unwrap(), DVector::from_vec(vec![0, 1]));
//!
//! let mut forest = RandomForestClassifier::with_params(Some(5), None, None).unwrap();
//! forest.fit(&dataset, Some(42)).unwrap();
//! let predictions = forest.predict(&test_x).unwrap();
//! assert_eq!(predictions.len(), 2);
//! ```

/// Dataset and data manipulation utilities
pub mod data;
/// Error type shared by all models
pub mod error;
/// Random Forests
pub mod forests;
/// Functions for evaluating model performance
pub mod metrics;
/// Decision trees
pub mod trees;
