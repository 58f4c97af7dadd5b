//! End-to-end checks for the tree and forest classifiers on a deterministic
//! synthetic dataset.

use nalgebra::{DMatrix, DVector};
use rand::{rngs::StdRng, Rng, SeedableRng};

use tree_models::data::dataset::Dataset;
use tree_models::error::ModelError;
use tree_models::forests::classifier::RandomForestClassifier;
use tree_models::metrics::confusion::ClassificationMetrics;
use tree_models::trees::classifier::DecisionTreeClassifier;

/// 150 samples, 4 features, 3 classes.
///
/// Features 0-1 are informative (class * 3.0 + noise in [0, 1)), features 2-3
/// are noise in [0, 1). Classes are assigned round-robin.
fn make_classification() -> Dataset<f64, u32> {
    let mut rng = StdRng::seed_from_u64(42);
    let n_samples = 150;
    let n_features = 4;

    let mut features = Vec::with_capacity(n_samples * n_features);
    let mut labels = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let class = (i % 3) as u32;
        labels.push(class);
        for feature in 0..n_features {
            let base = if feature < 2 { f64::from(class) * 3.0 } else { 0.0 };
            features.push(base + rng.gen::<f64>());
        }
    }
    Dataset::new(
        DMatrix::from_row_slice(n_samples, n_features, &features),
        DVector::from_vec(labels),
    )
}

#[test]
fn tree_separates_training_data() {
    let dataset = make_classification();
    let mut tree = DecisionTreeClassifier::new();
    tree.fit(&dataset, Some(1)).unwrap();

    let predictions = tree.predict(&dataset.x).unwrap();
    assert_eq!(tree.accuracy(&dataset.y, &predictions).unwrap(), 1.0);
}

#[test]
fn forest_accuracy_on_held_out_data() {
    let dataset = make_classification();
    let (train, test) = dataset.train_test_split(0.7, Some(3)).unwrap();

    let mut forest = RandomForestClassifier::with_params(Some(15), None, None).unwrap();
    forest.fit(&train, Some(3)).unwrap();
    let predictions = forest.predict(&test.x).unwrap();

    let accuracy = forest.accuracy(&test.y, &predictions).unwrap();
    assert!(accuracy > 0.9, "forest accuracy {} <= 0.9", accuracy);
}

#[test]
fn forest_predictions_are_reproducible() {
    let dataset = make_classification();
    let run = |seed| {
        let mut forest = RandomForestClassifier::with_params(Some(8), None, Some(3)).unwrap();
        forest.fit(&dataset, Some(seed)).unwrap();
        forest.predict(&dataset.x).unwrap()
    };
    assert_eq!(run(17), run(17));
}

#[test]
fn malformed_input_is_rejected() {
    let dataset = Dataset::new(
        DMatrix::from_row_slice(3, 1, &[1.0, 2.0, 3.0]),
        DVector::from_vec(vec![0u32, 1]),
    );
    let mut tree = DecisionTreeClassifier::new();
    assert!(matches!(
        tree.fit(&dataset, None),
        Err(ModelError::LabelCountMismatch { rows: 3, labels: 2 })
    ));

    let mut forest = RandomForestClassifier::new();
    assert!(matches!(
        forest.fit(&dataset, None),
        Err(ModelError::LabelCountMismatch { rows: 3, labels: 2 })
    ));
    assert!(matches!(
        forest.predict(&dataset.x),
        Err(ModelError::NotFitted)
    ));
}
