use csv::ReaderBuilder;
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;
use std::error::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tree_models::data::dataset::Dataset;
use tree_models::forests::classifier::RandomForestClassifier;
use tree_models::metrics::confusion::ClassificationMetrics;
use tree_models::trees::classifier::DecisionTreeClassifier;

/// Reads a CSV file with a header row. Every column but the last is a
/// numeric feature; the last column is a class name, mapped to ids in order
/// of first appearance.
fn read_file_classification(file_path: &str) -> Result<Dataset<f64, u32>, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(file_path)?;
    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut label_map = HashMap::new();
    let mut dimension = None;

    for result in reader.records() {
        let record = result?;
        if record.len() < 2 {
            return Err("Each row needs at least one feature and a label.".into());
        }
        let row_dimension = *dimension.get_or_insert(record.len() - 1);
        if record.len() - 1 != row_dimension {
            return Err(format!("Expected {} features, found {}.", row_dimension, record.len() - 1).into());
        }

        for feature in record.iter().take(row_dimension) {
            features.push(feature.trim().parse::<f64>()?);
        }

        let label = record.get(row_dimension).ok_or("Missing label")?;
        let next_id = label_map.len() as u32;
        labels.push(*label_map.entry(label.trim().to_string()).or_insert(next_id));
    }

    let dimension = dimension.ok_or("The file contains no rows.")?;
    let feature_matrix = DMatrix::from_row_slice(labels.len(), dimension, &features);
    Ok(Dataset::new(feature_matrix, DVector::from_vec(labels)))
}

fn report<M: ClassificationMetrics<u32>>(
    name: &str,
    model: &M,
    y_true: &DVector<u32>,
    y_pred: &DVector<u32>,
) -> Result<(), Box<dyn Error>> {
    let accuracy = model.accuracy(y_true, y_pred)?;
    let precision = model.precision(y_true, y_pred)?;
    let recall = model.recall(y_true, y_pred)?;
    match model.f1_score(y_true, y_pred) {
        Ok(f1) => info!(model = name, accuracy, precision, recall, f1, "evaluation"),
        Err(error) => {
            info!(model = name, accuracy, precision, recall, "evaluation");
            warn!(model = name, %error, "f1 score unavailable");
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let file_path = args.next().unwrap_or_else(|| "datasets/features.csv".to_string());
    let seed = args.next().map(|seed| seed.parse::<u64>()).transpose()?;
    let num_trees = args.next().map(|trees| trees.parse::<usize>()).transpose()?;

    let dataset = read_file_classification(&file_path)?;
    info!(
        path = %file_path,
        rows = dataset.nrows(),
        features = dataset.ncols(),
        "loaded dataset"
    );

    let (train_dataset, test_dataset) = dataset.train_test_split(0.75, seed)?;

    let mut tree = DecisionTreeClassifier::new();
    tree.fit(&train_dataset, seed)?;
    let predictions = tree.predict(&test_dataset.x)?;
    report("decision_tree", &tree, &test_dataset.y, &predictions)?;

    let mut forest = RandomForestClassifier::with_params(num_trees, None, None)?;
    forest.fit(&train_dataset, seed)?;
    let predictions = forest.predict(&test_dataset.x)?;
    report("random_forest", &forest, &test_dataset.y, &predictions)?;

    Ok(())
}
