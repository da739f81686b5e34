//! Shared "train and evaluate" pipeline used by both the MCP tool and the CLI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV load -> target check -> split -> encode -> fit -> score
//!
//! The MCP tool and the `train` subcommand then only differ in presentation.

use crate::data::train_test_split;
use crate::domain::{TrainRequest, TrainResponse};
use crate::error::TrainError;
use crate::fit::{ClassLabel, Classes, FitOptions, LabelColumn, accuracy, feature_matrix, fit_logistic};
use crate::io::load_table;
use crate::models::LogisticModel;

/// All computed outputs of a single training run.
#[derive(Debug)]
pub struct TrainRun {
    pub n_rows: usize,
    pub feature_names: Vec<String>,
    pub n_train: usize,
    pub n_test: usize,
    pub model: LogisticModel,
    pub accuracy: f64,
}

impl TrainRun {
    /// The success variant of the tool response.
    pub fn response(&self) -> TrainResponse {
        TrainResponse::Success {
            accuracy: self.accuracy,
            coefficients: self.model.coefficients(),
            intercept: self.model.intercepts(),
        }
    }
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_training(request: &TrainRequest) -> Result<TrainRun, TrainError> {
    // 1) Load the table.
    let table = load_table(&request.data_path)?;

    // 2) The label column must exist.
    let target = table
        .column_index(&request.target_column)
        .ok_or_else(|| TrainError::MissingTarget(request.target_column.clone()))?;

    // 3) Every other column is a feature.
    let feature_cols: Vec<usize> = (0..table.n_columns()).filter(|&c| c != target).collect();
    let feature_names = feature_cols.iter().map(|&c| table.columns[c].clone()).collect();

    // 4) Seeded split.
    let split = train_test_split(table.n_rows(), request.test_size, request.random_state)?;

    // 5) Features first, then the training labels.
    let x_train = feature_matrix(&table, &split.train, &feature_cols)?;
    let labels = LabelColumn::parse(&table, target);
    let y_train = labels.training(&split.train)?;
    let classes = Classes::from_labels(&y_train)?;
    let y_train_idx = classes.encode(&y_train)?;
    let model = fit_logistic(&x_train, &y_train_idx, classes, &FitOptions::default())?;

    // 6) Score on the held-out rows. Labels never seen in training count as misses.
    let x_test = feature_matrix(&table, &split.test, &feature_cols)?;
    let predicted: Vec<Option<ClassLabel>> =
        model.predict_labels(&x_test).into_iter().map(Some).collect();
    let truth = labels.values(&split.test);
    let accuracy = accuracy(&truth, &predicted)?;

    Ok(TrainRun {
        n_rows: table.n_rows(),
        feature_names,
        n_train: split.train.len(),
        n_test: split.test.len(),
        model,
        accuracy,
    })
}

/// Tool entry point: never fails, every error becomes `{ "error": ... }`.
pub fn train_classifier_from_csv(request: &TrainRequest) -> TrainResponse {
    tracing::info!(
        data_path = %request.data_path.display(),
        target_column = %request.target_column,
        test_size = request.test_size,
        random_state = request.random_state,
        "training classifier"
    );

    match run_training(request) {
        Ok(run) => {
            tracing::info!(
                accuracy = run.accuracy,
                n_train = run.n_train,
                n_test = run.n_test,
                n_classes = run.model.classes.len(),
                "training finished"
            );
            run.response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "training failed");
            err.into()
        }
    }
}
