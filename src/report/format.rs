//! Terminal formatting for `ml-mcp train`.

use crate::app::pipeline::TrainRun;
use crate::domain::TrainRequest;
use crate::fit::FitOptions;

/// Format the run summary: dataset, split, solver settings and the fitted weights.
pub fn format_run_summary(run: &TrainRun, request: &TrainRequest) -> String {
    let model = &run.model;
    let classes = &model.classes;
    let opts = FitOptions::default();
    let mut out = String::new();

    out.push_str("=== ml-mcp - Logistic Regression ===\n");
    out.push_str(&format!("Data: {}\n", request.data_path.display()));
    out.push_str(&format!("Target: {}\n", request.target_column));
    out.push_str(&format!(
        "Rows: n={} | train={} | test={} (test_size={}, random_state={})\n",
        run.n_rows, run.n_train, run.n_test, request.test_size, request.random_state
    ));
    out.push_str(&format!(
        "Features ({}): {}\n",
        run.feature_names.len(),
        run.feature_names.join(", ")
    ));
    out.push_str(&format!(
        "Classes ({}): {}\n",
        classes.len(),
        join_labels(classes.labels())
    ));
    out.push_str(&format!(
        "Solver: lbfgs (linfa-logistic) | alpha={} | max_iter={}\n",
        opts.alpha, opts.max_iter
    ));
    out.push_str(&format!("Accuracy: {:.4}\n", run.accuracy));

    out.push_str("\nCoefficients:\n");
    let rows = model.coefficients();
    let intercepts = model.intercepts();
    for (k, (row, b)) in rows.iter().zip(&intercepts).enumerate() {
        let label = if classes.is_binary() {
            // Single row scores the second class against the first.
            format!(
                "{} vs {}",
                fmt_label(classes, 1),
                fmt_label(classes, 0)
            )
        } else {
            fmt_label(classes, k)
        };
        out.push_str(&format!("- class {label}: intercept={}\n", fmt_signed(*b)));
        for (name, w) in run.feature_names.iter().zip(row) {
            out.push_str(&format!("    {:<24} {}\n", truncate(name, 24), fmt_signed(*w)));
        }
    }

    out
}

fn fmt_label(classes: &crate::fit::Classes, idx: usize) -> String {
    classes
        .label(idx)
        .map(|l| l.to_string())
        .unwrap_or_else(|| "?".to_string())
}

fn join_labels(labels: &[crate::fit::ClassLabel]) -> String {
    labels
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn fmt_signed(v: f64) -> String {
    format!("{v:+.6}")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('~');
    out
}
