//! Turning table cells into numbers: feature matrices and class labels.
//!
//! Features must be numeric (booleans count as 0/1). Labels may be numeric or
//! text; the whole label column decides which, the same way a dataframe column
//! gets one dtype. Validation of label values only looks at the training rows.
//! Classes are kept sorted so the coefficient rows come out in a stable order.

use std::cmp::Ordering;
use std::fmt;

use ndarray::Array2;

use crate::error::TrainError;
use crate::io::Table;

/// One class label value.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassLabel {
    Numeric(f64),
    Text(String),
}

impl ClassLabel {
    fn cmp_label(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ClassLabel::Numeric(a), ClassLabel::Numeric(b)) => a.total_cmp(b),
            (ClassLabel::Text(a), ClassLabel::Text(b)) => a.cmp(b),
            (ClassLabel::Numeric(_), ClassLabel::Text(_)) => Ordering::Less,
            (ClassLabel::Text(_), ClassLabel::Numeric(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassLabel::Numeric(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", *v as i64),
            ClassLabel::Numeric(v) => write!(f, "{v}"),
            ClassLabel::Text(s) => f.write_str(s),
        }
    }
}

/// Sorted, distinct classes seen in the training labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Classes {
    labels: Vec<ClassLabel>,
}

impl Classes {
    /// Collect the classes of a training label vector (at least two required).
    pub fn from_labels(labels: &[ClassLabel]) -> Result<Self, TrainError> {
        let mut distinct = labels.to_vec();
        distinct.sort_by(ClassLabel::cmp_label);
        distinct.dedup();

        match distinct.len() {
            0 => Err(TrainError::Solver("no training labels".to_string())),
            1 => Err(TrainError::SingleClass(distinct[0].to_string())),
            _ => Ok(Self { labels: distinct }),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn is_binary(&self) -> bool {
        self.labels.len() == 2
    }

    pub fn label(&self, idx: usize) -> Option<&ClassLabel> {
        self.labels.get(idx)
    }

    pub fn labels(&self) -> &[ClassLabel] {
        &self.labels
    }

    fn index_of(&self, label: &ClassLabel) -> Option<usize> {
        self.labels
            .binary_search_by(|c| c.cmp_label(label))
            .ok()
    }

    /// Map training labels to class indices.
    pub fn encode(&self, labels: &[ClassLabel]) -> Result<Vec<usize>, TrainError> {
        labels
            .iter()
            .map(|l| {
                self.index_of(l)
                    .ok_or_else(|| TrainError::Solver(format!("label '{l}' is not a known class")))
            })
            .collect()
    }
}

/// Parse a numeric token. NaN spellings outside the NA set stay text.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// The label column, typed once for all rows. Missing cells are `None`.
#[derive(Debug, Clone)]
pub struct LabelColumn {
    values: Vec<Option<ClassLabel>>,
}

impl LabelColumn {
    /// Numeric when every present cell parses as a number, text otherwise.
    pub fn parse(table: &Table, col: usize) -> Self {
        let cells: Vec<Option<&str>> = (0..table.n_rows()).map(|row| table.cell(row, col)).collect();
        let numeric = cells.iter().flatten().all(|s| parse_number(s).is_some());

        let values = cells
            .into_iter()
            .map(|cell| {
                cell.map(|s| match parse_number(s) {
                    Some(v) if numeric => ClassLabel::Numeric(v),
                    _ => ClassLabel::Text(s.to_string()),
                })
            })
            .collect();
        Self { values }
    }

    /// Labels of the training rows; these must be present, finite and discrete.
    pub fn training(&self, rows: &[usize]) -> Result<Vec<ClassLabel>, TrainError> {
        let labels: Vec<ClassLabel> = rows
            .iter()
            .map(|&row| self.values.get(row).cloned().flatten().ok_or(TrainError::LabelNaN))
            .collect::<Result<_, _>>()?;

        let numbers = labels.iter().filter_map(|l| match l {
            ClassLabel::Numeric(v) => Some(*v),
            ClassLabel::Text(_) => None,
        });
        let mut continuous = false;
        for v in numbers {
            if v.is_infinite() {
                return Err(TrainError::LabelInfinite);
            }
            continuous |= v.fract() != 0.0;
        }
        if continuous {
            return Err(TrainError::ContinuousLabels);
        }
        Ok(labels)
    }

    /// Labels of scoring rows as-is; a missing one never matches a prediction.
    pub fn values(&self, rows: &[usize]) -> Vec<Option<ClassLabel>> {
        rows.iter()
            .map(|&row| self.values.get(row).cloned().flatten())
            .collect()
    }
}

/// Parse one feature cell.
pub fn parse_feature(raw: Option<&str>) -> Result<f64, TrainError> {
    let Some(raw) = raw else {
        return Err(TrainError::FeatureNaN);
    };
    let value = match raw {
        "True" | "TRUE" | "true" => 1.0,
        "False" | "FALSE" | "false" => 0.0,
        _ => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| TrainError::NotNumeric(raw.to_string()))?,
    };
    if value.is_nan() {
        return Err(TrainError::FeatureNaN);
    }
    if value.is_infinite() {
        return Err(TrainError::FeatureInfinite);
    }
    Ok(value)
}

/// Build the `rows × feature_cols` design matrix for a subset of table rows.
pub fn feature_matrix(
    table: &Table,
    rows: &[usize],
    feature_cols: &[usize],
) -> Result<Array2<f64>, TrainError> {
    if feature_cols.is_empty() {
        return Err(TrainError::NoFeatures(rows.len()));
    }

    let mut x = Array2::zeros((rows.len(), feature_cols.len()));
    for (i, &row) in rows.iter().enumerate() {
        for (j, &col) in feature_cols.iter().enumerate() {
            x[[i, j]] = parse_feature(table.cell(row, col))?;
        }
    }
    Ok(x)
}
