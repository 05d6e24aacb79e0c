use serde::{Deserialize, Serialize};

/// One value per well, stored row-major.
///
/// Only ever built from a complete set of values, so a partially filled
/// matrix cannot exist.
#[derive(Debug, Clone, PartialEq)]
pub struct WellMatrix {
    rows: u32,
    cols: u32,
    values: Vec<f64>,
}

/// Per-well absorbance: the artifact handed to table export.
pub type AbsorbanceMatrix = WellMatrix;

/// Externally visible label of zero-based row `row`.
pub fn row_label(row: u32) -> String {
    format!("Row {}", row + 1)
}

/// Externally visible label of zero-based column `col`.
pub fn col_label(col: u32) -> String {
    format!("Column {}", col + 1)
}

impl WellMatrix {
    pub fn from_row_major(rows: u32, cols: u32, values: Vec<f64>) -> Self {
        assert_eq!(
            values.len(),
            rows as usize * cols as usize,
            "values length must equal rows * cols"
        );
        Self { rows, cols, values }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn get(&self, row: u32, col: u32) -> f64 {
        assert!(row < self.rows && col < self.cols, "well ({row}, {col}) out of range");
        self.values[row as usize * self.cols as usize + col as usize]
    }

    pub fn row(&self, row: u32) -> &[f64] {
        let start = row as usize * self.cols as usize;
        &self.values[start..start + self.cols as usize]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.cols.max(1) as usize)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn column_labels(&self) -> Vec<String> {
        (0..self.cols).map(col_label).collect()
    }

    /// Labelled view used for serialized export.
    pub fn to_table(&self) -> LabelledTable {
        LabelledTable {
            columns: self.column_labels(),
            rows: self
                .iter_rows()
                .enumerate()
                .map(|(i, values)| LabelledRow {
                    label: row_label(i as u32),
                    values: values.to_vec(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelledRow {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelledTable {
    pub columns: Vec<String>,
    pub rows: Vec<LabelledRow>,
}
