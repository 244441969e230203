use google_sheets4::api::ValueRange;
use serde_json::Value;

use super::worksheet::{fit_grid, CellGrid, Dimension};

pub trait ValueRangeFactory {
    fn from_grid(grid: CellGrid) -> Self;
}

pub trait IntoCellGrid {
    /// Converts returned values into a `rows` x `columns` grid. Sheets omits trailing blank
    /// rows and cells, so the result is padded back to shape.
    fn into_cell_grid(self, rows: u32, columns: u32) -> CellGrid;
}

fn wrap_value(value: String) -> Value {
    Value::String(value)
}

fn unwrap_value(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl ValueRangeFactory for ValueRange {
    fn from_grid(grid: CellGrid) -> Self {
        ValueRange {
            major_dimension: Some(Dimension::Rows.to_string()),
            range: None,
            values: Some(
                grid.into_iter()
                    .map(|row| row.into_iter().map(wrap_value).collect())
                    .collect(),
            ),
        }
    }
}

impl IntoCellGrid for ValueRange {
    fn into_cell_grid(self, rows: u32, columns: u32) -> CellGrid {
        let values = self
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(unwrap_value).collect())
            .collect();
        fit_grid(values, rows, columns)
    }
}
