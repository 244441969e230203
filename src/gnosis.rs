//! The Gnosis façade: per-day stats kept in a worksheet, one stat per column and one day per row.

use std::collections::HashMap;

use chrono::{Duration, Local, NaiveDate};
use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use crate::{
    config::sheets_config::SpreadsheetConfig,
    domain::{
        gnosis::{
            date_axis::{consecutive_days, days_between, DateAxis, Extension},
            date_label::{format_date, parse_date},
            layout::{
                DATA_START_COLUMN, DATA_START_ROW, INITIALIZER, LABEL_COLUMN, LABEL_ROW,
                MAX_NEW_ROWS,
            },
            stat_point::StatPoint,
        },
        sheets::{cell_range::CellRange, column::Column, grid_size::GridSize, row::Row},
    },
    sheets::{
        spreadsheet_manager::SpreadsheetManager,
        worksheet::{CellGrid, ValueInputOption, Worksheet},
    },
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GnosisError {
    #[error("Spreadsheet backend failure")]
    Backend,
    #[error("Unknown stat {0:?}")]
    UnknownStat(String),
    #[error("Stat {0:?} already exists")]
    StatAlreadyExists(String),
    #[error("{0} is outside the dates covered by the sheet")]
    DateOutOfRange(NaiveDate),
    #[error("Invalid date label")]
    InvalidDate,
    #[error("Worksheet does not follow the Gnosis layout")]
    InvalidLayout,
    #[error("Reaching {date} would add {rows} rows, more than the limit of {max}")]
    TooManyRows { date: NaiveDate, rows: u32, max: u32 },
    #[error("Stat {0:?} has no START marker followed by data")]
    SeriesNotStarted(String),
}

pub type Result<T> = error_stack::Result<T, GnosisError>;

/// Interface for reading and modifying a Gnosis spreadsheet.
pub struct Gnosis {
    sheet: Box<dyn Worksheet>,
    stat_columns: HashMap<String, Column>,
    axis: DateAxis,
}

impl std::fmt::Debug for Gnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gnosis")
            .field("stats", &self.stat_names())
            .field("axis", &self.axis)
            .finish()
    }
}

impl Gnosis {
    /// Authenticates with the service-account key at `credential_path` and opens the first
    /// worksheet of `spreadsheet_id` (a bare id or the spreadsheet URL).
    #[instrument(name = "Gnosis::new")]
    pub async fn new(credential_path: &str, spreadsheet_id: &str) -> Result<Self> {
        Self::connect(SpreadsheetConfig::new(credential_path, spreadsheet_id)).await
    }

    #[instrument(name = "Gnosis::connect")]
    pub async fn connect(config: SpreadsheetConfig) -> Result<Self> {
        let manager = SpreadsheetManager::new(config)
            .await
            .change_context(GnosisError::Backend)?;
        Self::with_worksheet(Box::new(manager)).await
    }

    /// Trims unused rows and columns, then reads the stat labels and the covered dates.
    pub async fn with_worksheet(sheet: Box<dyn Worksheet>) -> Result<Self> {
        let size = trim(sheet.as_ref()).await?;

        let labels = sheet
            .row_values(LABEL_ROW)
            .await
            .change_context(GnosisError::Backend)?;
        let stat_columns = stat_columns_from_labels(&labels);

        let axis = read_date_axis(sheet.as_ref(), size).await?;

        let gnosis = Gnosis {
            sheet,
            stat_columns,
            axis,
        };
        tracing::info!(
            stats = gnosis.stat_columns.len(),
            start = %gnosis.axis.start(),
            end = %gnosis.axis.end(),
            "Opened Gnosis sheet"
        );
        Ok(gnosis)
    }

    pub fn worksheet(&self) -> &dyn Worksheet {
        self.sheet.as_ref()
    }

    /// Stat names in column order.
    pub fn stat_names(&self) -> Vec<&str> {
        let mut stats: Vec<_> = self.stat_columns.iter().collect();
        stats.sort_by_key(|(_, col)| **col);
        stats.into_iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.axis.start()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.axis.end()
    }

    fn stat_column(&self, stat_name: &str) -> Result<Column> {
        self.stat_columns
            .get(stat_name)
            .copied()
            .ok_or_else(|| report!(GnosisError::UnknownStat(stat_name.to_owned())))
    }

    fn row_for_date(&self, date: NaiveDate) -> Result<Row> {
        self.axis
            .row_of(date)
            .ok_or_else(|| report!(GnosisError::DateOutOfRange(date)))
            .attach_printable_lazy(|| {
                format!(
                    "The sheet covers {} to {}",
                    self.axis.start(),
                    self.axis.end()
                )
            })
    }

    /// Row of `date`, labelling new rows above or below the existing ones when needed.
    async fn row_for_date_or_create(&mut self, date: NaiveDate) -> Result<Row> {
        let Some(extension) = self.axis.extension_to(date) else {
            return self.row_for_date(date);
        };

        if extension.days() > MAX_NEW_ROWS {
            return Err(report!(GnosisError::TooManyRows {
                date,
                rows: extension.days(),
                max: MAX_NEW_ROWS,
            }));
        }

        match extension {
            Extension::After { days } => {
                let first_new = self.axis.last_row() + 1;
                let last_new = first_new + (days - 1);

                let size = self
                    .sheet
                    .dimensions()
                    .await
                    .change_context(GnosisError::Backend)?;
                if size.rows < last_new.number() {
                    self.sheet
                        .append_rows(last_new.number() - size.rows)
                        .await
                        .change_context(GnosisError::Backend)?;
                }

                let first_date = self.axis.end() + Duration::days(1);
                self.write_date_labels(first_new, first_date, days).await?;
            }
            Extension::Before { days } => {
                self.sheet
                    .insert_rows(DATA_START_ROW, days)
                    .await
                    .change_context(GnosisError::Backend)?;
                self.write_date_labels(DATA_START_ROW, date, days).await?;
            }
        }

        tracing::debug!(%date, rows = extension.days(), "Added date rows");
        self.axis.extend_to(date);
        self.row_for_date(date)
    }

    async fn write_date_labels(&self, first_row: Row, first_date: NaiveDate, days: u32) -> Result<()> {
        let labels: CellGrid = consecutive_days(first_date, days)
            .map(|date| vec![format_date(date)])
            .collect();
        let range = CellRange::column_span(LABEL_COLUMN, first_row, first_row + (days - 1));

        self.sheet
            .write_range(&range, labels, ValueInputOption::Raw)
            .await
            .change_context(GnosisError::Backend)
    }

    /// Appends a stat column titled `stat_name` and marks yesterday as the day before the
    /// series starts.
    pub async fn add_stat_series(&mut self, stat_name: &str) -> Result<Column> {
        self.add_stat_series_as_of(stat_name, Local::now().date_naive())
            .await
    }

    #[instrument]
    pub async fn add_stat_series_as_of(&mut self, stat_name: &str, today: NaiveDate) -> Result<Column> {
        if self.stat_columns.contains_key(stat_name) {
            return Err(report!(GnosisError::StatAlreadyExists(stat_name.to_owned())));
        }

        let yesterday = today - Duration::days(1);
        let init_row = self.row_for_date_or_create(yesterday).await?;

        self.sheet
            .append_columns(1)
            .await
            .change_context(GnosisError::Backend)?;
        let col = self
            .sheet
            .dimensions()
            .await
            .change_context(GnosisError::Backend)?
            .last_column();

        self.sheet
            .write_cell(LABEL_ROW, col, stat_name.to_owned(), ValueInputOption::Raw)
            .await
            .change_context(GnosisError::Backend)?;
        self.stat_columns.insert(stat_name.to_owned(), col);

        self.sheet
            .write_cell(init_row, col, INITIALIZER.to_owned(), ValueInputOption::Raw)
            .await
            .change_context(GnosisError::Backend)?;

        tracing::info!(stat = stat_name, column = %col, "Added stat series");
        Ok(col)
    }

    /// Sets the value of `stat_name` on `date`, adding date rows if the sheet does not
    /// reach that far yet.
    #[instrument]
    pub async fn update_stat(&mut self, stat_name: &str, date: NaiveDate, value: &str) -> Result<()> {
        let col = self.stat_column(stat_name)?;
        let row = self.row_for_date_or_create(date).await?;

        self.sheet
            .write_cell(row, col, value.to_owned(), ValueInputOption::UserEntered)
            .await
            .change_context(GnosisError::Backend)
    }

    /// Value of `stat_name` on `date`, or `None` for a blank cell.
    #[instrument]
    pub async fn get_stat(&self, stat_name: &str, date: NaiveDate) -> Result<Option<String>> {
        let col = self.stat_column(stat_name)?;
        let row = self.row_for_date(date)?;

        let value = self
            .sheet
            .read_cell(row, col)
            .await
            .change_context(GnosisError::Backend)?;
        Ok((!value.is_empty()).then_some(value))
    }

    /// Every day after the `START` marker of `stat_name`, down to the last dated row.
    #[instrument]
    pub async fn get_stat_series(&self, stat_name: &str) -> Result<Vec<StatPoint>> {
        let col = self.stat_column(stat_name)?;
        let range = CellRange::column_span(col, DATA_START_ROW, self.axis.last_row());
        let values: Vec<String> = self
            .sheet
            .read_range(&range)
            .await
            .change_context(GnosisError::Backend)?
            .into_iter()
            .flatten()
            .collect();

        let Some(marker) = values.iter().position(|value| value.trim() == INITIALIZER) else {
            return Ok(Vec::new());
        };

        Ok(values
            .into_iter()
            .enumerate()
            .skip(marker + 1)
            .map(|(offset, value)| {
                let row = DATA_START_ROW + offset as u32;
                StatPoint::new(self.axis.date_of(row), value)
            })
            .collect())
    }

    pub async fn get_stat_start(&self, stat_name: &str) -> Result<NaiveDate> {
        self.get_stat_series(stat_name)
            .await?
            .first()
            .map(|point| point.date)
            .ok_or_else(|| report!(GnosisError::SeriesNotStarted(stat_name.to_owned())))
    }

    pub async fn read_range(&self, range: &CellRange) -> Result<CellGrid> {
        self.sheet
            .read_range(range)
            .await
            .change_context(GnosisError::Backend)
    }

    pub async fn write_range(&self, range: &CellRange, values: CellGrid) -> Result<()> {
        self.sheet
            .write_range(range, values, ValueInputOption::UserEntered)
            .await
            .change_context(GnosisError::Backend)
    }
}

/// Drops empty rows below the last date and empty columns right of the last label.
async fn trim(sheet: &dyn Worksheet) -> Result<GridSize> {
    let dates = sheet
        .column_values(LABEL_COLUMN)
        .await
        .change_context(GnosisError::Backend)?;
    let labels = sheet
        .row_values(LABEL_ROW)
        .await
        .change_context(GnosisError::Backend)?;

    let trimmed = GridSize::new(last_non_empty(&dates), last_non_empty(&labels));
    let current = sheet.dimensions().await.change_context(GnosisError::Backend)?;

    if trimmed != current {
        tracing::debug!(?current, ?trimmed, "Trimming worksheet");
        sheet
            .resize(trimmed)
            .await
            .change_context(GnosisError::Backend)?;
    }
    Ok(trimmed)
}

/// 1-based position of the last non-blank value, 0 when all are blank.
fn last_non_empty(values: &[String]) -> u32 {
    values
        .iter()
        .rposition(|value| !value.trim().is_empty())
        .map_or(0, |index| index as u32 + 1)
}

fn stat_columns_from_labels(labels: &[String]) -> HashMap<String, Column> {
    let mut stat_columns = HashMap::new();
    for (index, label) in labels.iter().enumerate().skip(DATA_START_COLUMN.index() as usize) {
        let label = label.trim();
        if label.is_empty() {
            continue;
        }
        if stat_columns.contains_key(label) {
            tracing::warn!(stat = label, "Duplicate stat label, keeping the leftmost column");
            continue;
        }
        stat_columns.insert(label.to_owned(), Column::from_index(index as u32));
    }
    stat_columns
}

async fn read_date_axis(sheet: &dyn Worksheet, size: GridSize) -> Result<DateAxis> {
    if size.rows < DATA_START_ROW.number() {
        return Err(report!(GnosisError::InvalidLayout))
            .attach_printable("Column A has no dates below the label row");
    }

    let last_row = size.last_row();
    let range = CellRange::column_span(LABEL_COLUMN, DATA_START_ROW, last_row);
    let labels: Vec<String> = sheet
        .read_range(&range)
        .await
        .change_context(GnosisError::Backend)?
        .into_iter()
        .flatten()
        .collect();

    let parse_row = |row: Row, label: &str| {
        parse_date(label)
            .change_context(GnosisError::InvalidDate)
            .attach_printable_lazy(|| format!("In cell {LABEL_COLUMN}{row}"))
    };

    let first_label = labels.first().map(String::as_str).unwrap_or_default();
    let last_label = labels.last().map(String::as_str).unwrap_or_default();
    let start = parse_row(DATA_START_ROW, first_label)?;
    let end = parse_row(last_row, last_label)?;

    let expected_days = last_row.index() - DATA_START_ROW.index();
    if end < start || days_between(start, end) != expected_days {
        return Err(report!(GnosisError::InvalidLayout)).attach_printable_lazy(|| {
            format!(
                "Dates must be consecutive days: {} rows span {start} to {end}",
                expected_days + 1
            )
        });
    }

    Ok(DateAxis::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::{memory_worksheet::MemoryWorksheet, worksheet::WorksheetError};
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> Arc<MemoryWorksheet> {
        Arc::new(MemoryWorksheet::from_rows([
            vec!["", "steps", "weight", ""],
            vec!["Tue, 03/01/16", "START", "", ""],
            vec!["Wed, 03/02/16", "100", "80", ""],
            vec!["Thu, 03/03/16", "", "81", ""],
            vec!["Fri, 03/04/16", "120", "", ""],
            vec!["", "", "", ""],
        ]))
    }

    async fn open(sheet: &Arc<MemoryWorksheet>) -> Gnosis {
        Gnosis::with_worksheet(Box::new(Arc::clone(sheet)))
            .await
            .unwrap()
    }

    fn column_a(cells: &CellGrid) -> Vec<&str> {
        cells.iter().map(|row| row[0].as_str()).collect()
    }

    #[tokio::test]
    async fn test_open_trims_and_reads_layout() {
        let sheet = fixture();
        let gnosis = open(&sheet).await;

        assert_eq!(sheet.dimensions().await.unwrap(), GridSize::new(5, 3));
        assert_eq!(gnosis.stat_names(), vec!["steps", "weight"]);
        assert_eq!(gnosis.start_date(), date(2016, 3, 1));
        assert_eq!(gnosis.end_date(), date(2016, 3, 4));
    }

    #[tokio::test]
    async fn test_first_label_maps_to_column_b() {
        let gnosis = open(&fixture()).await;
        assert_eq!(gnosis.stat_column("steps").unwrap(), Column::from_number(2));
        assert_eq!(gnosis.stat_column("weight").unwrap(), Column::from_number(3));
    }

    #[tokio::test]
    async fn test_get_stat() {
        let gnosis = open(&fixture()).await;
        assert_eq!(
            gnosis.get_stat("steps", date(2016, 3, 2)).await.unwrap().as_deref(),
            Some("100")
        );
        assert_eq!(gnosis.get_stat("steps", date(2016, 3, 3)).await.unwrap(), None);
        assert_eq!(
            gnosis.get_stat("weight", date(2016, 3, 3)).await.unwrap().as_deref(),
            Some("81")
        );
    }

    #[tokio::test]
    async fn test_get_stat_errors() {
        let gnosis = open(&fixture()).await;

        let report = gnosis.get_stat("sleep", date(2016, 3, 2)).await.unwrap_err();
        assert_eq!(
            report.current_context(),
            &GnosisError::UnknownStat("sleep".to_string())
        );

        let report = gnosis.get_stat("steps", date(2016, 3, 5)).await.unwrap_err();
        assert_eq!(
            report.current_context(),
            &GnosisError::DateOutOfRange(date(2016, 3, 5))
        );
    }

    #[tokio::test]
    async fn test_update_then_get() {
        let mut gnosis = open(&fixture()).await;
        gnosis
            .update_stat("weight", date(2016, 3, 4), "79.5")
            .await
            .unwrap();
        assert_eq!(
            gnosis.get_stat("weight", date(2016, 3, 4)).await.unwrap().as_deref(),
            Some("79.5")
        );
    }

    #[tokio::test]
    async fn test_update_after_end_appends_labelled_rows() {
        let sheet = fixture();
        let mut gnosis = open(&sheet).await;

        gnosis
            .update_stat("weight", date(2016, 3, 7), "78")
            .await
            .unwrap();

        let cells = sheet.snapshot().await;
        assert_eq!(cells.len(), 8);
        assert_eq!(
            column_a(&cells)[5..],
            ["Sat, 03/05/16", "Sun, 03/06/16", "Mon, 03/07/16"]
        );
        assert_eq!(cells[7][2], "78");
        assert_eq!(gnosis.end_date(), date(2016, 3, 7));
    }

    #[tokio::test]
    async fn test_update_before_start_inserts_labelled_rows() {
        let sheet = fixture();
        let mut gnosis = open(&sheet).await;

        gnosis
            .update_stat("weight", date(2016, 2, 28), "82")
            .await
            .unwrap();

        let cells = sheet.snapshot().await;
        assert_eq!(cells.len(), 7);
        assert_eq!(
            column_a(&cells)[1..4],
            ["Sun, 02/28/16", "Mon, 02/29/16", "Tue, 03/01/16"]
        );
        assert_eq!(cells[1][2], "82");
        assert_eq!(cells[3][1], "START");
        assert_eq!(gnosis.start_date(), date(2016, 2, 28));
        assert_eq!(
            gnosis.get_stat("steps", date(2016, 3, 2)).await.unwrap().as_deref(),
            Some("100")
        );
    }

    #[tokio::test]
    async fn test_too_many_rows_leaves_sheet_untouched() {
        let sheet = fixture();
        let mut gnosis = open(&sheet).await;

        let report = gnosis
            .update_stat("steps", date(2020, 1, 1), "1")
            .await
            .unwrap_err();
        assert!(matches!(
            report.current_context(),
            GnosisError::TooManyRows { max: MAX_NEW_ROWS, .. }
        ));
        assert_eq!(sheet.dimensions().await.unwrap(), GridSize::new(5, 3));
        assert_eq!(gnosis.end_date(), date(2016, 3, 4));
    }

    #[tokio::test]
    async fn test_row_limit_is_inclusive() {
        let sheet = fixture();
        let mut gnosis = open(&sheet).await;

        let at_limit = date(2016, 3, 4) + Duration::days(MAX_NEW_ROWS as i64);
        gnosis.update_stat("steps", at_limit, "1").await.unwrap();
        assert_eq!(sheet.dimensions().await.unwrap(), GridSize::new(5 + MAX_NEW_ROWS, 3));
        assert_eq!(gnosis.end_date(), at_limit);

        let before_limit = date(2016, 3, 1) - Duration::days(MAX_NEW_ROWS as i64 + 1);
        let report = gnosis
            .update_stat("steps", before_limit, "1")
            .await
            .unwrap_err();
        assert_eq!(
            report.current_context(),
            &GnosisError::TooManyRows {
                date: before_limit,
                rows: MAX_NEW_ROWS + 1,
                max: MAX_NEW_ROWS,
            }
        );
        assert_eq!(sheet.dimensions().await.unwrap(), GridSize::new(5 + MAX_NEW_ROWS, 3));
        assert_eq!(gnosis.start_date(), date(2016, 3, 1));
    }

    #[tokio::test]
    async fn test_failed_add_stat_series_leaves_sheet_untouched() {
        let sheet = fixture();
        let mut gnosis = open(&sheet).await;

        let report = gnosis
            .add_stat_series_as_of("sleep", date(2020, 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(
            report.current_context(),
            GnosisError::TooManyRows { .. }
        ));
        assert_eq!(sheet.dimensions().await.unwrap(), GridSize::new(5, 3));
        assert_eq!(gnosis.stat_names(), vec!["steps", "weight"]);

        let col = gnosis
            .add_stat_series_as_of("sleep", date(2016, 3, 4))
            .await
            .unwrap();
        assert_eq!(col, Column::from_number(4));
    }

    #[tokio::test]
    async fn test_update_unknown_stat_adds_no_rows() {
        let sheet = fixture();
        let mut gnosis = open(&sheet).await;

        let report = gnosis
            .update_stat("sleep", date(2016, 3, 9), "8")
            .await
            .unwrap_err();
        assert_eq!(
            report.current_context(),
            &GnosisError::UnknownStat("sleep".to_string())
        );
        assert_eq!(sheet.dimensions().await.unwrap(), GridSize::new(5, 3));
    }

    #[tokio::test]
    async fn test_add_stat_series_within_range() {
        let sheet = fixture();
        let mut gnosis = open(&sheet).await;

        let col = gnosis
            .add_stat_series_as_of("sleep", date(2016, 3, 4))
            .await
            .unwrap();
        assert_eq!(col, Column::from_number(4));

        let cells = sheet.snapshot().await;
        assert_eq!(cells[0][3], "sleep");
        assert_eq!(cells[3][3], INITIALIZER);
        assert_eq!(gnosis.stat_names(), vec!["steps", "weight", "sleep"]);
        assert_eq!(
            gnosis.get_stat_series("sleep").await.unwrap(),
            vec![StatPoint::new(date(2016, 3, 4), "")]
        );
        assert_eq!(gnosis.get_stat_start("sleep").await.unwrap(), date(2016, 3, 4));
    }

    #[tokio::test]
    async fn test_add_stat_series_extends_rows() {
        let sheet = fixture();
        let mut gnosis = open(&sheet).await;

        gnosis
            .add_stat_series_as_of("sleep", date(2016, 3, 10))
            .await
            .unwrap();

        let cells = sheet.snapshot().await;
        assert_eq!(cells.len(), 10);
        assert_eq!(cells[9][0], "Wed, 03/09/16");
        assert_eq!(cells[9][3], INITIALIZER);
        assert_eq!(gnosis.end_date(), date(2016, 3, 9));
        assert!(gnosis.get_stat_series("sleep").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_existing_stat_fails() {
        let mut gnosis = open(&fixture()).await;
        let report = gnosis
            .add_stat_series_as_of("steps", date(2016, 3, 4))
            .await
            .unwrap_err();
        assert_eq!(
            report.current_context(),
            &GnosisError::StatAlreadyExists("steps".to_string())
        );
    }

    #[tokio::test]
    async fn test_get_stat_series() {
        let gnosis = open(&fixture()).await;
        assert_eq!(
            gnosis.get_stat_series("steps").await.unwrap(),
            vec![
                StatPoint::new(date(2016, 3, 2), "100"),
                StatPoint::new(date(2016, 3, 3), ""),
                StatPoint::new(date(2016, 3, 4), "120"),
            ]
        );
        assert_eq!(gnosis.get_stat_start("steps").await.unwrap(), date(2016, 3, 2));
    }

    #[tokio::test]
    async fn test_series_without_marker() {
        let gnosis = open(&fixture()).await;
        assert!(gnosis.get_stat_series("weight").await.unwrap().is_empty());

        let report = gnosis.get_stat_start("weight").await.unwrap_err();
        assert_eq!(
            report.current_context(),
            &GnosisError::SeriesNotStarted("weight".to_string())
        );
    }

    #[tokio::test]
    async fn test_raw_range_access() {
        let gnosis = open(&fixture()).await;
        let range = CellRange::row_span(Row::from_number(3), Column::A, Column::from_number(3));
        assert_eq!(
            gnosis.read_range(&range).await.unwrap(),
            vec![vec!["Wed, 03/02/16".to_string(), "100".to_string(), "80".to_string()]]
        );

        gnosis
            .write_range(&range, vec![vec!["Wed, 03/02/16".into(), "101".into(), "80".into()]])
            .await
            .unwrap();
        assert_eq!(
            gnosis.get_stat("steps", date(2016, 3, 2)).await.unwrap().as_deref(),
            Some("101")
        );
    }

    #[tokio::test]
    async fn test_sheet_without_dates_is_invalid() {
        let sheet = MemoryWorksheet::from_rows([vec!["", "steps"]]);
        let report = Gnosis::with_worksheet(Box::new(sheet)).await.unwrap_err();
        assert_eq!(report.current_context(), &GnosisError::InvalidLayout);
    }

    #[tokio::test]
    async fn test_unparseable_date_is_reported() {
        let sheet = MemoryWorksheet::from_rows([vec!["", "steps"], vec!["March 1st", "1"]]);
        let report = Gnosis::with_worksheet(Box::new(sheet)).await.unwrap_err();
        assert_eq!(report.current_context(), &GnosisError::InvalidDate);
    }

    #[tokio::test]
    async fn test_gap_in_dates_is_invalid() {
        let sheet = MemoryWorksheet::from_rows([
            vec!["", "steps"],
            vec!["Tue, 03/01/16", "1"],
            vec!["Fri, 03/04/16", "2"],
        ]);
        let report = Gnosis::with_worksheet(Box::new(sheet)).await.unwrap_err();
        assert_eq!(report.current_context(), &GnosisError::InvalidLayout);
    }

    #[tokio::test]
    async fn test_new_with_missing_credential_fails() {
        let report = Gnosis::new("/nonexistent/credentials.json", "1AbC")
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &GnosisError::Backend);
        assert_eq!(
            report.downcast_ref::<WorksheetError>(),
            Some(&WorksheetError::Credential)
        );
    }

    #[test]
    fn test_last_non_empty() {
        let values: Vec<String> = ["a", "", " b ", "", " "].iter().map(|s| s.to_string()).collect();
        assert_eq!(last_non_empty(&values), 3);
        assert_eq!(last_non_empty(&[String::new()]), 0);
    }
}
