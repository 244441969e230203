use async_trait::async_trait;
use error_stack::{report, Report, ResultExt};
use google_sheets4::{
    api::{
        AppendDimensionRequest, BatchUpdateSpreadsheetRequest, DimensionRange, GridProperties,
        InsertDimensionRequest, Request, Sheet, SheetProperties, UpdateSheetPropertiesRequest,
        ValueRange,
    },
    Sheets,
};
use std::fmt::Debug;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::{
    config::sheets_config::SpreadsheetConfig,
    domain::sheets::{
        a1_notation::ToA1Notation, cell_range::CellRange, grid_size::GridSize, row::Row,
    },
};

use super::{
    api_error::classify,
    auth,
    credential::ServiceAccountCredential,
    http_client::{self, HttpsConnector},
    spreadsheet_id::SpreadsheetId,
    value_range_factory::{IntoCellGrid, ValueRangeFactory},
    worksheet::{CellGrid, Dimension, ValueInputOption, Worksheet, WorksheetError},
};

/// Properties of the worksheet this manager is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    pub sheet_id: i32,
    pub title: String,
    pub size: GridSize,
}

/// Google Sheets backed [`Worksheet`], bound to one worksheet of one spreadsheet.
pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    spreadsheet_id: SpreadsheetId,
    credential: ServiceAccountCredential,
    hub: Sheets<HttpsConnector>,
    sheet_info_cache: RwLock<Option<SheetInfo>>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SpreadsheetManager {{ spreadsheet_id: {}, client_email: {} }}",
            self.spreadsheet_id,
            self.credential.client_email()
        )
    }
}

impl SpreadsheetManager {
    /// Authenticates with the configured credential and binds to the configured worksheet.
    /// The spreadsheet metadata is fetched right away, so bad credentials, unshared
    /// spreadsheets and unknown ids fail here.
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(config: SpreadsheetConfig) -> error_stack::Result<Self, WorksheetError> {
        let credential = ServiceAccountCredential::load(&*config.credentials_path).await?;
        tracing::info!(
            client_email = credential.client_email(),
            "Loaded service account credential"
        );

        let client = http_client::http_client()?;
        let auth = auth::authenticator(&credential, client.clone()).await?;
        let hub = Sheets::new(client, auth);

        let manager = SpreadsheetManager {
            spreadsheet_id: SpreadsheetId::from_url_or_id(&config.spreadsheet_id),
            config,
            credential,
            hub,
            sheet_info_cache: RwLock::new(None),
        };

        let info = manager.credential.explain(manager.sheet_info().await)?;
        tracing::info!(
            sheet = %info.title,
            rows = info.size.rows,
            columns = info.size.columns,
            "Bound to worksheet"
        );

        Ok(manager)
    }

    pub fn client_email(&self) -> &str {
        self.credential.client_email()
    }

    pub fn spreadsheet_id(&self) -> &SpreadsheetId {
        &self.spreadsheet_id
    }

    #[instrument]
    async fn fetch_sheet_info(&self) -> error_stack::Result<SheetInfo, WorksheetError> {
        let response = self
            .hub
            .spreadsheets()
            .get(self.spreadsheet_id.as_ref())
            .doit()
            .await
            .map_err(|error| {
                let context = classify(&error, WorksheetError::SpreadsheetNotFound);
                Report::new(error).change_context(context)
            })
            .attach_printable_lazy(|| {
                format!("Failed to fetch spreadsheet {}", self.spreadsheet_id)
            })?;

        let sheets = response.1.sheets.unwrap_or_default();
        let wanted = self.config.worksheet.as_deref();

        let properties = select_sheet(&sheets, wanted)
            .ok_or_else(|| report!(WorksheetError::WorksheetNotFound))
            .attach_printable_lazy(|| match wanted {
                Some(title) => format!("No worksheet titled '{title}'"),
                None => "Spreadsheet has no worksheets".to_string(),
            })?;

        sheet_info_from_properties(properties)
    }

    #[instrument]
    pub async fn sheet_info(&self) -> error_stack::Result<SheetInfo, WorksheetError> {
        if let Some(info) = self.sheet_info_cache.read().await.clone() {
            return Ok(info);
        }

        let info = self.fetch_sheet_info().await?;

        {
            // -- WRITE --
            let mut guard = self.sheet_info_cache.write().await;
            guard.replace(info.clone());
            // -- END WRITE --
        }

        Ok(info)
    }

    async fn invalidate_sheet_info(&self) {
        self.sheet_info_cache.write().await.take();
    }

    #[instrument(skip(request))]
    async fn batch_update(
        &self,
        request: Request,
        description: &str,
    ) -> error_stack::Result<(), WorksheetError> {
        let batch = BatchUpdateSpreadsheetRequest {
            requests: Some(vec![request]),
            ..Default::default()
        };

        let result = self
            .hub
            .spreadsheets()
            .batch_update(batch, self.spreadsheet_id.as_ref())
            .doit()
            .await
            .map(|_| ())
            .map_err(|error| {
                let context = classify(&error, WorksheetError::FailedToUpdateLayout);
                Report::new(error).change_context(context)
            })
            .attach_printable_lazy(|| format!("Failed to {description}"));

        // Grid size changed, or may have.
        self.invalidate_sheet_info().await;
        result
    }
}

fn select_sheet<'a>(sheets: &'a [Sheet], title: Option<&str>) -> Option<&'a SheetProperties> {
    let mut properties = sheets.iter().filter_map(|sheet| sheet.properties.as_ref());
    match title {
        Some(title) => properties.find(|props| props.title.as_deref() == Some(title)),
        None => properties.min_by_key(|props| props.index.unwrap_or(0)),
    }
}

fn sheet_info_from_properties(
    properties: &SheetProperties,
) -> error_stack::Result<SheetInfo, WorksheetError> {
    let grid = properties.grid_properties.as_ref();
    let count = |value: Option<i32>| value.and_then(|v| u32::try_from(v).ok()).unwrap_or(1);

    Ok(SheetInfo {
        // The first sheet of a spreadsheet reports no id, which means 0.
        sheet_id: properties.sheet_id.unwrap_or(0),
        title: properties
            .title
            .clone()
            .ok_or_else(|| report!(WorksheetError::WorksheetNotFound))
            .attach_printable("Worksheet has no title")?,
        size: GridSize::new(
            count(grid.and_then(|g| g.row_count)),
            count(grid.and_then(|g| g.column_count)),
        ),
    })
}

fn to_i32(value: u32) -> error_stack::Result<i32, WorksheetError> {
    i32::try_from(value)
        .change_context(WorksheetError::OutOfBounds)
        .attach_printable_lazy(|| format!("{value} does not fit the Sheets API"))
}

#[async_trait]
impl Worksheet for SpreadsheetManager {
    async fn dimensions(&self) -> error_stack::Result<GridSize, WorksheetError> {
        Ok(self.sheet_info().await?.size)
    }

    #[instrument]
    async fn read_range(&self, range: &CellRange) -> error_stack::Result<CellGrid, WorksheetError> {
        let info = self.sheet_info().await?;
        let a1 = range.to_a1_notation(Some(&info.title));

        let response = self
            .hub
            .spreadsheets()
            .values_get(self.spreadsheet_id.as_ref(), a1.as_ref())
            .major_dimension(Dimension::Rows.as_ref())
            .doit()
            .await
            .map_err(|error| {
                let context = classify(&error, WorksheetError::FailedToFetchRange);
                Report::new(error).change_context(context)
            })
            .attach_printable_lazy(|| format!("Failed to read range {a1}"))?;

        Ok(response
            .1
            .into_cell_grid(range.row_count(), range.column_count()))
    }

    #[instrument(skip(values))]
    async fn write_range(
        &self,
        range: &CellRange,
        values: CellGrid,
        input: ValueInputOption,
    ) -> error_stack::Result<(), WorksheetError> {
        let info = self.sheet_info().await?;
        let a1 = range.to_a1_notation(Some(&info.title));

        self.hub
            .spreadsheets()
            .values_update(ValueRange::from_grid(values), self.spreadsheet_id.as_ref(), a1.as_ref())
            .value_input_option(input.as_ref())
            .doit()
            .await
            .map(|_| ())
            .map_err(|error| {
                let context = classify(&error, WorksheetError::FailedToWriteRange);
                Report::new(error).change_context(context)
            })
            .attach_printable_lazy(|| format!("Failed to write to range {a1}"))
    }

    #[instrument]
    async fn resize(&self, size: GridSize) -> error_stack::Result<(), WorksheetError> {
        let info = self.sheet_info().await?;
        let request = Request {
            update_sheet_properties: Some(UpdateSheetPropertiesRequest {
                properties: Some(SheetProperties {
                    sheet_id: Some(info.sheet_id),
                    grid_properties: Some(GridProperties {
                        row_count: Some(to_i32(size.rows)?),
                        column_count: Some(to_i32(size.columns)?),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                fields: "gridProperties.rowCount,gridProperties.columnCount"
                    .parse()
                    .ok(),
                ..Default::default()
            }),
            ..Default::default()
        };

        self.batch_update(request, &format!("resize worksheet to {size:?}"))
            .await
    }

    #[instrument]
    async fn append_rows(&self, count: u32) -> error_stack::Result<(), WorksheetError> {
        self.append_dimension(Dimension::Rows, count).await
    }

    #[instrument]
    async fn append_columns(&self, count: u32) -> error_stack::Result<(), WorksheetError> {
        self.append_dimension(Dimension::Columns, count).await
    }

    #[instrument]
    async fn insert_rows(&self, before: Row, count: u32) -> error_stack::Result<(), WorksheetError> {
        if count == 0 {
            return Ok(());
        }

        let info = self.sheet_info().await?;
        let request = Request {
            insert_dimension: Some(InsertDimensionRequest {
                range: Some(DimensionRange {
                    sheet_id: Some(info.sheet_id),
                    dimension: Some(Dimension::Rows.to_string()),
                    start_index: Some(to_i32(before.index())?),
                    end_index: Some(to_i32(before.index() + count)?),
                    ..Default::default()
                }),
                inherit_from_before: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };

        self.batch_update(request, &format!("insert {count} rows before row {before}"))
            .await
    }
}

impl SpreadsheetManager {
    async fn append_dimension(
        &self,
        dimension: Dimension,
        count: u32,
    ) -> error_stack::Result<(), WorksheetError> {
        if count == 0 {
            return Ok(());
        }

        let info = self.sheet_info().await?;
        let request = Request {
            append_dimension: Some(AppendDimensionRequest {
                sheet_id: Some(info.sheet_id),
                dimension: Some(dimension.to_string()),
                length: Some(to_i32(count)?),
                ..Default::default()
            }),
            ..Default::default()
        };

        self.batch_update(request, &format!("append {count} {dimension}"))
            .await
    }
}
