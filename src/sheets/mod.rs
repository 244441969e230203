pub mod api_error;
pub mod auth;
pub mod credential;
pub mod http_client;
pub mod memory_worksheet;
pub mod spreadsheet_id;
pub mod spreadsheet_manager;
pub mod value_range_factory;
pub mod worksheet;

pub mod prelude {
    pub use super::memory_worksheet::MemoryWorksheet;
    pub use super::spreadsheet_manager::SpreadsheetManager;
    pub use super::worksheet::{CellGrid, ValueInputOption, Worksheet, WorksheetError};
}
