use google_sheets4::Error as ApiError;

use super::worksheet::WorksheetError;

/// Maps a Sheets API failure to the worksheet error taxonomy, falling back to `fallback`
/// for failures that say nothing about auth, existence or transport.
pub fn classify(error: &ApiError, fallback: WorksheetError) -> WorksheetError {
    match error {
        ApiError::HttpError(_) | ApiError::Io(_) => WorksheetError::Network,
        ApiError::MissingToken(_) | ApiError::MissingAPIKey => WorksheetError::Authentication,
        ApiError::BadRequest(body) => body
            .pointer("/error/code")
            .and_then(serde_json::Value::as_u64)
            .and_then(|code| classify_status(code as u16))
            .unwrap_or(fallback),
        ApiError::Failure(response) => {
            classify_status(response.status().as_u16()).unwrap_or(fallback)
        }
        _ => fallback,
    }
}

fn classify_status(status: u16) -> Option<WorksheetError> {
    match status {
        401 | 403 => Some(WorksheetError::Authentication),
        404 => Some(WorksheetError::SpreadsheetNotFound),
        _ => None,
    }
}
