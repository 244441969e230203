use std::path::Path;

use error_stack::{Report, ResultExt};
use google_sheets4::oauth2::{self, ServiceAccountKey};

use super::worksheet::WorksheetError;

/// A service-account key read from disk.
#[derive(Clone)]
pub struct ServiceAccountCredential {
    key: ServiceAccountKey,
}

impl std::fmt::Debug for ServiceAccountCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountCredential")
            .field("client_email", &self.key.client_email)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountCredential {
    pub async fn load(path: impl AsRef<Path>) -> error_stack::Result<Self, WorksheetError> {
        let path = path.as_ref();
        let key = oauth2::read_service_account_key(path)
            .await
            .change_context(WorksheetError::Credential)
            .attach_printable_lazy(|| {
                format!(
                    "Could not read a service account key at '{}'",
                    path.display()
                )
            })?;
        Ok(ServiceAccountCredential { key })
    }

    pub fn parse(json: impl AsRef<[u8]>) -> error_stack::Result<Self, WorksheetError> {
        let key = oauth2::parse_service_account_key(json).change_context(WorksheetError::Credential)?;
        Ok(ServiceAccountCredential { key })
    }

    /// The address the spreadsheet has to be shared with.
    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    pub fn key(&self) -> &ServiceAccountKey {
        &self.key
    }

    /// Attaches the sharing hint to an authentication or not-found report.
    pub fn explain<T>(
        &self,
        result: error_stack::Result<T, WorksheetError>,
    ) -> error_stack::Result<T, WorksheetError> {
        result.map_err(|report: Report<WorksheetError>| {
            let sharing_problem = matches!(
                report.current_context(),
                WorksheetError::Authentication | WorksheetError::SpreadsheetNotFound
            );
            if !sharing_problem {
                return report;
            }
            report.attach_printable(format!(
                "Share the spreadsheet with {} and check the spreadsheet id",
                self.client_email()
            ))
        })
    }
}
