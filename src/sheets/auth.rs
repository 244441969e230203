use error_stack::ResultExt;
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use tracing::instrument;

use super::{
    credential::ServiceAccountCredential,
    http_client::{HttpClient, HttpsConnector},
    worksheet::WorksheetError,
};

#[instrument(skip(client), fields(client_email = credential.client_email()))]
pub async fn authenticator(
    credential: &ServiceAccountCredential,
    client: HttpClient,
) -> error_stack::Result<Authenticator<HttpsConnector>, WorksheetError> {
    oauth2::ServiceAccountAuthenticator::with_client(credential.key().clone(), client)
        .build()
        .await
        .change_context(WorksheetError::Authentication)
        .attach_printable("Could not create a service account authenticator")
}
