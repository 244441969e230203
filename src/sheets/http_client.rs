use error_stack::ResultExt;
use google_sheets4::{hyper, hyper_rustls};

use super::worksheet::WorksheetError;

pub type HttpsConnector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;
pub type HttpClient = hyper::Client<HttpsConnector>;

pub fn http_client() -> error_stack::Result<HttpClient, WorksheetError> {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .change_context(WorksheetError::Network)
        .attach_printable("Could not load native root certificates")?
        .https_only()
        .enable_http1()
        .build();

    Ok(hyper::Client::builder().build(connector))
}
