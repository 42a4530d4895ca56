//! The seam between the proxy and the Orthanc built-in REST API.

use http::{Method, StatusCode};

/// Calls to the built-in REST API of the Orthanc instance hosting the proxy.
///
/// Inside a plugin this is implemented with `OrthancPluginRestApiGet`,
/// `OrthancPluginRestApiPost` and `OrthancPluginRestApiPostAfterPlugins`.
/// Bodies are exchanged as raw bytes; see [crate::api::BaseClient] for JSON.
pub trait RestApi {
    /// Make a GET call.
    fn get(&self, uri: &str) -> Result<Vec<u8>, RestError>;

    /// Make a POST call which is only served by Orthanc's core routes.
    fn post(&self, uri: &str, body: &[u8]) -> Result<Vec<u8>, RestError>;

    /// Make a POST call which may be served by routes registered by plugins,
    /// e.g. the `/dicom-web/servers/...` routes of the DICOMweb plugin.
    fn post_after_plugins(&self, uri: &str, body: &[u8]) -> Result<Vec<u8>, RestError> {
        self.post(uri, body)
    }
}

impl<T: RestApi + ?Sized> RestApi for &T {
    fn get(&self, uri: &str) -> Result<Vec<u8>, RestError> {
        (**self).get(uri)
    }

    fn post(&self, uri: &str, body: &[u8]) -> Result<Vec<u8>, RestError> {
        (**self).post(uri, body)
    }

    fn post_after_plugins(&self, uri: &str, body: &[u8]) -> Result<Vec<u8>, RestError> {
        (**self).post_after_plugins(uri, body)
    }
}

/// An unsuccessful call to the Orthanc REST API.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{method} {uri} failed with status {status}{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct RestError {
    pub method: Method,
    pub uri: String,
    pub status: StatusCode,
    /// Error details reported by Orthanc, if any.
    pub message: Option<String>,
}

impl RestError {
    pub fn new(method: Method, uri: impl Into<String>, status: StatusCode) -> Self {
        Self {
            method,
            uri: uri.into(),
            status,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
