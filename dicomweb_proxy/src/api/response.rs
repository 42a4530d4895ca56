use crate::rest::RestError;

/// Failure to obtain a typed response from the Orthanc REST API.
#[derive(thiserror::Error, Debug)]
pub enum ResponseError {
    /// Orthanc responded with an error.
    #[error(transparent)]
    Rest(#[from] RestError),

    /// A JSON response was expected but the body is empty.
    #[error("no response from {uri}")]
    Empty { uri: String },

    /// Request body could not be serialized or response could not be deserialized.
    #[error("{uri}: {source}")]
    Json {
        uri: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ResponseError {
    /// Write this error to the log.
    pub fn trace(&self) {
        match self {
            ResponseError::Rest(e) => tracing::error!(
                uri = e.uri.as_str(),
                status = e.status.as_u16(),
                details = e.message.as_deref(),
                "Orthanc API call failed"
            ),
            ResponseError::Empty { uri } => tracing::error!(uri = uri.as_str(), "No response"),
            ResponseError::Json { uri, source } => tracing::error!(
                uri = uri.as_str(),
                error = source.to_string(),
                "Unexpected JSON"
            ),
        }
    }
}
