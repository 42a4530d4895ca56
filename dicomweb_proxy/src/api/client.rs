use super::response::ResponseError;
use crate::rest::RestApi;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Methods for calling the built-in API of Orthanc with JSON bodies.
#[derive(Copy, Clone, Debug)]
pub struct BaseClient<A>(A);

impl<A: RestApi> BaseClient<A> {
    /// Create a [BaseClient].
    pub fn new(api: A) -> Self {
        Self(api)
    }

    /// Make a GET call and deserialize its JSON response.
    pub fn get<D: DeserializeOwned>(&self, uri: String) -> Result<D, ResponseError> {
        let body = self.0.get(&uri)?;
        deserialize(uri, &body)
    }

    /// Make a POST call with a JSON body to a route which may be registered
    /// by a plugin, and deserialize its JSON response.
    pub fn post_after_plugins<D: DeserializeOwned, B: Serialize>(
        &self,
        uri: String,
        body: &B,
    ) -> Result<D, ResponseError> {
        let body = serialize(&uri, body)?;
        let response = self.0.post_after_plugins(&uri, &body)?;
        deserialize(uri, &response)
    }

    /// Make a POST call with a JSON body, ignoring the response body.
    pub fn post_ignore_response<B: Serialize>(
        &self,
        uri: String,
        body: &B,
    ) -> Result<(), ResponseError> {
        let body = serialize(&uri, body)?;
        self.0.post(&uri, &body)?;
        Ok(())
    }

    /// Make a POST call with a raw body and deserialize its JSON response.
    pub fn post_raw<D: DeserializeOwned>(
        &self,
        uri: String,
        body: &[u8],
    ) -> Result<D, ResponseError> {
        let response = self.0.post(&uri, body)?;
        deserialize(uri, &response)
    }
}

fn serialize<B: Serialize>(uri: &str, body: &B) -> Result<Vec<u8>, ResponseError> {
    serde_json::to_vec(body).map_err(|source| ResponseError::Json {
        uri: uri.to_string(),
        source,
    })
}

fn deserialize<D: DeserializeOwned>(uri: String, body: &[u8]) -> Result<D, ResponseError> {
    if body.is_empty() {
        return Err(ResponseError::Empty { uri });
    }
    serde_json::from_slice(body).map_err(|source| ResponseError::Json { uri, source })
}
