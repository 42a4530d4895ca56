use super::client::BaseClient;
use super::response::ResponseError;
use crate::rest::RestApi;
use orthanc_api::{ModalityAlias, ModalityListing, StoreRequest};

/// Orthanc client for the networking API.
///
/// Ref: <https://orthanc.uclouvain.be/api/#tag/Networking>
#[derive(Copy, Clone)]
pub struct ModalitiesClient<A>(BaseClient<A>);

impl<A: RestApi> ModalitiesClient<A> {
    pub fn new(api: A) -> Self {
        Self(BaseClient::new(api))
    }

    /// List all the DICOM modalities that are known to Orthanc, with their configuration.
    pub fn list_modalities(&self) -> Result<ModalityListing, ResponseError> {
        self.0.get("/modalities?expand".to_string())
    }

    /// Send DICOM resources stored locally to a DICOM modality using C-STORE SCU.
    pub fn store(&self, modality: &ModalityAlias, request: &StoreRequest) -> Result<(), ResponseError> {
        let uri = format!("/modalities/{modality}/store");
        self.0.post_ignore_response(uri, request)
    }
}
