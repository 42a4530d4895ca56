use super::client::BaseClient;
use super::response::ResponseError;
use crate::rest::RestApi;
use orthanc_api::{
    DicomJsonRecord, DicomWebGetRequest, DicomWebRetrieveRequest, DicomWebServerAlias,
};

/// Client for the DICOMweb client routes of the Orthanc DICOMweb plugin.
///
/// Ref: <https://orthanc.uclouvain.be/book/plugins/dicomweb.html#client-related-options>
#[derive(Copy, Clone)]
pub struct DicomWebClient<A>(BaseClient<A>);

impl<A: RestApi> DicomWebClient<A> {
    pub fn new(api: A) -> Self {
        Self(BaseClient::new(api))
    }

    /// Send a GET request (e.g. a QIDO-RS search or a WADO-RS metadata request)
    /// to a remote DICOMweb server, and get its DICOM JSON response.
    pub fn get(
        &self,
        server: &DicomWebServerAlias,
        request: &DicomWebGetRequest,
    ) -> Result<Vec<DicomJsonRecord>, ResponseError> {
        let uri = format!("/dicom-web/servers/{server}/get");
        self.0.post_after_plugins(uri, request)
    }

    /// Make Orthanc retrieve resources from a remote DICOMweb server using WADO-RS.
    ///
    /// The response is returned untyped: its content depends on the version of the plugin.
    pub fn retrieve(
        &self,
        server: &DicomWebServerAlias,
        request: &DicomWebRetrieveRequest,
    ) -> Result<serde_json::Value, ResponseError> {
        let uri = format!("/dicom-web/servers/{server}/retrieve");
        self.0.post_after_plugins(uri, request)
    }
}
