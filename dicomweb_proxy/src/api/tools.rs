use super::client::BaseClient;
use super::response::ResponseError;
use crate::rest::RestApi;
use orthanc_api::{BulkDeleteRequest, IdAndPath, InstanceId, LookupEntry, ResourceType};

/// Orthanc client for the `/tools` API.
#[derive(Copy, Clone)]
pub struct ToolsClient<A>(BaseClient<A>);

impl<A: RestApi> ToolsClient<A> {
    pub fn new(api: A) -> Self {
        Self(BaseClient::new(api))
    }

    /// Look for local resources having the given DICOM identifier (patient ID,
    /// StudyInstanceUID, SeriesInstanceUID or SOPInstanceUID).
    pub fn lookup(&self, dicom_id: &str) -> Result<Vec<LookupEntry>, ResponseError> {
        self.0.post_raw("/tools/lookup".to_string(), dicom_id.as_bytes())
    }

    /// Find the local instance having the given SOPInstanceUID.
    pub fn lookup_instance(
        &self,
        sop_instance_uid: &str,
    ) -> Result<Option<IdAndPath<InstanceId>>, ResponseError> {
        let entries = self.lookup(sop_instance_uid)?;
        let instance = entries
            .into_iter()
            .find(|e| e.resource_type == ResourceType::Instance)
            .map(IdAndPath::from);
        Ok(instance)
    }

    /// Delete local resources in one call.
    pub fn bulk_delete(&self, resources: Vec<InstanceId>) -> Result<(), ResponseError> {
        let request = BulkDeleteRequest { resources };
        self.0.post_ignore_response("/tools/bulk-delete".to_string(), &request)
    }
}
