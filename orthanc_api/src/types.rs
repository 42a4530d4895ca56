use nutype::nutype;
use serde::{Deserialize, Serialize};

/// ID of a DICOM instance stored by the local Orthanc.
#[nutype(derive(Serialize, Deserialize, Clone, Display, Debug, Eq, PartialEq, Hash))]
pub struct InstanceId(String);

/// Symbolic name of a DICOM modality in the Orthanc configuration
/// (the keys of `"DicomModalities"`).
#[nutype(derive(Serialize, Deserialize, Clone, Display, Debug, Eq, PartialEq, Hash))]
pub struct ModalityAlias(String);

/// Symbolic name of a remote DICOMweb server in the configuration of the
/// Orthanc DICOMweb plugin (the keys of `"DicomWeb.Servers"`).
#[nutype(derive(Serialize, Deserialize, Clone, Display, Debug, Eq, PartialEq, Hash))]
pub struct DicomWebServerAlias(String);

/// Level of a resource stored by Orthanc.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResourceType {
    Patient,
    Study,
    Series,
    Instance,
}

/// One element of the response from
/// [`/tools/lookup`](https://orthanc.uclouvain.be/api/#tag/System/paths/~1tools~1lookup/post).
///
/// The `ID` is kept as a plain string because its meaning depends on [LookupEntry::resource_type].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LookupEntry {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Type")]
    pub resource_type: ResourceType,
}

/// Request body of
/// [`/tools/bulk-delete`](https://orthanc.uclouvain.be/api/#tag/System/paths/~1tools~1bulk-delete/post).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct BulkDeleteRequest {
    pub resources: Vec<InstanceId>,
}

/// ID and path of an Orthanc resource.
///
/// Note: the Orthanc response typically has `{ "Type": "Patient|Study|Series|Instance" }`,
/// which is missing from this struct because the information is conveyed by the generic type.
#[derive(Serialize, Deserialize, Debug, PartialEq, Hash)]
pub struct IdAndPath<T> {
    #[serde(rename = "ID")]
    pub id: T,
    #[serde(rename = "Path")]
    pub path: String,
}

impl From<LookupEntry> for IdAndPath<InstanceId> {
    fn from(value: LookupEntry) -> Self {
        Self {
            id: InstanceId::new(value.id),
            path: value.path,
        }
    }
}
