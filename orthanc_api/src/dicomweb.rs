//! Request and response bodies of the DICOMweb client routes of the
//! [Orthanc DICOMweb plugin](https://orthanc.uclouvain.be/book/plugins/dicomweb.html#client-related-options).

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level DICOMweb resource collection of a QIDO-RS search.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DicomWebResource {
    Studies,
    Series,
    Instances,
}

impl DicomWebResource {
    /// The URI path segment of this resource collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            DicomWebResource::Studies => "studies",
            DicomWebResource::Series => "series",
            DicomWebResource::Instances => "instances",
        }
    }
}

impl std::fmt::Display for DicomWebResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body of `/dicom-web/servers/{id}/get`, which forwards a GET request
/// to a remote DICOMweb server.
///
/// Ref: <https://orthanc.uclouvain.be/book/plugins/dicomweb.html#sending-get-requests-to-a-dicomweb-server>
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DicomWebGetRequest {
    /// Path relative to the root of the DICOMweb server.
    pub uri: String,
    pub http_headers: BTreeMap<String, String>,
    /// QIDO-RS query parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub arguments: BTreeMap<CompactString, String>,
}

/// Request body of `/dicom-web/servers/{id}/retrieve`, which makes Orthanc
/// retrieve resources from a remote DICOMweb server using WADO-RS.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DicomWebRetrieveRequest {
    pub resources: Vec<RetrieveResource>,
}

/// A resource to retrieve from a DICOMweb server. Omitting `Series` retrieves
/// the whole study, omitting `Instance` retrieves the whole series.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RetrieveResource {
    pub study: String,
    pub series: Option<String>,
    pub instance: Option<String>,
}

/// An element of a record in the
/// [DICOM JSON model](https://dicom.nema.org/medical/dicom/current/output/chtml/part18/chapter_F.html).
///
/// Only `Value` is modeled: elements carrying `InlineBinary` or `BulkDataURI`
/// deserialize with an empty [DicomJsonElement::value].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DicomJsonElement {
    /// Value representation.
    #[serde(
        rename = "vr",
        alias = "representation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vr: Option<CompactString>,
    #[serde(rename = "Value", default, skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<serde_json::Value>,
}

/// A DICOM JSON record, i.e. one QIDO-RS match or one WADO-RS metadata item,
/// keyed by tag (e.g. `"0020000D"`).
pub type DicomJsonRecord = BTreeMap<CompactString, Option<DicomJsonElement>>;

/// DICOM level of a query or retrieve operation, as named by the
/// QueryRetrieveLevel (0008,0052) attribute.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryRetrieveLevel {
    Patient,
    Study,
    Series,
    Image,
}

impl QueryRetrieveLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryRetrieveLevel::Patient => "PATIENT",
            QueryRetrieveLevel::Study => "STUDY",
            QueryRetrieveLevel::Series => "SERIES",
            QueryRetrieveLevel::Image => "IMAGE",
        }
    }
}

impl std::str::FromStr for QueryRetrieveLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PATIENT" => Ok(QueryRetrieveLevel::Patient),
            "STUDY" => Ok(QueryRetrieveLevel::Study),
            "SERIES" => Ok(QueryRetrieveLevel::Series),
            "IMAGE" => Ok(QueryRetrieveLevel::Image),
            _ => Err(UnknownLevel),
        }
    }
}

impl std::fmt::Display for QueryRetrieveLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The string is not a QueryRetrieveLevel.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UnknownLevel;
