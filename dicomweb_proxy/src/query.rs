//! C-FIND to QIDO-RS.

use crate::charset::{DEFAULT_CHARSET, map_charset};
use crate::level::map_level;
use crate::models::FindQuery;
use compact_str::CompactString;
use orthanc_api::{DicomWebGetRequest, DicomWebResource};
use std::collections::BTreeMap;

/// Media type requested from the DICOMweb server for query answers.
pub const DICOM_MEDIA_TYPE: &str = "application/dicom";

/// A QIDO-RS search.
#[derive(Debug, Clone, PartialEq)]
pub struct RestQuery {
    pub resource: DicomWebResource,
    pub headers: BTreeMap<String, String>,
    /// Query parameters, keyed by DICOM keyword.
    pub arguments: BTreeMap<CompactString, String>,
}

/// Build a QIDO-RS search from the identifier of a C-FIND.
///
/// QueryRetrieveLevel is used to choose the resource and SpecificCharacterSet
/// to choose the `Accept-Charset`. All other attributes are passed on as
/// arguments, without any conversion (DICOM wildcards are also valid QIDO-RS
/// wildcards).
pub fn build_query(query: &FindQuery) -> RestQuery {
    let mut resource = DicomWebResource::Studies;
    let mut accept_charset = DEFAULT_CHARSET;
    let mut arguments = BTreeMap::new();
    for (keyword, value) in query.iter() {
        match keyword {
            "QueryRetrieveLevel" => resource = map_level(value),
            "SpecificCharacterSet" => accept_charset = map_charset(value),
            _ => {
                arguments.insert(CompactString::new(keyword), value.to_string());
            }
        }
    }
    let headers = [
        ("Accept".to_string(), DICOM_MEDIA_TYPE.to_string()),
        ("Accept-Charset".to_string(), accept_charset.to_string()),
    ]
    .into();
    RestQuery {
        resource,
        headers,
        arguments,
    }
}

impl From<RestQuery> for DicomWebGetRequest {
    fn from(value: RestQuery) -> Self {
        DicomWebGetRequest {
            uri: value.resource.to_string(),
            http_headers: value.headers,
            arguments: value.arguments,
        }
    }
}
