use crate::error::ValidationError;
use compact_str::CompactString;
use orthanc_api::{
    DicomJsonRecord, DicomWebServerAlias, QueryRetrieveLevel, RetrieveResource,
};
use std::collections::BTreeMap;

/// DICOM Application Entity title.
#[nutype::nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Serialize, Deserialize, Clone, Hash, Eq, PartialEq, Deref, Debug, Display)
)]
pub struct AeTitle(String);

/// The identifier of a C-FIND request: DICOM keywords and their values, in
/// the order they were received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery(Vec<(CompactString, String)>);

impl FindQuery {
    pub fn new() -> Self {
        Default::default()
    }

    /// Append an attribute to the query.
    pub fn push(&mut self, keyword: impl Into<CompactString>, value: impl Into<String>) {
        self.0.push((keyword.into(), value.into()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<CompactString>, V: Into<String>> FromIterator<(K, V)> for FindQuery {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A C-FIND answer: DICOM tags and their values as strings.
pub type FlatTagRecord = BTreeMap<CompactString, String>;

/// A C-MOVE request, as received by Orthanc from a DICOM modality.
///
/// Any field may be missing or empty. See [MoveRequest::validate].
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MoveRequest {
    #[serde(rename = "Level", default)]
    pub level: Option<String>,
    /// Called AET of the C-MOVE, which must be the alias of a DICOMweb server.
    #[serde(rename = "SourceAET", default)]
    pub source_aet: Option<String>,
    #[serde(rename = "TargetAET", default)]
    pub target_aet: Option<String>,
    #[serde(rename = "OriginatorAET", default)]
    pub originator_aet: Option<String>,
    /// Message ID of the C-MOVE request.
    #[serde(rename = "OriginatorID", default)]
    pub originator_id: Option<u16>,
    #[serde(rename = "StudyInstanceUID", default)]
    pub study_instance_uid: Option<String>,
    #[serde(rename = "SeriesInstanceUID", default)]
    pub series_instance_uid: Option<String>,
    #[serde(rename = "SOPInstanceUID", default)]
    pub sop_instance_uid: Option<String>,
}

/// A [MoveRequest] having all the fields required for its level.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMove {
    pub server: DicomWebServerAlias,
    pub scope: RetrieveScope,
    /// AET of the modality to send the instances to.
    pub destination: AeTitle,
    pub originator: Option<MoveOriginator>,
}

/// Identifies the C-MOVE which causes a C-STORE.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOriginator {
    pub aet: AeTitle,
    pub id: u16,
}

impl MoveRequest {
    /// Check that the fields required by the retrieve level are present.
    ///
    /// Fields are checked in order: SourceAET, Level, StudyInstanceUID,
    /// SeriesInstanceUID, SOPInstanceUID, then TargetAET or OriginatorAET.
    pub fn validate(&self) -> Result<ValidatedMove, ValidationError> {
        let server = required(&self.source_aet, "SourceAET")?;
        let level = required(&self.level, "Level")?;
        let level = match level.parse() {
            Ok(QueryRetrieveLevel::Patient) => return Err(ValidationError::PatientLevel),
            Ok(level) => level,
            Err(_) => return Err(ValidationError::UnknownLevel(level)),
        };
        let study = required(&self.study_instance_uid, "StudyInstanceUID")?;
        let scope = match level {
            QueryRetrieveLevel::Study => RetrieveScope::Study { study },
            QueryRetrieveLevel::Series => RetrieveScope::Series {
                study,
                series: required(&self.series_instance_uid, "SeriesInstanceUID")?,
            },
            QueryRetrieveLevel::Image => {
                let series = required(&self.series_instance_uid, "SeriesInstanceUID")?;
                RetrieveScope::Image {
                    study,
                    series,
                    instance: required(&self.sop_instance_uid, "SOPInstanceUID")?,
                }
            }
            QueryRetrieveLevel::Patient => return Err(ValidationError::PatientLevel),
        };
        let originator = self.originator_aet.clone().and_then(|aet| AeTitle::try_new(aet).ok());
        let destination = self
            .target_aet
            .clone()
            .and_then(|aet| AeTitle::try_new(aet).ok())
            .or_else(|| originator.clone())
            .ok_or(ValidationError::MissingField("OriginatorAET"))?;
        let originator = originator
            .zip(self.originator_id)
            .map(|(aet, id)| MoveOriginator { aet, id });
        Ok(ValidatedMove {
            server: DicomWebServerAlias::new(server),
            scope,
            destination,
            originator,
        })
    }
}

/// Get the trimmed value of a field, which must not be empty.
fn required(value: &Option<String>, name: &'static str) -> Result<String, ValidationError> {
    value
        .as_deref()
        .map(|s| s.trim_matches(|c: char| c.is_whitespace() || c == '\0'))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or(ValidationError::MissingField(name))
}

/// What a C-MOVE asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrieveScope {
    Study {
        study: String,
    },
    Series {
        study: String,
        series: String,
    },
    Image {
        study: String,
        series: String,
        instance: String,
    },
}

impl RetrieveScope {
    pub fn level(&self) -> QueryRetrieveLevel {
        match self {
            RetrieveScope::Study { .. } => QueryRetrieveLevel::Study,
            RetrieveScope::Series { .. } => QueryRetrieveLevel::Series,
            RetrieveScope::Image { .. } => QueryRetrieveLevel::Image,
        }
    }

    pub fn study_instance_uid(&self) -> &str {
        match self {
            RetrieveScope::Study { study }
            | RetrieveScope::Series { study, .. }
            | RetrieveScope::Image { study, .. } => study,
        }
    }

    /// WADO-RS metadata path of this scope, relative to the DICOMweb server root.
    pub fn metadata_uri(&self) -> String {
        match self {
            RetrieveScope::Study { study } => format!("studies/{study}/metadata"),
            RetrieveScope::Series { study, series } => {
                format!("studies/{study}/series/{series}/metadata")
            }
            RetrieveScope::Image {
                study,
                series,
                instance,
            } => format!("studies/{study}/series/{series}/instances/{instance}/metadata"),
        }
    }

    /// Returns `false` for a metadata record which is not the requested instance.
    /// Only the SOPInstanceUID is checked.
    pub fn accepts(&self, instance: &RemoteInstance) -> bool {
        match self {
            RetrieveScope::Image { instance: sop, .. } => &instance.sop_instance_uid == sop,
            _ => true,
        }
    }
}

/// DICOM tag of StudyInstanceUID.
pub const STUDY_INSTANCE_UID: &str = "0020000D";
/// DICOM tag of SeriesInstanceUID.
pub const SERIES_INSTANCE_UID: &str = "0020000E";
/// DICOM tag of SOPInstanceUID.
pub const SOP_INSTANCE_UID: &str = "00080018";

/// An instance on the remote DICOMweb server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteInstance {
    pub study_instance_uid: String,
    pub series_instance_uid: String,
    pub sop_instance_uid: String,
}

impl RemoteInstance {
    /// Get the identifying UIDs from a WADO-RS metadata record.
    /// Returns [None] if any of them is missing.
    pub fn from_metadata(record: &DicomJsonRecord) -> Option<Self> {
        Some(Self {
            study_instance_uid: first_string(record, STUDY_INSTANCE_UID)?,
            series_instance_uid: first_string(record, SERIES_INSTANCE_UID)?,
            sop_instance_uid: first_string(record, SOP_INSTANCE_UID)?,
        })
    }
}

impl From<&RemoteInstance> for RetrieveResource {
    fn from(value: &RemoteInstance) -> Self {
        RetrieveResource {
            study: value.study_instance_uid.clone(),
            series: Some(value.series_instance_uid.clone()),
            instance: Some(value.sop_instance_uid.clone()),
        }
    }
}

fn first_string(record: &DicomJsonRecord, tag: &str) -> Option<String> {
    record
        .get(tag)?
        .as_ref()?
        .value
        .first()?
        .as_str()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
