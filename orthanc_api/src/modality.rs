use crate::types::{InstanceId, ModalityAlias};
use compact_str::CompactString;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Configuration of a DICOM modality, as listed by
/// [`/modalities?expand`](https://orthanc.uclouvain.be/api/#tag/Networking/paths/~1modalities/get)
/// (incomplete).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ModalityConfig {
    #[serde(rename = "AET")]
    pub aet: CompactString,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

/// The response from `/modalities?expand`, in the order sent by Orthanc.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModalityListing(pub Vec<(ModalityAlias, ModalityConfig)>);

impl ModalityListing {
    pub fn iter(&self) -> impl Iterator<Item = &(ModalityAlias, ModalityConfig)> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for ModalityListing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ModalityListingVisitor)
    }
}

struct ModalityListingVisitor;

impl<'de> Visitor<'de> for ModalityListingVisitor {
    type Value = ModalityListing;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a map of modality aliases to modality configurations")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut modalities = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((alias, config)) = access.next_entry()? {
            modalities.push((alias, config));
        }
        Ok(ModalityListing(modalities))
    }
}

/// Request body of
/// [`/modalities/{id}/store`](https://orthanc.uclouvain.be/api/#tag/Networking/paths/~1modalities~1{id}~1store/post),
/// which sends resources stored locally to a DICOM modality using C-STORE.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct StoreRequest {
    pub resources: Vec<InstanceId>,
    pub synchronous: Option<bool>,
    pub local_aet: Option<String>,
    /// Timeout of the DICOM association, in seconds.
    pub timeout: Option<u32>,
    pub move_originator_aet: Option<String>,
    #[serde(rename = "MoveOriginatorID")]
    pub move_originator_id: Option<u16>,
}
