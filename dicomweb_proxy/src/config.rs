use serde::Deserialize;

/// Orthanc configuration file.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OrthancConfig {
    dicom_web_proxy: Option<ProxyConfig>,
}

/// Configuration section `"DicomWebProxy"` of the Orthanc configuration file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProxyConfig {
    /// Log [tracing::Level::INFO] events as warnings.
    pub verbose: bool,
    /// AET used by Orthanc when it forwards instances to the destination modality.
    pub local_aet: Option<String>,
    /// Timeout of the forwarding C-STORE, in seconds.
    pub store_timeout: Option<u32>,
    /// Identify the C-MOVE which caused a forwarding C-STORE.
    pub forward_move_originator: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            local_aet: None,
            store_timeout: None,
            forward_move_originator: true,
        }
    }
}

impl ProxyConfig {
    /// Get the proxy configuration from the whole Orthanc configuration (as
    /// returned by `OrthancPluginGetConfiguration`).
    pub fn from_orthanc_configuration(json: &[u8]) -> serde_json::Result<Self> {
        let config: OrthancConfig = serde_json::from_slice(json)?;
        Ok(config.dicom_web_proxy.unwrap_or_default())
    }
}
