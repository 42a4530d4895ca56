use crate::error::ConfigurationError;
use orthanc_api::{ModalityAlias, ModalityListing};

/// Find the alias of the modality configured with the given AET.
///
/// The first modality in the listing having this AET is used.
pub fn resolve_alias_for_aet(
    modalities: &ModalityListing,
    aet: &str,
) -> Result<ModalityAlias, ConfigurationError> {
    modalities
        .iter()
        .find(|(_, config)| config.aet == aet)
        .map(|(alias, _)| alias.clone())
        .ok_or_else(|| ConfigurationError {
            aet: aet.to_string(),
        })
}
