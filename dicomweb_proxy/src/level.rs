use orthanc_api::DicomWebResource;

/// Get the QIDO-RS resource to search for a C-FIND QueryRetrieveLevel.
///
/// The PATIENT level is not supported: like any unknown value, it defaults to studies.
pub fn map_level(query_retrieve_level: &str) -> DicomWebResource {
    match query_retrieve_level.trim() {
        "IMAGE" => DicomWebResource::Instances,
        "SERIES" => DicomWebResource::Series,
        "STUDY" => DicomWebResource::Studies,
        _ => DicomWebResource::Studies,
    }
}
