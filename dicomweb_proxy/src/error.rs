use crate::api::ResponseError;
use compact_str::CompactString;

/// Any failure of the proxy.
///
/// Use [ProxyError::kind] to branch on the kind of failure.
#[derive(thiserror::Error, Debug)]
pub enum ProxyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Sequencing(#[from] SequencingError),
}

/// Kind of a [ProxyError].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    Validation,
    Configuration,
    Translation,
    Transport,
    Sequencing,
}

impl ProxyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProxyError::Validation(_) => ErrorKind::Validation,
            ProxyError::Configuration(_) => ErrorKind::Configuration,
            ProxyError::Translation(_) => ErrorKind::Translation,
            ProxyError::Transport(_) => ErrorKind::Transport,
            ProxyError::Sequencing(_) => ErrorKind::Sequencing,
        }
    }
}

impl ProxyError {
    /// Write this error to the log.
    pub fn trace(&self) {
        match self {
            ProxyError::Transport(TransportError::Response(e)) => e.trace(),
            e => tracing::error!(kind = ?e.kind(), "{e}"),
        }
    }
}

impl From<ResponseError> for ProxyError {
    fn from(value: ResponseError) -> Self {
        ProxyError::Transport(value.into())
    }
}

/// The incoming DICOM request cannot be processed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The DICOM query does not contain a value for {0}, unable to process it")]
    MissingField(&'static str),

    #[error("QueryRetrieveLevel PATIENT is not supported by the proxy")]
    PatientLevel,

    #[error("Unknown QueryRetrieveLevel \"{0}\"")]
    UnknownLevel(String),
}

/// An AE title is not known to Orthanc.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("No modality with AET \"{aet}\" is registered in the Orthanc configuration")]
pub struct ConfigurationError {
    pub aet: String,
}

/// A DICOM JSON value which cannot be represented as a single string.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("The tag {tag} contains {value}, which is not supported by the proxy")]
pub struct TranslationError {
    pub tag: CompactString,
    pub value: serde_json::Value,
}

/// Failure of a call to Orthanc, to the DICOMweb server, or to the destination modality.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error("The DICOMweb server {server} did not retrieve SOPInstanceUID={sop_instance_uid}: {answer}")]
    RetrieveRejected {
        server: String,
        sop_instance_uid: String,
        answer: serde_json::Value,
    },

    #[error("Instance SOPInstanceUID={0} was retrieved but is not found in Orthanc")]
    NotFoundLocally(String),
}

/// A retrieve session was driven in the wrong order.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SequencingError {
    #[error("the retrieve session was already listed")]
    AlreadyListed,

    #[error("the retrieve session must be listed before transferring")]
    NotListed,

    #[error("all {count} listed instances were already transferred")]
    Exhausted { count: usize },

    #[error("the retrieve session was released")]
    Released,
}
