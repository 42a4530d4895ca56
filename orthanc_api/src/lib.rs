//! Orthanc API request and response types used by the DICOMweb proxy.

mod dicomweb;
mod modality;
mod types;

pub use crate::dicomweb::*;
pub use crate::modality::*;
pub use crate::types::*;
