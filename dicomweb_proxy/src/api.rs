//! Typed clients for the parts of the Orthanc built-in API used by the proxy.

mod client;
mod dicomweb;
mod modalities;
mod response;
mod tools;

pub use client::BaseClient;
pub use dicomweb::DicomWebClient;
pub use modalities::ModalitiesClient;
pub use response::ResponseError;
pub use tools::ToolsClient;

pub use orthanc_api as types;
