//! A DICOM proxy for [Orthanc](https://www.orthanc-server.com/) which answers
//! C-FIND and C-MOVE requests using remote DICOMweb servers.
//!
//! - C-FIND requests are translated to QIDO-RS searches, see [build_query] and [flatten].
//! - C-MOVE requests are served by a [RetrieveSession]: instances are listed using
//!   WADO-RS metadata, retrieved into Orthanc one at a time, sent to the
//!   destination modality using C-STORE, and finally deleted from Orthanc.
//!
//! All calls are made through the built-in REST API of Orthanc, see [RestApi].
//! The [DicomWebProxy] hooks are meant to be called by the C-FIND and C-MOVE
//! callbacks of an Orthanc plugin, and [HostLogger] forwards [tracing] events
//! to the Orthanc log.

pub mod api;
mod answer;
mod charset;
mod config;
mod error;
mod level;
mod logger;
mod models;
mod proxy;
mod query;
mod resolve;
mod rest;
mod retrieve;

pub use answer::flatten;
pub use charset::{DEFAULT_CHARSET, map_charset};
pub use config::ProxyConfig;
pub use error::*;
pub use level::map_level;
pub use logger::{HostLogLevel, HostLogRecord, HostLogger, LogSink};
pub use models::*;
pub use proxy::DicomWebProxy;
pub use query::{DICOM_MEDIA_TYPE, RestQuery, build_query};
pub use resolve::resolve_alias_for_aet;
pub use rest::{RestApi, RestError};
pub use retrieve::{RetrieveSession, SessionState};
