#![allow(dead_code)]
//! An in-memory Orthanc with the DICOMweb plugin, recording every call.

use dicomweb_proxy::{RestApi, RestError};
use http::{Method, StatusCode};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// A call to the Orthanc REST API.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub uri: String,
    /// JSON body, or a JSON string for raw bodies.
    pub body: Value,
}

#[derive(Default)]
struct State {
    modalities: Value,
    /// DICOMweb GET answers, by `Uri` of the request.
    dicomweb: HashMap<String, Value>,
    /// Answer of the DICOMweb retrieve route, if not the default.
    retrieve_answer: Option<Value>,
    /// Instances which are not saved by Orthanc when retrieved.
    lost: HashSet<String>,
    /// SOPInstanceUIDs of instances stored locally.
    stored: HashSet<String>,
    /// Per URI, the numbers of the calls which should fail (1-based).
    failures: HashMap<String, Vec<usize>>,
    counts: HashMap<String, usize>,
    calls: Vec<Call>,
}

#[derive(Clone, Default)]
pub struct FakeOrthanc(Arc<Mutex<State>>);

impl FakeOrthanc {
    pub fn new(modalities: Value) -> Self {
        let fake = Self::default();
        fake.state().modalities = modalities;
        fake
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.0.lock().unwrap()
    }

    /// Set the answer of a QIDO-RS or WADO-RS request.
    pub fn with_dicomweb(self, uri: &str, answer: Value) -> Self {
        self.state().dicomweb.insert(uri.to_string(), answer);
        self
    }

    pub fn with_retrieve_answer(self, answer: Value) -> Self {
        self.state().retrieve_answer = Some(answer);
        self
    }

    /// Make an instance go missing after it is retrieved.
    pub fn losing(self, sop_instance_uid: &str) -> Self {
        self.state().lost.insert(sop_instance_uid.to_string());
        self
    }

    /// Make the n-th call (1-based) to the given URI fail.
    pub fn failing(self, uri: &str, nth: usize) -> Self {
        self.state()
            .failures
            .entry(uri.to_string())
            .or_default()
            .push(nth);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Calls to the given URI.
    pub fn calls_to(&self, uri: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.uri == uri).collect()
    }

    pub fn stored(&self) -> HashSet<String> {
        self.state().stored.clone()
    }

    fn handle(&self, method: Method, uri: &str, body: &[u8]) -> Result<Vec<u8>, RestError> {
        let mut state = self.state();
        let body_value = serde_json::from_slice(body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).to_string()));
        state.calls.push(Call {
            method: method.clone(),
            uri: uri.to_string(),
            body: body_value.clone(),
        });
        let count = {
            let count = state.counts.entry(uri.to_string()).or_insert(0);
            *count += 1;
            *count
        };
        if state
            .failures
            .get(uri)
            .is_some_and(|nth| nth.contains(&count))
        {
            return Err(RestError::new(method, uri, StatusCode::INTERNAL_SERVER_ERROR)
                .with_message("injected failure"));
        }
        let answer = match (method.as_str(), uri) {
            ("GET", "/modalities?expand") => state.modalities.clone(),
            ("POST", "/tools/lookup") => {
                let sop = String::from_utf8_lossy(body);
                if state.stored.contains(sop.as_ref()) {
                    let id = orthanc_id(&sop);
                    json!([
                        {"ID": "study-id", "Path": "/studies/study-id", "Type": "Study"},
                        {"ID": &id, "Path": format!("/instances/{id}"), "Type": "Instance"}
                    ])
                } else {
                    json!([])
                }
            }
            ("POST", "/tools/bulk-delete") => {
                let deleted: Vec<String> = serde_json::from_value(body_value["Resources"].clone())
                    .unwrap_or_default();
                state.stored.retain(|sop| !deleted.contains(&orthanc_id(sop)));
                json!({})
            }
            ("POST", uri) if uri.starts_with("/modalities/") && uri.ends_with("/store") => {
                json!({"Description": "REST API", "LocalAet": "ORTHANC", "RemoteAet": "WS1"})
            }
            ("POST", uri) if uri.starts_with("/dicom-web/servers/") && uri.ends_with("/get") => {
                let key = body_value["Uri"].as_str().unwrap_or_default();
                match state.dicomweb.get(key) {
                    Some(answer) => answer.clone(),
                    None => return Err(RestError::new(method.clone(), uri, StatusCode::NOT_FOUND)),
                }
            }
            ("POST", uri) if uri.starts_with("/dicom-web/servers/") && uri.ends_with("/retrieve") => {
                let sop = body_value["Resources"][0]["Instance"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                if !state.lost.contains(&sop) {
                    state.stored.insert(sop.clone());
                }
                state
                    .retrieve_answer
                    .clone()
                    .unwrap_or_else(|| json!({"Instances": [orthanc_id(&sop)]}))
            }
            _ => return Err(RestError::new(method.clone(), uri, StatusCode::NOT_FOUND)),
        };
        Ok(serde_json::to_vec(&answer).unwrap())
    }
}

impl RestApi for FakeOrthanc {
    fn get(&self, uri: &str) -> Result<Vec<u8>, RestError> {
        self.handle(Method::GET, uri, &[])
    }

    fn post(&self, uri: &str, body: &[u8]) -> Result<Vec<u8>, RestError> {
        if uri.starts_with("/dicom-web/") {
            // plugin routes are not served before plugins
            return Err(RestError::new(Method::POST, uri, StatusCode::NOT_FOUND));
        }
        self.handle(Method::POST, uri, body)
    }

    fn post_after_plugins(&self, uri: &str, body: &[u8]) -> Result<Vec<u8>, RestError> {
        self.handle(Method::POST, uri, body)
    }
}

/// Orthanc ID of an instance in [FakeOrthanc].
pub fn orthanc_id(sop_instance_uid: &str) -> String {
    format!("id-{sop_instance_uid}")
}

/// Modalities configured in Orthanc.
pub fn modalities() -> Value {
    json!({
        "workstation": {"AET": "WS1", "Host": "10.0.0.5", "Port": 104},
        "archive": {"AET": "ARCHIVE", "Host": "10.0.0.6", "Port": 11112}
    })
}

/// WADO-RS metadata of an instance.
pub fn metadata(study: &str, series: &str, sop: &str) -> Value {
    json!({
        "0020000D": {"vr": "UI", "Value": [study]},
        "0020000E": {"vr": "UI", "Value": [series]},
        "00080018": {"vr": "UI", "Value": [sop]},
        "00080016": {"vr": "UI", "Value": ["1.2.840.10008.5.1.4.1.1.2"]},
        "7FE00010": {"vr": "OW", "BulkDataURI": "http://pacs/bulk"}
    })
}
