use crate::fake_orthanc::{FakeOrthanc, modalities};
use compact_str::CompactString;
use dicomweb_proxy::{DicomWebProxy, ErrorKind, FindQuery, FlatTagRecord, ProxyConfig};
use pretty_assertions::assert_eq;
use serde_json::json;

mod fake_orthanc;

const GET_URI: &str = "/dicom-web/servers/PACS/get";

fn proxy(fake: &FakeOrthanc) -> DicomWebProxy<FakeOrthanc> {
    DicomWebProxy::new(fake.clone(), ProxyConfig::default())
}

fn study_query() -> FindQuery {
    [
        ("QueryRetrieveLevel", "STUDY"),
        ("SpecificCharacterSet", "ISO_IR 100"),
        ("PatientID", "AB*"),
        ("PatientName", ""),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_find_studies() {
    let answer = json!([
        {
            "00100020": {"vr": "LO", "Value": ["AB123"]},
            "00100010": {"vr": "PN", "Value": [{"Alphabetic": "Doe^John"}]},
            "00201206": {"vr": "IS", "Value": [2]},
            "00081030": {"vr": "LO"}
        },
        {
            "00100020": {"vr": "LO", "Value": ["AB456"]},
            "00100010": {"vr": "PN", "Value": [{"Alphabetic": "Roe^Jane"}]}
        }
    ]);
    let fake = FakeOrthanc::new(modalities()).with_dicomweb("studies", answer);
    let actual = proxy(&fake).on_find("PACS", &study_query()).unwrap();

    let expected: Vec<FlatTagRecord> = vec![
        [
            (CompactString::new("00100010"), "Doe^John".to_string()),
            (CompactString::new("00100020"), "AB123".to_string()),
            (CompactString::new("00201206"), "2".to_string()),
        ]
        .into(),
        [
            (CompactString::new("00100010"), "Roe^Jane".to_string()),
            (CompactString::new("00100020"), "AB456".to_string()),
        ]
        .into(),
    ];
    assert_eq!(actual, expected);

    let calls = fake.calls_to(GET_URI);
    assert_eq!(calls.len(), 1);
    let expected_request = json!({
        "Uri": "studies",
        "HttpHeaders": {"Accept": "application/dicom", "Accept-Charset": "ISO-8859-1"},
        "Arguments": {"PatientID": "AB*", "PatientName": ""}
    });
    assert_eq!(calls[0].body, expected_request);
}

#[test]
fn test_find_series() {
    let fake = FakeOrthanc::new(modalities()).with_dicomweb("series", json!([]));
    let query: FindQuery = [("QueryRetrieveLevel", "SERIES"), ("StudyInstanceUID", "1.2.3")]
        .into_iter()
        .collect();
    let actual = proxy(&fake).on_find(" PACS ", &query).unwrap();
    assert!(actual.is_empty());
    assert_eq!(fake.calls_to(GET_URI)[0].body["HttpHeaders"]["Accept-Charset"], "UTF-8");
}

#[test]
fn test_find_without_called_aet() {
    let fake = FakeOrthanc::new(modalities());
    let e = proxy(&fake).on_find("  ", &study_query()).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Validation);
    assert!(fake.calls().is_empty());
}

#[test]
fn test_find_untranslatable_answer() {
    let answer = json!([{
        "00081032": {"vr": "SQ", "Value": [{"00080100": {"vr": "SH", "Value": ["X"]}}]}
    }]);
    let fake = FakeOrthanc::new(modalities()).with_dicomweb("studies", answer);
    let e = proxy(&fake).on_find("PACS", &study_query()).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Translation);
}

#[test]
fn test_find_server_failure() {
    let fake = FakeOrthanc::new(modalities())
        .with_dicomweb("studies", json!([]))
        .failing(GET_URI, 1);
    let e = proxy(&fake).on_find("PACS", &study_query()).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Transport);
    assert!(e.to_string().contains("injected failure"));
    assert!(proxy(&fake).on_find("PACS", &study_query()).is_ok());
}
