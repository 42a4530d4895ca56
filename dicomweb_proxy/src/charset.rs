//! SpecificCharacterSet to HTTP `Accept-Charset`.

/// Charset used when the SpecificCharacterSet is absent or unknown.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Get a valid `Accept-Charset` value for a DICOMweb query from the value of
/// the DICOM tag SpecificCharacterSet (0008,0005).
///
/// Ref: <https://dicom.nema.org/medical/dicom/current/output/html/part18.html#table_D-1>
pub fn map_charset(specific_character_set: &str) -> &'static str {
    match specific_character_set.trim() {
        "ISO_IR 100" => "ISO-8859-1",
        "ISO_IR 101" => "ISO-8859-2",
        "ISO_IR 109" => "ISO-8859-3",
        "ISO_IR 110" => "ISO-8859-4",
        "ISO_IR 144" => "ISO-8859-5",
        "ISO_IR 127" => "ISO-8859-6",
        "ISO_IR 126" => "ISO-8859-7",
        "ISO_IR 138" => "ISO-8859-8",
        "ISO_IR 148" => "ISO-8859-9",
        "ISO_IR 203" => "ISO-8859-15",
        "ISO_IR 166" => "TIS-620",
        "ISO 2022 IR 13" | "ISO 2022 IR 87" => "ISO-2022-JP",
        "ISO 2022 IR 149" => "ISO-2022-KR",
        "ISO 2022 IR 6" | "ISO 2022 IR 58" => "ISO-2022-CN",
        "GB18030" => "GB18030",
        "GBK" => "GBK",
        "ISO_IR 192" => "UTF-8",
        _ => DEFAULT_CHARSET,
    }
}
