use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A verse ready for display.
///
/// Built only from a successful, error-free API response and dropped once
/// it has been rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseResult {
    /// Verse body with surrounding whitespace removed.
    pub text: String,
    /// Canonical citation as returned by the API (e.g., "John 3:16").
    pub reference: String,
    /// Translation name (e.g., "King James Version"); empty when the API omits it.
    pub version_label: String,
}

impl VerseResult {
    /// The version region's content: "Version: {label}", or empty when there is no label.
    pub fn version_line(&self) -> String {
        if self.version_label.is_empty() {
            String::new()
        } else {
            format!("Version: {}", self.version_label)
        }
    }
}

/// Raw JSON body returned by the lookup and random endpoints.
///
/// Every field is optional at this level; [`ApiResponse::into_verdict`]
/// decides what a missing field means.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub translation_name: Option<String>,
    /// Not-found marker. Any truthy value means the reference did not resolve.
    #[serde(default)]
    pub error: Option<Value>,
}

/// What a decoded response says about the requested verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiVerdict {
    Found(VerseResult),
    NotFound,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response body is not a JSON verse object: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no string `text` field")]
    MissingText,
}

impl ApiResponse {
    pub fn parse(body: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Map the response to a verdict.
    ///
    /// The error marker wins over any other content. Without it, `text`
    /// must be a string; `reference` and `translation_name` fall back to empty.
    pub fn into_verdict(self) -> Result<ApiVerdict, DecodeError> {
        if self.error.as_ref().is_some_and(is_truthy) {
            return Ok(ApiVerdict::NotFound);
        }

        let text = match self.text {
            Some(Value::String(s)) => s,
            _ => return Err(DecodeError::MissingText),
        };

        Ok(ApiVerdict::Found(VerseResult {
            text: text.trim().to_string(),
            reference: self.reference.unwrap_or_default(),
            version_label: self.translation_name.unwrap_or_default(),
        }))
    }
}

/// Decode a response body straight to a verdict.
pub fn decode_body(body: &str) -> Result<ApiVerdict, DecodeError> {
    ApiResponse::parse(body)?.into_verdict()
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy, everything else is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_trims_text() {
        let body = r#"{
            "text": " For God so loved...\n",
            "reference": "John 3:16",
            "translation_name": "KJV"
        }"#;
        let verdict = decode_body(body).unwrap();
        assert_eq!(
            verdict,
            ApiVerdict::Found(VerseResult {
                text: "For God so loved...".into(),
                reference: "John 3:16".into(),
                version_label: "KJV".into(),
            })
        );
    }

    #[test]
    fn test_error_marker_is_not_found() {
        assert_eq!(decode_body(r#"{"error":"not found"}"#).unwrap(), ApiVerdict::NotFound);
        assert_eq!(decode_body(r#"{"error":true,"text":"x"}"#).unwrap(), ApiVerdict::NotFound);
    }

    #[test]
    fn test_falsy_error_marker_is_ignored() {
        for marker in [r#""""#, "null", "false", "0"] {
            let body = format!(
                r#"{{"error":{marker},"text":"In the beginning","reference":"Genesis 1:1"}}"#
            );
            match decode_body(&body).unwrap() {
                ApiVerdict::Found(v) => assert_eq!(v.text, "In the beginning"),
                other => panic!("marker {marker} gave {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_optional_fields() {
        let verdict = decode_body(r#"{"text":"Jesus wept."}"#).unwrap();
        let ApiVerdict::Found(v) = verdict else { panic!("expected a verse") };
        assert_eq!(v.reference, "");
        assert_eq!(v.version_label, "");
        assert_eq!(v.version_line(), "");
    }

    #[test]
    fn test_malformed_bodies() {
        assert!(matches!(decode_body("<html>502</html>"), Err(DecodeError::Json(_))));
        assert!(matches!(decode_body("[1,2,3]"), Err(DecodeError::Json(_))));
        assert!(matches!(decode_body("{}"), Err(DecodeError::MissingText)));
        assert!(matches!(decode_body(r#"{"text":42}"#), Err(DecodeError::MissingText)));
    }

    #[test]
    fn test_version_line() {
        let v = VerseResult {
            text: "t".into(),
            reference: "r".into(),
            version_label: "World English Bible".into(),
        };
        assert_eq!(v.version_line(), "Version: World English Bible");
    }
}
