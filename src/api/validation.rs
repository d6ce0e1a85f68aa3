use axum::http::{HeaderMap, header};
use serde_json::Value;

use super::ApiError;
use crate::constants::PAYLOAD_FIELD;

/// Accepts `application/json` and `application/*+json`, ignoring parameters.
#[must_use]
pub fn is_json_media_type(content_type: &str) -> bool {
    let Ok(mime) = content_type.parse::<mime::Mime>() else {
        return false;
    };

    mime.type_().as_str().eq_ignore_ascii_case("application")
        && (mime.subtype().as_str().eq_ignore_ascii_case("json")
            || mime
                .suffix()
                .is_some_and(|suffix| suffix.as_str().eq_ignore_ascii_case("json")))
}

pub fn validate_content_type(headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return Err(ApiError::ContentType(None));
    };

    let content_type = value.to_str().map_err(|_| {
        ApiError::ContentType(Some(String::from_utf8_lossy(value.as_bytes()).into_owned()))
    })?;

    if is_json_media_type(content_type) {
        Ok(())
    } else {
        Err(ApiError::ContentType(Some(content_type.to_string())))
    }
}

pub fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// Takes the `payload` array out of a parsed request body.
pub fn extract_payload(body: Value) -> Result<Vec<Value>, ApiError> {
    let Value::Object(mut fields) = body else {
        return Err(ApiError::payload_shape("request body is not an object"));
    };

    match fields.remove(PAYLOAD_FIELD) {
        Some(Value::Array(entries)) => Ok(entries),
        None | Some(Value::Null) => Err(ApiError::payload_shape("payload field is missing")),
        Some(_) => Err(ApiError::payload_shape("payload field is not an array")),
    }
}

/// Parses a raw body and extracts its payload in one step.
pub fn decode_payload(body: &[u8]) -> Result<Vec<Value>, ApiError> {
    extract_payload(parse_body(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn headers_with(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_is_json_media_type() {
        assert!(is_json_media_type("application/json"));
        assert!(is_json_media_type("application/json; charset=utf-8"));
        assert!(is_json_media_type("Application/JSON"));
        assert!(is_json_media_type("application/vnd.api+json"));
        assert!(!is_json_media_type("text/plain"));
        assert!(!is_json_media_type("text/json"));
        assert!(!is_json_media_type("application/x-www-form-urlencoded"));
        assert!(!is_json_media_type("json"));
        assert!(!is_json_media_type(""));
    }

    #[test]
    fn test_validate_content_type() {
        assert!(validate_content_type(&headers_with("application/json")).is_ok());
        assert!(matches!(
            validate_content_type(&headers_with("text/html")),
            Err(ApiError::ContentType(Some(_)))
        ));
        assert!(matches!(
            validate_content_type(&HeaderMap::new()),
            Err(ApiError::ContentType(None))
        ));
    }

    #[test]
    fn test_parse_body() {
        assert!(parse_body(br#"{"payload": []}"#).is_ok());
        assert!(matches!(
            parse_body(b"{payload:"),
            Err(ApiError::MalformedJson(_))
        ));
        assert!(matches!(parse_body(b""), Err(ApiError::MalformedJson(_))));
    }

    #[test]
    fn test_extract_payload() {
        assert_eq!(extract_payload(json!({ "payload": [] })).unwrap(), Vec::<Value>::new());
        assert_eq!(
            extract_payload(json!({ "payload": [1, {"slug": "a"}], "skip": 0 })).unwrap(),
            vec![json!(1), json!({"slug": "a"})]
        );
    }

    #[test]
    fn test_extract_payload_rejects_bad_shapes() {
        let bodies = [
            json!({}),
            json!({ "payload": null }),
            json!({ "payload": {"slug": "a"} }),
            json!({ "payload": "shows" }),
            json!([{ "payload": [] }]),
            json!(null),
            json!(7),
        ];

        for body in bodies {
            assert!(
                matches!(extract_payload(body.clone()), Err(ApiError::PayloadShape(_))),
                "{body} should be rejected"
            );
        }
    }

    #[test]
    fn test_decode_payload() {
        assert_eq!(decode_payload(br#"{"payload":[true]}"#).unwrap(), vec![json!(true)]);
        assert!(decode_payload(b"null").unwrap_err().is_decode_failure());
    }
}
