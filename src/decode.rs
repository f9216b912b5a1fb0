//! Response decoders shared by every endpoint.
//!
//! Each endpoint picks one of these to turn a [`Response`] into its return
//! value. The decoders run inside the retry loop, so a decode error is retried
//! the same way as a transport error unless the policy says otherwise.

use reqwest::{header::CONTENT_TYPE, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::result::Result;

/// Parses the body into `T`. Any mismatch is an error.
pub(crate) async fn strict<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Like [`strict`], but an empty body or a falsy JSON value yields `None`.
pub(crate) async fn nullable<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
    let bytes = response.bytes().await?;
    nullable_from_slice(&bytes)
}

/// Yields `None` when the reply is not JSON at all.
///
/// A JSON body that does not fit `T` is still an error.
pub(crate) async fn tolerant<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|x| x.to_str().ok())
        .map(ToString::to_string);
    let bytes = response.bytes().await?;
    tolerant_from_slice(content_type.as_deref(), &bytes)
}

/// Reads the body as text. See [`unquote`].
pub(crate) async fn text(response: Response) -> Result<Option<String>> {
    Ok(unquote(&response.text().await?))
}

/// Drops the body unread.
pub(crate) async fn discard(_response: Response) -> Result<()> {
    Ok(())
}

pub(crate) fn nullable_from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(bytes)?;
    from_truthy(value)
}

pub(crate) fn tolerant_from_slice<T: DeserializeOwned>(
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<Option<T>> {
    if !content_type.map_or(false, |ct| ct.contains("json")) {
        log::debug!("reply is not json: {:?}", content_type);
        return Ok(None);
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => from_truthy(value),
        Err(e) => {
            log::debug!("reply body is not json: {}", e);
            Ok(None)
        }
    }
}

/// The service returns quoted scalars from its text endpoints.
///
/// `null` means unset. Otherwise every `"` is removed, including embedded ones.
pub(crate) fn unquote(raw: &str) -> Option<String> {
    if raw == "null" {
        None
    } else {
        Some(raw.replace('"', ""))
    }
}

fn from_truthy<T: DeserializeOwned>(value: Value) -> Result<Option<T>> {
    if is_falsy(&value) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::proxy::Proxy;

    const PROXY: &str =
        r#"{"id":"p1","host":"1.2.3.4","port":3128,"username":"u","password":"pw"}"#;

    #[test]
    fn nullable_null_and_empty_are_absent() {
        assert!(nullable_from_slice::<Proxy>(b"null").unwrap().is_none());
        assert!(nullable_from_slice::<Proxy>(b"").unwrap().is_none());
        assert!(nullable_from_slice::<Proxy>(b"{}").unwrap().is_none());
        assert!(nullable_from_slice::<Proxy>(b" \n").unwrap().is_none());
    }

    #[test]
    fn nullable_populated_body_decodes() {
        let proxy = nullable_from_slice::<Proxy>(PROXY.as_bytes())
            .unwrap()
            .unwrap();
        assert_eq!(proxy.id(), "p1");
        assert_eq!(proxy.port(), 3128);
    }

    #[test]
    fn nullable_rejects_wrong_shape() {
        let err = nullable_from_slice::<Proxy>(br#"{"id":"p1"}"#).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn tolerant_ignores_non_json_replies() {
        assert!(tolerant_from_slice::<Proxy>(None, b"").unwrap().is_none());
        assert!(tolerant_from_slice::<Proxy>(Some("text/plain"), PROXY.as_bytes())
            .unwrap()
            .is_none());
        assert!(tolerant_from_slice::<Proxy>(Some("application/json"), b"")
            .unwrap()
            .is_none());
        assert!(tolerant_from_slice::<Proxy>(Some("application/json"), b"<html>")
            .unwrap()
            .is_none());
    }

    #[test]
    fn tolerant_still_rejects_bad_schema() {
        let err =
            tolerant_from_slice::<Proxy>(Some("application/json"), br#"{"host":1}"#).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn tolerant_decodes_json() {
        let proxy = tolerant_from_slice::<Proxy>(
            Some("application/json; charset=utf-8"),
            PROXY.as_bytes(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(proxy.host(), "1.2.3.4");
    }

    #[test]
    fn unquote_text_replies() {
        assert_eq!(unquote("null"), None);
        assert_eq!(unquote(r#""abc""#).as_deref(), Some("abc"));
        assert_eq!(unquote(r#""a\"b""#).as_deref(), Some(r"a\b"));
        assert_eq!(unquote("plain").as_deref(), Some("plain"));
        assert_eq!(unquote(r#""null""#).as_deref(), Some("null"));
    }

    #[test]
    fn falsy_values() {
        assert!(is_falsy(&Value::Bool(false)));
        assert!(is_falsy(&serde_json::json!(0)));
        assert!(is_falsy(&serde_json::json!([])));
        assert!(!is_falsy(&serde_json::json!({"a": 1})));
        assert!(!is_falsy(&serde_json::json!("x")));
    }
}
