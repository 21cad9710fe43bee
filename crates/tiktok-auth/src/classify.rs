//! Success-or-error decision for provider responses
//!
//! TikTok answers errors with HTTP 200 and a different JSON shape, so a
//! response cannot be judged by status alone. The rule is:
//! decode the expected success envelope, and only when every field came
//! back empty reinterpret the same bytes as an [`ErrorEnvelope`].
//!
//! This conflates an error body with a well-formed but completely empty
//! success body. A non-2xx status skips the heuristic and classifies the
//! body directly.

use reqwest::StatusCode;
use tracing::warn;

use crate::envelope::{ErrorEnvelope, SuccessEnvelope};
use crate::error::ErrorKind;

/// Decode `body` as an error envelope.
///
/// Yields [`ErrorKind::Provider`] formatted as `"<description> [<error_code>]"`,
/// or [`ErrorKind::Decode`] when the body is not valid JSON.
pub fn classify_error(body: &[u8]) -> ErrorKind {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(env) => {
            warn!(
                error_code = env.data.error_code,
                description = %env.data.description,
                "provider returned error envelope"
            );
            ErrorKind::Provider {
                description: env.data.description,
                code: env.data.error_code,
                message: env.message,
                captcha: env.data.captcha,
                desc_url: env.data.desc_url,
            }
        }
        Err(e) => ErrorKind::Decode(e),
    }
}

/// Decode a success envelope, falling back to [`classify_error`] for
/// non-2xx responses and for the all-zero sentinel.
pub(crate) fn decode_or_classify<T: SuccessEnvelope>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, ErrorKind> {
    if !status.is_success() {
        return Err(classify_error(body));
    }

    let envelope: T = serde_json::from_slice(body)?;
    if envelope.is_sentinel() {
        return Err(classify_error(body));
    }

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{TokenEnvelope, UserInfoEnvelope};

    const ERROR_BODY: &[u8] = br#"{"data":{"captcha":"","desc_url":"","description":"Request error","error_code":1000},"message":""}"#;

    #[test]
    fn classify_formats_description_and_code() {
        let kind = classify_error(ERROR_BODY);
        assert_eq!(kind.to_string(), "Request error [1000]");
        assert!(matches!(kind, ErrorKind::Provider { code: 1000, .. }));
    }

    #[test]
    fn classify_surfaces_decode_failure() {
        let kind = classify_error(b"<html>bad gateway</html>");
        assert!(matches!(kind, ErrorKind::Decode(_)), "got {kind:?}");
    }

    #[test]
    fn sentinel_success_falls_back_to_error_envelope() {
        let err = decode_or_classify::<TokenEnvelope>(StatusCode::OK, ERROR_BODY).unwrap_err();
        assert_eq!(err.to_string(), "Request error [1000]");
    }

    #[test]
    fn empty_data_object_is_classified_not_accepted() {
        // A syntactically valid but entirely empty success body is read as
        // an error envelope with no description.
        let err = decode_or_classify::<UserInfoEnvelope>(StatusCode::OK, br#"{"data":{}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ErrorKind::Provider { ref description, code: 0, .. } if description.is_empty()
        ));
        assert_eq!(err.to_string(), " [0]");
    }

    #[test]
    fn non_success_status_classifies_without_heuristic() {
        // Body has token fields, yet the status alone marks it as an error.
        let body = br#"{"data":{"access_token":"x","description":"Bad request","error_code":10002}}"#;
        let err = decode_or_classify::<TokenEnvelope>(StatusCode::BAD_REQUEST, body).unwrap_err();
        assert_eq!(err.to_string(), "Bad request [10002]");
    }

    #[test]
    fn malformed_success_body_is_decode_error() {
        let err = decode_or_classify::<TokenEnvelope>(StatusCode::OK, b"{not json").unwrap_err();
        assert!(matches!(err, ErrorKind::Decode(_)));
    }

    #[test]
    fn populated_envelope_is_returned() {
        let body = br#"{"data":{"open_id":"o","access_token":"t","expires_in":60}}"#;
        let env = decode_or_classify::<TokenEnvelope>(StatusCode::OK, body).unwrap();
        assert_eq!(env.data.access_token, "t");
        assert_eq!(env.data.expires_in, 60);
    }
}
