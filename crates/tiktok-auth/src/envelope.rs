//! Provider response envelopes
//!
//! TikTok nests every payload under `data`. Missing fields decode to their
//! zero value, so a body that carries none of the expected fields decodes
//! to an all-empty envelope (the "sentinel") instead of failing. Explicit
//! `null`s are read the same way as missing fields.

use serde::{Deserialize, Deserializer};

/// Treat a JSON `null` as the field's zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Success shape for both code exchange and refresh.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub data: TokenData,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenData {
    #[serde(deserialize_with = "null_as_default")]
    pub open_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub scope: String,
    #[serde(deserialize_with = "null_as_default")]
    pub access_token: String,
    /// Seconds until the access token expires
    #[serde(deserialize_with = "null_as_default")]
    pub expires_in: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub refresh_token: String,
    /// Seconds until the refresh token expires
    #[serde(deserialize_with = "null_as_default")]
    pub refresh_expires_in: i64,
}

/// Success shape for the user info call.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserInfoEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub data: UserInfoData,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserInfoData {
    #[serde(deserialize_with = "null_as_default")]
    pub open_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub union_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar: String,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar_larger: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
}

/// Error shape shared by every endpoint.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ErrorEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub data: ErrorData,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ErrorData {
    #[serde(deserialize_with = "null_as_default")]
    pub captcha: String,
    #[serde(deserialize_with = "null_as_default")]
    pub desc_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error_code: i64,
}

/// Success envelope that may decode to the all-zero sentinel.
pub(crate) trait SuccessEnvelope: for<'de> Deserialize<'de> + Default + PartialEq {
    /// True when every field holds its zero value.
    fn is_sentinel(&self) -> bool {
        *self == Self::default()
    }
}

impl SuccessEnvelope for TokenEnvelope {}
impl SuccessEnvelope for UserInfoEnvelope {}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS_TOKEN: &str = r#"{"data":{"open_id":"test-open-id","scope":"test-scope-1,test-scope-2","access_token":"test-access-token","expires_in":86400,"refresh_token":"test-refresh-token","refresh_expires_in":31536000}}"#;

    #[test]
    fn token_envelope_deserializes() {
        let env: TokenEnvelope = serde_json::from_str(SUCCESS_TOKEN).unwrap();
        assert_eq!(env.data.open_id, "test-open-id");
        assert_eq!(env.data.access_token, "test-access-token");
        assert_eq!(env.data.expires_in, 86400);
        assert_eq!(env.data.refresh_expires_in, 31536000);
        assert!(!env.is_sentinel());
    }

    #[test]
    fn error_body_decodes_as_token_sentinel() {
        let body = r#"{"data":{"captcha":"","desc_url":"","description":"Request error","error_code":1000},"message":""}"#;
        let env: TokenEnvelope = serde_json::from_str(body).unwrap();
        assert!(env.is_sentinel());

        let user: UserInfoEnvelope = serde_json::from_str(body).unwrap();
        assert!(user.is_sentinel());
    }

    #[test]
    fn missing_data_key_is_sentinel() {
        let env: TokenEnvelope = serde_json::from_str("{}").unwrap();
        assert!(env.is_sentinel());
    }

    #[test]
    fn partially_filled_envelope_is_not_sentinel() {
        let env: TokenEnvelope =
            serde_json::from_str(r#"{"data":{"refresh_expires_in":1}}"#).unwrap();
        assert!(!env.is_sentinel());
    }

    #[test]
    fn nulls_decode_as_zero_values() {
        let body = r#"{"data":{"captcha":null,"desc_url":null,"description":"Request error","error_code":1000},"message":null}"#;
        let env: ErrorEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(env.data.description, "Request error");
        assert_eq!(env.data.error_code, 1000);
        assert!(env.data.captcha.is_empty());
        assert!(env.message.is_empty());

        let token: TokenEnvelope = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(token.is_sentinel());

        let user: UserInfoEnvelope =
            serde_json::from_str(r#"{"data":{"open_id":"o","union_id":null,"avatar":null}}"#)
                .unwrap();
        assert_eq!(user.data.open_id, "o");
        assert!(user.data.union_id.is_empty());
    }

    #[test]
    fn error_envelope_deserializes() {
        let body = r#"{"data":{"captcha":"c","desc_url":"https://d","description":"Request error","error_code":1000},"message":"error"}"#;
        let env: ErrorEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(env.data.description, "Request error");
        assert_eq!(env.data.error_code, 1000);
        assert_eq!(env.data.captcha, "c");
        assert_eq!(env.data.desc_url, "https://d");
        assert_eq!(env.message, "error");
    }
}
