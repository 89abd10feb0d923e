
use serde_json::{json, Value};

use crate::domain::entities::token::ClaimSet;
use crate::services::token::{encode_base64_secret, TokenServiceConfig};

pub(super) const PRIMARY_SECRET: &str = "an-hmac-secret-that-is-at-least-32-bytes";
pub(super) const OTHER_SECRET: &str = "a-different-secret-of-sufficient-length";

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig::new(encode_base64_secret(PRIMARY_SECRET), 30, 420)
}

pub(super) fn claims(value: Value) -> ClaimSet {
    value.as_object().cloned().expect("claims must be a JSON object")
}

pub(super) fn alice_claims() -> ClaimSet {
    claims(json!({"username": "alice", "role": "user"}))
}
