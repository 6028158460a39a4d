use serde::Serialize;
use serde_json::Map;

/// Value a claim can hold: string, number, boolean, null, array or nested object.
pub type ClaimValue = serde_json::Value;

/// Expiration time (as UTC timestamp).
pub const EXPIRATION: &str = "exp";
/// Issuer.
pub const ISSUER: &str = "iss";
/// Subject (whom the token refers to).
pub const SUBJECT: &str = "sub";
/// Audience.
pub const AUDIENCE: &str = "aud";
/// Issued at (as UTC timestamp).
pub const ISSUED_AT: &str = "iat";
/// Not before (as UTC timestamp).
pub const NOT_BEFORE: &str = "nbf";
/// JWT ID.
pub const JWT_ID: &str = "jti";

/// JOSE header of a token. Serialized as `{"alg":...,"typ":...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub alg: String,
    pub typ: String,
}

/// Claim set of a token, keeping claims in the order they were first set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Map<String, ClaimValue>);

impl Payload {
    pub fn get(&self, key: &str) -> Option<&ClaimValue> {
        self.0.get(key)
    }

    /// Sets `key` to `value`, replacing any previous value in place.
    pub(crate) fn insert(&mut self, key: String, value: ClaimValue) {
        self.0.insert(key, value);
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
