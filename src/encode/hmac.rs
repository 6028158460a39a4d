use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, EncodingKey};

use crate::secret::Secret;

use super::{Encode, EncodeError};

/// HMAC based signing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HmacAlgorithm {
    #[default]
    HS256,
    HS384,
    HS512,
}

impl HmacAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HmacAlgorithm::HS256 => "HS256",
            HmacAlgorithm::HS384 => "HS384",
            HmacAlgorithm::HS512 => "HS512",
        }
    }
}

impl From<HmacAlgorithm> for Algorithm {
    fn from(value: HmacAlgorithm) -> Self {
        match value {
            HmacAlgorithm::HS256 => Algorithm::HS256,
            HmacAlgorithm::HS384 => Algorithm::HS384,
            HmacAlgorithm::HS512 => Algorithm::HS512,
        }
    }
}

impl fmt::Display for HmacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Signs tokens with a shared secret. HMAC takes no nonce, so signatures are deterministic.
#[derive(Debug, Default, Clone)]
pub struct HmacEncoder {
    algorithm: HmacAlgorithm,
}

impl HmacEncoder {
    pub fn new(algorithm: HmacAlgorithm) -> Self {
        Self { algorithm }
    }
}

impl Encode for HmacEncoder {
    fn algorithm(&self) -> &str {
        self.algorithm.as_str()
    }

    fn encode(&self, bytes: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(bytes)
    }

    fn signature(
        &self,
        header: &[u8],
        payload: &[u8],
        secret: &Secret,
    ) -> Result<String, EncodeError> {
        // JWS signing input: both segments already base64url encoded
        let signing_input = format!("{}.{}", self.encode(header), self.encode(payload));
        let key = EncodingKey::from_secret(secret.expose().as_bytes());
        jsonwebtoken::crypto::sign(signing_input.as_bytes(), &key, self.algorithm.into())
            .map_err(|e| EncodeError::Signature(e.to_string()))
    }
}
