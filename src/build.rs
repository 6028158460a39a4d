use thiserror::Error;
use tracing::debug;

use crate::claims::{
    AUDIENCE, ClaimValue, EXPIRATION, Header, ISSUED_AT, ISSUER, JWT_ID, NOT_BEFORE, Payload,
    SUBJECT,
};
use crate::encode::{Encode, EncodeError};
use crate::json::{self, SerializeError};
use crate::secret::Secret;
use crate::token::Token;
use crate::validate::{MIN_SECRET_LENGTH, SPECIAL_CHARACTERS, Validator};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(
        "invalid secret: it must be at least {min} characters long and contain lower and upper case letters, a number and one of the following characters `{special}`",
        min = MIN_SECRET_LENGTH,
        special = SPECIAL_CHARACTERS
    )]
    WeakSecret,
    #[error("expiration timestamp `{0}` has already expired")]
    ExpiredTimestamp(i64),
    #[error("a secret must be set before building the token")]
    MissingSecret,
    #[error("serializing token segment: `{0}`")]
    Serialize(#[from] SerializeError),
    #[error("signing token: `{0}`")]
    Encode(#[from] EncodeError),
}

/// Accumulates the header, claims and secret of a token and assembles the signed result.
///
/// Mutators are chainable. Secret and expiration are validated when set and leave the
/// builder untouched on failure.
#[derive(Debug)]
pub struct Build<V, E> {
    typ: String,
    payload: Payload,
    secret: Option<Secret>,
    validate: V,
    encode: E,
}

impl<V, E> Build<V, E>
where
    V: Validator,
    E: Encode,
{
    /// Creates a builder for tokens of type `typ` (`"JWT"` in most cases).
    pub fn new(typ: impl Into<String>, validate: V, encode: E) -> Self {
        Self {
            typ: typ.into(),
            payload: Payload::default(),
            secret: None,
            validate,
            encode,
        }
    }

    /// Header as it would be emitted now. The algorithm is read from the encoder on every call.
    pub fn header(&self) -> Header {
        Header {
            alg: self.encode.algorithm().to_string(),
            typ: self.typ.clone(),
        }
    }

    /// Snapshot of the current claim set.
    pub fn payload(&self) -> Payload {
        self.payload.clone()
    }

    pub fn set_secret(&mut self, secret: impl AsRef<str>) -> Result<&mut Self, BuildError> {
        let secret = secret.as_ref();
        if !self.validate.secret(secret) {
            debug!("secret rejected by the strength policy");
            return Err(BuildError::WeakSecret);
        }
        self.secret = Some(Secret::from(secret));
        Ok(self)
    }

    /// Sets the `exp` claim. `timestamp` must be in the future at the time of the call.
    pub fn set_expiration(&mut self, timestamp: i64) -> Result<&mut Self, BuildError> {
        if !self.validate.expiration(timestamp) {
            debug!(timestamp, "expiration rejected");
            return Err(BuildError::ExpiredTimestamp(timestamp));
        }
        Ok(self.set_private_claim(EXPIRATION, timestamp))
    }

    pub fn set_issuer(&mut self, issuer: impl Into<String>) -> &mut Self {
        self.set_private_claim(ISSUER, issuer.into())
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.set_private_claim(SUBJECT, subject.into())
    }

    pub fn set_audience(&mut self, audience: impl Into<String>) -> &mut Self {
        self.set_private_claim(AUDIENCE, audience.into())
    }

    pub fn set_issued_at(&mut self, timestamp: i64) -> &mut Self {
        self.set_private_claim(ISSUED_AT, timestamp)
    }

    pub fn set_not_before(&mut self, timestamp: i64) -> &mut Self {
        self.set_private_claim(NOT_BEFORE, timestamp)
    }

    pub fn set_jwt_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.set_private_claim(JWT_ID, id.into())
    }

    /// Sets an arbitrary claim, replacing any previous value under `key` (reserved ones included).
    pub fn set_private_claim(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> &mut Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Serializes, encodes and signs the current state. The builder itself is not modified.
    pub fn build(&self) -> Result<Token, BuildError> {
        let secret = self
            .secret
            .as_ref()
            .filter(|secret| !secret.expose().is_empty())
            .ok_or(BuildError::MissingSecret)?;

        let header = self.header();
        let header_bytes = json::to_bytes(&header)?;
        let payload_bytes = json::to_bytes(&self.payload)?;

        let signature = self
            .encode
            .signature(&header_bytes, &payload_bytes, secret)?;

        let value = format!(
            "{}.{}.{}",
            self.encode.encode(&header_bytes),
            self.encode.encode(&payload_bytes),
            signature
        );

        debug!(
            alg = %header.alg,
            typ = %header.typ,
            claims = self.payload.len(),
            "token built"
        );

        Ok(Token::new(value, secret.clone()))
    }

    /// Drops every claim and the secret. Type and collaborators are kept.
    pub fn reset(&mut self) -> &mut Self {
        self.payload.clear();
        self.secret = None;
        self
    }
}
