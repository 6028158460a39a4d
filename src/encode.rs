use thiserror::Error;

use crate::secret::Secret;

pub mod hmac;

#[derive(Error, Debug)]
pub enum EncodeError {
    // Generic error for each implementation to use
    #[error("unable to sign token: `{0}`")]
    Signature(String),
}

/// Signing capability consumed by the builder.
pub trait Encode {
    /// Value of the `alg` header.
    fn algorithm(&self) -> &str;
    /// Base64url (RFC 4648 §5, no padding) representation of `bytes`.
    fn encode(&self, bytes: &[u8]) -> String;
    /// Base64url signature over the serialized `header` and `payload`, keyed with `secret`.
    ///
    /// Implementations relying on randomness must document that equal inputs can produce
    /// different signatures.
    fn signature(
        &self,
        header: &[u8],
        payload: &[u8],
        secret: &Secret,
    ) -> Result<String, EncodeError>;
}
