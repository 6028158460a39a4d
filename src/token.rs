use std::fmt;

use crate::secret::Secret;

/// Signed token in compact serialization (`header.payload.signature`) together with the secret
/// that signed it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    value: String,
    secret: Secret,
}

impl Token {
    pub(crate) fn new(value: String, secret: Secret) -> Self {
        Token { value, secret }
    }

    /// Compact serialization of the token.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
