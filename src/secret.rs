use std::fmt;

/// Signing secret owned by a builder and carried along with the tokens it produces.
///
/// The value is only reachable through [`Secret::expose`]; it is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl<S: AsRef<str>> From<S> for Secret {
    fn from(secret: S) -> Self {
        Secret(secret.as_ref().to_string())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret: redacted")
    }
}
