use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::build::{Build, BuildError};
use crate::claims::{ClaimValue, Header, Payload};
use crate::encode::Encode;
use crate::encode::hmac::{HmacAlgorithm, HmacEncoder};
use crate::secret::Secret;
use crate::validate::clock::FixedClock;
use crate::validate::{Validate, Validator};

#[derive(Error, Debug)]
pub enum BuildTokenError {
    #[error("building token: `{0}`")]
    BuildError(#[from] BuildError),
}

/// Everything needed to build a token, as gathered from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRequest {
    pub secret: Secret,
    pub issuer: Option<String>,
    pub subject: Option<String>,
    pub audience: Option<String>,
    pub expiration: Option<i64>,
    pub issued_at: Option<i64>,
    pub not_before: Option<i64>,
    pub jwt_id: Option<String>,
    /// Private claims, applied last and in order.
    pub claims: Vec<(String, ClaimValue)>,
}

/// Printable result of the command. The secret is deliberately left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenOutput {
    pub token: String,
    pub header: Header,
    pub payload: Payload,
}

pub struct BuildTokenCommand<V, E>
where
    V: Validator,
    E: Encode,
{
    build: Build<V, E>,
}

impl BuildTokenCommand<Validate<FixedClock>, HmacEncoder> {
    /// Command whose expiration checks use `now`, the same instant relative claims
    /// (`--expires-in`, `--issued-now`) were computed from.
    pub fn at(now: DateTime<Utc>, typ: impl Into<String>, algorithm: HmacAlgorithm) -> Self {
        Self::new(Build::new(
            typ,
            Validate::with_clock(FixedClock::new(now)),
            HmacEncoder::new(algorithm),
        ))
    }
}

impl<V, E> BuildTokenCommand<V, E>
where
    V: Validator,
    E: Encode,
{
    pub fn new(build: Build<V, E>) -> Self {
        Self { build }
    }

    pub fn build_token(&mut self, request: TokenRequest) -> Result<TokenOutput, BuildTokenError> {
        let build = self.build.reset();

        build.set_secret(request.secret.expose())?;
        if let Some(expiration) = request.expiration {
            build.set_expiration(expiration)?;
        }
        if let Some(issuer) = request.issuer {
            build.set_issuer(issuer);
        }
        if let Some(subject) = request.subject {
            build.set_subject(subject);
        }
        if let Some(audience) = request.audience {
            build.set_audience(audience);
        }
        if let Some(issued_at) = request.issued_at {
            build.set_issued_at(issued_at);
        }
        if let Some(not_before) = request.not_before {
            build.set_not_before(not_before);
        }
        if let Some(jwt_id) = request.jwt_id {
            build.set_jwt_id(jwt_id);
        }
        for (key, value) in request.claims {
            build.set_private_claim(key, value);
        }

        let token = build.build()?;

        Ok(TokenOutput {
            token: token.value().to_string(),
            header: build.header(),
            payload: build.payload(),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::DateTime;
    use serde_json::json;

    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn command(algorithm: HmacAlgorithm) -> BuildTokenCommand<Validate<FixedClock>, HmacEncoder> {
        BuildTokenCommand::at(DateTime::from_timestamp(NOW, 0).unwrap(), "JWT", algorithm)
    }

    fn request() -> TokenRequest {
        TokenRequest {
            secret: Secret::from("Sup3rSecret!@#"),
            issuer: None,
            subject: None,
            audience: None,
            expiration: None,
            issued_at: None,
            not_before: None,
            jwt_id: None,
            claims: Vec::new(),
        }
    }

    #[test]
    fn build_token_with_every_claim() {
        let request = TokenRequest {
            issuer: Some("issuer.example".into()),
            subject: Some("user-42".into()),
            audience: Some("https://api.example".into()),
            expiration: Some(NOW + 60),
            issued_at: Some(NOW),
            not_before: Some(NOW),
            jwt_id: Some("f3b0c442".into()),
            claims: vec![("admin".into(), json!(true))],
            ..request()
        };

        let output = command(HmacAlgorithm::HS384).build_token(request).unwrap();

        assert_eq!(output.header.alg, "HS384");
        assert_eq!(output.header.typ, "JWT");
        assert_eq!(
            serde_json::to_value(&output.payload).unwrap(),
            json!({
                "exp": NOW + 60,
                "iss": "issuer.example",
                "sub": "user-42",
                "aud": "https://api.example",
                "iat": NOW,
                "nbf": NOW,
                "jti": "f3b0c442",
                "admin": true
            })
        );
        assert_eq!(output.token.split('.').count(), 3);
    }

    #[test]
    fn private_claims_are_applied_last() {
        let request = TokenRequest {
            issuer: Some("original".into()),
            claims: vec![("iss".into(), json!("override"))],
            ..request()
        };

        let output = command(HmacAlgorithm::HS256).build_token(request).unwrap();
        assert_eq!(output.payload.get("iss"), Some(&json!("override")));
    }

    #[test]
    fn command_does_not_leak_previous_claims() {
        let mut command = command(HmacAlgorithm::HS256);
        let first = TokenRequest {
            subject: Some("user-42".into()),
            ..request()
        };
        command.build_token(first).unwrap();

        let output = command.build_token(request()).unwrap();
        assert!(output.payload.is_empty());
    }

    #[test]
    fn output_never_contains_the_secret() {
        let output = command(HmacAlgorithm::HS256)
            .build_token(request())
            .unwrap();
        let serialized = serde_json::to_string(&output).unwrap();
        assert!(!serialized.contains("Sup3rSecret!@#"));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&serialized).unwrap()["header"],
            json!({"alg": "HS256", "typ": "JWT"})
        );
    }

    #[test]
    fn weak_secret_fails() {
        let request = TokenRequest {
            secret: Secret::from("weak"),
            ..request()
        };
        let err = command(HmacAlgorithm::HS256)
            .build_token(request)
            .unwrap_err();
        assert_matches!(err, BuildTokenError::BuildError(BuildError::WeakSecret));
    }

    #[test]
    fn expired_timestamp_fails() {
        let request = TokenRequest {
            expiration: Some(NOW),
            ..request()
        };
        let err = command(HmacAlgorithm::HS256)
            .build_token(request)
            .unwrap_err();
        assert_matches!(
            err,
            BuildTokenError::BuildError(BuildError::ExpiredTimestamp(NOW))
        );
    }

    #[test]
    fn expiration_one_second_ahead_of_request_time_is_accepted() {
        // relative expiration computed from the same instant the command validates against
        let now = DateTime::from_timestamp(NOW, 999_999_999).unwrap();
        let request = TokenRequest {
            expiration: Some(now.timestamp() + 1),
            ..request()
        };

        let output = BuildTokenCommand::at(now, "JWT", HmacAlgorithm::HS256)
            .build_token(request)
            .unwrap();
        assert_eq!(output.payload.get("exp"), Some(&json!(NOW + 1)));
    }
}
