use std::env;
use std::env::VarError;

use chrono::{DateTime, TimeDelta, Utc};
use clap::error::ErrorKind;
use clap::{Args, Error, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::claims::ClaimValue;
use crate::commands::build_token::TokenRequest;
use crate::encode::hmac::HmacAlgorithm;
use crate::secret::Secret;

pub const DEFAULT_TOKEN_TYPE: &str = "JWT";
/// Environment variable read when no `--secret` is given.
pub const SECRET_ENV_NAME: &str = "JWT_SECRET";

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Builds a token with the provided claims and signs it with a shared secret.
    ///
    /// EXAMPLE:
    /// simple-jwt-cli build-token --issuer issuer.example --claim sub=user-42 --expires-in 3600
    BuildToken(BuildTokenArgs),
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum Algorithms {
    #[value(name = "HS256")]
    HS256,
    #[value(name = "HS384")]
    HS384,
    #[value(name = "HS512")]
    HS512,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputTokenFormat {
    /// Returns only the compact token
    #[value(name = "Plain")]
    Plain,
    /// Returns the token together with its header and claims in json format
    #[value(name = "Json")]
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct BuildTokenArgs {
    /// Value of the `typ` header
    #[arg(long = "type", default_value = DEFAULT_TOKEN_TYPE)]
    pub token_type: String,

    /// Signing algorithm
    #[arg(long, value_enum, default_value_t = Algorithms::HS256)]
    pub algorithm: Algorithms,

    /// Secret used to sign the token. Falls back to the JWT_SECRET environment variable.
    #[arg(long)]
    secret: Option<String>,

    /// Issuer of the token (`iss` claim)
    #[arg(long)]
    issuer: Option<String>,

    /// Subject of the token (`sub` claim)
    #[arg(long)]
    subject: Option<String>,

    /// Intended recipient of the token (`aud` claim)
    #[arg(long)]
    audience: Option<String>,

    /// Seconds from now until the token expires (`exp` claim)
    #[arg(long)]
    expires_in: Option<u64>,

    /// Unix timestamp before which the token must not be accepted (`nbf` claim)
    #[arg(long)]
    not_before: Option<i64>,

    /// Set the `iat` claim to the current time
    #[arg(long)]
    issued_now: bool,

    /// Identifier of the token (`jti` claim)
    #[arg(long, conflicts_with = "random_jwt_id")]
    jwt_id: Option<String>,

    /// Generate a random identifier for the token (`jti` claim)
    #[arg(long)]
    random_jwt_id: bool,

    /// Private claim as `key=value`. The value is parsed as json and taken as a plain string
    /// otherwise. Can be repeated.
    #[arg(long = "claim", value_parser = parse_claim)]
    claims: Vec<(String, ClaimValue)>,

    /// Select format how the token should be printed
    #[arg(long, value_enum, default_value_t = OutputTokenFormat::Plain)]
    pub output_token_format: OutputTokenFormat,
}

pub fn create_request_for_token_build(
    args: &BuildTokenArgs,
    now: DateTime<Utc>,
) -> Result<TokenRequest, Error> {
    create_request_with_env(args, now, env::var)
}

fn create_request_with_env<F>(
    args: &BuildTokenArgs,
    now: DateTime<Utc>,
    env_var: F,
) -> Result<TokenRequest, Error>
where
    F: Fn(&'static str) -> Result<String, VarError>,
{
    let secret = select_secret(args.secret.clone(), env_var)?;

    let expiration = args
        .expires_in
        .map(|seconds| expiration_from(now, seconds))
        .transpose()?;

    let jwt_id = if args.random_jwt_id {
        Some(Uuid::now_v7().to_string())
    } else {
        args.jwt_id.clone()
    };

    Ok(TokenRequest {
        secret,
        issuer: args.issuer.clone(),
        subject: args.subject.clone(),
        audience: args.audience.clone(),
        expiration,
        issued_at: args.issued_now.then(|| now.timestamp()),
        not_before: args.not_before,
        jwt_id,
        claims: args.claims.clone(),
    })
}

pub fn select_algorithm(algorithm: &Algorithms) -> HmacAlgorithm {
    match algorithm {
        Algorithms::HS256 => HmacAlgorithm::HS256,
        Algorithms::HS384 => HmacAlgorithm::HS384,
        Algorithms::HS512 => HmacAlgorithm::HS512,
    }
}

fn select_secret<F>(input_secret: Option<String>, env_var: F) -> Result<Secret, Error>
where
    F: Fn(&'static str) -> Result<String, VarError>,
{
    match input_secret {
        Some(secret) => Ok(Secret::from(secret)),
        None => env_var(SECRET_ENV_NAME).map(Secret::from).map_err(|_| {
            Error::raw(
                ErrorKind::MissingRequiredArgument,
                format!("a secret is required: use --secret or set {SECRET_ENV_NAME}\n"),
            )
        }),
    }
}

fn expiration_from(now: DateTime<Utc>, seconds: u64) -> Result<i64, Error> {
    let out_of_range = || {
        Error::raw(
            ErrorKind::InvalidValue,
            format!("expiration of `{seconds}` seconds is out of range\n"),
        )
    };
    let delta = i64::try_from(seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(out_of_range)?;
    now.checked_add_signed(delta)
        .map(|expires_at| expires_at.timestamp())
        .ok_or_else(out_of_range)
}

fn parse_claim(input: &str) -> Result<(String, ClaimValue), String> {
    let (key, raw_value) = input
        .split_once('=')
        .ok_or_else(|| format!("invalid claim `{input}`: expected `key=value`"))?;
    if key.is_empty() {
        return Err(format!("invalid claim `{input}`: empty key"));
    }
    let value = serde_json::from_str(raw_value)
        .unwrap_or_else(|_| ClaimValue::String(raw_value.to_string()));
    Ok((key.to_string(), value))
}
