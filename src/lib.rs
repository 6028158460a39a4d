pub mod build;
pub mod claims;
pub mod commands;
pub mod encode;
pub mod json;
pub mod parameters;
pub mod secret;
pub mod token;
pub mod validate;

pub use build::{Build, BuildError};
pub use claims::{ClaimValue, Header, Payload};
pub use encode::{Encode, EncodeError, hmac::HmacAlgorithm, hmac::HmacEncoder};
pub use secret::Secret;
pub use token::Token;
pub use validate::{Validate, Validator};
