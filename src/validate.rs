use clock::{Clock, SystemClock};

pub mod clock;

/// Minimum amount of characters a secret must have.
pub const MIN_SECRET_LENGTH: usize = 12;
/// A secret must contain at least one of these characters.
pub const SPECIAL_CHARACTERS: &str = "*&!@%^#$";

/// Predicates the builder consults before accepting a secret or an expiration.
///
/// Implementations only answer; the caller decides what a `false` means.
#[cfg_attr(test, mockall::automock)]
pub trait Validator {
    /// Whether `candidate` is strong enough to sign tokens with.
    fn secret(&self, candidate: &str) -> bool;
    /// Whether `timestamp` (seconds since the Unix epoch) is strictly in the future.
    fn expiration(&self, timestamp: i64) -> bool;
}

/// Default validation rules, reading "now" from the injected [`Clock`].
#[derive(Debug, Default, Clone)]
pub struct Validate<C = SystemClock> {
    clock: C,
}

impl Validate {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> Validate<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> Validator for Validate<C> {
    fn secret(&self, candidate: &str) -> bool {
        candidate.chars().count() >= MIN_SECRET_LENGTH
            && candidate.chars().any(|c| c.is_ascii_lowercase())
            && candidate.chars().any(|c| c.is_ascii_uppercase())
            && candidate.chars().any(|c| c.is_ascii_digit())
            && candidate.chars().any(|c| SPECIAL_CHARACTERS.contains(c))
    }

    fn expiration(&self, timestamp: i64) -> bool {
        timestamp > self.clock.now().timestamp()
    }
}
