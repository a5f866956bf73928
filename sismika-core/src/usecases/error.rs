use crate::{
    repositories,
    util::validate::{EarthquakeInvalidation, IdentityInvalidation},
};
use sismika_entities::{location::PsgcCodeParseError, nonce::NonceParseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid depth")]
    Depth,
    #[error("Invalid magnitude")]
    Magnitude,
    #[error("Missing local intensity")]
    Intensity,
    #[error("No reported magnitude resolves to a moment magnitude")]
    UnresolvableMagnitude,
    #[error("Invalid email address")]
    Email,
    #[error("Invalid subject")]
    Subject,
    #[error("Invalid position")]
    InvalidPosition,
    #[error("Invalid PSGC code")]
    PsgcCode,
    #[error("Invalid station code")]
    StationCode,
    #[error("The user does not exist")]
    UserDoesNotExist,
    #[error("This is not allowed")]
    Forbidden,
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error("The session has expired")]
    SessionExpired,
    #[error("Invalid nonce")]
    InvalidNonce,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<PsgcCodeParseError> for Error {
    fn from(_: PsgcCodeParseError) -> Self {
        Self::PsgcCode
    }
}

impl From<NonceParseError> for Error {
    fn from(_: NonceParseError) -> Self {
        Self::InvalidNonce
    }
}

impl From<EarthquakeInvalidation> for Error {
    fn from(err: EarthquakeInvalidation) -> Self {
        match err {
            EarthquakeInvalidation::Depth => Self::Depth,
            EarthquakeInvalidation::Magnitude => Self::Magnitude,
        }
    }
}

impl From<IdentityInvalidation> for Error {
    fn from(err: IdentityInvalidation) -> Self {
        match err {
            IdentityInvalidation::Subject => Self::Subject,
            IdentityInvalidation::EmailAddress => Self::Email,
        }
    }
}
