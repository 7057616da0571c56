use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("missing required environment variable {0}")]
    MissingToken(&'static str),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint unavailable, status {0}")]
    EndpointUnavailable(StatusCode),

    #[error("{what} is not {expected}")]
    WrongType {
        what: &'static str,
        expected: &'static str,
    },

    #[error("no key {0:?} in response")]
    MissingKey(&'static str),

    #[error("response contains no homeworks")]
    NoData,

    #[error("homework has no {0:?}")]
    MissingField(&'static str),

    #[error("homework name is empty")]
    EmptyName,

    #[error("unknown homework status {0:?}")]
    UnknownStatus(String),

    #[error("notification rejected: {0}")]
    NotificationRejected(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
