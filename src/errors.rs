use reqwest::StatusCode;
use thiserror::Error;

use crate::widget::ControlId;

#[derive(Debug, Error)]
pub enum CartApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Api(#[from] CartApiError),

    #[error("no order has been created yet")]
    NoOrder,

    #[error("control {0:?} does not exist")]
    UnknownControl(ControlId),

    #[error("control {0:?} does not place orders")]
    NotAnOrderTrigger(ControlId),
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("session with id {0} does not exist")]
    SessionNotFound(String),

    #[error("control {0} does not exist")]
    UnknownControlName(String),

    #[error("session store failed: {0}")]
    Session(String),

    #[error(transparent)]
    Widget(#[from] WidgetError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not valid: {reason}")]
    Invalid { name: &'static str, reason: String },
}
