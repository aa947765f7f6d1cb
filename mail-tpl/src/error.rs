use std::io;

use thiserror::Error;

/// The global `Result` alias of the library.
pub type Result<T> = std::result::Result<T, Error>;

/// The global `Error` enum of the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot find template {0}")]
    FindTemplateError(String),
    #[error("cannot render template {1}")]
    RenderTemplateError(
        #[source] Box<dyn std::error::Error + Send + Sync + 'static>,
        String,
    ),

    #[error("cannot build message from template: missing recipient")]
    BuildMessageMissingRecipientError,
    #[error("cannot build message from template: missing sender")]
    BuildMessageMissingSenderError,

    #[error("cannot parse email address {1}")]
    ParseEmailAddressError(#[source] email_address::Error, String),

    #[error("cannot write message to vec")]
    WriteMessageToVecError(#[source] io::Error),
    #[error("cannot write message to string")]
    WriteMessageToStringError(#[source] io::Error),
}
