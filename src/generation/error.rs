use reqwest::StatusCode;

/// Failures talking to the generation service.
///
/// These never reach the chat; the dialog engine logs them and substitutes
/// a fixed apology message.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("request to generation service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation service returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("generation service returned no usable candidate")]
    EmptyResponse,
}
