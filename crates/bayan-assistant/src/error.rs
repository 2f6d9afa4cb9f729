use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("completion request failed: {0}")]
    Transport(String),

    #[error("completion endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("completion endpoint returned an empty reply")]
    EmptyReply,

    #[error("client config error: {0}")]
    Config(String),
}
