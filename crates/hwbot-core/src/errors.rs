/// Core error type for the homework bot.
///
/// Adapter crates map their library errors (reqwest, teloxide) into this type so
/// the polling loop can decide per kind what reaches the chat and what is only
/// logged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("undocumented homework review status: \"{0}\"")]
    UnknownStatus(String),

    #[error("delivery error: {0}")]
    Delivery(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Unexpected(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Failures of the upstream API contract: transport, shape or status.
    /// Anything else reaching the polling loop is a program fault.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Schema(_) | Self::UnknownStatus(_)
        )
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Transport { .. } => "transport",
            Self::Schema(_) => "schema",
            Self::UnknownStatus(_) => "unknown_status",
            Self::Delivery(_) => "delivery",
            Self::Io(_) | Self::Json(_) | Self::Unexpected(_) => "unexpected",
        }
    }

    /// Text sent to the chat when a cycle fails.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { .. } => format!("API endpoint is unavailable: {self}"),
            Self::Schema(_) | Self::UnknownStatus(_) => self.to_string(),
            other => format!("Program failure: {other}"),
        }
    }
}

/// Upstream response does not match the documented shape.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("API response must be a JSON object")]
    NotAnObject,

    #[error("API response is missing required keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    #[error("API response has undocumented keys: {}", .0.join(", "))]
    UnexpectedKeys(Vec<String>),

    #[error("API response field 'homeworks' must be a list")]
    HomeworksNotAList,
}
