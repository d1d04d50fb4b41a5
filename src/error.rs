#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Error reading session policy file {path:?}: {source}")]
    PolicyFileReadError {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error assuming role: {0}")]
    RoleAssumptionError(String),

    #[error("Invalid or expired credentials: {0}")]
    InvalidCredentialsError(String),

    #[error("Error getting signin token: {0}")]
    TokenExchangeError(String),
}

impl Error {
    /// Short machine-friendly label, used as a structured logging field
    pub fn kind(&self) -> &'static str {
        match *self {
            Self::Unknown(_) => "unknown",
            Self::ConfigError(_) => "config",
            Self::InvalidArgument(_) => "invalid-argument",
            Self::PolicyFileReadError { .. } => "policy-file-read",
            Self::RoleAssumptionError(_) => "role-assumption",
            Self::InvalidCredentialsError(_) => "invalid-credentials",
            Self::TokenExchangeError(_) => "token-exchange",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
