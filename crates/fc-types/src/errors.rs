use thiserror::Error;

/// Main error type for the Fulcrum system
#[derive(Error, Debug)]
pub enum FcError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration errors, detected before any search is started
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("No parameters defined in config")]
    NoParameters,

    #[error("No target metrics defined in config")]
    NoTargets,

    #[error("Unknown eval_function '{name}'. Available: {}", .available.join(", "))]
    UnknownEvalFunction { name: String, available: Vec<String> },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Duplicate parameter name: {name}")]
    DuplicateParameter { name: String },

    #[error("Invalid target '{name}': {reason}")]
    InvalidTarget { name: String, reason: String },

    #[error("Invalid search budget: {reason}")]
    InvalidBudget { reason: String },
}

/// Result type alias for Fulcrum operations
pub type FcResult<T> = Result<T, FcError>;

/// Macro for creating invalid-budget configuration errors
#[macro_export]
macro_rules! budget_error {
    ($($arg:tt)*) => {
        $crate::FcError::Config($crate::ConfigError::InvalidBudget {
            reason: format!($($arg)*),
        })
    };
}
