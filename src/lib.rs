pub mod api;
pub mod audio;
pub mod backend;
pub mod config;
pub mod preferences;
pub mod rpc;
pub mod sample_call;
pub mod scenario;
pub mod stories;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZammError {
    #[error("Malformed fixture: {0}")]
    MalformedFixture(String),

    #[error("No matching call found for {0}")]
    UnmatchedInvocation(String),

    #[error("{} sample call(s) never consumed: {}", .0.len(), .0.join(", "))]
    UnconsumedFixture(Vec<String>),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid arguments for {command}: {reason}")]
    InvalidArguments { command: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("Audio device error: {0}")]
    AudioDeviceError(String),
}

impl From<std::io::Error> for ZammError {
    fn from(e: std::io::Error) -> Self {
        ZammError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for ZammError {
    fn from(e: serde_json::Error) -> Self {
        ZammError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for ZammError {
    fn from(e: serde_yaml::Error) -> Self {
        ZammError::SerializationError(e.to_string())
    }
}

impl ZammError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Fixture problems abort the running scenario
            ZammError::MalformedFixture(_) => false,
            ZammError::UnmatchedInvocation(_) => false,
            ZammError::UnconsumedFixture(_) => false,
            // A bad call fails on its own; the app keeps running
            ZammError::UnknownCommand(_) => true,
            ZammError::InvalidArguments { .. } => true,
            ZammError::SerializationError(_) => true,
            ZammError::IOError(_) => false,
            ZammError::ConfigError(_) => false,
            ZammError::ChannelError(_) => false,
            // Sounds are optional, the app keeps running silently
            ZammError::AudioDeviceError(_) => true,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            ZammError::MalformedFixture(_)
            | ZammError::UnmatchedInvocation(_)
            | ZammError::UnconsumedFixture(_) => {
                "Sample call playback failed. The scenario cannot continue.".to_string()
            }
            ZammError::UnknownCommand(_) | ZammError::InvalidArguments { .. } => {
                "The backend rejected a request.".to_string()
            }
            ZammError::SerializationError(_) => {
                "Received data in an unexpected format.".to_string()
            }
            ZammError::IOError(_) => "File system error occurred.".to_string(),
            ZammError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            ZammError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            ZammError::AudioDeviceError(_) => {
                "Audio device error. Please check your speakers.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ZammError>;
