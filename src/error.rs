use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Missing prerequisite: {what}")]
    Prerequisite { what: String, detail: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },

    #[error("No asset directories found under {path}")]
    NothingToOrganize { path: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for PipelineError {
    fn user_message(&self) -> String {
        match self {
            PipelineError::Prerequisite { what, detail } => {
                format!("Missing prerequisite: {} ({})", what, detail)
            }
            PipelineError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            PipelineError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            PipelineError::Serialization { message } => {
                format!("Failed to write lookup document: {}", message)
            }
            PipelineError::NothingToOrganize { path } => {
                format!("No asset directories found under: {}", path)
            }
            PipelineError::Cancelled => "Operation was cancelled by user".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            PipelineError::Prerequisite { what, .. } if what.contains("Java") => Some(
                "Install a Java runtime (e.g. `brew install openjdk` or your distribution's openjdk package) and make sure `java` is on PATH.".to_string()
            ),
            PipelineError::Prerequisite { what, .. } if what.contains("decompiler") => Some(
                "Download the FFDec decompiler from https://github.com/jindrapetrik/jpexs-decompiler/releases and either place ffdec.jar in a standard location or set `jar_path` in the [tool] config section.".to_string()
            ),
            PipelineError::Prerequisite { .. } => Some(
                "Run `swfpipe check` to see which prerequisites were found and where swfpipe looked.".to_string()
            ),
            PipelineError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present. `swfpipe generate-config` writes a commented sample.".to_string()
            ),
            PipelineError::NothingToOrganize { .. } => Some(
                "Run `swfpipe extract` first; organization consumes the directory tree it produces.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for PipelineError {
    fn from(error: toml::de::Error) -> Self {
        PipelineError::Config {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(error: serde_json::Error) -> Self {
        PipelineError::Serialization {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
