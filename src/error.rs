use std::{io, path::PathBuf, process::ExitCode};

use thiserror::Error;

/// Process exit status. The numeric values are part of the CLI contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success = 0,
    /// Unknown or generic failure, including every usage error.
    Unknown = 1,
    ParamCount = 2,
    /// Reserved.
    NotImplemented = 3,
    ParamFormat = 4,
    System = 5,
    Range = 6,
}
impl Status {
    pub fn code(self) -> u8 {
        self as u8
    }
}
impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}

/// Failure of a command handler.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Wrong number of parameters!")]
    ParamCount { given: usize },

    #[error("Color value '{0}' is not a number!")]
    ParamFormat(String),

    #[error("Color value {0} is out of range 0-255!")]
    Range(String),

    #[error("Error opening file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error writing file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error creating image: {0:#}")]
    Image(anyhow::Error),

    /// Writing to stdout or stderr failed.
    #[error(transparent)]
    Console(#[from] io::Error),
}
impl CommandError {
    pub fn status(&self) -> Status {
        match self {
            Self::ParamCount { .. } => Status::ParamCount,
            Self::ParamFormat(_) => Status::ParamFormat,
            Self::Range(_) => Status::Range,
            Self::Open { .. } | Self::Write { .. } | Self::Console(_) => Status::System,
            Self::Image(_) => Status::Unknown,
        }
    }
}
