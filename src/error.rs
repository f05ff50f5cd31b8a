use std::io;
use std::path::PathBuf;

use ines::DecodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No Args.")]
    NoArguments,

    #[error("{0}")]
    Usage(#[from] clap::Error),

    #[error("No Filename.")]
    NoFilename,

    #[error("File Does Not Exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        source: io::Error,
    },

    #[error("Decoding Header: {0}")]
    Decode(#[from] DecodeError),

    #[error("Setting Up Log File: {0}")]
    Logging(#[from] tracing_appender::rolling::InitError),
}

impl AppError {
    pub const fn io(context: &'static str, source: io::Error) -> Self {
        Self::Io { context, source }
    }

    /// Process exit status for this failure.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::NoArguments | Self::Usage(_) => 1,
            Self::NoFilename => 2,
            Self::FileNotFound(_) => 3,
            // The device failed, the content was never judged.
            Self::Decode(DecodeError::SourceReadFailure(_))
            | Self::Io { .. }
            | Self::Logging(_) => 5,
            Self::Decode(_) => 4,
        }
    }

    /// Whether the short usage line should follow the message.
    pub const fn wants_usage(&self) -> bool {
        matches!(self, Self::NoArguments | Self::NoFilename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn exit_codes_are_distinct_per_failure() {
        assert_eq!(AppError::NoArguments.exit_code(), 1);
        assert_eq!(AppError::NoFilename.exit_code(), 2);
        assert_eq!(AppError::FileNotFound(PathBuf::from("x.nes")).exit_code(), 3);
        assert_eq!(
            AppError::from(DecodeError::TruncatedInput { observed: 0 }).exit_code(),
            4
        );
        assert_eq!(
            AppError::io("Opening File", io::Error::other("boom")).exit_code(),
            5
        );
    }

    #[test]
    fn read_failure_is_not_a_format_error() {
        let read_failure =
            AppError::from(DecodeError::SourceReadFailure(io::Error::other("eio")));
        assert_eq!(read_failure.exit_code(), 5);

        let bad_magic = AppError::from(DecodeError::InvalidMagic {
            expected: ines::MAGIC,
            found: *b"GIF8",
        });
        assert_eq!(bad_magic.exit_code(), 4);
    }

    #[test]
    fn messages() {
        assert_eq!(
            AppError::FileNotFound(PathBuf::from("zelda.nes")).to_string(),
            "File Does Not Exist: zelda.nes"
        );
        assert_eq!(
            AppError::io("Opening File", io::Error::other("boom")).to_string(),
            "Opening File: boom"
        );
        assert_eq!(
            AppError::from(DecodeError::TruncatedInput { observed: 7 }).to_string(),
            "Decoding Header: truncated header: expected 16 bytes but only 7 were available"
        );
    }
}
