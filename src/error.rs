//! Error types for compiling protocol source and reading compiled artifacts.

use crate::instruction::Command;

/// A broken validation rule, not yet tied to a source line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("pins must be preceded by either ON or OFF")]
    MissingQualifier,
    #[error("REST keyword must be the last argument")]
    RestNotLast,
    #[error("pin {0} has already been given a value")]
    DuplicatePin(String),
    #[error("'{0}' is not a valid pin or value")]
    InvalidPinOrValue(String),
    #[error("all pins must be given a value")]
    IncompleteCheck,
    /// Carries the offending token, which the message leaves out.
    #[error("invalid vin pin")]
    InvalidVinPin(String),
    #[error("invalid ground pin")]
    InvalidGndPin(String),
    #[error("a delay value must be specified")]
    MissingDelay,
    #[error("only 1 delay value can be specified")]
    TooManyDelays,
    #[error("delay time must be a number")]
    DelayNotNumber(String),
    #[error("delay time must be greater than 0")]
    DelayNegative,
    #[error("delay time must be less than 65535")]
    DelayTooLarge,
}

/// The single failure kind of a compilation run. The first one aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CtpError {
    #[error("{command}: {line}: {violation}")]
    Syntax {
        command: Command,
        line: usize,
        violation: Violation,
    },
    #[error("error: {line}: {token} is not a command")]
    UnknownCommand { line: usize, token: String },
    #[error("error: {line}: {message}")]
    Malformed { line: usize, message: String },
}

impl CtpError {
    /// 1-based source line the error originated on.
    pub fn line(&self) -> usize {
        match self {
            CtpError::Syntax { line, .. }
            | CtpError::UnknownCommand { line, .. }
            | CtpError::Malformed { line, .. } => *line,
        }
    }

    /// The rule that failed, for errors raised inside a command encoder.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            CtpError::Syntax { violation, .. } => Some(violation),
            _ => None,
        }
    }
}

/// Errors reading a framed `.tst` artifact back into a program.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing PM1 header")]
    MissingHeader,
    #[error("missing END trailer")]
    MissingTrailer,
    #[error("instruction stream of {0} bytes is not a whole number of instructions")]
    TruncatedInstruction(usize),
    #[error("unknown opcode {opcode:#04x} at byte offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },
}
