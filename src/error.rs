use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::load_shaders::Stage;
use crate::session::SessionState;
use crate::uniform::UniformKind;

/// Line (and column, when the compiler reports one) of a shader diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: u32,
    pub column: Option<u32>,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(f, "{}:{}", self.line, column),
            None => write!(f, "{}", self.line),
        }
    }
}

// Mesa: "0:12(5): error: ...", NVIDIA: "0(12) : error C0000: ...",
// ANGLE/AMD/Apple: "ERROR: 0:12: ...".
static DIAGNOSTIC_FORMATS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"^\s*\d+:(\d+)\((\d+)\)\s*:").expect("valid regex"),
        Regex::new(r"^\s*\d+\((\d+)\)\s*:").expect("valid regex"),
        Regex::new(r"^\s*(?:ERROR|WARNING):\s*\d+:(\d+):").expect("valid regex"),
    ]
});

/// Finds the first source location mentioned in a compiler info log.
pub fn parse_diagnostic_location(log: &str) -> Option<SourceLocation> {
    log.lines().find_map(|line| {
        DIAGNOSTIC_FORMATS.iter().find_map(|format| {
            let captures = format.captures(line)?;
            let line = captures.get(1)?.as_str().parse().ok()?;
            let column = captures.get(2).and_then(|c| c.as_str().parse().ok());
            Some(SourceLocation { line, column })
        })
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    Compile {
        stage: Stage,
        location: Option<SourceLocation>,
        log: String,
    },
    Link {
        log: String,
    },
    UniformArityMismatch {
        name: String,
        declared: UniformKind,
        supplied: usize,
    },
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
    /// A name was used in a frame without ever being passed to `resolve_bindings`.
    UnknownBinding(String),
    InvalidStream(String),
    InvalidDraw(String),
    /// A stream or location table made by a different session.
    ForeignHandle(&'static str),
    /// The driver could not create an object (shader, program, buffer, vertex array).
    Driver(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Compile {
                stage,
                location: Some(location),
                log,
            } => write!(f, "{stage} shader failed to compile at {location}:\n{log}"),
            SessionError::Compile {
                stage,
                location: None,
                log,
            } => write!(f, "{stage} shader failed to compile:\n{log}"),
            SessionError::Link { log } => write!(f, "program failed to link:\n{log}"),
            SessionError::UniformArityMismatch {
                name,
                declared,
                supplied,
            } => write!(
                f,
                "uniform `{name}` is declared as {declared} but {supplied} component(s) were supplied"
            ),
            SessionError::InvalidState { operation, state } => {
                write!(f, "`{operation}` is not valid in state {state:?}")
            }
            SessionError::UnknownBinding(name) => {
                write!(f, "`{name}` was never passed to resolve_bindings")
            }
            SessionError::InvalidStream(reason) => write!(f, "invalid vertex stream: {reason}"),
            SessionError::InvalidDraw(reason) => write!(f, "invalid draw: {reason}"),
            SessionError::ForeignHandle(what) => write!(f, "{what} belongs to another session"),
            SessionError::Driver(message) => write!(f, "driver error: {message}"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Errors that stop the window host before or during its event loop.
#[derive(Debug)]
pub enum HostError {
    Platform(String),
    Io(std::io::Error),
    Session(SessionError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Platform(message) => write!(f, "platform error: {message}"),
            HostError::Io(err) => write!(f, "io error: {err}"),
            HostError::Session(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Platform(_) => None,
            HostError::Io(err) => Some(err),
            HostError::Session(err) => Some(err),
        }
    }
}

impl From<SessionError> for HostError {
    fn from(err: SessionError) -> Self {
        HostError::Session(err)
    }
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        HostError::Io(err)
    }
}

impl From<String> for HostError {
    fn from(message: String) -> Self {
        HostError::Platform(message)
    }
}
