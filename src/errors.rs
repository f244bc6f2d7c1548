use std::fmt;
use std::io;

#[derive(Debug)]
pub enum TipsError {
    // File and I/O errors
    FileReadError(String),
    IoError(io::Error),

    // Lexical analysis errors
    UnknownToken {
        token: char,
        line: usize,
    },
    UnterminatedComment {
        line: usize,
    },
    UnterminatedString {
        line: usize,
    },
    MultilineString {
        line: usize,
    },
    InvalidNumber {
        number: String,
        line: usize,
    },

    // Parsing errors
    UnexpectedToken {
        expected: String,
        found: String,
        context: String,
        line: usize,
    },
    ExpectedType {
        found: String,
        line: usize,
    },
    TrailingInput {
        found: String,
        line: usize,
    },

    // Semantic binding errors
    DuplicateDeclaration {
        name: String,
        line: usize,
    },
    // Raised at parse time with a line number; the interpreter's defensive
    // re-check raises it without one.
    UndeclaredIdentifier {
        name: String,
        line: Option<usize>,
    },

    // Run-time errors
    DivisionByZero,
    TypeError {
        message: String,
    },
    InputFormatError {
        name: String,
        expected: String,
    },

    // Generic errors
    GenericError(String),
}

impl TipsError {
    /// Create an unexpected-token error carrying the parse context.
    pub fn unexpected_token(
        expected: impl Into<String>,
        found: impl Into<String>,
        context: impl Into<String>,
        line: usize,
    ) -> Self {
        TipsError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            context: context.into(),
            line,
        }
    }

    /// Create a run-time type error.
    pub fn type_error(message: impl Into<String>) -> Self {
        TipsError::TypeError {
            message: message.into(),
        }
    }
}

impl fmt::Display for TipsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipsError::FileReadError(msg) => write!(f, "File read error: {}", msg),
            TipsError::IoError(err) => write!(f, "I/O error: {}", err),

            TipsError::UnknownToken { token, line } => {
                write!(f, "Unknown token '{}' at line {}", token, line)
            }
            TipsError::UnterminatedComment { line } => {
                write!(f, "Unterminated comment at line {}", line)
            }
            TipsError::UnterminatedString { line } => {
                write!(f, "Unterminated string literal at line {}", line)
            }
            TipsError::MultilineString { line } => {
                write!(f, "Multiline string literals not supported at line {}", line)
            }
            TipsError::InvalidNumber { number, line } => {
                write!(f, "Invalid number '{}' at line {}", number, line)
            }

            TipsError::UnexpectedToken { expected, found, context, line } => {
                write!(
                    f,
                    "Parse error at line {}: expected {} {}, found '{}'",
                    line, expected, context, found
                )
            }
            TipsError::ExpectedType { found, line } => {
                write!(
                    f,
                    "Parse error at line {}: expected type INTEGER or REAL, found '{}'",
                    line, found
                )
            }
            TipsError::TrailingInput { found, line } => {
                write!(
                    f,
                    "Parse error at line {}: trailing input '{}' after complete program",
                    line, found
                )
            }

            TipsError::DuplicateDeclaration { name, line } => {
                write!(f, "Duplicate declaration of '{}' at line {}", name, line)
            }
            TipsError::UndeclaredIdentifier { name, line } => {
                if let Some(l) = line {
                    write!(f, "Undeclared identifier '{}' at line {}", name, l)
                } else {
                    write!(f, "Runtime error: undeclared identifier '{}'", name)
                }
            }

            TipsError::DivisionByZero => {
                write!(f, "Runtime error: division by zero")
            }
            TipsError::TypeError { message } => {
                write!(f, "Runtime error: {}", message)
            }
            TipsError::InputFormatError { name, expected } => {
                write!(f, "Input error: expected {} for '{}'", expected, name)
            }

            TipsError::GenericError(msg) => {
                write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TipsError {}

// Conversion implementations for common error types
impl From<io::Error> for TipsError {
    fn from(err: io::Error) -> Self {
        TipsError::IoError(err)
    }
}

impl From<String> for TipsError {
    fn from(err: String) -> Self {
        TipsError::GenericError(err)
    }
}

impl From<&str> for TipsError {
    fn from(err: &str) -> Self {
        TipsError::GenericError(err.to_string())
    }
}

// Type alias for Result with TipsError
pub type TipsResult<T> = Result<T, TipsError>;
