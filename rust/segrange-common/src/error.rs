use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    /// The operation would step outside the value space representable by the
    /// operand's bit width.
    pub fn overflow(context: impl Into<String>) -> Error {
        Error(
            ErrorKind::Overflow {
                context: context.into(),
            }
            .into(),
        )
    }

    pub fn incompatible_mask(index: usize) -> Error {
        Error(ErrorKind::IncompatibleMask { index }.into())
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self.kind(), ErrorKind::Overflow { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("value out of range while {context}")]
    Overflow { context: String },

    #[error("mask produces a non-contiguous range for segment {index}")]
    IncompatibleMask { index: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
