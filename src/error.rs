//! Error types for message parsing and validation

use thiserror::Error;

use crate::message::VarType;
use crate::parser::NodeKind;

/// Errors produced while extracting, validating or collecting messages.
///
/// Every error is terminal for the document being processed.
#[derive(Debug, Error)]
pub enum Error {
    /// The collection name is empty
    #[error("message collection name must not be empty")]
    NameInvalid,

    #[error(
        "identifier {identifier:?} must start with an uppercase letter and contain only letters and numbers"
    )]
    IdentifierInvalid { identifier: String },

    /// A placeholder uses a name reserved by the generated code
    #[error("{message:?}'s var {name:?} is a reserved keyword")]
    ReservedKeyword { message: String, name: String },

    #[error(
        "{message:?}'s var {name:?} contains format {format:?}: format only supports 's', 'd' and '[width][.precision]f'"
    )]
    UnsupportedFormat {
        message: String,
        name: String,
        format: String,
    },

    /// The same variable is used with two different types, either inside one
    /// message or across the translations of one identifier
    #[error("variable {name:?} has type {first} and {second}: a variable can only be of one type")]
    VariableTypeMix {
        name: String,
        first: VarType,
        second: VarType,
    },

    #[error("duplicate translation: locale = {locale:?}")]
    DuplicateTranslation { locale: String },

    #[error("duplicate identifier {identifier:?}")]
    DuplicateIdentifier { identifier: String },

    /// The document does not have the expected shape. `location` is a dotted
    /// path such as `Greetings.HelloUser.nl`.
    #[error("invalid message definition at {location}: {cause}")]
    DefinitionInvalid {
        location: String,
        #[source]
        cause: DefinitionError,
    },
}

impl Error {
    pub(crate) fn definition(location: impl Into<String>, cause: impl Into<DefinitionError>) -> Self {
        Error::DefinitionInvalid {
            location: location.into(),
            cause: cause.into(),
        }
    }

    /// Returns the wrapped message error of a `DefinitionInvalid`, if any.
    pub fn inner(&self) -> Option<&Error> {
        match self {
            Error::DefinitionInvalid {
                cause: DefinitionError::Message(inner),
                ..
            } => Some(inner),
            _ => None,
        }
    }
}

/// The underlying cause of an [`Error::DefinitionInvalid`].
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("expected {expected} node, found {found} node")]
    UnexpectedNode { expected: NodeKind, found: NodeKind },

    #[error("expected default message")]
    MissingDefault,

    #[error("default message is defined more than once")]
    DuplicateDefault,

    #[error(transparent)]
    Message(Box<Error>),
}

impl From<Error> for DefinitionError {
    fn from(err: Error) -> Self {
        DefinitionError::Message(Box::new(err))
    }
}

/// Result type for message operations
pub type Result<T> = std::result::Result<T, Error>;
