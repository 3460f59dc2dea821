//! Compile YAML message definitions into typed localization code
//!
//! A message file maps identifiers to a default message and its translations.
//! Messages reference variables with typed placeholders (`%(user)s`,
//! `%(count)d`, `%(total).2f`); every translation of a message must agree on
//! the type of each variable, so the generated code can expose one typed
//! function per identifier.
//!
//! ```
//! use msggen::{VarType, parse};
//!
//! let messages = parse(
//!     "greetings",
//!     "HelloUser:\n  default: Hello, %(user)s!\n  nl: Hallo, %(user)s!\n",
//! )?;
//!
//! let hello = &messages.messages()[0];
//! assert_eq!(messages.name, "Greetings");
//! assert_eq!(hello.identifier(), "HelloUser");
//! assert_eq!(hello.default_message().text, "Hello, %s!");
//! assert_eq!(hello.unique_vars()[0].var_type, VarType::String);
//! assert_eq!(hello.translations()[0].locale, "nl");
//! # Ok::<(), msggen::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod localized;
pub mod message;
pub mod messages;
pub mod parser;
pub mod placeholder;
pub mod writer;

#[cfg(test)]
mod integration_tests;

// Re-export the model and entry points for convenient access
pub use config::{ConfigError, GenerateConfig, OutputFormat};
pub use error::{DefinitionError, Error, Result};
pub use generator::{GenerateError, generate, load_messages_from_file};
pub use localized::{LocalizedMessage, Translation};
pub use message::{Message, Var, VarType};
pub use messages::Messages;
pub use parser::{parse, parse_reader};
pub use placeholder::parse_message;
