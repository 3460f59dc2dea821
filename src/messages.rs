use serde::Serialize;

use crate::error::{Error, Result};
use crate::localized::LocalizedMessage;
use crate::message::VarType;

/// All localized messages of one message file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Messages {
    /// The capitalized file name without extension
    pub name: String,
    messages: Vec<LocalizedMessage>,
}

impl Messages {
    pub fn new(name: impl Into<String>) -> Self {
        Messages {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    /// Append a message, keeping insertion order.
    ///
    /// # Errors
    /// [`Error::DuplicateIdentifier`] if a message with the same identifier exists.
    pub fn add(&mut self, message: LocalizedMessage) -> Result<()> {
        if self.get(message.identifier()).is_some() {
            return Err(Error::DuplicateIdentifier {
                identifier: message.identifier().to_string(),
            });
        }

        self.messages.push(message);
        Ok(())
    }

    pub fn get(&self, identifier: &str) -> Option<&LocalizedMessage> {
        self.messages
            .iter()
            .find(|msg| msg.identifier() == identifier)
    }

    pub fn messages(&self) -> &[LocalizedMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether any default message or translation uses a variable of `var_type`.
    pub fn has_type(&self, var_type: VarType) -> bool {
        self.messages.iter().any(|msg| msg.has_type(var_type))
    }

    pub fn has_vars(&self) -> bool {
        [VarType::String, VarType::Int, VarType::Float]
            .into_iter()
            .any(|var_type| self.has_type(var_type))
    }

    pub fn has_translations(&self) -> bool {
        self.messages.iter().any(LocalizedMessage::has_translations)
    }
}

impl<'a> IntoIterator for &'a Messages {
    type Item = &'a LocalizedMessage;
    type IntoIter = std::slice::Iter<'a, LocalizedMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
