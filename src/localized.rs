//! Localized messages: a default message plus its translations, kept
//! type-consistent across every locale.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::message::{Message, Var, VarType};

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("identifier pattern is valid"));

pub fn is_valid_identifier(identifier: &str) -> bool {
    IDENTIFIER_RE.is_match(identifier)
}

/// A message translated for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub locale: String,
    pub message: Message,
}

/// A default message and its translations, stored by identifier.
///
/// A variable name has the same type in the default message and in every
/// translation, and each locale is translated at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedMessage {
    identifier: String,
    default: Message,
    translations: Vec<Translation>,
}

impl LocalizedMessage {
    /// # Errors
    /// [`Error::IdentifierInvalid`] unless `identifier` matches `^[A-Z][a-zA-Z0-9]*$`.
    pub fn new(identifier: &str, default: Message) -> Result<Self> {
        if !is_valid_identifier(identifier) {
            return Err(Error::IdentifierInvalid {
                identifier: identifier.to_string(),
            });
        }

        Ok(LocalizedMessage {
            identifier: identifier.to_string(),
            default,
            translations: Vec::new(),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn default_message(&self) -> &Message {
        &self.default
    }

    /// Translations in the order they were added.
    pub fn translations(&self) -> &[Translation] {
        &self.translations
    }

    pub fn translation(&self, locale: &str) -> Option<&Translation> {
        self.translations.iter().find(|tr| tr.locale == locale)
    }

    /// Add a translation for `locale`.
    ///
    /// The message is checked against the default and then against each
    /// existing translation in turn. A translation is compared for types before
    /// its locale, so re-adding a locale with conflicting types reports
    /// [`Error::VariableTypeMix`] rather than [`Error::DuplicateTranslation`].
    pub fn add_translation(&mut self, locale: &str, message: Message) -> Result<()> {
        var_types_consistent(&self.default, &message)?;

        for tr in &self.translations {
            var_types_consistent(&tr.message, &message)?;

            if tr.locale == locale {
                return Err(Error::DuplicateTranslation {
                    locale: locale.to_string(),
                });
            }
        }

        tracing::trace!(identifier = %self.identifier, locale, "added translation");
        self.translations.push(Translation {
            locale: locale.to_string(),
            message,
        });

        Ok(())
    }

    /// Unique variables of the default message followed by those only found in
    /// translations, in order of first appearance.
    pub fn unique_vars(&self) -> Vec<&Var> {
        let mut vars = self.default.unique_vars();

        for tr in &self.translations {
            for var in tr.message.unique_vars() {
                if !vars.iter().any(|u| u.name == var.name) {
                    vars.push(var);
                }
            }
        }

        vars
    }

    pub fn has_type(&self, var_type: VarType) -> bool {
        self.default.has_type(var_type)
            || self
                .translations
                .iter()
                .any(|tr| tr.message.has_type(var_type))
    }

    pub fn has_translations(&self) -> bool {
        !self.translations.is_empty()
    }
}

/// Every variable shared by `comp` and `target` must have the same type.
fn var_types_consistent(comp: &Message, target: &Message) -> Result<()> {
    for comp_var in &comp.vars {
        for target_var in &target.vars {
            if comp_var.name == target_var.name && comp_var.var_type != target_var.var_type {
                return Err(Error::VariableTypeMix {
                    name: comp_var.name.clone(),
                    first: comp_var.var_type,
                    second: target_var.var_type,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::placeholder::parse_message;

    fn localized(identifier: &str, default: &str) -> LocalizedMessage {
        LocalizedMessage::new(identifier, parse_message(default).unwrap()).unwrap()
    }

    #[rstest]
    #[case("")]
    #[case("foo")]
    #[case("fooBar")]
    #[case("Foo_Bar")]
    #[case("Foo Bar")]
    #[case("1Foo")]
    #[case("Föo")]
    fn test_invalid_identifier(#[case] identifier: &str) {
        let err = LocalizedMessage::new(identifier, Message::default()).unwrap_err();
        assert!(matches!(err, Error::IdentifierInvalid { .. }));
    }

    #[rstest]
    #[case("Foo")]
    #[case("F")]
    #[case("HelloWorld")]
    #[case("Error404")]
    #[case("ALLCAPS")]
    fn test_valid_identifier(#[case] identifier: &str) {
        let msg = LocalizedMessage::new(identifier, Message::default()).unwrap();
        assert_eq!(msg.identifier(), identifier);
        assert!(msg.translations().is_empty());
        assert!(!msg.has_translations());
    }

    #[test]
    fn test_invalid_vars_between_default_and_translation() {
        let mut msg = localized("Foo", "Hello, %(user)s!");

        let err = msg
            .add_translation("en", parse_message("Hello, %(user)d!").unwrap())
            .unwrap_err();

        match err {
            Error::VariableTypeMix {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "user");
                assert_eq!(first, VarType::String);
                assert_eq!(second, VarType::Int);
            }
            other => panic!("expected variable type mix, got {:?}", other),
        }
        assert!(msg.translations().is_empty());
    }

    #[test]
    fn test_invalid_vars_between_two_translations() {
        let mut msg = localized("Foo", "Hello, world!");

        msg.add_translation("nl", parse_message("Hallo, %(user)d!").unwrap())
            .unwrap();

        let err = msg
            .add_translation("de", parse_message("Hallo, %(user)s!").unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::VariableTypeMix { .. }));
        assert_eq!(msg.translations().len(), 1);
    }

    #[test]
    fn test_checks_every_existing_translation() {
        let mut msg = localized("Foo", "Hello!");

        msg.add_translation("nl", parse_message("Hallo!").unwrap())
            .unwrap();
        msg.add_translation("de", parse_message("Hallo %(n).1f!").unwrap())
            .unwrap();

        let err = msg
            .add_translation("fr", parse_message("Bonjour %(n)d!").unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::VariableTypeMix {
                first: VarType::Float,
                second: VarType::Int,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_translations() {
        let mut msg = localized("Foo", "Hello, %(user)s!");
        let tr = parse_message("Hallo, %(user)s!").unwrap();

        msg.add_translation("nl", tr.clone()).unwrap();
        let err = msg.add_translation("nl", tr).unwrap_err();

        assert!(matches!(err, Error::DuplicateTranslation { ref locale } if locale == "nl"));
        assert_eq!(msg.translations().len(), 1);
    }

    #[test]
    fn test_locales_are_case_sensitive() {
        let mut msg = localized("Foo", "Hello");
        msg.add_translation("en-US", parse_message("Hi").unwrap())
            .unwrap();
        msg.add_translation("en-us", parse_message("Hey").unwrap())
            .unwrap();
        assert_eq!(msg.translations().len(), 2);
    }

    #[test]
    fn test_type_mix_reported_before_duplicate_locale() {
        let mut msg = localized("Foo", "Hello");
        msg.add_translation("nl", parse_message("Hallo %(n)d").unwrap())
            .unwrap();

        let err = msg
            .add_translation("nl", parse_message("Hallo %(n)s").unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::VariableTypeMix { .. }));
    }

    #[test]
    fn test_valid_translations() {
        let mut msg = localized("Foo", "Hello, %(user)s!");
        msg.add_translation("nl", parse_message("Hallo, %(user)s!").unwrap())
            .unwrap();
        msg.add_translation("de", parse_message("Hallo!").unwrap())
            .unwrap();

        let locales: Vec<&str> = msg
            .translations()
            .iter()
            .map(|tr| tr.locale.as_str())
            .collect();
        assert_eq!(locales, vec!["nl", "de"]);
        assert_eq!(msg.translation("de").map(|tr| tr.message.text.as_str()), Some("Hallo!"));
        assert!(msg.translation("fr").is_none());
    }

    #[test]
    fn test_unique_vars() {
        let mut msg = localized("Foo", "Hello, %(user)s!");
        msg.add_translation(
            "nl",
            parse_message("Hallo, %(user)s! Er zijn %(count)d nieuwe berichten!").unwrap(),
        )
        .unwrap();
        msg.add_translation(
            "de",
            parse_message("Dein letzter Anmeldeversuch war vor %(tage)d Tagen.").unwrap(),
        )
        .unwrap();

        let unique = msg.unique_vars();
        let names: Vec<&str> = unique.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["user", "count", "tage"]);

        // Stable across calls
        assert_eq!(msg.unique_vars(), unique);
    }

    #[test]
    fn test_has_type_includes_translations() {
        let mut msg = localized("Foo", "Hello");
        assert!(!msg.has_type(VarType::Float));

        msg.add_translation("nl", parse_message("Totaal %(total).2f").unwrap())
            .unwrap();
        assert!(msg.has_type(VarType::Float));
        assert!(!msg.has_type(VarType::Int));
    }
}
