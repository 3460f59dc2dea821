//! Placeholder extraction
//!
//! Message text references variables with printf-style named placeholders:
//!
//! - `%(name)s` - a string
//! - `%(name)d` - an integer
//! - `%(name)f`, `%(name)9f`, `%(name).2f`, `%(name)9.2f` - a float with optional
//!   width and precision
//!
//! [`parse_message`] replaces each placeholder by its positional form (`%s`,
//! `%d`, `%9.2f`, ...) and records the referenced variables in order.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::message::{Message, Var, VarType};

/// Name of the context parameter every generated function takes.
pub const CONTEXT_PARAM: &str = "ctx";

/// Keywords of the generated Go code.
pub const GO_KEYWORDS: &[&str] = &[
    "break",
    "default",
    "func",
    "interface",
    "select",
    "case",
    "defer",
    "go",
    "map",
    "struct",
    "chan",
    "else",
    "goto",
    "package",
    "switch",
    "const",
    "fallthrough",
    "if",
    "range",
    "type",
    "continue",
    "for",
    "import",
    "return",
    "var",
];

// The format group also matches malformed float specifiers such as `9..f`,
// which are then rejected by `var_type_for_format`.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%\(([a-zA-Z]+)\)([0-9.]*[a-z])").expect("placeholder pattern is valid")
});

static FLOAT_FORMAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*(?:\.[0-9]+)?f$").expect("float pattern is valid"));

/// Whether `word` may not be used as a placeholder name: any Go keyword or the
/// context parameter name, compared case-insensitively.
pub fn is_reserved_keyword(word: &str) -> bool {
    word.eq_ignore_ascii_case(CONTEXT_PARAM)
        || GO_KEYWORDS
            .iter()
            .any(|keyword| keyword.eq_ignore_ascii_case(word))
}

fn var_type_for_format(format: &str) -> Option<VarType> {
    match format {
        "s" => Some(VarType::String),
        "d" => Some(VarType::Int),
        _ if FLOAT_FORMAT_RE.is_match(format) => Some(VarType::Float),
        _ => None,
    }
}

/// Parse raw message text into a [`Message`].
///
/// # Errors
/// - [`Error::ReservedKeyword`] if a placeholder name is reserved
/// - [`Error::UnsupportedFormat`] if a format specifier is not recognized
/// - [`Error::VariableTypeMix`] if a name is used with two different types
pub fn parse_message(raw: &str) -> Result<Message> {
    let mut text = String::with_capacity(raw.len());
    let mut format_text = String::with_capacity(raw.len());
    let mut vars: Vec<Var> = Vec::new();
    let mut last = 0;

    for caps in PLACEHOLDER_RE.captures_iter(raw) {
        let (Some(whole), Some(name), Some(format)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        let name = name.as_str();
        let format = format.as_str();

        if is_reserved_keyword(name) {
            return Err(Error::ReservedKeyword {
                message: raw.to_string(),
                name: name.to_string(),
            });
        }

        let var_type = var_type_for_format(format).ok_or_else(|| Error::UnsupportedFormat {
            message: raw.to_string(),
            name: name.to_string(),
            format: format.to_string(),
        })?;

        if let Some(existing) = vars.iter().find(|v| v.name == name) {
            if existing.var_type != var_type {
                return Err(Error::VariableTypeMix {
                    name: name.to_string(),
                    first: existing.var_type,
                    second: var_type,
                });
            }
        }

        let literal = &raw[last..whole.start()];
        text.push_str(literal);
        text.push('%');
        text.push_str(format);
        format_text.push_str(&literal.replace('%', "%%"));
        format_text.push('%');
        format_text.push_str(format);
        last = whole.end();

        vars.push(Var::new(name, var_type));
    }
    text.push_str(&raw[last..]);
    format_text.push_str(&raw[last..].replace('%', "%%"));

    Ok(Message {
        text,
        format: format_text,
        vars,
    })
}
