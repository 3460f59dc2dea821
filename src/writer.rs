//! Go code writer
//!
//! Turns a validated [`Messages`] collection into Go source. Each collection
//! becomes a namespace value named after it, with one method per message:
//!
//! ```go
//! var Greetings greetingsMessages
//!
//! func (greetingsMessages) HelloUser(ctx context.Context, user string) string {
//! 	switch GetLocale(ctx) {
//! 	case "nl":
//! 		return fmt.Sprintf("Hallo, %s!", user)
//! 	}
//!
//! 	return fmt.Sprintf("Hello, %s!", user)
//! }
//! ```
//!
//! `GetLocale` and `WrapLocale` live in a separate support file, see
//! [`write_locale_support`].

use std::fmt::{self, Write};

use crate::localized::LocalizedMessage;
use crate::message::{Message, VarType};
use crate::messages::Messages;
use crate::placeholder::CONTEXT_PARAM;

/// File name of the locale support code.
pub const LOCALE_SUPPORT_FILE: &str = "locale.go";

fn go_type(var_type: VarType) -> &'static str {
    match var_type {
        VarType::String => "string",
        VarType::Int => "int",
        VarType::Float => "float64",
    }
}

/// Quote `s` as an interpreted Go string literal.
pub fn go_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_ascii_control() => quoted.push_str(&format!("\\x{:02x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn namespace_type(name: &str) -> String {
    let mut chars = name.chars();
    let first: String = chars.next().map(|c| c.to_lowercase().collect()).unwrap_or_default();
    format!("{}{}Messages", first, chars.as_str())
}

fn write_header<W: Write>(out: &mut W, package: &str) -> fmt::Result {
    writeln!(out, "// Code generated by msggen. DO NOT EDIT.")?;
    writeln!(out)?;
    writeln!(out, "package {}", package)?;
    writeln!(out)
}

/// Write the Go source for `messages` into `out`.
pub fn write_go<W: Write>(out: &mut W, messages: &Messages, package: &str) -> fmt::Result {
    write_header(out, package)?;

    if messages.has_vars() {
        writeln!(out, "import (")?;
        writeln!(out, "\t\"context\"")?;
        writeln!(out, "\t\"fmt\"")?;
        writeln!(out, ")")?;
    } else {
        writeln!(out, "import \"context\"")?;
    }
    writeln!(out)?;

    let receiver = namespace_type(&messages.name);
    writeln!(out, "// {} contains the {} messages.", messages.name, messages.name)?;
    writeln!(out, "var {} {}", messages.name, receiver)?;
    writeln!(out)?;
    writeln!(out, "type {} struct{{}}", receiver)?;

    for localized in messages {
        writeln!(out)?;
        write_localized(out, &receiver, localized)?;
    }

    Ok(())
}

fn write_localized<W: Write>(
    out: &mut W,
    receiver: &str,
    localized: &LocalizedMessage,
) -> fmt::Result {
    let mut params = vec![format!("{} context.Context", CONTEXT_PARAM)];
    params.extend(
        localized
            .unique_vars()
            .iter()
            .map(|var| format!("{} {}", var.name, go_type(var.var_type))),
    );

    writeln!(
        out,
        "// {} returns the {} message for the locale in {}.",
        localized.identifier(),
        localized.identifier(),
        CONTEXT_PARAM
    )?;
    writeln!(
        out,
        "func ({}) {}({}) string {{",
        receiver,
        localized.identifier(),
        params.join(", ")
    )?;

    if localized.has_translations() {
        writeln!(out, "\tswitch GetLocale({}) {{", CONTEXT_PARAM)?;
        for tr in localized.translations() {
            writeln!(out, "\tcase {}:", go_quote(&tr.locale))?;
            writeln!(out, "\t\treturn {}", format_expr(&tr.message))?;
        }
        writeln!(out, "\t}}")?;
        writeln!(out)?;
    }

    writeln!(out, "\treturn {}", format_expr(localized.default_message()))?;
    writeln!(out, "}}")
}

/// The Go expression producing `message`. Arguments follow the message's own
/// placeholder order, so a variable used twice is passed twice. Literal `%`
/// is only doubled inside `fmt.Sprintf`.
fn format_expr(message: &Message) -> String {
    if !message.has_vars() {
        return go_quote(&message.text);
    }

    let args: Vec<&str> = message.vars.iter().map(|v| v.name.as_str()).collect();
    format!("fmt.Sprintf({}, {})", go_quote(&message.format), args.join(", "))
}

/// Write the `WrapLocale`/`GetLocale` helpers the generated messages use to
/// read the locale from the context.
pub fn write_locale_support<W: Write>(out: &mut W, package: &str) -> fmt::Result {
    write_header(out, package)?;
    writeln!(out, "import \"context\"")?;
    writeln!(out)?;
    writeln!(out, "type localeKey struct{{}}")?;
    writeln!(out)?;
    writeln!(out, "// WrapLocale returns a copy of ctx carrying locale.")?;
    writeln!(
        out,
        "func WrapLocale(ctx context.Context, locale string) context.Context {{"
    )?;
    writeln!(out, "\treturn context.WithValue(ctx, localeKey{{}}, locale)")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "// GetLocale returns the locale stored in ctx, or \"\" if there is none.")?;
    writeln!(out, "func GetLocale(ctx context.Context) string {{")?;
    writeln!(out, "\tif locale, ok := ctx.Value(localeKey{{}}).(string); ok {{")?;
    writeln!(out, "\t\treturn locale")?;
    writeln!(out, "\t}}")?;
    writeln!(out)?;
    writeln!(out, "\treturn \"\"")?;
    writeln!(out, "}}")
}

/// Serialize `messages` as pretty-printed JSON for external emitters.
pub fn write_json(messages: &Messages) -> serde_json::Result<String> {
    serde_json::to_string_pretty(messages)
}
