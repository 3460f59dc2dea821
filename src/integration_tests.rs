//! End-to-end tests: YAML documents through parsing, validation and writing

use crate::writer::write_go;
use crate::*;

#[test]
fn test_hello_world() {
    let messages = parse("test", "HelloWorld:\n  default: \"Hello, World!\"\n").unwrap();

    assert_eq!(messages.len(), 1);
    let hello = &messages.messages()[0];
    assert_eq!(hello.identifier(), "HelloWorld");
    assert_eq!(hello.default_message().text, "Hello, World!");
    assert!(hello.unique_vars().is_empty());
    assert!(hello.translations().is_empty());
}

#[test]
fn test_hello_user_with_translation() {
    let messages = parse(
        "test",
        "HelloUser: {default: \"Hello, %(user)s!\", nl: \"Hallo, %(user)s!\"}\n",
    )
    .unwrap();

    let hello = &messages.messages()[0];
    assert_eq!(hello.unique_vars(), vec![&Var::new("user", VarType::String)]);
    assert_eq!(hello.translations().len(), 1);
    assert_eq!(hello.translations()[0].locale, "nl");
    assert_eq!(hello.translations()[0].message.text, "Hallo, %s!");
}

#[test]
fn test_float_total() {
    let messages = parse("test", "Total:\n  default: \"%(total)9.2f\"\n").unwrap();
    assert_eq!(messages.messages()[0].default_message().text, "%9.2f");

    let err = parse("test", "Total:\n  default: \"%(total)9..f\"\n").unwrap_err();
    assert!(matches!(err.inner(), Some(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_duplicate_identifier() {
    let err = parse(
        "test",
        "Greeting:\n  default: Hi\nFarewell:\n  default: Bye\nGreeting:\n  default: Hello\n",
    )
    .unwrap_err();
    assert!(matches!(err, Error::DuplicateIdentifier { identifier } if identifier == "Greeting"));
}

#[test]
fn test_unique_vars_across_locales() {
    let messages = parse(
        "inbox",
        r#"Inbox:
  default: "%(user)s, you have %(count)d new messages"
  nl: "%(user)s, je hebt %(count)d nieuwe berichten (%(size).1f MB)"
  de: "Hallo %(user)s, %(count)d neue Nachrichten von %(sender)s"
"#,
    )
    .unwrap();

    let inbox = messages.get("Inbox").unwrap();
    let vars: Vec<(&str, VarType)> = inbox
        .unique_vars()
        .iter()
        .map(|v| (v.name.as_str(), v.var_type))
        .collect();
    assert_eq!(
        vars,
        vec![
            ("user", VarType::String),
            ("count", VarType::Int),
            ("size", VarType::Float),
            ("sender", VarType::String),
        ]
    );
    assert!(messages.has_type(VarType::Float));
    assert!(messages.has_translations());
}

#[test]
fn test_type_mix_between_translations() {
    let err = parse(
        "test",
        "Count:\n  default: Items\n  nl: \"%(n)d items\"\n  de: \"%(n)s Dinge\"\n",
    )
    .unwrap_err();

    match &err {
        Error::DefinitionInvalid { location, .. } => assert_eq!(location, "Test.Count.de"),
        other => panic!("expected invalid definition, got {:?}", other),
    }
    assert!(matches!(
        err.inner(),
        Some(Error::VariableTypeMix {
            first: VarType::Int,
            second: VarType::String,
            ..
        })
    ));
}

#[test]
fn test_error_messages_locate_the_fault() {
    let err = parse("shop", "Total:\n  default: \"%(total)q\"\n").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Shop.Total.default"), "{}", message);
    assert!(message.contains("\"total\""), "{}", message);
    assert!(message.contains("\"q\""), "{}", message);
}

#[test]
fn test_parse_and_write_go() {
    let messages = parse(
        "greetings",
        r#"HelloWorld:
  default: Hello, World!
  nl: Hallo, Wereld!
HelloUser:
  default: Hello, %(user)s!
  nl: Hallo, %(user)s!
  de: Hallo!
"#,
    )
    .unwrap();

    let mut out = String::new();
    write_go(&mut out, &messages, "translations").unwrap();

    let hello_world = out.find("HelloWorld(ctx context.Context) string").unwrap();
    let hello_user = out
        .find("HelloUser(ctx context.Context, user string) string")
        .unwrap();
    assert!(hello_world < hello_user, "source order must be kept");

    assert!(out.contains("\tcase \"nl\":\n\t\treturn fmt.Sprintf(\"Hallo, %s!\", user)\n"));
    assert!(out.contains("\tcase \"de\":\n\t\treturn \"Hallo!\"\n"));
    assert!(out.contains("\treturn fmt.Sprintf(\"Hello, %s!\", user)\n}\n"));
}
