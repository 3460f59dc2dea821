//! YAML message definition parser
//!
//! A definition file maps identifiers to a `default` message and any number of
//! translations keyed by locale:
//!
//! ```yaml
//! HelloWorld:
//!   default: Hello, World!
//!   nl: Hallo, Wereld!
//! HelloUser:
//!   default: Hello, %(user)s!
//!   nl: Hallo, %(user)s!
//! ```
//!
//! The order of identifiers and locales in the file is the order of the
//! generated code, so the document is decoded into a [`Node`] tree that keeps
//! mapping entries as an ordered list (duplicates included) instead of a map.

use std::io::Read;

use serde::de::{
    self, Deserialize, DeserializeSeed, Deserializer, EnumAccess, MapAccess, SeqAccess,
    VariantAccess, Visitor,
};

use crate::error::{DefinitionError, Error, Result};
use crate::localized::LocalizedMessage;
use crate::message::Message;
use crate::messages::Messages;
use crate::placeholder::parse_message;

/// Key holding the default message of an identifier.
pub const DEFAULT_KEY: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Scalar => write!(f, "scalar"),
            NodeKind::Sequence => write!(f, "sequence"),
            NodeKind::Mapping => write!(f, "mapping"),
        }
    }
}

/// A YAML node with mapping entries in source order, duplicates included.
///
/// Mapping keys and the values of a message mapping are read as their source
/// text, so `1.0` stays `1.0` and `!tag Hello` becomes `Hello`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(String),
    Sequence(Vec<Node>),
    Mapping(Vec<(String, Node)>),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Scalar(_) => NodeKind::Scalar,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Mapping(_) => NodeKind::Mapping,
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        NodeSeed(Level::Document).deserialize(deserializer)
    }
}

/// Nesting level of a node in a message file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    /// The root, or anything that is not an identifier's mapping
    Document,
    /// The mapping of one identifier; its values are message text
    Message,
}

struct NodeSeed(Level);

impl<'de> DeserializeSeed<'de> for NodeSeed {
    type Value = Node;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Node, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor(self.0))
    }
}

struct NodeVisitor(Level);

// Scalars only reach these methods where a mapping is expected, so the text is
// used for error reporting and never becomes a message.
impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a YAML scalar, sequence or mapping")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Node, E> {
        Ok(Node::Scalar(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Node, E> {
        Ok(Node::Scalar(v.to_string()))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> std::result::Result<Node, E> {
        Ok(Node::Scalar(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Node, E> {
        Ok(Node::Scalar(v.to_string()))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> std::result::Result<Node, E> {
        Ok(Node::Scalar(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Node, E> {
        Ok(Node::Scalar(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Node, E> {
        Ok(Node::Scalar(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Node, E> {
        Ok(Node::Scalar(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Node, E> {
        Ok(Node::Scalar(String::new()))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Node, E> {
        Ok(Node::Scalar(String::new()))
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Node, D::Error>
    where
        D: Deserializer<'de>,
    {
        NodeSeed(self.0).deserialize(deserializer)
    }

    // Tagged values (`!custom ...`); the tag is dropped.
    fn visit_enum<A>(self, data: A) -> std::result::Result<Node, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (_tag, variant): (String, _) = data.variant()?;
        variant.newtype_variant_seed(NodeSeed(self.0))
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Node, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element_seed(NodeSeed(Level::Document))? {
            items.push(item);
        }
        Ok(Node::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Node, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = match self.0 {
                Level::Document => map.next_value_seed(NodeSeed(Level::Message))?,
                Level::Message => Node::Scalar(map.next_value::<String>()?),
            };
            entries.push((key, value));
        }
        Ok(Node::Mapping(entries))
    }
}

/// Parse the message definitions in `input`.
///
/// `name` is usually the file name without extension; its first character is
/// capitalized to become the collection name.
///
/// # Errors
/// - [`Error::NameInvalid`] if `name` is empty
/// - [`Error::DuplicateIdentifier`] if an identifier is defined twice
/// - [`Error::DefinitionInvalid`] for malformed YAML, an unexpected document
///   shape, or any message that fails to parse or validate
pub fn parse(name: &str, input: &str) -> Result<Messages> {
    let name = collection_name(name)?;
    let root: Node = serde_yaml::from_str(input).map_err(|e| Error::definition(&name, e))?;
    parse_document(name, root)
}

/// Like [`parse`], reading the document from `reader`.
pub fn parse_reader<R: Read>(name: &str, reader: R) -> Result<Messages> {
    let name = collection_name(name)?;
    let root: Node = serde_yaml::from_reader(reader).map_err(|e| Error::definition(&name, e))?;
    parse_document(name, root)
}

fn collection_name(name: &str) -> Result<String> {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => Ok(first.to_uppercase().chain(chars).collect()),
        None => Err(Error::NameInvalid),
    }
}

fn parse_document(name: String, root: Node) -> Result<Messages> {
    let entries = expect_mapping(&name, root)?;
    let mut messages = Messages::new(name);

    for (identifier, spec) in entries {
        let location = format!("{}.{}", messages.name, identifier);
        let spec = expect_mapping(&location, spec)?;

        let localized = parse_localized(&location, &identifier, spec)?;
        messages.add(localized)?;
    }

    tracing::debug!(
        name = %messages.name,
        count = messages.len(),
        "parsed message definitions"
    );

    Ok(messages)
}

fn parse_localized(
    location: &str,
    identifier: &str,
    spec: Vec<(String, Node)>,
) -> Result<LocalizedMessage> {
    let mut default: Option<Message> = None;
    let mut translations: Vec<(String, Message)> = Vec::new();

    for (key, value) in spec {
        let entry_location = format!("{}.{}", location, key);
        let text = expect_scalar(&entry_location, value)?;

        let message = parse_message(&text).map_err(|e| Error::definition(&entry_location, e))?;

        if key == DEFAULT_KEY {
            if default.is_some() {
                return Err(Error::definition(
                    &entry_location,
                    DefinitionError::DuplicateDefault,
                ));
            }
            default = Some(message);
        } else {
            translations.push((key, message));
        }
    }

    let default =
        default.ok_or_else(|| Error::definition(location, DefinitionError::MissingDefault))?;

    let mut localized =
        LocalizedMessage::new(identifier, default).map_err(|e| Error::definition(location, e))?;

    for (locale, message) in translations {
        localized
            .add_translation(&locale, message)
            .map_err(|e| Error::definition(format!("{}.{}", location, locale), e))?;
    }

    Ok(localized)
}

fn expect_scalar(location: &str, node: Node) -> Result<String> {
    match node {
        Node::Scalar(value) => Ok(value),
        other => Err(Error::definition(
            location,
            DefinitionError::UnexpectedNode {
                expected: NodeKind::Scalar,
                found: other.kind(),
            },
        )),
    }
}

fn expect_mapping(location: &str, node: Node) -> Result<Vec<(String, Node)>> {
    match node {
        Node::Mapping(entries) => Ok(entries),
        other => Err(Error::definition(
            location,
            DefinitionError::UnexpectedNode {
                expected: NodeKind::Mapping,
                found: other.kind(),
            },
        )),
    }
}
