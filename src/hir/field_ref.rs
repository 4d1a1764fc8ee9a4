//! Reference paths into the instance graph, with optional indexed access.
//!
//! A [`FieldRef`] such as `app.modules[0].resistors[1]` is an ordered list of
//! [`ReferencePart`]s. Each part names a child node and may carry a
//! [`ReferenceKey`] selecting an element of an array (`[1]`) or a mapping
//! (`[vcc]`).

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use super::type_ref::TypeRef;

// ============================================================================
// KEYS
// ============================================================================

/// The selector carried by a reference part.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceKey {
    /// Plain traversal, no indexing.
    #[default]
    None,
    /// Mapping-style access: `pins[vcc]`.
    Name(SmolStr),
    /// Array-style access: `resistors[1]`.
    Index(i64),
}

impl ReferenceKey {
    /// Interpret key text: integer literals become [`ReferenceKey::Index`],
    /// anything else a [`ReferenceKey::Name`].
    pub fn parse(text: &str) -> Self {
        match text.parse::<i64>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Name(text.into()),
        }
    }

    /// Check whether a key is present.
    pub fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Check whether the key is absent.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<i64> for ReferenceKey {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for ReferenceKey {
    fn from(name: &str) -> Self {
        Self::Name(name.into())
    }
}

impl From<SmolStr> for ReferenceKey {
    fn from(name: SmolStr) -> Self {
        Self::Name(name)
    }
}

impl<K: Into<ReferenceKey>> From<Option<K>> for ReferenceKey {
    fn from(key: Option<K>) -> Self {
        key.map_or(Self::None, Into::into)
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Check whether `text` is an integer literal.
pub fn is_int(text: &str) -> bool {
    text.parse::<i64>().is_ok()
}

// ============================================================================
// PARTS
// ============================================================================

/// One segment of a reference path: a name plus an optional key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferencePart {
    /// The child name.
    pub name: SmolStr,
    /// Optional index or mapping key.
    pub key: ReferenceKey,
    /// Whether this part denotes traversal into a child node.
    ///
    /// Always `true` for parts built by this module.
    pub is_node_reference: bool,
}

impl ReferencePart {
    /// Create a node-reference part.
    pub fn new(name: impl Into<SmolStr>, key: impl Into<ReferenceKey>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            is_node_reference: true,
        }
    }

    /// A keyless part.
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self::new(name, ReferenceKey::None)
    }

    /// An array-indexed part: `name[index]`.
    pub fn indexed(name: impl Into<SmolStr>, index: i64) -> Self {
        Self::new(name, ReferenceKey::Index(index))
    }

    /// A mapping-keyed part: `name[key]`.
    pub fn keyed(name: impl Into<SmolStr>, key: impl Into<SmolStr>) -> Self {
        Self::new(name, ReferenceKey::Name(key.into()))
    }

    /// Check whether this part carries an index or mapping key.
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }
}

impl fmt::Display for ReferencePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            ReferenceKey::None => f.write_str(&self.name),
            key => write!(f, "{}[{}]", self.name, key),
        }
    }
}

// ============================================================================
// FIELD REFERENCES
// ============================================================================

/// A path into the instance graph (e.g. `app.modules[0].resistors[1]`).
///
/// All operations are non-mutating and return new values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FieldRef {
    parts: Vec<ReferencePart>,
}

impl FieldRef {
    /// Create a reference path from its parts, outermost first.
    pub fn new(parts: impl IntoIterator<Item = ReferencePart>) -> Self {
        Self {
            parts: parts.into_iter().collect(),
        }
    }

    /// The empty reference path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lift a type path into a reference path of keyless parts.
    pub fn from_type_ref(type_ref: &TypeRef) -> Self {
        Self::new(type_ref.names().iter().cloned().map(ReferencePart::named))
    }

    /// Return a new path with `part` appended.
    pub fn append(&self, part: ReferencePart) -> Self {
        let mut parts = Vec::with_capacity(self.parts.len() + 1);
        parts.extend(self.parts.iter().cloned());
        parts.push(part);
        Self { parts }
    }

    /// All parts except the last.
    ///
    /// The stem of an empty path is the empty path.
    pub fn stem(&self) -> Self {
        match self.parts.split_last() {
            Some((_, init)) => Self {
                parts: init.to_vec(),
            },
            None => self.clone(),
        }
    }

    /// The last part. `None` for the empty path.
    pub fn last(&self) -> Option<&ReferencePart> {
        self.parts.last()
    }

    /// The parts, outermost first.
    pub fn parts(&self) -> &[ReferencePart] {
        &self.parts
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check whether the path has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterate over the parts, outermost first.
    pub fn iter(&self) -> std::slice::Iter<'_, ReferencePart> {
        self.parts.iter()
    }

    /// Check whether any part carries a key.
    pub fn has_keys(&self) -> bool {
        self.parts.iter().any(ReferencePart::has_key)
    }

    /// Downgrade to a type path. `None` if any part is keyed.
    pub fn to_type_ref(&self) -> Option<TypeRef> {
        if self.has_keys() {
            return None;
        }
        Some(TypeRef::new(self.parts.iter().map(|part| part.name.clone())))
    }

    /// Parse `a.b[1].c[vcc]`.
    ///
    /// Names must be identifiers. Key text that is an integer literal becomes
    /// an index; note that a string key spelled like an integer therefore
    /// re-parses as an index.
    pub fn parse(text: &str) -> Result<Self, ParseRefError> {
        let mut parts = Vec::new();
        if text.is_empty() {
            return Ok(Self { parts });
        }

        let mut rest = text;
        let mut offset = 0;
        loop {
            let name_end = rest.find(['.', '[']).unwrap_or(rest.len());
            let name = &rest[..name_end];
            if name.is_empty() {
                return Err(ParseRefError::EmptySegment { offset });
            }
            if !is_identifier(name) {
                return Err(ParseRefError::InvalidName {
                    name: name.into(),
                    offset,
                });
            }

            let mut cursor = name_end;
            let mut key = ReferenceKey::None;
            if rest[cursor..].starts_with('[') {
                let close = rest[cursor + 1..]
                    .find(']')
                    .ok_or(ParseRefError::UnclosedKey {
                        offset: offset + cursor,
                    })?;
                let raw = &rest[cursor + 1..cursor + 1 + close];
                if raw.is_empty() {
                    return Err(ParseRefError::EmptyKey {
                        offset: offset + cursor,
                    });
                }
                key = ReferenceKey::parse(raw);
                cursor += close + 2;
            }
            parts.push(ReferencePart::new(name, key));

            let tail = &rest[cursor..];
            if tail.is_empty() {
                break;
            }
            match tail.strip_prefix('.') {
                Some(next) => {
                    offset += cursor + 1;
                    rest = next;
                }
                None => {
                    return Err(ParseRefError::TrailingInput {
                        offset: offset + cursor,
                    });
                }
            }
        }

        Ok(Self { parts })
    }
}

/// Check whether `name` is an identifier (`_` or XID start, then XID continue).
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

impl FromStr for FieldRef {
    type Err = ParseRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<TypeRef> for FieldRef {
    fn from(type_ref: TypeRef) -> Self {
        Self::from_type_ref(&type_ref)
    }
}

impl From<&TypeRef> for FieldRef {
    fn from(type_ref: &TypeRef) -> Self {
        Self::from_type_ref(type_ref)
    }
}

impl FromIterator<ReferencePart> for FieldRef {
    fn from_iter<I: IntoIterator<Item = ReferencePart>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a FieldRef {
    type Item = &'a ReferencePart;
    type IntoIter = std::slice::Iter<'a, ReferencePart>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

/// Errors from parsing a textual reference path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRefError {
    /// A `.` with no name before it, or a trailing `.`.
    #[error("empty path segment at offset {offset}")]
    EmptySegment { offset: usize },

    /// A part name that isn't an identifier.
    #[error("invalid name '{name}' at offset {offset}")]
    InvalidName { name: SmolStr, offset: usize },

    /// A `[` without a matching `]`.
    #[error("unclosed '[' at offset {offset}")]
    UnclosedKey { offset: usize },

    /// `name[]`.
    #[error("empty key at offset {offset}")]
    EmptyKey { offset: usize },

    /// Text after `]` that isn't a `.`.
    #[error("unexpected input after key at offset {offset}")]
    TrailingInput { offset: usize },
}
