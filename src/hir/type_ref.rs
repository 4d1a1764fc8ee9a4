//! Type references: flat, index-free dotted paths.

use std::fmt;

use smol_str::SmolStr;

use super::field_ref::FieldRef;

/// An ordered sequence of names denoting a type path (e.g. `Module.Sub`).
///
/// Type paths name declarations, which can never be array-indexed, so a
/// `TypeRef` has no notion of keys. Use [`FieldRef`] for instance paths.
///
/// `TypeRef` is immutable; [`TypeRef::add_name`] returns a new value.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TypeRef {
    names: Vec<SmolStr>,
}

impl TypeRef {
    /// Create a type reference from a sequence of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The empty type reference.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single-name type reference.
    pub fn from_one(name: impl Into<SmolStr>) -> Self {
        Self {
            names: vec![name.into()],
        }
    }

    /// Parse a dot-separated path. `""` yields the empty reference.
    pub fn from_path_str(path: &str) -> Self {
        if path.is_empty() {
            return Self::empty();
        }
        Self::new(path.split('.'))
    }

    /// Return a new reference with `name` appended.
    pub fn add_name(&self, name: impl Into<SmolStr>) -> Self {
        let mut names = Vec::with_capacity(self.names.len() + 1);
        names.extend(self.names.iter().cloned());
        names.push(name.into());
        Self { names }
    }

    /// The names, outermost first.
    pub fn names(&self) -> &[SmolStr] {
        &self.names
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check whether the reference has no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The outermost name.
    pub fn first(&self) -> Option<&str> {
        self.names.first().map(SmolStr::as_str)
    }

    /// The innermost (leaf) name.
    pub fn last(&self) -> Option<&str> {
        self.names.last().map(SmolStr::as_str)
    }

    /// All names except the last. `None` for the empty reference.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.names.split_last()?;
        Some(Self {
            names: init.to_vec(),
        })
    }

    /// Check whether `prefix` names an enclosing (or the same) type.
    pub fn starts_with(&self, prefix: &TypeRef) -> bool {
        self.names.starts_with(&prefix.names)
    }

    /// Iterate over the names, outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(SmolStr::as_str)
    }

    /// Lift into a reference path with one keyless part per name.
    pub fn to_field_ref(&self) -> FieldRef {
        FieldRef::from_type_ref(self)
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl From<&str> for TypeRef {
    fn from(path: &str) -> Self {
        Self::from_path_str(path)
    }
}

impl<S: Into<SmolStr>> FromIterator<S> for TypeRef {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a TypeRef {
    type Item = &'a SmolStr;
    type IntoIter = std::slice::Iter<'a, SmolStr>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
