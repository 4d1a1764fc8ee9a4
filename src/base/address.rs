//! Address strings: the canonical identifier for files, entries and instances.
//!
//! An address has the shape:
//!
//! ```text
//! path/to/file.ato:Entry.Path::instance.path
//! └─── file ─────┘ └─ entry ┘  └─ instance ┘
//! ```
//!
//! Segmentation is positional and done by splitting on single colons. The
//! `::` separator therefore yields an empty token, which puts the instance
//! section at token index 3 rather than 2:
//!
//! ```text
//! "f.ato:Entry::inst".split(':') == ["f.ato", "Entry", "", "inst"]
//! ```
//!
//! No validation happens at parse time. A malformed string simply segments
//! into fewer (or empty) sections; callers that care inspect the sections.

use std::fmt;
use std::ops::Deref;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::error::AddressError;
use super::relpath::relative_path;

const SECTION_SEP: char = ':';
const INSTANCE_SEP: &str = "::";
const NAME_SEP: char = '.';

/// An address string in the form `"path/to/file.ato:Entry.Path::instance.path"`.
///
/// `AddrStr` is immutable; every operation that looks like a mutation
/// returns a new address. Cloning is cheap (the text is shared).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddrStr(Arc<str>);

impl AddrStr {
    /// Wrap a string as an address. No validation is performed.
    pub fn new(addr: impl Into<Arc<str>>) -> Self {
        Self(addr.into())
    }

    /// Build an address from its component sections.
    ///
    /// An empty `file` produces an address with no leading file segment.
    /// An `instance` without an `entry` is dropped, since the instance
    /// section only exists under an entry section.
    pub fn from_parts(file: &str, entry: &str, instance: &str) -> Self {
        let mut addr = String::with_capacity(file.len() + entry.len() + instance.len() + 3);
        addr.push_str(file);

        if !entry.is_empty() {
            if !addr.is_empty() {
                addr.push(SECTION_SEP);
            }
            addr.push_str(entry);

            if !instance.is_empty() {
                addr.push_str(INSTANCE_SEP);
                addr.push_str(instance);
            }
        }

        Self::new(addr)
    }

    /// The raw address text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the address, returning the shared text.
    pub fn into_inner(self) -> Arc<str> {
        self.0
    }

    /// Check whether the address is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The file segment: everything before the first `:`.
    pub fn file(&self) -> &str {
        self.section(0)
    }

    /// Alias of [`AddrStr::file`].
    pub fn file_path(&self) -> &str {
        self.file()
    }

    /// Everything before the instance boundary (`file:Entry` for
    /// `file:Entry::inst`).
    pub fn entry(&self) -> &str {
        match self.0.find(INSTANCE_SEP) {
            Some(end) => &self.0[..end],
            None => &self.0,
        }
    }

    /// The entry section (`Module.Entry` for `file:Module.Entry::inst`),
    /// or `""` when absent.
    pub fn entry_section(&self) -> &str {
        self.section(1)
    }

    /// The entry section, or `None` when it is absent or empty.
    pub fn entry_section_opt(&self) -> Option<&str> {
        Some(self.entry_section()).filter(|s| !s.is_empty())
    }

    /// The entry section, reporting its absence as an error.
    pub fn require_entry_section(&self) -> Result<&str, AddressError> {
        self.entry_section_opt()
            .ok_or(AddressError::MissingEntrySection)
    }

    /// The instance section (`child.leaf` for `file:Entry::child.leaf`),
    /// or `""` when absent.
    pub fn instance_section(&self) -> &str {
        self.section(3)
    }

    /// The instance section, or `None` when it is absent or empty.
    pub fn instance_section_opt(&self) -> Option<&str> {
        Some(self.instance_section()).filter(|s| !s.is_empty())
    }

    /// The leaf name: the last dot segment of the last colon segment.
    pub fn name(&self) -> &str {
        let last = self.0.rsplit(SECTION_SEP).next().unwrap_or_default();
        last.rsplit(NAME_SEP).next().unwrap_or_default()
    }

    /// Append an instance name.
    ///
    /// Extends an existing instance section with `.name`, or opens one
    /// with `::name` under an existing entry section. An empty `name`
    /// returns the address unchanged.
    pub fn add_instance(&self, name: &str) -> Result<Self, AddressError> {
        if name.is_empty() {
            return Ok(self.clone());
        }

        if !self.instance_section().is_empty() {
            Ok(self.joined(".", name))
        } else if !self.entry_section().is_empty() {
            Ok(self.joined(INSTANCE_SEP, name))
        } else {
            tracing::debug!(address = %self, name, "rejected instance on address without entry");
            Err(AddressError::new(
                "Cannot add instance to something without an entry section",
            ))
        }
    }

    /// Append several instance names in order.
    ///
    /// Stops at the first failure; no partially extended address is returned.
    pub fn add_instances<I, S>(&self, names: I) -> Result<Self, AddressError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .try_fold(self.clone(), |addr, name| addr.add_instance(name.as_ref()))
    }

    /// Append an entry name.
    ///
    /// Opens the entry section with `:name` or extends it with `.name`.
    /// Fails once the address has an instance section: a type path can't be
    /// extended after it has been instantiated.
    pub fn add_entry(&self, name: &str) -> Result<Self, AddressError> {
        if !self.instance_section().is_empty() {
            tracing::debug!(address = %self, name, "rejected entry on instance address");
            return Err(AddressError::new("Cannot add entry to an instance address"));
        }

        if self.entry_section().is_empty() {
            Ok(self.joined(":", name))
        } else {
            Ok(self.joined(".", name))
        }
    }

    /// Append several entry names in order.
    ///
    /// Stops at the first failure; no partially extended address is returned.
    pub fn add_entries<I, S>(&self, names: I) -> Result<Self, AddressError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .try_fold(self.clone(), |addr, name| addr.add_entry(name.as_ref()))
    }

    /// Rewrite the file segment relative to `base`, keeping the entry and
    /// instance sections.
    ///
    /// Relativization is lexical. An address without a file segment is
    /// returned unchanged.
    pub fn relative_to(&self, base: impl AsRef<Path>) -> Result<Self, AddressError> {
        let file = self.file();
        if file.is_empty() {
            return Ok(self.clone());
        }

        let base = base.as_ref();
        let rel = relative_path(base, Path::new(file)).map_err(|source| {
            tracing::debug!(address = %self, base = %base.display(), error = %source, "relativize failed");
            AddressError::Relativize {
                file: file.into(),
                base: base.to_path_buf(),
                source,
            }
        })?;

        Ok(Self::from_parts(
            &rel.to_string_lossy(),
            self.entry_section(),
            self.instance_section(),
        ))
    }

    /// Token `index` of the single-colon split, or `""`.
    fn section(&self, index: usize) -> &str {
        self.0.split(SECTION_SEP).nth(index).unwrap_or_default()
    }

    fn joined(&self, sep: &str, name: &str) -> Self {
        let mut addr = String::with_capacity(self.0.len() + sep.len() + name.len());
        addr.push_str(&self.0);
        addr.push_str(sep);
        addr.push_str(name);
        Self::new(addr)
    }
}

impl Default for AddrStr {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for AddrStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddrStr({:?})", &*self.0)
    }
}

impl fmt::Display for AddrStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for AddrStr {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AddrStr {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AddrStr {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AddrStr {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<AddrStr> for String {
    fn from(addr: AddrStr) -> Self {
        addr.0.to_string()
    }
}

impl FromStr for AddrStr {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl PartialEq<str> for AddrStr {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for AddrStr {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl PartialEq<String> for AddrStr {
    fn eq(&self, other: &String) -> bool {
        &*self.0 == other.as_str()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AddrStr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AddrStr {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// FREE-FUNCTION FORMS
// ============================================================================

/// Build an address from its sections. See [`AddrStr::from_parts`].
pub fn from_parts(file: &str, entry: &str, instance: &str) -> AddrStr {
    AddrStr::from_parts(file, entry, instance)
}

/// File segment of `addr`.
pub fn get_file(addr: &str) -> &str {
    addr.split(SECTION_SEP).next().unwrap_or_default()
}

/// Everything in `addr` before the instance boundary.
pub fn get_entry(addr: &str) -> &str {
    addr.split(INSTANCE_SEP).next().unwrap_or_default()
}

/// Entry section of `addr`.
pub fn get_entry_section(addr: &str) -> &str {
    addr.split(SECTION_SEP).nth(1).unwrap_or_default()
}

/// Instance section of `addr`.
pub fn get_instance_section(addr: &str) -> &str {
    addr.split(SECTION_SEP).nth(3).unwrap_or_default()
}

/// Leaf name of `addr`.
pub fn get_name(addr: &str) -> &str {
    let last = addr.rsplit(SECTION_SEP).next().unwrap_or_default();
    last.rsplit(NAME_SEP).next().unwrap_or_default()
}

/// See [`AddrStr::add_instance`].
pub fn add_instance(addr: &AddrStr, name: &str) -> Result<AddrStr, AddressError> {
    addr.add_instance(name)
}

/// See [`AddrStr::add_instances`].
pub fn add_instances<I, S>(addr: &AddrStr, names: I) -> Result<AddrStr, AddressError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    addr.add_instances(names)
}

/// See [`AddrStr::add_entry`].
pub fn add_entry(addr: &AddrStr, name: &str) -> Result<AddrStr, AddressError> {
    addr.add_entry(name)
}

/// See [`AddrStr::add_entries`].
pub fn add_entries<I, S>(addr: &AddrStr, names: I) -> Result<AddrStr, AddressError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    addr.add_entries(names)
}

/// See [`AddrStr::relative_to`].
pub fn get_relative_addr_str(
    addr: &AddrStr,
    base: impl AsRef<Path>,
) -> Result<AddrStr, AddressError> {
    addr.relative_to(base)
}
