//! Conversions between flat addresses and structured reference paths.
//!
//! The entry section of an address is a type path and maps onto a
//! [`TypeRef`]; the instance section is an instance path and maps onto a
//! [`FieldRef`], which may carry indices (`resistors[1]`).

use crate::base::{AddrStr, AddressError};

use super::field_ref::{FieldRef, ReferenceKey, ReferencePart, is_identifier, is_int};
use super::type_ref::TypeRef;

impl AddrStr {
    /// The entry section as a type path.
    pub fn entry_ref(&self) -> TypeRef {
        TypeRef::from_path_str(self.entry_section())
    }

    /// The instance section as a reference path.
    ///
    /// Segments that don't parse as `name[key]` are kept verbatim as keyless
    /// parts. Integer-looking key text always reads back as an index.
    pub fn instance_ref(&self) -> FieldRef {
        let instance = self.instance_section();
        FieldRef::parse(instance).unwrap_or_else(|err| {
            tracing::trace!(address = %self, error = %err, "instance section is not a reference path");
            instance.split('.').map(ReferencePart::named).collect()
        })
    }

    /// Append every name of `type_ref` to the entry section.
    ///
    /// Every name must be an identifier, so that [`AddrStr::entry_ref`]
    /// reads back the same type path.
    pub fn add_entry_ref(&self, type_ref: &TypeRef) -> Result<Self, AddressError> {
        for name in type_ref {
            if !is_identifier(name) {
                return Err(self.reject(format!("Invalid entry name '{}'", name)));
            }
        }
        self.add_entries(type_ref)
    }

    /// Append every part of `field_ref` (rendered as `name` or `name[key]`)
    /// to the instance section.
    ///
    /// Part names must be identifiers. String keys must be non-empty, must
    /// not contain `:`, `.` or `]`, and must not look like an integer, since
    /// [`AddrStr::instance_ref`] would read `[1]` back as an index.
    pub fn add_instance_ref(&self, field_ref: &FieldRef) -> Result<Self, AddressError> {
        for part in field_ref {
            if !is_identifier(&part.name) {
                return Err(self.reject(format!("Invalid instance name '{}'", part.name)));
            }
            if let ReferenceKey::Name(key) = &part.key {
                if key.is_empty() || key.contains([':', '.', ']']) || is_int(key) {
                    return Err(self.reject(format!("Invalid key '{}' on '{}'", key, part.name)));
                }
            }
        }
        self.add_instances(field_ref.iter().map(ToString::to_string))
    }

    fn reject(&self, message: String) -> AddressError {
        tracing::debug!(address = %self, %message, "rejected reference path");
        AddressError::new(message)
    }
}
