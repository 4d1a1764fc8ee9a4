//! Structured references into the declaration and instance graphs.
//!
//! - [`TypeRef`] - Keyless dotted path naming a type (`Module.Sub`)
//! - [`FieldRef`] - Path of [`ReferencePart`]s naming an instance, possibly
//!   indexed (`app.modules[0].resistors[1]`)
//!
//! A `FieldRef` downgrades to a `TypeRef` only when none of its parts carry
//! a key; a `TypeRef` always lifts to a keyless `FieldRef`. The two are kept
//! as separate types so an indexed type path can't be constructed.
//!
//! Address conversions ([`AddrStr::entry_ref`](crate::base::AddrStr::entry_ref),
//! [`AddrStr::instance_ref`](crate::base::AddrStr::instance_ref) and the
//! matching `add_*_ref` builders) live in this module.

mod bridge;
mod field_ref;
mod type_ref;

pub use field_ref::{FieldRef, ParseRefError, ReferenceKey, ReferencePart, is_int};
pub use type_ref::TypeRef;
