//! # ato-base
//!
//! Addressing and reference-path primitives for the ato hardware description
//! compiler.
//!
//! Every named thing the compiler deals with (a source file, a module
//! declared in it, an instance created from that module, an element of an
//! instance array) is identified by an address string or a reference path
//! built here. Diagnostics, cross-file linking and build-target resolution
//! all consume these values.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! hir   → TypeRef, FieldRef, ReferencePart (structured paths)
//!   ↓
//! base  → AddrStr, AddressError, relative_path (address grammar)
//! ```
//!
//! ## Example
//!
//! ```
//! use ato::{AddrStr, FieldRef};
//!
//! let entry = AddrStr::from("elec/src/main.ato").add_entry("App").unwrap();
//! let addr = entry.add_instances(["power", "resistors[1]"]).unwrap();
//!
//! assert_eq!(addr, "elec/src/main.ato:App::power.resistors[1]");
//! assert_eq!(addr.file(), "elec/src/main.ato");
//! assert_eq!(addr.entry_section(), "App");
//! assert_eq!(addr.name(), "resistors[1]");
//!
//! let path: FieldRef = addr.instance_ref();
//! assert!(path.to_type_ref().is_none());
//! ```

/// Foundation types: address strings and their grammar
pub mod base;

/// Structured type and instance reference paths
pub mod hir;

pub use base::{AddrStr, AddressError, RelativePathError};
pub use hir::{FieldRef, ParseRefError, ReferenceKey, ReferencePart, TypeRef};
