//! Foundation types for the ato toolchain.
//!
//! This module provides the addressing layer used throughout the compiler:
//! - [`AddrStr`] - Canonical `file:Entry::instance` address strings
//! - [`AddressError`] - Grammar violations when extending addresses
//! - [`relative_path`] - Lexical path relativization for address files
//!
//! This module has NO dependencies on other ato modules.

mod address;
mod error;
mod relpath;

pub use address::{
    AddrStr, add_entries, add_entry, add_instance, add_instances, from_parts, get_entry,
    get_entry_section, get_file, get_instance_section, get_name, get_relative_addr_str,
};
pub use error::{AddressError, RelativePathError};
pub use relpath::relative_path;
