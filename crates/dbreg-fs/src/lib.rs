//! Filesystem primitives for the Database Registry Manager
//!
//! Provides atomic, lock-protected writes for the registry's user-editable
//! config file. Readers always observe either the previous or the next
//! version of a file, never a partial write.

pub mod error;
pub mod io;

pub use error::{Error, Result};
pub use io::{read_text, write_atomic};
