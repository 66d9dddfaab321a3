//! # Ko Core
//!
//! Core functionality for the `ko` command runner: discovering commands
//! declared inside script files, resolving partial command names, rewriting
//! dependency declarations, and shelling out to external tools.
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, Error>`. Use:
//! - `?` operator for propagation
//! - `map`, `and_then` combinators for transformation
//! - `match` / `map_or` / `unwrap_or_else` for defaults
//!
//! The binary maps [`Error::exit_code`] to the process exit status.

pub mod config;
mod error;
pub mod framework;
pub mod index;
pub mod os;
pub mod process;
pub mod project;
pub mod repo;
pub mod resolve;
pub mod scan;
pub mod upgrade;

pub use config::Config;
pub use error::{Error, Result};
pub use framework::Framework;
pub use scan::{Command, Dependency};
pub use upgrade::Library;
