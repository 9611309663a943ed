//! Babeljob - translation job files for a JSON locale store
//!
//! Babeljob flattens every translation key's value tree into plain
//! `key[segment][segment]=value` lines, one job file per locale, so a
//! translator can fill in the blanks with any text editor. Applying the edited
//! files rebuilds each tree and merges it back into the store.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, reporting, exit status)
//! - `config`: Configuration file loading and parsing
//! - `core`: Value trees, the key path codec and tree merging
//! - `error`: Typed errors shared by the library
//! - `job`: Job file generation and application
//! - `logging`: Diagnostic logging setup
//! - `reference`: Source-language value trees, the shape every locale follows
//! - `store`: The locale store file (`key -> locale -> value`)
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod job;
pub mod logging;
pub mod reference;
pub mod store;
pub mod utils;
