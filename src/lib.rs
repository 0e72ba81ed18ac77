//! statls: a directory lister that shows git status next to every entry
//!
//! The pipeline for one directory batch:
//! [`metadata::resolve`] each entry, [`vcs::annotate`] the batch, render
//! each active [`render::ColumnKind`], then lay the rows out with
//! [`layout`]. [`listing::Lister`] drives it for a whole invocation.

pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod listing;
pub mod metadata;
pub mod options;
pub mod render;
pub mod shell_exec;
pub mod styling;
pub mod vcs;

pub use error::ListError;
pub use listing::Lister;
