//! Community Directory Viewer (cdir)
//!
//! TUI application for browsing community directory listings: jobs,
//! events, dining and rentals, read from JSONL.
//!
//! The [`paginator`] module is the pure core (page-indexed and infinite
//! scroll views over a list). [`catalog`] holds the view state built on top
//! of it; [`view`] is the impure terminal shell.

pub mod catalog;
pub mod config;
pub mod import;
pub mod logging;
pub mod model;
pub mod paginator;
pub mod source;
pub mod view;
