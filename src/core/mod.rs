//! Core modules for stockroom: the record model, its store, the form
//! controller, the listing, and the ambient helpers they share.

pub mod config;
pub mod db;
pub mod error;
pub mod form;
pub mod listing;
pub mod logging;
pub mod output;
pub mod record;
pub mod schemas;
pub mod session;
pub mod store;
pub mod tui;
