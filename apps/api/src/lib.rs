//! Folio: a resume-building backend and editing core.
//!
//! The document model ([`models`]), the flat-file persistence gateway
//! ([`store`]), the pure editor mutation API ([`editor`]) and the session
//! controller ([`session`]) make up the core; [`routes`] exposes the CRUD
//! surface over HTTP.

pub mod config;
pub mod debounce;
pub mod editor;
pub mod errors;
pub mod models;
pub mod notify;
pub mod prefs;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod validate;
