//! # raptor-id
//!
//! Storage identifiers for Raptor authentication events.
//!
//! ## Design Principles
//!
//! - Identifiers are assigned by the store, never by the event producer
//! - An identifier is a storage primary key only; it never takes part in
//!   an event's business key
//! - Identifiers have a canonical decimal string form with strict parsing
//!
//! An event that has not been persisted yet carries [`EventId::UNASSIGNED`].

mod error;
mod types;

pub use error::IdError;
pub use types::*;
