//! # raptor-events
//!
//! Record model for authentication events harvested from campus identity
//! systems (Shibboleth IdPs, EZproxy gateways) for storage and auditing.
//!
//! ## Design Principles
//!
//! - Events are values: a kind is chosen once, and every later change goes
//!   through an explicit [`Event::copy`]
//! - Equality and hashing cover exactly the business key of a kind; the
//!   storage ID and the descriptive auxiliary objects never take part
//! - Hash codes are stable across processes so they can be persisted
//!
//! ## Event Kinds
//!
//! [`Event`] is a closed set of kinds:
//! - [`EzproxyAuthenticationEvent`] (`ezproxy`)
//! - [`ShibbolethIdpAuthenticationEvent`] (`shibboleth_idp`)
//! - [`NullEvent`] (`null`), a placeholder for "no event"
//!
//! ## Storage
//!
//! Each stored kind maps to one flat table (see [`row`]). Variable-length
//! string collections are stored as one delimited column (see [`codec`]).

mod macros;

mod auxiliary;
mod base;
pub mod codec;
mod error;
mod event;
pub mod hash;
mod kinds;
pub mod row;
mod time;

pub use auxiliary::{EventMetadata, PrincipalInformation};
pub use base::{
    AuthenticationDetails, AuthenticationRecord, EventBase, EventRecord, ResourceCategory,
};
pub use error::EventError;
pub use event::{Event, EventKind};
pub use kinds::{
    EzproxyAuthenticationEvent, EzproxyKey, NullEvent, NullKey, ShibbolethIdpAuthenticationEvent,
    ShibbolethIdpKey,
};
pub use row::EventRow;
pub use time::EventTime;

/// Re-export for consumers that need to assign storage IDs.
pub use raptor_id::EventId;
