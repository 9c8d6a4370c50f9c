//! Flat storage rows, one table per event kind.
//!
//! A row carries every column of its kind: the base fields, the
//! authentication fields, the kind's own fields and the embedded auxiliary
//! objects inline. Variable-length collections are stored as a single
//! delimited column through [`crate::codec`]. The `hash_code` column holds
//! the business-key hash at the time the row was built; it is never read
//! back into the event.
//!
//! Writing rows to a store, and assigning `event_id`, is left to the caller.

use raptor_id::EventId;
use serde::{Deserialize, Serialize};

use crate::auxiliary::{EventMetadata, PrincipalInformation};
use crate::base::{AuthenticationDetails, AuthenticationRecord, EventBase, EventRecord};
use crate::codec::{ColumnConverter, StringListConverter};
use crate::event::Event;
use crate::kinds::{EzproxyAuthenticationEvent, ShibbolethIdpAuthenticationEvent};
use crate::time::EventTime;
use crate::EventError;

/// Columns shared by every event table.
pub const BASE_COLUMNS: [&str; 12] = [
    "event_id",
    "event_time",
    "service_id",
    "event_type",
    "service_host",
    "resource_host",
    "resource_id",
    "resource_id_category",
    "raptor_entity_id",
    "service_name",
    "organisation_name",
    "hash_code",
];

// =============================================================================
// Embedded Column Groups
// =============================================================================

/// Base columns, with [`EventMetadata`] stored inline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseColumns {
    pub event_id: i64,
    pub event_time: EventTime,
    pub service_id: Option<String>,
    pub event_type: Option<String>,
    pub service_host: Option<String>,
    pub resource_host: Option<String>,
    pub resource_id: Option<String>,
    pub resource_id_category: i32,
    pub raptor_entity_id: Option<String>,
    pub service_name: Option<String>,
    pub organisation_name: Option<String>,
}

impl BaseColumns {
    fn from_base(base: &EventBase) -> Self {
        let metadata = base.event_metadata();
        Self {
            event_id: base.event_id().value(),
            event_time: base.event_time(),
            service_id: base.service_id().map(str::to_owned),
            event_type: base.event_type().map(str::to_owned),
            service_host: base.service_host().map(str::to_owned),
            resource_host: base.resource_host().map(str::to_owned),
            resource_id: base.resource_id().map(str::to_owned),
            resource_id_category: base.resource_id_category(),
            raptor_entity_id: metadata.and_then(|m| m.raptor_entity_id()).map(str::to_owned),
            service_name: metadata.and_then(|m| m.service_name()).map(str::to_owned),
            organisation_name: metadata
                .and_then(|m| m.organisation_name())
                .map(str::to_owned),
        }
    }

    fn into_base(self) -> EventBase {
        let mut base = EventBase::new(self.event_time);
        base.set_event_id(EventId::new(self.event_id));
        base.set_service_id(self.service_id);
        base.set_event_type(self.event_type);
        base.set_service_host(self.service_host);
        base.set_resource_host(self.resource_host);
        base.set_resource_id(self.resource_id);
        base.set_resource_id_category(self.resource_id_category);

        let mut metadata = EventMetadata::new();
        metadata.set_raptor_entity_id(self.raptor_entity_id);
        metadata.set_service_name(self.service_name);
        metadata.set_organisation_name(self.organisation_name);
        if !metadata.is_empty() {
            base.set_event_metadata(Some(metadata));
        }
        base
    }
}

/// Authentication columns, with [`PrincipalInformation`] stored inline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationColumns {
    pub authentication_type: Option<String>,
    pub principal_name: Option<String>,
    pub school: Option<String>,
    pub affiliation: Option<String>,
}

impl AuthenticationColumns {
    fn from_details(details: &AuthenticationDetails) -> Self {
        let information = details.principal_information();
        Self {
            authentication_type: details.authentication_type().map(str::to_owned),
            principal_name: details.principal_name().map(str::to_owned),
            school: information.and_then(|i| i.school()).map(str::to_owned),
            affiliation: information.and_then(|i| i.affiliation()).map(str::to_owned),
        }
    }

    fn into_details(self) -> AuthenticationDetails {
        let mut details = AuthenticationDetails::new();
        details.set_authentication_type(self.authentication_type);
        details.set_principal_name(self.principal_name);

        let mut information = PrincipalInformation::new();
        information.set_school(self.school);
        information.set_affiliation(self.affiliation);
        if !information.is_empty() {
            details.set_principal_information(Some(information));
        }
        details
    }
}

// =============================================================================
// EZproxy
// =============================================================================

/// Row of the `EzproxyAuthEvent` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EzproxyAuthEventRow {
    #[serde(flatten)]
    pub base: BaseColumns,
    #[serde(flatten)]
    pub authentication: AuthenticationColumns,
    pub requester_ip: Option<String>,
    pub hash_code: i32,
}

impl EzproxyAuthEventRow {
    pub const TABLE: &'static str = "EzproxyAuthEvent";

    /// Columns of the table, in addition to [`BASE_COLUMNS`].
    pub const COLUMNS: [&'static str; 5] = [
        "authentication_type",
        "principal_name",
        "school",
        "affiliation",
        "requester_ip",
    ];

    /// Columns forming the business key, in hash order.
    pub const BUSINESS_KEY_COLUMNS: [&'static str; 9] = [
        "event_time",
        "authentication_type",
        "service_host",
        "requester_ip",
        "resource_host",
        "principal_name",
        "event_type",
        "service_id",
        "resource_id",
    ];

    pub fn event_id(&self) -> EventId {
        EventId::new(self.base.event_id)
    }

    pub fn event_time(&self) -> EventTime {
        self.base.event_time
    }
}

impl From<&EzproxyAuthenticationEvent> for EzproxyAuthEventRow {
    fn from(event: &EzproxyAuthenticationEvent) -> Self {
        tracing::trace!(event_id = %event.event_id(), table = Self::TABLE, "building row");
        Self {
            base: BaseColumns::from_base(event.base()),
            authentication: AuthenticationColumns::from_details(event.authentication()),
            requester_ip: event.requester_ip().map(str::to_owned),
            hash_code: event.hash_code(),
        }
    }
}

impl From<EzproxyAuthEventRow> for EzproxyAuthenticationEvent {
    fn from(row: EzproxyAuthEventRow) -> Self {
        let mut event = EzproxyAuthenticationEvent::new(
            row.base.into_base(),
            row.authentication.into_details(),
        );
        event.set_requester_ip(row.requester_ip);
        event
    }
}

// =============================================================================
// Shibboleth IdP
// =============================================================================

/// Row of the `ShibIdpAuthEvent` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShibIdpAuthEventRow {
    #[serde(flatten)]
    pub base: BaseColumns,
    #[serde(flatten)]
    pub authentication: AuthenticationColumns,
    pub request_id: Option<String>,
    pub response_binding: Option<String>,
    pub request_binding: Option<String>,
    /// Released attribute names, pipe-delimited.
    pub attributes: Option<String>,
    pub hash_code: i32,
}

impl ShibIdpAuthEventRow {
    pub const TABLE: &'static str = "ShibIdpAuthEvent";

    /// Columns of the table, in addition to [`BASE_COLUMNS`].
    pub const COLUMNS: [&'static str; 8] = [
        "authentication_type",
        "principal_name",
        "school",
        "affiliation",
        "request_id",
        "response_binding",
        "request_binding",
        "attributes",
    ];

    /// Columns forming the business key, in hash order.
    pub const BUSINESS_KEY_COLUMNS: [&'static str; 12] = [
        "event_time",
        "authentication_type",
        "service_host",
        "request_id",
        "response_binding",
        "resource_host",
        "attributes",
        "request_binding",
        "principal_name",
        "event_type",
        "service_id",
        "resource_id",
    ];

    pub fn event_id(&self) -> EventId {
        EventId::new(self.base.event_id)
    }

    pub fn event_time(&self) -> EventTime {
        self.base.event_time
    }
}

impl From<&ShibbolethIdpAuthenticationEvent> for ShibIdpAuthEventRow {
    fn from(event: &ShibbolethIdpAuthenticationEvent) -> Self {
        tracing::trace!(event_id = %event.event_id(), table = Self::TABLE, "building row");
        let attributes = event.attributes().map(<[String]>::to_vec);
        Self {
            base: BaseColumns::from_base(event.base()),
            authentication: AuthenticationColumns::from_details(event.authentication()),
            request_id: event.request_id().map(str::to_owned),
            response_binding: event.response_binding().map(str::to_owned),
            request_binding: event.request_binding().map(str::to_owned),
            attributes: StringListConverter::to_column(attributes.as_ref()),
            hash_code: event.hash_code(),
        }
    }
}

impl From<ShibIdpAuthEventRow> for ShibbolethIdpAuthenticationEvent {
    fn from(row: ShibIdpAuthEventRow) -> Self {
        let mut event = ShibbolethIdpAuthenticationEvent::new(
            row.base.into_base(),
            row.authentication.into_details(),
        );
        event.set_request_id(row.request_id);
        event.set_response_binding(row.response_binding);
        event.set_request_binding(row.request_binding);
        event.set_attributes(StringListConverter::from_column(row.attributes.as_deref()));
        event
    }
}

// =============================================================================
// Any Kind
// =============================================================================

/// A row of any stored kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRow {
    Ezproxy(EzproxyAuthEventRow),
    ShibbolethIdp(ShibIdpAuthEventRow),
}

impl EventRow {
    /// Table the row belongs to.
    pub fn table(&self) -> &'static str {
        match self {
            EventRow::Ezproxy(_) => EzproxyAuthEventRow::TABLE,
            EventRow::ShibbolethIdp(_) => ShibIdpAuthEventRow::TABLE,
        }
    }

    pub fn hash_code(&self) -> i32 {
        match self {
            EventRow::Ezproxy(row) => row.hash_code,
            EventRow::ShibbolethIdp(row) => row.hash_code,
        }
    }
}

impl Event {
    /// Builds the storage row for this event.
    ///
    /// # Errors
    ///
    /// Returns `EventError::NotPersistable` for kinds without a table.
    pub fn to_row(&self) -> Result<EventRow, EventError> {
        match self {
            Event::Ezproxy(event) => Ok(EventRow::Ezproxy(event.into())),
            Event::ShibbolethIdp(event) => Ok(EventRow::ShibbolethIdp(event.into())),
            Event::Null(_) => Err(EventError::NotPersistable(self.kind().as_str())),
        }
    }
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        match row {
            EventRow::Ezproxy(row) => Event::Ezproxy(row.into()),
            EventRow::ShibbolethIdp(row) => Event::ShibbolethIdp(row.into()),
        }
    }
}
