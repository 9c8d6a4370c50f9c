//! The closed set of event kinds.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::base::{AuthenticationDetails, AuthenticationRecord, EventBase, EventRecord};
use crate::kinds::{EzproxyAuthenticationEvent, NullEvent, ShibbolethIdpAuthenticationEvent};
use crate::EventError;

/// Names of the event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum EventKind {
    Ezproxy,
    ShibbolethIdp,
    Null,
}

impl EventKind {
    /// All kinds, in declaration order.
    pub const ALL: [EventKind; 3] = [EventKind::Ezproxy, EventKind::ShibbolethIdp, EventKind::Null];

    /// Canonical name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Ezproxy => "ezproxy",
            EventKind::ShibbolethIdp => "shibboleth_idp",
            EventKind::Null => "null",
        }
    }

    /// Storage table holding events of this kind, if the kind is stored.
    pub fn table_name(&self) -> Option<&'static str> {
        match self {
            EventKind::Ezproxy => Some(crate::row::EzproxyAuthEventRow::TABLE),
            EventKind::ShibbolethIdp => Some(crate::row::ShibIdpAuthEventRow::TABLE),
            EventKind::Null => None,
        }
    }

    /// Returns true for kinds that record an authentication.
    pub fn is_authentication(&self) -> bool {
        matches!(self, EventKind::Ezproxy | EventKind::ShibbolethIdp)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EventError::UnknownEventKind(s.to_string()))
    }
}

/// An event of any kind.
///
/// Events of different kinds never compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Event {
    Ezproxy(EzproxyAuthenticationEvent),
    ShibbolethIdp(ShibbolethIdpAuthenticationEvent),
    Null(NullEvent),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Ezproxy(_) => EventKind::Ezproxy,
            Event::ShibbolethIdp(_) => EventKind::ShibbolethIdp,
            Event::Null(_) => EventKind::Null,
        }
    }

    pub fn base(&self) -> &EventBase {
        match self {
            Event::Ezproxy(event) => event.base(),
            Event::ShibbolethIdp(event) => event.base(),
            Event::Null(event) => event.base(),
        }
    }

    pub fn base_mut(&mut self) -> &mut EventBase {
        match self {
            Event::Ezproxy(event) => event.base_mut(),
            Event::ShibbolethIdp(event) => event.base_mut(),
            Event::Null(event) => event.base_mut(),
        }
    }

    /// Authentication fields, for authentication kinds.
    pub fn authentication(&self) -> Option<&AuthenticationDetails> {
        match self {
            Event::Ezproxy(event) => Some(event.authentication()),
            Event::ShibbolethIdp(event) => Some(event.authentication()),
            Event::Null(_) => None,
        }
    }

    pub fn authentication_mut(&mut self) -> Option<&mut AuthenticationDetails> {
        match self {
            Event::Ezproxy(event) => Some(event.authentication_mut()),
            Event::ShibbolethIdp(event) => Some(event.authentication_mut()),
            Event::Null(_) => None,
        }
    }

    /// Stable hash of the business key of the wrapped event.
    pub fn hash_code(&self) -> i32 {
        match self {
            Event::Ezproxy(event) => event.hash_code(),
            Event::ShibbolethIdp(event) => event.hash_code(),
            Event::Null(event) => event.hash_code(),
        }
    }

    /// Returns an independent copy of this event.
    #[must_use]
    pub fn copy(&self) -> Self {
        match self {
            Event::Ezproxy(event) => Event::Ezproxy(event.copy()),
            Event::ShibbolethIdp(event) => Event::ShibbolethIdp(event.copy()),
            Event::Null(event) => Event::Null(event.copy()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Event::Null(_))
    }

    pub fn as_ezproxy(&self) -> Option<&EzproxyAuthenticationEvent> {
        match self {
            Event::Ezproxy(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_shibboleth_idp(&self) -> Option<&ShibbolethIdpAuthenticationEvent> {
        match self {
            Event::ShibbolethIdp(event) => Some(event),
            _ => None,
        }
    }

    /// Renders the event as JSON.
    pub fn to_json(&self) -> Result<String, EventError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses an event from JSON.
    pub fn from_json(json: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for Event {
    fn default() -> Self {
        Event::Null(NullEvent::default())
    }
}

impl EventRecord for Event {
    fn base(&self) -> &EventBase {
        Event::base(self)
    }

    fn base_mut(&mut self) -> &mut EventBase {
        Event::base_mut(self)
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Event::Ezproxy(a), Event::Ezproxy(b)) => a == b,
            (Event::ShibbolethIdp(a), Event::ShibbolethIdp(b)) => a == b,
            (Event::Null(a), Event::Null(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        state.write_i32(self.hash_code());
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let base = self.base();
        write!(
            f,
            "{} [eventId={}, eventTime={}, serviceHost={}, resourceHost={}",
            self.kind(),
            base.event_id(),
            base.event_time(),
            base.service_host().unwrap_or("null"),
            base.resource_host().unwrap_or("null"),
        )?;
        if let Some(authentication) = self.authentication() {
            write!(
                f,
                ", principalName={}",
                authentication.principal_name().unwrap_or("null")
            )?;
        }
        write!(f, "]")
    }
}

impl From<EzproxyAuthenticationEvent> for Event {
    fn from(event: EzproxyAuthenticationEvent) -> Self {
        Event::Ezproxy(event)
    }
}

impl From<ShibbolethIdpAuthenticationEvent> for Event {
    fn from(event: ShibbolethIdpAuthenticationEvent) -> Self {
        Event::ShibbolethIdp(event)
    }
}

impl From<NullEvent> for Event {
    fn from(event: NullEvent) -> Self {
        Event::Null(event)
    }
}
