//! Fields shared by every event kind.
//!
//! Each kind is composed of an [`EventBase`] and, for authentication kinds,
//! an [`AuthenticationDetails`]. The [`EventRecord`] and
//! [`AuthenticationRecord`] traits give uniform access to those parts.

use raptor_id::EventId;
use serde::{Deserialize, Serialize};

use crate::auxiliary::{EventMetadata, PrincipalInformation};
use crate::macros::string_fields;
use crate::time::EventTime;
use crate::EventError;

// =============================================================================
// Resource Category
// =============================================================================

/// Category of the resource an event relates to.
///
/// Events store the raw integer so that values defined later survive a
/// load/store cycle; this enum names the values known today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ResourceCategory {
    /// A resource run by the organisation itself.
    Internal = 1,
    /// A resource run by a third party.
    External = 2,
}

impl TryFrom<i32> for ResourceCategory {
    type Error = EventError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Internal),
            2 => Ok(Self::External),
            other => Err(EventError::UnknownResourceCategory(other)),
        }
    }
}

impl From<ResourceCategory> for i32 {
    fn from(category: ResourceCategory) -> Self {
        category as i32
    }
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceCategory::Internal => write!(f, "internal"),
            ResourceCategory::External => write!(f, "external"),
        }
    }
}

// =============================================================================
// Event Base
// =============================================================================

/// Fields every event carries.
///
/// `event_id` and `event_metadata` are never part of a business key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventBase {
    event_time: EventTime,
    #[serde(default)]
    event_id: EventId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resource_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resource_id: Option<String>,
    #[serde(default)]
    resource_id_category: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    event_metadata: Option<EventMetadata>,
}

impl EventBase {
    /// Creates a base for an event generated at `event_time`.
    pub fn new(event_time: impl Into<EventTime>) -> Self {
        Self {
            event_time: event_time.into(),
            ..Self::default()
        }
    }

    /// When the event was generated.
    pub fn event_time(&self) -> EventTime {
        self.event_time
    }

    /// When the event was generated, in milliseconds since the Unix epoch.
    pub fn event_time_millis(&self) -> i64 {
        self.event_time.millis()
    }

    /// Sets when the event was generated.
    pub fn set_event_time(&mut self, event_time: impl Into<EventTime>) {
        self.event_time = event_time.into();
    }

    /// Storage primary key; [`EventId::UNASSIGNED`] until stored.
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Sets the storage primary key.
    pub fn set_event_id(&mut self, event_id: EventId) {
        self.event_id = event_id;
    }

    /// Returns `self` with the storage primary key set.
    #[must_use]
    pub fn with_event_id(mut self, event_id: EventId) -> Self {
        self.event_id = event_id;
        self
    }

    string_fields! {
        /// Identifier of the service that served the event, e.g. a SAML entity ID.
        service_id, set_service_id, with_service_id;
        /// Kind of event as reported by the source, e.g. `authentication`.
        event_type, set_event_type, with_event_type;
        /// Hostname of the service that provided the event.
        service_host, set_service_host, with_service_host;
        /// Hostname of the resource being accessed.
        resource_host, set_resource_host, with_resource_host;
        /// Identifier of the remote resource the event relates to.
        resource_id, set_resource_id, with_resource_id;
    }

    /// Raw resource category; see [`ResourceCategory`].
    pub fn resource_id_category(&self) -> i32 {
        self.resource_id_category
    }

    /// Resource category, if it is one of the known values.
    pub fn resource_category(&self) -> Result<ResourceCategory, EventError> {
        ResourceCategory::try_from(self.resource_id_category)
    }

    /// Sets the raw resource category.
    pub fn set_resource_id_category(&mut self, category: i32) {
        self.resource_id_category = category;
    }

    /// Returns `self` with the resource category set.
    #[must_use]
    pub fn with_resource_category(mut self, category: ResourceCategory) -> Self {
        self.resource_id_category = category.into();
        self
    }

    /// Where the event was harvested from, once attached.
    pub fn event_metadata(&self) -> Option<&EventMetadata> {
        self.event_metadata.as_ref()
    }

    /// Attaches or removes the harvest metadata.
    pub fn set_event_metadata(&mut self, metadata: Option<EventMetadata>) {
        self.event_metadata = metadata;
    }

    /// Returns `self` with harvest metadata attached.
    #[must_use]
    pub fn with_event_metadata(mut self, metadata: EventMetadata) -> Self {
        self.event_metadata = Some(metadata);
        self
    }

    /// Returns an independent copy, including the embedded metadata.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            event_time: self.event_time,
            event_id: self.event_id,
            service_id: self.service_id.clone(),
            event_type: self.event_type.clone(),
            service_host: self.service_host.clone(),
            resource_host: self.resource_host.clone(),
            resource_id: self.resource_id.clone(),
            resource_id_category: self.resource_id_category,
            event_metadata: self.event_metadata.as_ref().map(EventMetadata::copy),
        }
    }
}

// =============================================================================
// Authentication Details
// =============================================================================

/// Fields every authentication event carries.
///
/// `principal_information` is never part of a business key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthenticationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    authentication_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    principal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    principal_information: Option<PrincipalInformation>,
}

impl AuthenticationDetails {
    /// Creates details with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    string_fields! {
        /// Method used to authenticate, e.g. a SAML authentication context class.
        authentication_type, set_authentication_type, with_authentication_type;
        /// Name of the identity that authenticated, e.g. a username.
        principal_name, set_principal_name, with_principal_name;
    }

    /// Directory information about the principal, once attached.
    pub fn principal_information(&self) -> Option<&PrincipalInformation> {
        self.principal_information.as_ref()
    }

    /// Attaches or removes the principal information.
    pub fn set_principal_information(&mut self, information: Option<PrincipalInformation>) {
        self.principal_information = information;
    }

    /// Returns `self` with principal information attached.
    #[must_use]
    pub fn with_principal_information(mut self, information: PrincipalInformation) -> Self {
        self.principal_information = Some(information);
        self
    }

    /// Returns an independent copy, including the principal information.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            authentication_type: self.authentication_type.clone(),
            principal_name: self.principal_name.clone(),
            principal_information: self
                .principal_information
                .as_ref()
                .map(PrincipalInformation::copy),
        }
    }
}

// =============================================================================
// Record Traits
// =============================================================================

/// Access to the fields shared by every event kind.
pub trait EventRecord {
    /// The shared fields.
    fn base(&self) -> &EventBase;

    /// Mutable access to the shared fields.
    fn base_mut(&mut self) -> &mut EventBase;

    /// When the event was generated. The returned value is independent of
    /// the stored one.
    fn event_time(&self) -> EventTime {
        self.base().event_time()
    }

    /// When the event was generated, in milliseconds since the Unix epoch.
    fn event_time_millis(&self) -> i64 {
        self.base().event_time_millis()
    }

    /// Storage primary key.
    fn event_id(&self) -> EventId {
        self.base().event_id()
    }
}

/// Access to the fields shared by every authentication event kind.
pub trait AuthenticationRecord: EventRecord {
    /// The shared authentication fields.
    fn authentication(&self) -> &AuthenticationDetails;

    /// Mutable access to the shared authentication fields.
    fn authentication_mut(&mut self) -> &mut AuthenticationDetails;

    /// Name of the identity that authenticated.
    fn principal_name(&self) -> Option<&str> {
        self.authentication().principal_name()
    }

    /// Attaches principal information after attribute expansion.
    fn set_principal_information(&mut self, information: PrincipalInformation) {
        self.authentication_mut()
            .set_principal_information(Some(information));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, ResourceCategory::Internal)]
    #[case(2, ResourceCategory::External)]
    fn test_resource_category_values(#[case] raw: i32, #[case] category: ResourceCategory) {
        assert_eq!(ResourceCategory::try_from(raw).unwrap(), category);
        assert_eq!(i32::from(category), raw);
    }

    #[test]
    fn test_unknown_resource_category_is_preserved() {
        let mut base = EventBase::default();
        base.set_resource_id_category(7);
        assert_eq!(base.resource_id_category(), 7);
        assert_eq!(
            base.resource_category(),
            Err(EventError::UnknownResourceCategory(7))
        );
    }

    #[test]
    fn test_base_copy_keeps_resource_host() {
        let base = EventBase::new(EventTime::from_millis(5).unwrap())
            .with_service_host("idp.example.ac.uk")
            .with_resource_host("sp.example.com");
        let copy = base.copy();
        assert_eq!(copy.service_host(), Some("idp.example.ac.uk"));
        assert_eq!(copy.resource_host(), Some("sp.example.com"));
        assert_eq!(copy.event_time_millis(), 5);
    }

    #[test]
    fn test_base_copy_deep_copies_metadata() {
        let base = EventBase::default()
            .with_event_metadata(EventMetadata::new().with_service_name("proxy"));
        let mut copy = base.copy();
        copy.set_event_metadata(None);
        assert_eq!(
            base.event_metadata().and_then(EventMetadata::service_name),
            Some("proxy")
        );
    }

    #[test]
    fn test_authentication_copy_leaves_absent_information_absent() {
        let details = AuthenticationDetails::new().with_principal_name("alice");
        let copy = details.copy();
        assert!(copy.principal_information().is_none());
        assert_eq!(copy.principal_name(), Some("alice"));
    }
}
