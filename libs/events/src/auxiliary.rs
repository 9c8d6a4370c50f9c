//! Descriptive value objects embedded in events.
//!
//! Neither type takes part in an event's business key. Both are stored inline
//! with their owning event and stay absent until an enrichment step attaches
//! them.

use serde::{Deserialize, Serialize};

use crate::macros::string_fields;

fn display_opt(value: Option<&str>) -> &str {
    value.unwrap_or("null")
}

/// Where an event was harvested from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    raptor_entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organisation_name: Option<String>,
}

impl EventMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    string_fields! {
        /// Entity ID of the Raptor harvester the event came through.
        raptor_entity_id, set_raptor_entity_id, with_raptor_entity_id;
        /// Hostname of the service the event belongs to.
        service_name, set_service_name, with_service_name;
        /// Name of the organisation that generated the event.
        organisation_name, set_organisation_name, with_organisation_name;
    }

    /// Returns an independent copy.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.raptor_entity_id.is_none()
            && self.service_name.is_none()
            && self.organisation_name.is_none()
    }
}

impl std::fmt::Display for EventMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EventMetadata [entityId={}, serviceName={}, organisationName={}]",
            display_opt(self.raptor_entity_id()),
            display_opt(self.service_name()),
            display_opt(self.organisation_name()),
        )
    }
}

/// Directory information about the principal of an authentication.
///
/// Filled in after attribute expansion, so usually absent when the event is
/// first harvested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    affiliation: Option<String>,
}

impl PrincipalInformation {
    pub fn new() -> Self {
        Self::default()
    }

    string_fields! {
        /// School or department the principal is a member of.
        school, set_school, with_school;
        /// Affiliation the principal has with their school or department.
        affiliation, set_affiliation, with_affiliation;
    }

    /// Returns an independent copy.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.school.is_none() && self.affiliation.is_none()
    }
}

impl std::fmt::Display for PrincipalInformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PrincipalInformation [school={}, affiliation={}]",
            display_opt(self.school()),
            display_opt(self.affiliation()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_preserves_absent_fields() {
        let info = PrincipalInformation::new().with_school("Computer Science");
        let copy = info.copy();
        assert_eq!(copy.school(), Some("Computer Science"));
        assert_eq!(copy.affiliation(), None);
    }

    #[test]
    fn test_copy_is_independent() {
        let metadata = EventMetadata::new().with_service_name("idp.example.ac.uk");
        let mut copy = metadata.copy();
        copy.set_service_name(Some("proxy.example.ac.uk".to_string()));
        assert_eq!(metadata.service_name(), Some("idp.example.ac.uk"));
        assert_eq!(copy.service_name(), Some("proxy.example.ac.uk"));
    }

    #[test]
    fn test_display() {
        let metadata = EventMetadata::new()
            .with_raptor_entity_id("https://raptor.example.ac.uk/mua")
            .with_organisation_name("Example University");
        assert_eq!(
            metadata.to_string(),
            "EventMetadata [entityId=https://raptor.example.ac.uk/mua, serviceName=null, organisationName=Example University]"
        );

        let info = PrincipalInformation::new().with_affiliation("staff");
        assert_eq!(
            info.to_string(),
            "PrincipalInformation [school=null, affiliation=staff]"
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(EventMetadata::default().is_empty());
        assert!(!PrincipalInformation::new().with_school("Law").is_empty());
    }

    #[test]
    fn test_json_omits_absent_fields() {
        let info = PrincipalInformation::new().with_school("Law");
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"school":"Law"}"#);
        let parsed: PrincipalInformation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, info);
    }
}
