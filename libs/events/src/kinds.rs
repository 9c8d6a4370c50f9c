//! Concrete event kinds and their business keys.
//!
//! Equality and hashing of every kind go through a single `business_key()`
//! value: `PartialEq` compares keys and `hash_code()` folds the same key
//! through the hash kernel, so the two can never disagree.
//!
//! Business keys exclude the storage `event_id`, the embedded
//! [`EventMetadata`](crate::EventMetadata) and the embedded
//! [`PrincipalInformation`](crate::PrincipalInformation).

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::base::{AuthenticationDetails, AuthenticationRecord, EventBase, EventRecord};
use crate::hash::HashAccumulator;
use crate::macros::string_fields;

macro_rules! impl_record {
    ($kind:ty) => {
        impl EventRecord for $kind {
            fn base(&self) -> &EventBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut EventBase {
                &mut self.base
            }
        }
    };
    ($kind:ty, authentication) => {
        impl_record!($kind);

        impl AuthenticationRecord for $kind {
            fn authentication(&self) -> &AuthenticationDetails {
                &self.authentication
            }

            fn authentication_mut(&mut self) -> &mut AuthenticationDetails {
                &mut self.authentication
            }
        }
    };
}

macro_rules! impl_identity {
    ($kind:ty) => {
        impl PartialEq for $kind {
            fn eq(&self, other: &Self) -> bool {
                std::ptr::eq(self, other) || self.business_key() == other.business_key()
            }
        }

        impl Eq for $kind {}

        impl Hash for $kind {
            fn hash<H: Hasher>(&self, state: &mut H) {
                state.write_i32(self.hash_code());
            }
        }
    };
}

// =============================================================================
// EZproxy
// =============================================================================

/// An authentication through an EZproxy gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EzproxyAuthenticationEvent {
    #[serde(flatten)]
    base: EventBase,
    #[serde(flatten)]
    authentication: AuthenticationDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    requester_ip: Option<String>,
}

/// Business key of an [`EzproxyAuthenticationEvent`], in hash order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EzproxyKey<'a> {
    pub event_time_millis: i64,
    pub authentication_type: Option<&'a str>,
    pub service_host: Option<&'a str>,
    pub requester_ip: Option<&'a str>,
    pub resource_host: Option<&'a str>,
    pub principal_name: Option<&'a str>,
    pub event_type: Option<&'a str>,
    pub service_id: Option<&'a str>,
    pub resource_id: Option<&'a str>,
}

impl EzproxyKey<'_> {
    pub fn hash_code(&self) -> i32 {
        HashAccumulator::new()
            .field(&self.event_time_millis)
            .field(&self.authentication_type)
            .field(&self.service_host)
            .field(&self.requester_ip)
            .field(&self.resource_host)
            .field(&self.principal_name)
            .field(&self.event_type)
            .field(&self.service_id)
            .field(&self.resource_id)
            .finish()
    }
}

impl EzproxyAuthenticationEvent {
    pub fn new(base: EventBase, authentication: AuthenticationDetails) -> Self {
        Self {
            base,
            authentication,
            requester_ip: None,
        }
    }

    string_fields! {
        /// IP address of the client that requested the resource.
        requester_ip, set_requester_ip, with_requester_ip;
    }

    pub fn business_key(&self) -> EzproxyKey<'_> {
        EzproxyKey {
            event_time_millis: self.base.event_time_millis(),
            authentication_type: self.authentication.authentication_type(),
            service_host: self.base.service_host(),
            requester_ip: self.requester_ip(),
            resource_host: self.base.resource_host(),
            principal_name: self.authentication.principal_name(),
            event_type: self.base.event_type(),
            service_id: self.base.service_id(),
            resource_id: self.base.resource_id(),
        }
    }

    /// Stable hash of the business key. This is the value persisted in the
    /// `hash_code` column.
    pub fn hash_code(&self) -> i32 {
        self.business_key().hash_code()
    }

    /// Returns an independent copy of this event.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            base: self.base.copy(),
            authentication: self.authentication.copy(),
            requester_ip: self.requester_ip.clone(),
        }
    }
}

impl_record!(EzproxyAuthenticationEvent, authentication);
impl_identity!(EzproxyAuthenticationEvent);

// =============================================================================
// Shibboleth IdP
// =============================================================================

/// An authentication at a Shibboleth identity provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShibbolethIdpAuthenticationEvent {
    #[serde(flatten)]
    base: EventBase,
    #[serde(flatten)]
    authentication: AuthenticationDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response_binding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_binding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attributes: Option<Vec<String>>,
}

/// Business key of a [`ShibbolethIdpAuthenticationEvent`], in hash order.
///
/// An empty attribute list is keyed as absent, since both are stored as NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShibbolethIdpKey<'a> {
    pub event_time_millis: i64,
    pub authentication_type: Option<&'a str>,
    pub service_host: Option<&'a str>,
    pub request_id: Option<&'a str>,
    pub response_binding: Option<&'a str>,
    pub resource_host: Option<&'a str>,
    pub attributes: Option<&'a [String]>,
    pub request_binding: Option<&'a str>,
    pub principal_name: Option<&'a str>,
    pub event_type: Option<&'a str>,
    pub service_id: Option<&'a str>,
    pub resource_id: Option<&'a str>,
}

impl ShibbolethIdpKey<'_> {
    pub fn hash_code(&self) -> i32 {
        HashAccumulator::new()
            .field(&self.event_time_millis)
            .field(&self.authentication_type)
            .field(&self.service_host)
            .field(&self.request_id)
            .field(&self.response_binding)
            .field(&self.resource_host)
            .field(&self.attributes)
            .field(&self.request_binding)
            .field(&self.principal_name)
            .field(&self.event_type)
            .field(&self.service_id)
            .field(&self.resource_id)
            .finish()
    }
}

impl ShibbolethIdpAuthenticationEvent {
    pub fn new(base: EventBase, authentication: AuthenticationDetails) -> Self {
        Self {
            base,
            authentication,
            ..Self::default()
        }
    }

    string_fields! {
        /// ID of the SAML request.
        request_id, set_request_id, with_request_id;
        response_binding, set_response_binding, with_response_binding;
        request_binding, set_request_binding, with_request_binding;
    }

    /// Names of the attributes released to the relying party, in release order.
    pub fn attributes(&self) -> Option<&[String]> {
        self.attributes.as_deref()
    }

    pub fn attributes_mut(&mut self) -> Option<&mut Vec<String>> {
        self.attributes.as_mut()
    }

    pub fn set_attributes(&mut self, attributes: Option<Vec<String>>) {
        self.attributes = attributes;
    }

    #[must_use]
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    pub fn business_key(&self) -> ShibbolethIdpKey<'_> {
        ShibbolethIdpKey {
            event_time_millis: self.base.event_time_millis(),
            authentication_type: self.authentication.authentication_type(),
            service_host: self.base.service_host(),
            request_id: self.request_id(),
            response_binding: self.response_binding(),
            resource_host: self.base.resource_host(),
            attributes: self.attributes().filter(|a| !a.is_empty()),
            request_binding: self.request_binding(),
            principal_name: self.authentication.principal_name(),
            event_type: self.base.event_type(),
            service_id: self.base.service_id(),
            resource_id: self.base.resource_id(),
        }
    }

    /// Stable hash of the business key. This is the value persisted in the
    /// `hash_code` column.
    pub fn hash_code(&self) -> i32 {
        self.business_key().hash_code()
    }

    /// Returns an independent copy of this event. The attribute list is
    /// copied into a new vector.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            base: self.base.copy(),
            authentication: self.authentication.copy(),
            request_id: self.request_id.clone(),
            response_binding: self.response_binding.clone(),
            request_binding: self.request_binding.clone(),
            attributes: self.attributes.as_deref().map(<[String]>::to_vec),
        }
    }
}

impl_record!(ShibbolethIdpAuthenticationEvent, authentication);
impl_identity!(ShibbolethIdpAuthenticationEvent);

// =============================================================================
// Null
// =============================================================================

/// Placeholder standing for "no event".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NullEvent {
    #[serde(flatten)]
    base: EventBase,
}

/// Business key of a [`NullEvent`]: the identity fields of the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullKey<'a> {
    pub event_time_millis: i64,
    pub service_host: Option<&'a str>,
    pub resource_host: Option<&'a str>,
    pub event_type: Option<&'a str>,
    pub service_id: Option<&'a str>,
    pub resource_id: Option<&'a str>,
}

impl NullKey<'_> {
    pub fn hash_code(&self) -> i32 {
        HashAccumulator::new()
            .field(&self.event_time_millis)
            .field(&self.service_host)
            .field(&self.resource_host)
            .field(&self.event_type)
            .field(&self.service_id)
            .field(&self.resource_id)
            .finish()
    }
}

impl NullEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn business_key(&self) -> NullKey<'_> {
        NullKey {
            event_time_millis: self.base.event_time_millis(),
            service_host: self.base.service_host(),
            resource_host: self.base.resource_host(),
            event_type: self.base.event_type(),
            service_id: self.base.service_id(),
            resource_id: self.base.resource_id(),
        }
    }

    pub fn hash_code(&self) -> i32 {
        self.business_key().hash_code()
    }

    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            base: self.base.copy(),
        }
    }
}

impl_record!(NullEvent);
impl_identity!(NullEvent);
