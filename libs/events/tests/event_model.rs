//! Behaviour of events as values: identity, copies and storage.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use raptor_events::codec;
use raptor_events::{
    AuthenticationDetails, Event, EventBase, EventId, EventKind, EventMetadata, EventRecord,
    EventTime, EzproxyAuthenticationEvent, NullEvent, PrincipalInformation,
    ShibbolethIdpAuthenticationEvent,
};

fn new_year() -> EventTime {
    EventTime::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

fn shared_base() -> EventBase {
    EventBase::new(new_year())
        .with_service_id("https://idp.example.ac.uk/shibboleth")
        .with_event_type("authentication")
        .with_service_host("idp.example.ac.uk")
        .with_resource_host("sp.example.com")
        .with_resource_id("https://sp.example.com/shibboleth")
}

fn shared_authentication() -> AuthenticationDetails {
    AuthenticationDetails::new()
        .with_authentication_type("urn:oasis:names:tc:SAML:2.0:ac:classes:PasswordProtectedTransport")
        .with_principal_name("alice")
}

#[test]
fn copied_shibboleth_event_diverges_after_attribute_change() {
    let original = ShibbolethIdpAuthenticationEvent::new(
        EventBase::new(new_year()).with_event_id(EventId::new(1)),
        AuthenticationDetails::new().with_principal_name("alice"),
    )
    .with_attributes(["mail", "cn"]);

    let mut copy = original.copy();
    assert_eq!(copy, original);
    assert_eq!(copy.hash_code(), original.hash_code());

    copy.set_attributes(Some(vec!["mail".to_string()]));

    assert_eq!(original.attributes().map(<[String]>::len), Some(2));
    assert_ne!(copy, original);
}

#[test]
fn ezproxy_and_shibboleth_with_same_fields_are_not_equal() {
    let ezproxy: Event =
        EzproxyAuthenticationEvent::new(shared_base(), shared_authentication()).into();
    let shibboleth: Event =
        ShibbolethIdpAuthenticationEvent::new(shared_base(), shared_authentication()).into();

    assert_ne!(ezproxy, shibboleth);
    assert_ne!(shibboleth, ezproxy);
    assert_eq!(ezproxy, ezproxy.copy());
}

#[test]
fn event_time_accessor_returns_independent_value() {
    let event = EzproxyAuthenticationEvent::new(shared_base(), shared_authentication());

    let mut time = event.event_time();
    time = time.checked_add(chrono::Duration::days(30)).unwrap();

    assert_ne!(time, event.event_time());
    assert_eq!(event.event_time(), new_year());
    assert_eq!(event.event_time_millis(), 1_704_067_200_000);
}

#[test]
fn enrichment_does_not_change_identity() {
    let mut event: Event =
        ShibbolethIdpAuthenticationEvent::new(shared_base(), shared_authentication()).into();
    let before = event.hash_code();
    let snapshot = event.copy();

    if let Some(authentication) = event.authentication_mut() {
        authentication.set_principal_information(Some(
            PrincipalInformation::new()
                .with_school("Computer Science")
                .with_affiliation("student"),
        ));
    }
    event
        .base_mut()
        .set_event_metadata(Some(EventMetadata::new().with_service_name("idp.example.ac.uk")));

    assert_eq!(event.hash_code(), before);
    assert_eq!(event, snapshot);
    assert!(snapshot
        .authentication()
        .and_then(AuthenticationDetails::principal_information)
        .is_none());
}

#[test]
fn json_round_trip_preserves_kind_and_identity() {
    let event: Event = ShibbolethIdpAuthenticationEvent::new(shared_base(), shared_authentication())
        .with_request_id("_f00d")
        .with_attributes(["eduPersonPrincipalName", "mail"])
        .into();

    let json = event.to_json().unwrap();
    assert!(json.contains(r#""kind":"shibboleth_idp""#));

    let parsed = Event::from_json(&json).unwrap();
    assert_eq!(parsed.kind(), EventKind::ShibbolethIdp);
    assert_eq!(parsed, event);
    assert_eq!(parsed.hash_code(), event.hash_code());
}

#[test]
fn json_with_unknown_kind_is_rejected() {
    let err = Event::from_json(r#"{"kind":"cas","event_time":"2024-01-01T00:00:00Z"}"#);
    assert!(matches!(err, Err(raptor_events::EventError::Serialization(_))));
}

#[test]
fn storage_row_round_trip_keeps_identity() {
    let event: Event = ShibbolethIdpAuthenticationEvent::new(shared_base(), shared_authentication())
        .with_attributes(["eduPersonPrincipalName", "mail"])
        .into();

    let row = event.to_row().unwrap();
    assert_eq!(row.hash_code(), event.hash_code());
    let raptor_events::EventRow::ShibbolethIdp(ref shib_row) = row else {
        panic!("expected a shibboleth row");
    };
    assert_eq!(
        codec::decode(shib_row.attributes.as_deref()),
        Some(vec!["eduPersonPrincipalName".to_string(), "mail".to_string()])
    );

    assert_eq!(Event::from(row), event);
}

#[test]
fn storage_row_round_trip_treats_empty_attributes_as_absent() {
    let mut shibboleth = ShibbolethIdpAuthenticationEvent::new(shared_base(), shared_authentication());
    shibboleth.set_attributes(Some(Vec::new()));
    let event: Event = shibboleth.into();

    let row = event.to_row().unwrap();
    let stored_hash = row.hash_code();
    let reloaded = Event::from(row);

    assert_eq!(reloaded, event);
    assert_eq!(reloaded.hash_code(), stored_hash);
    assert!(reloaded
        .as_shibboleth_idp()
        .and_then(ShibbolethIdpAuthenticationEvent::attributes)
        .is_none());
}

fn arb_field() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just("alice".to_string()),
        Just("bob".to_string()),
        Just("idp.example.ac.uk".to_string()),
    ])
}

fn arb_shibboleth() -> impl Strategy<Value = ShibbolethIdpAuthenticationEvent> {
    (
        0_i64..3,
        arb_field(),
        arb_field(),
        prop::option::of(prop::collection::vec(
            prop_oneof![Just("mail"), Just("cn"), Just("uid")],
            0..3,
        )),
    )
        .prop_map(|(millis, principal, host, attributes)| {
            let mut base = EventBase::new(EventTime::from_millis(millis).unwrap());
            base.set_service_host(host);
            let mut authentication = AuthenticationDetails::new();
            authentication.set_principal_name(principal);
            let mut event = ShibbolethIdpAuthenticationEvent::new(base, authentication);
            event.set_attributes(attributes.map(|a| a.into_iter().map(String::from).collect()));
            event
        })
}

fn arb_base() -> impl Strategy<Value = EventBase> {
    (0_i64..3, arb_field(), arb_field()).prop_map(|(millis, host, resource)| {
        let mut base = EventBase::new(EventTime::from_millis(millis).unwrap());
        base.set_service_host(host);
        base.set_resource_host(resource);
        base
    })
}

fn arb_ezproxy() -> impl Strategy<Value = EzproxyAuthenticationEvent> {
    (arb_base(), arb_field(), arb_field()).prop_map(|(base, principal, requester_ip)| {
        let mut authentication = AuthenticationDetails::new();
        authentication.set_principal_name(principal);
        let mut event = EzproxyAuthenticationEvent::new(base, authentication);
        event.set_requester_ip(requester_ip);
        event
    })
}

fn arb_null() -> impl Strategy<Value = NullEvent> {
    arb_base().prop_map(|base| {
        let mut event = NullEvent::new();
        *event.base_mut() = base;
        event
    })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_ezproxy().prop_map(Event::from),
        arb_shibboleth().prop_map(Event::from),
        arb_null().prop_map(Event::from),
    ]
}

proptest! {
    #[test]
    fn equal_events_of_any_kind_have_equal_hashes(a in arb_event(), b in arb_event()) {
        if a == b {
            prop_assert_eq!(a.kind(), b.kind());
            prop_assert_eq!(a.hash_code(), b.hash_code());
        }
    }

    #[test]
    fn copies_of_any_kind_are_equal(event in arb_event()) {
        let copy = event.copy();
        prop_assert_eq!(copy.kind(), event.kind());
        prop_assert_eq!(copy.hash_code(), event.hash_code());
        prop_assert_eq!(copy, event);
    }

    #[test]
    fn ezproxy_copy_diverges_after_requester_change(event in arb_ezproxy()) {
        let mut copy = event.copy();
        let changed = match event.requester_ip() {
            Some("192.0.2.1") => "192.0.2.2",
            _ => "192.0.2.1",
        };
        copy.set_requester_ip(Some(changed.to_string()));
        prop_assert_ne!(copy, event);
    }

    #[test]
    fn equal_events_have_equal_hashes(a in arb_shibboleth(), b in arb_shibboleth()) {
        if a == b {
            prop_assert_eq!(a.hash_code(), b.hash_code());
        }
    }

    #[test]
    fn copies_are_equal(event in arb_shibboleth()) {
        let copy = event.copy();
        prop_assert_eq!(copy.hash_code(), event.hash_code());
        prop_assert_eq!(copy, event);
    }

    #[test]
    fn appending_to_a_copy_leaves_original(event in arb_shibboleth()) {
        let before = event.attributes().map(<[String]>::to_vec);
        let mut copy = event.copy();
        match copy.attributes_mut() {
            Some(attributes) => attributes.push("eduPersonAffiliation".to_string()),
            None => copy.set_attributes(Some(vec!["eduPersonAffiliation".to_string()])),
        }
        prop_assert_eq!(event.attributes().map(<[String]>::to_vec), before);
        prop_assert_ne!(copy, event);
    }
}
