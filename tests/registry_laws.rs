use hanzi_host::prelude::*;
use hanzi_host::{impl_capability, AttachOutcome};

#[derive(Debug, PartialEq)]
struct Tag(&'static str);
impl_capability!(Tag, eq);

fn descriptor(name: &'static str, version: &'static str) -> CapabilityDescriptor {
    CapabilityDescriptor::new(name, Tag(version)).with_version(version)
}

fn tagged(name: &'static str, version: &'static str, tag: &'static str) -> CapabilityDescriptor {
    CapabilityDescriptor::new(name, Tag(tag)).with_version(version)
}

#[test]
fn test_attach_same_descriptor_is_idempotent() {
    let mut registry = CapabilityRegistry::new();
    let names = ["a", "b", "a", "c", "b", "a"];

    for name in names {
        registry.attach(descriptor(name, "1")).unwrap();
    }

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.list().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}

#[test]
fn test_conflict_is_atomic() {
    let mut registry = CapabilityRegistry::new();
    registry.attach(descriptor("a", "1")).unwrap();
    registry.attach(descriptor("b", "1")).unwrap();
    let before: Vec<_> = registry.list().collect();

    let err = registry.attach(descriptor("a", "2")).unwrap_err();

    assert!(matches!(err, HostError::Conflict { ref capability } if capability == "a"));
    assert_eq!(registry.list().collect::<Vec<_>>(), before);
    assert_eq!(registry.get_as::<Tag>("a").unwrap(), &Tag("1"));
}

#[test]
fn test_same_version_different_implementation_conflicts() {
    let mut registry = CapabilityRegistry::new();
    registry.attach(tagged("drawing", "1", "outline")).unwrap();
    registry.attach(tagged("ordering", "1", "outline")).unwrap();
    let before: Vec<_> = registry.list().collect();

    let err = registry.attach(tagged("drawing", "1", "filled")).unwrap_err();

    assert!(matches!(err, HostError::Conflict { ref capability } if capability == "drawing"));
    assert_eq!(registry.list().collect::<Vec<_>>(), before);
    assert_eq!(registry.get_as::<Tag>("drawing").unwrap(), &Tag("outline"));
    assert_eq!(registry.record("drawing").unwrap().order, 0);
}

#[test]
fn test_equal_implementation_reattaches() {
    let mut registry = CapabilityRegistry::new();
    registry.attach(tagged("drawing", "1", "outline")).unwrap();
    let outcome = registry.attach(tagged("drawing", "1", "outline")).unwrap();
    assert_eq!(outcome, AttachOutcome::AlreadyAttached { order: 0 });
}

#[test]
fn test_has_tracks_successful_attach_only() {
    let mut registry = CapabilityRegistry::new();
    assert!(!registry.has("drawing"));

    let failed = registry.attach(descriptor("drawing", "1").depends_on("ordering"));
    assert!(failed.is_err());
    assert!(!registry.has("drawing"));

    registry.attach(descriptor("ordering", "1")).unwrap();
    registry
        .attach(descriptor("drawing", "1").depends_on("ordering"))
        .unwrap();
    assert!(registry.has("drawing"));
}

#[test]
fn test_list_order_and_restart() {
    let mut registry = CapabilityRegistry::new();
    for name in ["ordering", "polyphone", "drawing"] {
        registry.attach(descriptor(name, "1")).unwrap();
    }

    let first: Vec<_> = registry.list().collect();
    let second: Vec<_> = registry.list().collect();
    assert_eq!(first, vec!["ordering", "polyphone", "drawing"]);
    assert_eq!(first, second);
}

#[test]
fn test_outcome_reports_first_attach_order() {
    let mut registry = CapabilityRegistry::new();
    registry.attach(descriptor("a", "1")).unwrap();
    registry.attach(descriptor("b", "1")).unwrap();

    let outcome = registry.attach(descriptor("a", "1")).unwrap();
    assert_eq!(outcome, AttachOutcome::AlreadyAttached { order: 0 });
    assert_eq!(outcome.order(), 0);
}
