//! Registry metadata: subclass enumeration, versions, namespaces, constants,
//! and serializable summaries.

use crate::fixtures::{registry, Color, ParserTests, Shape, Widget, WIDGET_MAX_SIZE};
use mirror::{impl_reflect, views, Case, Described, TypeDescriptor, TypeKind, Visibility};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use semver::Version;

#[test]
fn subclasses_enumerate_in_declaration_order() {
    let subclasses = registry().subclasses_of::<Shape>();
    let names: Vec<_> = subclasses.iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["Circle", "Square"]);
}

#[test]
fn subclasses_of_leaf_type_is_empty() {
    assert!(registry().subclasses_of::<Widget>().is_empty());
}

#[test]
fn registry_version_and_file_version() {
    assert_eq!(registry().version(), &Version::new(2, 3, 0));
    assert_eq!(
        registry().file_version().unwrap(),
        Some(&Version::new(2, 3, 1))
    );
}

#[test]
fn find_type_by_name() {
    assert!(registry().find_type("Widget", Case::Sensitive).is_some());
    assert!(registry().find_type("widget", Case::Sensitive).is_none());
    assert!(registry().find_type("widget", Case::Insensitive).is_some());
}

#[test]
fn namespace_membership_is_strict_segment_prefix() {
    let descriptor = Widget::descriptor();
    let own = descriptor.module_path();
    assert!(descriptor.is_in_module(own).unwrap());
    // The fixture module sits under the integration test crate root.
    assert!(descriptor.is_in_module("integration").unwrap());
    assert!(!descriptor.is_in_module(&format!("{own}::deeper")).unwrap());
    // A sibling sharing a textual prefix must not match.
    let clipped = &own[..own.len() - 1];
    assert!(!descriptor.is_in_module(clipped).unwrap());
}

#[test]
fn types_in_module_matches_every_fixture() {
    let types = registry().types_in_module("integration::fixtures").unwrap();
    assert_eq!(types.len(), registry().types().count());
}

#[test]
fn constants_enumerate_with_visibility_filter() {
    let descriptor = Widget::descriptor();
    let all: Vec<_> = descriptor.constants(None).map(|c| c.name()).collect();
    assert_eq!(all, vec!["MAX_SIZE", "LABEL", "INTERNAL_REVISION"]);

    let public: Vec<_> = descriptor
        .constants(Some(Visibility::Public))
        .map(|c| c.name())
        .collect();
    assert_eq!(public, vec!["MAX_SIZE", "LABEL"]);
}

#[test]
fn constant_values_filter_by_type() {
    let descriptor = Widget::descriptor();
    assert_eq!(
        descriptor.constant_values::<i32>(None),
        vec![WIDGET_MAX_SIZE, 7]
    );
    assert_eq!(
        descriptor.constant_values::<i32>(Some(Visibility::Public)),
        vec![WIDGET_MAX_SIZE]
    );
    assert_eq!(
        descriptor.constant_values::<&'static str>(None),
        vec!["widget"]
    );
}

#[test]
fn test_type_predicate_uses_name_suffix_and_kind() {
    assert!(ParserTests::descriptor().is_test_type());
    assert!(!Widget::descriptor().is_test_type());
    assert_eq!(Color::descriptor().kind(), TypeKind::Enum);
    assert!(!Color::descriptor().is_test_type());

    let fixture = ParserTests { count: 3 };
    assert_eq!(
        mirror::property_value_as::<u32>(&fixture, "count").unwrap(),
        &3
    );
}

#[test]
fn registry_summary_serializes() {
    let summary = views::registry_summary(registry());
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["name"], "fixtures");
    assert_eq!(json["version"], "2.3.0");
    let types = json["types"].as_array().unwrap();
    assert_eq!(types.len(), registry().types().count());
    let widget = types
        .iter()
        .find(|t| t["name"] == "Widget")
        .expect("Widget summary present");
    let serial = widget["properties"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == "serial")
        .expect("serial property present");
    assert_eq!(serial["writable"], false);
    assert_eq!(serial["has_backing"], true);
    let resources = json["resources"].as_array().unwrap();
    assert!(resources
        .iter()
        .any(|r| r["name"] == "fixtures.data.ghost.bin" && r["size"].is_null()));
}

struct NamespaceProbe;

impl Described for NamespaceProbe {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: Lazy<TypeDescriptor> = Lazy::new(|| {
            TypeDescriptor::builder::<NamespaceProbe>("NamespaceProbe", "probe").build()
        });
        &DESCRIPTOR
    }
}

impl_reflect!(NamespaceProbe);

#[test]
fn namespace_probe_descriptor_defaults() {
    use mirror::Reflect;
    let probe = NamespaceProbe;
    assert_eq!(probe.descriptor().name(), "NamespaceProbe");
    assert_eq!(probe.descriptor().module_path(), "probe");
}

/// Builds a probe descriptor rooted at `path` and runs the namespace test.
fn is_in_namespace(path: &str, namespace: &str) -> bool {
    let path: &'static str = Box::leak(path.to_string().into_boxed_str());
    TypeDescriptor::builder::<NamespaceProbe>("NamespaceProbe", path)
        .build()
        .is_in_module(namespace)
        .unwrap()
}

proptest! {
    #[test]
    fn namespace_matches_itself(ns in "[a-z]{1,6}(::[a-z]{1,6}){0,3}") {
        prop_assert!(is_in_namespace(&ns, &ns));
    }

    #[test]
    fn nested_module_matches_parent(
        ns in "[a-z]{1,6}(::[a-z]{1,6}){0,3}",
        child in "[a-z]{1,6}",
    ) {
        let nested = format!("{ns}::{child}");
        prop_assert!(is_in_namespace(&nested, &ns));
        // The parent never matches the nested namespace.
        prop_assert!(!is_in_namespace(&ns, &nested));
    }

    #[test]
    fn textual_prefix_without_separator_never_matches(
        ns in "[a-z]{1,6}(::[a-z]{1,6}){0,3}",
        suffix in "[a-z]{1,6}",
    ) {
        let sibling = format!("{ns}{suffix}");
        prop_assert!(!is_in_namespace(&sibling, &ns));
    }
}
