//! End-to-end property accessor behavior against the fixture model.

use crate::fixtures::{sample_order, Color, Widget};
use mirror::{
    property_value, property_value_as, property_value_as_with, property_value_with, Case,
    ReflectError, ReflectExt, Value,
};

#[test]
fn read_equals_direct_field_access() {
    let widget = Widget::new("gear");
    assert_eq!(
        property_value_as::<String>(&widget, "name").unwrap(),
        &widget.name
    );
    assert_eq!(property_value_as::<i32>(&widget, "size").unwrap(), &widget.size);
}

#[test]
fn read_non_public_property() {
    let widget = Widget::new("gear");
    assert_eq!(
        property_value_as::<String>(&widget, "secret").unwrap(),
        widget.secret()
    );
}

#[test]
fn read_unknown_property_fails_with_not_found() {
    let widget = Widget::new("gear");
    let err = property_value(&widget, "weight").unwrap_err();
    match err {
        ReflectError::PropertyNotFound {
            type_name,
            property,
        } => {
            assert_eq!(type_name, "Widget");
            assert_eq!(property, "weight");
        }
        other => panic!("expected PropertyNotFound, got {other:?}"),
    }
}

#[test]
fn read_empty_path_is_invalid_argument() {
    let widget = Widget::new("gear");
    assert!(matches!(
        property_value(&widget, ""),
        Err(ReflectError::InvalidArgument(_))
    ));
}

#[test]
fn read_with_case_insensitive_lookup() {
    let widget = Widget::new("gear");
    assert!(property_value_with(&widget, "NAME", Case::Sensitive).is_err());
    assert_eq!(
        property_value_as_with::<String>(&widget, "NAME", Case::Insensitive).unwrap(),
        "gear"
    );
}

#[test]
fn dotted_path_matches_stepwise_reads() {
    let order = sample_order();
    let direct = property_value_as::<String>(&order, "customer.address.city").unwrap();
    let customer = property_value(&order, "customer").unwrap();
    let stepwise = property_value_as::<String>(customer, "address.city").unwrap();
    assert_eq!(direct, stepwise);
    assert_eq!(direct, "Osby");
}

#[test]
fn dotted_path_case_insensitive() {
    let order = sample_order();
    assert_eq!(
        property_value_as_with::<String>(&order, "Customer.Address.City", Case::Insensitive)
            .unwrap(),
        "Osby"
    );
}

#[test]
fn dotted_path_through_none_fails_with_null_segment() {
    let order = sample_order();
    let err = property_value(&order, "customer.fallback.city").unwrap_err();
    match err {
        ReflectError::NullSegment { segment, .. } => assert_eq!(segment, "city"),
        other => panic!("expected NullSegment, got {other:?}"),
    }
}

#[test]
fn dotted_path_through_some_unwraps() {
    let mut order = sample_order();
    order.customer.fallback = Some(crate::fixtures::Address {
        city: "Lund".to_string(),
        zip: "22100".to_string(),
    });
    assert_eq!(
        property_value_as::<String>(&order, "customer.fallback.city").unwrap(),
        "Lund"
    );
}

#[test]
fn optional_leaf_read_unwraps_some() {
    let mut widget = Widget::new("gear");
    widget.note = Some("fragile".to_string());
    assert_eq!(
        property_value_as::<String>(&widget, "note").unwrap(),
        "fragile"
    );
}

#[test]
fn typed_read_with_wrong_type_fails() {
    let widget = Widget::new("gear");
    assert!(matches!(
        property_value_as::<i32>(&widget, "name"),
        Err(ReflectError::TypeMismatch { .. })
    ));
}

#[test]
fn set_then_get_round_trip() {
    let mut widget = Widget::new("gear");
    widget
        .set_property("name", Value::from("cog"))
        .unwrap();
    assert_eq!(property_value_as::<String>(&widget, "name").unwrap(), "cog");

    widget.set_property("size", Value::boxed(9i32)).unwrap();
    assert_eq!(widget.size, 9);
}

#[test]
fn set_exact_rejects_mismatched_value() {
    let mut widget = Widget::new("gear");
    // Int carries i64; the field is i32, so exact assignment refuses it.
    let err = widget.set_property("size", Value::Int(9)).unwrap_err();
    assert!(matches!(err, ReflectError::TypeMismatch { .. }));
}

#[test]
fn set_unknown_property_fails_with_not_found() {
    let mut widget = Widget::new("gear");
    assert!(matches!(
        widget.set_property("weight", Value::Int(1)),
        Err(ReflectError::PropertyNotFound { .. })
    ));
}

#[test]
fn set_readonly_property_fails_with_not_writable() {
    let mut widget = Widget::new("gear");
    let err = widget
        .set_property("serial", Value::UInt(5))
        .unwrap_err();
    match err {
        ReflectError::PropertyNotWritable {
            type_name,
            property,
        } => {
            assert_eq!(type_name, "Widget");
            assert_eq!(property, "serial");
        }
        other => panic!("expected PropertyNotWritable, got {other:?}"),
    }
}

#[test]
fn set_with_case_insensitive_lookup() {
    let mut widget = Widget::new("gear");
    widget
        .set_property_with("Name", Value::from("axle"), Case::Insensitive)
        .unwrap();
    assert_eq!(widget.name, "axle");
}

#[test]
fn coerced_set_converts_narrowing_integer() {
    let mut widget = Widget::new("gear");
    widget
        .set_property_coerced("size", Value::Int(12))
        .unwrap();
    assert_eq!(widget.size, 12);
}

#[test]
fn coerced_set_parses_string_into_integer() {
    let mut widget = Widget::new("gear");
    widget
        .set_property_coerced("size", Value::from("21"))
        .unwrap();
    assert_eq!(widget.size, 21);
}

#[test]
fn coerced_set_stringifies_for_string_target() {
    let mut widget = Widget::new("gear");
    widget
        .set_property_coerced("name", Value::Int(404))
        .unwrap();
    assert_eq!(widget.name, "404");
}

#[test]
fn coerced_set_parses_enum_by_variant_name() {
    let mut widget = Widget::new("gear");
    widget
        .set_property_coerced("color", Value::from("Blue"))
        .unwrap();
    assert_eq!(widget.color, Color::Blue);

    let err = widget
        .set_property_coerced("color", Value::from("Magenta"))
        .unwrap_err();
    assert!(matches!(err, ReflectError::TypeMismatch { .. }));
}

#[test]
fn coerced_set_null_only_for_optional_fields() {
    let mut widget = Widget::new("gear");
    widget.note = Some("x".to_string());
    widget
        .set_property_coerced("note", Value::Null)
        .unwrap();
    assert_eq!(widget.note, None);

    let err = widget
        .set_property_coerced("size", Value::Null)
        .unwrap_err();
    assert!(matches!(err, ReflectError::TypeMismatch { .. }));
}

#[test]
fn coerced_set_wraps_value_into_optional_field() {
    let mut widget = Widget::new("gear");
    widget
        .set_property_coerced("note", Value::from("careful"))
        .unwrap();
    assert_eq!(widget.note.as_deref(), Some("careful"));
}

#[test]
fn coerced_set_conversion_failure_propagates() {
    let mut widget = Widget::new("gear");
    assert!(matches!(
        widget.set_property_coerced("size", Value::from("not-a-number")),
        Err(ReflectError::TypeMismatch { .. })
    ));
}

#[test]
fn lenient_set_ignores_absent_and_readonly_properties() {
    let mut widget = Widget::new("gear");
    widget
        .set_property_lenient("weight", Value::Int(1))
        .unwrap();
    widget
        .set_property_lenient("serial", Value::UInt(1))
        .unwrap();
    assert_eq!(widget.serial(), 0);

    // Writable property with a failing conversion still errors.
    assert!(widget
        .set_property_lenient("size", Value::from("oops"))
        .is_err());

    widget.set_property_lenient("size", Value::Int(3)).unwrap();
    assert_eq!(widget.size, 3);
}

#[test]
fn backing_field_write_bypasses_missing_setter() {
    let mut widget = Widget::new("gear");
    widget
        .set_backing_field("serial", Value::boxed(42u64))
        .unwrap();
    assert_eq!(widget.serial(), 42);
}

#[test]
fn backing_field_write_on_regular_property_fails() {
    let mut widget = Widget::new("gear");
    let err = widget
        .set_backing_field("name", Value::from("x"))
        .unwrap_err();
    assert!(matches!(err, ReflectError::BackingFieldNotFound { .. }));
}

#[test]
fn backing_field_write_on_unknown_property_fails() {
    let mut widget = Widget::new("gear");
    assert!(matches!(
        widget.set_backing_field("weight", Value::UInt(1)),
        Err(ReflectError::PropertyNotFound { .. })
    ));
}

#[test]
fn static_property_read() {
    let name: String = mirror::static_property_value(
        <Widget as mirror::Described>::descriptor(),
        "default_name",
        Case::Sensitive,
    )
    .unwrap();
    assert_eq!(name, "unnamed");
}

#[test]
fn static_property_read_case_insensitive_and_missing() {
    let descriptor = <Widget as mirror::Described>::descriptor();
    let name: String =
        mirror::static_property_value(descriptor, "DEFAULT_NAME", Case::Insensitive).unwrap();
    assert_eq!(name, "unnamed");
    assert!(matches!(
        mirror::static_property_value::<String>(descriptor, "missing", Case::Sensitive),
        Err(ReflectError::PropertyNotFound { .. })
    ));
}

#[test]
fn invoke_method_with_return_value() {
    let mut widget = Widget::new("gear");
    let out = widget.invoke("describe", Vec::new()).unwrap().unwrap();
    assert_eq!(*out.downcast::<String>().unwrap(), "gear (1)");
}

#[test]
fn invoke_non_public_method_with_argument() {
    let mut widget = Widget::new("gear");
    let previous = widget
        .invoke("rename", vec![Value::from("sprocket")])
        .unwrap()
        .unwrap();
    assert_eq!(*previous.downcast::<String>().unwrap(), "gear");
    assert_eq!(widget.name, "sprocket");
}

#[test]
fn invoke_unit_method_returns_none() {
    let mut widget = Widget::new("gear");
    widget.note = Some("x".to_string());
    let out = widget.invoke("clear_note", Vec::new()).unwrap();
    assert!(out.is_none());
    assert_eq!(widget.note, None);
}

#[test]
fn invoke_unknown_method_fails() {
    let mut widget = Widget::new("gear");
    assert!(matches!(
        widget.invoke("explode", Vec::new()),
        Err(ReflectError::MethodNotFound { .. })
    ));
}

#[test]
fn invoke_with_wrong_arity_fails() {
    let mut widget = Widget::new("gear");
    assert!(matches!(
        widget.invoke("describe", vec![Value::Int(1)]),
        Err(ReflectError::InvalidArgument(_))
    ));
}

#[test]
fn nested_write_through_resolved_segment() {
    let mut order = sample_order();
    // Resolve the nested value, then write through its own descriptor.
    use mirror::Reflect;
    let customer = order
        .customer
        .as_reflect_mut();
    mirror::set_property(customer, "name", Value::from("Grace"), Case::Sensitive).unwrap();
    assert_eq!(order.customer.name, "Grace");
}
