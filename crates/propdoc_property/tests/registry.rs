use std::any::TypeId;

use propdoc_property::{Properties, PropertyRegistry, serialize};
use serde_json::json;

#[derive(Properties, Default, Debug, PartialEq)]
#[properties(auto_register)]
struct Camera {
    fov: f32,
    target: Target,
}

#[derive(Properties, Default, Debug, PartialEq)]
struct Target {
    name: String,
}

#[derive(Properties, Default, Debug, PartialEq)]
struct Orphan {
    id: u32,
}

#[test]
fn unknown_type_is_missing_property_list() {
    let mut registry = PropertyRegistry::new();
    registry.register::<Camera>();

    let err = registry.serialize_dyn(&Orphan { id: 1 }).unwrap_err();
    assert!(err.is_missing_property_list());

    // The statically typed engine has no such failure.
    assert_eq!(serialize(&Orphan { id: 1 }).unwrap(), json!({ "id": 1 }));
}

#[test]
fn tagged_round_trip() {
    let mut registry = PropertyRegistry::new();
    registry.register::<Camera>();

    let camera = Camera {
        fov: 90.0,
        target: Target {
            name: "player".into(),
        },
    };

    let tagged = registry.serialize_tagged(&camera).unwrap();
    let path = std::any::type_name::<Camera>();
    assert_eq!(tagged[path]["target"]["name"], json!("player"));

    let restored = registry.deserialize_tagged(&tagged).unwrap();
    assert_eq!(restored.downcast_ref::<Camera>(), Some(&camera));
}

#[test]
fn registration_metadata() {
    let mut registry = PropertyRegistry::new();
    registry.register::<Camera>();

    assert!(registry.is_structured(TypeId::of::<Target>()));
    let camera = registry.get_with_type_name("Camera").unwrap();
    assert_eq!(camera.field_names(), ["fov", "target"]);
    assert!(camera.type_path().ends_with("::Camera"));
}

#[cfg(feature = "auto_register")]
#[test]
fn auto_register_collects_marked_types() {
    let mut registry = PropertyRegistry::new();
    if !registry.auto_register() {
        // Static collection is unavailable on this platform.
        return;
    }

    assert!(registry.contains(TypeId::of::<Camera>()));
    assert!(registry.contains(TypeId::of::<Target>()));
    assert!(!registry.contains(TypeId::of::<Orphan>()));

    // Repeated calls are no-ops.
    let len = registry.len();
    assert!(registry.auto_register());
    assert_eq!(registry.len(), len);
}
