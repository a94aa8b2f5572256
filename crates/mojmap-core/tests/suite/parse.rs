use mojmap_core::{parse_mappings, Error, FieldEntry, MalformedReason, MappingIndex, MethodOverload};
use pretty_assertions::assert_eq;

const ENTITY: &str = "\
# compiler: R8
# pg_map_id: 53a5bb6
net.minecraft.world.entity.Entity -> bsr:
    java.util.concurrent.atomic.AtomicInteger ENTITY_COUNTER -> a
    int id -> b
    1:1:void <init>(net.minecraft.world.entity.EntityType,net.minecraft.world.level.Level) -> <init>
    2:2:void <clinit>() -> <clinit>
    10:12:java.lang.String getName() -> c
    13:13:boolean hurt(net.minecraft.world.damagesource.DamageSource,float) -> a
    14:14:boolean hurt(float) -> a
    java.lang.Object id -> d
net.minecraft.world.entity.EntityType -> bsx:
    java.lang.String toString() -> toString
";

fn overload(obfuscated: &str, argument_types: &[&str], return_type: &str) -> MethodOverload {
    MethodOverload {
        obfuscated: obfuscated.to_string(),
        argument_types: argument_types.iter().map(|s| s.to_string()).collect(),
        return_type: return_type.to_string(),
    }
}

#[test]
fn parses_concrete_scenario() {
    let index = parse_mappings(
        "a.b.C -> x:\n    int fieldOne -> f\n    java.lang.String method(int,java.lang.String) -> m\n",
    )
    .unwrap();

    let json = serde_json::to_value(&index).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "a.b.C": {
                "obfuscated": "x",
                "fields": { "fieldOne": { "obfuscated": "f", "type": "int" } },
                "methods": {
                    "method": [{
                        "obfuscated": "m",
                        "argumentTypes": ["int", "String"],
                        "returnType": "String",
                    }],
                },
            },
        })
    );
}

#[test]
fn initializers_never_become_methods() {
    let index = parse_mappings(ENTITY).unwrap();
    for (_, class) in index.iter() {
        assert!(!class.methods.contains_key("<init>"));
        assert!(!class.methods.contains_key("<clinit>"));
    }
}

#[test]
fn overloads_accumulate_in_declaration_order() {
    let index = parse_mappings(ENTITY).unwrap();
    let entity = index.get("net.minecraft.world.entity.Entity").unwrap();
    assert_eq!(
        entity.overloads("hurt"),
        &[
            overload(
                "a",
                &["net.minecraft.world.damagesource.DamageSource", "float"],
                "boolean"
            ),
            overload("a", &["float"], "boolean"),
        ]
    );
    assert_eq!(entity.overloads("getName"), &[overload("c", &[], "String")]);
}

#[test]
fn later_field_wins() {
    let index = parse_mappings(ENTITY).unwrap();
    let entity = index.get("net.minecraft.world.entity.Entity").unwrap();
    assert_eq!(
        entity.field("id"),
        Some(&FieldEntry {
            obfuscated: "d".to_string(),
            ty: "Object".to_string(),
        })
    );
    assert_eq!(
        entity.fields.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["ENTITY_COUNTER", "id"]
    );
}

#[test]
fn class_order_follows_source() {
    let index = parse_mappings(ENTITY).unwrap();
    assert_eq!(
        index.class_names().collect::<Vec<_>>(),
        vec![
            "net.minecraft.world.entity.Entity",
            "net.minecraft.world.entity.EntityType"
        ]
    );
    let stats = index.stats();
    assert_eq!((stats.classes, stats.methods, stats.fields), (2, 4, 2));
    assert_eq!(
        index.find_by_obfuscated("bsx").map(|(name, _)| name),
        Some("net.minecraft.world.entity.EntityType")
    );
}

#[test]
fn reparse_is_deterministic() {
    let first = parse_mappings(ENTITY).unwrap();
    let second = parse_mappings(ENTITY).unwrap();
    assert_eq!(first, second);
}

#[test]
fn json_round_trip_preserves_index() {
    let index = parse_mappings(ENTITY).unwrap();
    let json = serde_json::to_string(&index).unwrap();
    let decoded: MappingIndex = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, index);
}

#[test]
fn malformed_lines_report_position_and_reason() {
    let cases = [
        ("Foo -> a:\n    int -> b\n", 2, MalformedReason::InvalidField),
        ("Foo -> a:\n\n    void f(int,) -> b\n", 3, MalformedReason::InvalidMethod),
        ("Foo a:\n", 1, MalformedReason::InvalidClassHeader),
        ("Foo -> a:\n   \t \n    int x -> b\n", 2, MalformedReason::InvalidClassHeader),
        ("    int x -> a\nFoo -> a:\n", 1, MalformedReason::MemberBeforeClass),
    ];

    for (text, expected_line, expected_reason) in cases {
        match parse_mappings(text) {
            Err(Error::MalformedLine {
                line_number,
                line,
                reason,
            }) => {
                assert_eq!(line_number, expected_line, "input: {text:?}");
                assert_eq!(reason, expected_reason, "input: {text:?}");
                assert_eq!(
                    line,
                    text.lines().nth(expected_line - 1).unwrap(),
                    "input: {text:?}"
                );
            }
            other => panic!("expected malformed line for {text:?}, got {other:?}"),
        }
    }
}

#[test]
fn error_message_names_the_line() {
    let err = parse_mappings("Foo -> a:\n    garbage\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed mapping line 2 (invalid field mapping): \"    garbage\""
    );
}

#[test]
fn empty_input_yields_empty_index() {
    let index = parse_mappings("").unwrap();
    assert!(index.is_empty());
    let index = parse_mappings("# only a comment\n\n").unwrap();
    assert!(index.is_empty());
}
