use serde_json::json;
use toml_tree::{parse, to_string, Document, Table, Value};

#[test]
fn test_document_to_json() {
    let doc = parse(concat!(
        "title = \"TOML Example\"\n",
        "when = 1979-05-27T07:32:00-08:00\n",
        "[database]\n",
        "ports = [ 8000, 8001 ]\n",
        "enabled = true\n",
        "ratio = 0.5\n",
    ))
    .unwrap();

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        json,
        json!({
            "title": "TOML Example",
            "when": "1979-05-27T07:32:00-08:00",
            "database": {
                "ports": [8000, 8001],
                "enabled": true,
                "ratio": 0.5
            }
        })
    );
}

#[test]
fn test_json_keeps_insertion_order() {
    let doc = parse("zebra = 1\napple = 2\nmango = 3\n").unwrap();
    assert_eq!(
        serde_json::to_string(&doc).unwrap(),
        r#"{"zebra":1,"apple":2,"mango":3}"#
    );
}

#[test]
fn test_document_from_json() {
    let doc: Document = serde_json::from_str(
        r#"{"name": "Orange", "physical": {"color": "orange", "shape": "round"}, "sizes": [1, 2]}"#,
    )
    .unwrap();

    assert_eq!(doc.len(), 3);
    assert_eq!(doc.get_string("physical.shape").unwrap(), "round");
    assert_eq!(
        to_string(&doc).unwrap(),
        "name = \"Orange\"\nphysical = { color = \"orange\", shape = \"round\" }\nsizes = [ 1, 2 ]\n"
    );
}

#[test]
fn test_value_and_table_from_json() {
    let value: Value = serde_json::from_str("[1, \"two\", 3.0, false]").unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 4);
    assert_eq!(array.get(1).and_then(Value::as_str), Some("two"));
    assert_eq!(array.get(2).and_then(Value::as_float), Some(3.0));

    let table: Table = serde_json::from_str(r#"{"a": {"b": 1}}"#).unwrap();
    assert_eq!(table.get_long("a.b").unwrap(), 1);
}

#[test]
fn test_unrepresentable_json_is_rejected() {
    assert!(serde_json::from_str::<Value>("18446744073709551615").is_err());
    assert!(serde_json::from_str::<Value>("null").is_err());
    assert!(serde_json::from_str::<Document>(r#"{"a": null}"#).is_err());
    assert!(serde_json::from_str::<Document>("[1, 2]").is_err());
}

#[test]
fn test_json_round_trip_through_toml() {
    let original = json!({
        "package": {
            "name": "demo",
            "version": "0.1.0",
            "edition": "2021",
            "authors": ["someone"]
        },
        "features": {"default": []}
    });

    let doc: Document = serde_json::from_value(original.clone()).unwrap();
    let toml = to_string(&doc).unwrap();
    let back = parse(&toml).unwrap();
    assert_eq!(serde_json::to_value(&back).unwrap(), original);
}
