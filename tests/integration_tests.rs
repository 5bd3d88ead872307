use chrono::{Datelike, Timelike};
use toml_tree::{
    from_str, parse, to_string, to_string_with_options, Array, Document, Error, Table, TomlOptions,
    Value, ValueKind,
};

const CANONICAL: &str = r#"# This is a TOML document
title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00 # First class dates
path = 'C:\Users\tom'

[database]
server = "192.168.1.1"
ports = [ 8000, 8001, 8002 ]
connection_max = 5000
enabled = true
temp_targets = { cpu = 79.5, case = 72.0 }

[[products]]
name = "Hammer"
sku = 738594937

[[products]]
name = "Nail"
sku = 284758393
color = "gray"
"#;

fn table_of(entries: &[(&str, i64)]) -> Table {
    entries
        .iter()
        .map(|(key, value)| (*key, Value::from(*value)))
        .collect()
}

#[test]
fn test_end_to_end_orange() {
    let doc = parse("name = \"Orange\"\n[physical]\ncolor = \"orange\"\nshape = \"round\"\n").unwrap();

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get_string("name").unwrap(), "Orange");

    let physical = doc.get_sub_table("physical").unwrap();
    assert_eq!(physical.len(), 2);
    assert_eq!(physical.get_string("color").unwrap(), "orange");
    assert_eq!(physical.get_string("shape").unwrap(), "round");
}

#[test]
fn test_comment_attachment() {
    let doc = parse("# c1\nkey = \"v\" # c2\nplain = 1\n").unwrap();

    let key = doc.get_value("key").unwrap();
    assert_eq!(key.as_str(), Some("v"));
    assert_eq!(key.preceding_comment(), Some("c1"));
    assert_eq!(key.inline_comment(), Some("c2"));

    let plain = doc.get_value("plain").unwrap();
    assert_eq!(plain.preceding_comment(), None);
    assert_eq!(plain.inline_comment(), None);
}

#[test]
fn test_multi_line_preceding_comment() {
    let doc = parse("# first\n# second\nkey = 1\n").unwrap();
    assert_eq!(
        doc.get_value("key").unwrap().preceding_comment(),
        Some("first\nsecond")
    );
}

#[test]
fn test_inline_threshold() {
    let mut doc = Document::new();
    doc.put("t", table_of(&[("a", 1), ("b", 2), ("c", 3)])).unwrap();
    assert_eq!(to_string(&doc).unwrap(), "t = { a = 1, b = 2, c = 3 }\n");

    let mut doc = Document::new();
    doc.put("t", table_of(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]))
        .unwrap();
    assert_eq!(
        to_string(&doc).unwrap(),
        "[t]\na = 1\nb = 2\nc = 3\nd = 4\n"
    );
}

#[test]
fn test_inline_threshold_exceptions() {
    let mut doc = Document::new();
    doc.put("t", table_of(&[("my key", 1)])).unwrap();
    assert_eq!(to_string(&doc).unwrap(), "[t]\n\"my key\" = 1\n");

    let mut commented = Value::from(1);
    commented.set_preceding_comment(Some("note"));
    let mut table = Table::new();
    table.put_value("a", commented).unwrap();
    let mut doc = Document::new();
    doc.put("t", table).unwrap();
    assert_eq!(to_string(&doc).unwrap(), "[t]\n# note\na = 1\n");

    let mut outer = Table::new();
    outer.put("inner", table_of(&[("x", 1)])).unwrap();
    let mut doc = Document::new();
    doc.put("t", outer).unwrap();
    assert_eq!(to_string(&doc).unwrap(), "[t]\ninner = { x = 1 }\n");
}

#[test]
fn test_custom_threshold() {
    let doc = parse("point = { x = 1, y = 2 }\n").unwrap();
    let options = TomlOptions::new().with_inline_table_threshold(2);
    assert_eq!(
        to_string_with_options(&doc, &options).unwrap(),
        "[point]\nx = 1\ny = 2\n"
    );
}

#[test]
fn test_redefinition_rejection() {
    let err = parse("a = 1\na = 2").unwrap_err();
    assert!(matches!(err, Error::KeyRedefinition { line: 2, .. }));
    assert_eq!(err.line(), Some(2));

    let err = parse("[a]\n[a]").unwrap_err();
    assert!(matches!(err, Error::TableRedefinition { .. }));
}

#[test]
fn test_date_disambiguation() {
    let doc = parse(
        "date = 1979-05-27\ntime = 07:32:00\nlocal = 1979-05-27T07:32:00\nutc = 1979-05-27T07:32:00Z\noffset = 1979-05-27T07:32:00-07:00\n",
    )
    .unwrap();

    let date = doc.get_value("date").unwrap().as_local_date().unwrap();
    assert_eq!((date.year(), date.month(), date.day()), (1979, 5, 27));

    let time = doc.get_value("time").unwrap().as_local_time().unwrap();
    assert_eq!((time.hour(), time.minute(), time.second()), (7, 32, 0));

    assert!(matches!(
        doc.get_value("local").unwrap().kind(),
        ValueKind::LocalDateTime(_)
    ));

    let utc = doc.get_value("utc").unwrap().as_offset_date_time().unwrap();
    assert_eq!(utc.offset().local_minus_utc(), 0);

    let offset = doc.get_value("offset").unwrap();
    let date_time = offset.as_offset_date_time().unwrap();
    assert_eq!(date_time.offset().local_minus_utc(), -7 * 3600);
    assert_eq!(date_time.hour(), 7);
    assert_eq!(offset.serialized_text().unwrap(), "1979-05-27T07:32:00-07:00");
}

#[test]
fn test_string_escaping_round_trip() {
    let content = "I'm a string. \"You can quote me\".";
    let mut doc = Document::new();
    doc.put("quote", content).unwrap();

    let toml = to_string(&doc).unwrap();
    assert_eq!(toml, "quote = \"I'm a string. \\\"You can quote me\\\".\"\n");

    let back = parse(&toml).unwrap();
    assert_eq!(back.get_string("quote").unwrap(), content);
}

#[test]
fn test_string_styles_survive() {
    let input = "path = 'C:\\Users\\nodejs\\templates'\nregex = '<\\i\\c*\\s*>'\n";
    let doc = parse(input).unwrap();
    assert_eq!(doc.get_string("path").unwrap(), "C:\\Users\\nodejs\\templates");
    assert_eq!(to_string(&doc).unwrap(), input);
}

#[test]
fn test_illegal_inline_table_newline() {
    assert_eq!(
        parse("t = { a = 1\n }").unwrap_err(),
        Error::NewlineInInlineTable { line: 1 }
    );
    assert_eq!(
        parse("a = 1\nt = { a = 1\n }\nb = 2\n").unwrap_err(),
        Error::NewlineInInlineTable { line: 2 }
    );
    assert_eq!(
        parse("t = { inner = { a = 1\n } }").unwrap_err(),
        Error::NewlineInInlineTable { line: 1 }
    );
}

#[test]
fn test_round_trip_idempotence() {
    let doc = parse(CANONICAL).unwrap();
    assert_eq!(to_string(&doc).unwrap(), CANONICAL);

    let products = doc.get_array("products").unwrap();
    assert!(products.is_table_array());
    assert_eq!(products.len(), 2);
    assert_eq!(
        doc.get_value("owner.dob").unwrap().inline_comment(),
        Some("First class dates")
    );
}

#[test]
fn test_serialization_reaches_fixed_point() {
    let messy = "a={x=1,y.z=2}\n\n\n\nb   =   [1,2,  3]\n[c.d]\ne='f'\n[[g]]\n[[g]]\nh=1979-05-27 07:32:00\n";
    let first = to_string(&parse(messy).unwrap()).unwrap();
    let second = to_string(&parse(&first).unwrap()).unwrap();
    assert_eq!(first, second);
    assert_eq!(parse(messy).unwrap(), parse(&first).unwrap());
}

#[test]
fn test_edit_and_save() {
    let mut doc = from_str("# settings\n[server]\nhost = \"localhost\"\nport = 8080\n").unwrap();

    let server = doc
        .get_mut("server")
        .and_then(Value::as_table_mut)
        .unwrap();
    server.put("port", 9090).unwrap();
    server.put("tls", true).unwrap();
    server.put("workers", 8).unwrap();

    assert_eq!(
        to_string(&doc).unwrap(),
        "# settings\n[server]\nhost = \"localhost\"\nport = 9090\ntls = true\nworkers = 8\n"
    );
}

#[test]
fn test_typed_getters() {
    let doc = parse("[limits]\nsmall = 7\nbig = 3000000000\nratio = 0.5\non = true\nlist = [1]\n").unwrap();

    assert_eq!(doc.get_integer("limits.small").unwrap(), 7);
    assert!(matches!(
        doc.get_integer("limits.big"),
        Err(Error::IntegerOutOfRange { .. })
    ));
    assert_eq!(doc.get_long("limits.big").unwrap(), 3_000_000_000);
    assert_eq!(doc.get_float("limits.ratio").unwrap(), 0.5);
    assert!(doc.get_boolean("limits.on").unwrap());
    assert_eq!(doc.get_array("limits.list").unwrap().len(), 1);
    assert!(matches!(
        doc.get_string("limits.small"),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        doc.get_value("limits.missing"),
        Err(Error::MissingKey { .. })
    ));
}

#[test]
fn test_inline_tables_cannot_be_changed_after_parsing() {
    let mut doc = parse("point = { x = 1 }").unwrap();
    let point = doc.get_mut("point").and_then(Value::as_table_mut).unwrap();
    assert!(matches!(
        point.put("y", 2),
        Err(Error::TableLocked { .. })
    ));
    assert!(point.get_mut("x").is_none());
    assert!(matches!(point.remove("x"), Err(Error::TableLocked { .. })));
    assert_eq!(doc.get_long("point.x").unwrap(), 1);

    let mut doc = parse("outer = { inner = { x = 1 } }").unwrap();
    let outer = doc.get_mut("outer").and_then(Value::as_table_mut).unwrap();
    assert!(outer.get_mut("inner").is_none());
    assert_eq!(doc.get_long("outer.inner.x").unwrap(), 1);
}

#[test]
fn test_non_ascii_digits_in_dates_are_rejected() {
    assert!(parse("t = 07:32:00.\u{0665}\n").is_err());
    assert!(parse("t = 1979-05-27T07:32:0\u{0665}\n").is_err());
    assert!(parse("t = 1979-05-\u{0662}7\n").is_err());
}

#[test]
fn test_deep_nesting_is_an_error_not_a_crash() {
    let input = format!("a = {}{}", "[".repeat(20_000), "]".repeat(20_000));
    assert!(matches!(
        parse(&input),
        Err(Error::NestingTooDeep { line: 1 })
    ));

    let input = format!("a = {}1{}", "{ b = ".repeat(5_000), " }".repeat(5_000));
    assert!(matches!(
        parse(&input),
        Err(Error::NestingTooDeep { line: 1 })
    ));
}

#[test]
fn test_table_array_from_api() {
    let mut fruit = Array::new_table_array();
    fruit.push(Table::from_iter([("name", Value::from("apple"))]));
    fruit.push(Table::from_iter([("name", Value::from("banana"))]));

    let mut doc = Document::new();
    doc.put("fruit", fruit).unwrap();
    assert_eq!(
        to_string(&doc).unwrap(),
        "[[fruit]]\nname = \"apple\"\n\n[[fruit]]\nname = \"banana\"\n"
    );
}

#[test]
fn test_trailing_comment_round_trip() {
    let input = "a = 1\n# closing remark\n# second line\n";
    let doc = parse(input).unwrap();
    assert_eq!(doc.trailing_comment(), Some("closing remark\nsecond line"));
    assert_eq!(to_string(&doc).unwrap(), input);
}
