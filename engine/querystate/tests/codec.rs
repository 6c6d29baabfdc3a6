use querystate::types::{array, boolean, float, int, literal, one_of, string, tuple};
use querystate::{
    defaults, equals, multiple, parse, scalar, scalar_with_default, schema, serialize,
    serialize_into, FieldValue, Preset, QueryParams, Record, Schema, Value,
};

fn every_kind() -> Schema {
    schema([
        ("q", scalar_with_default(string(), "")),
        ("page", scalar_with_default(int(), 1)),
        ("ratio", scalar_with_default(float(), 0.5)),
        ("desc", scalar_with_default(boolean(), false)),
        ("mode", scalar_with_default(literal(string(), "theirs"), "theirs")),
        ("sort", scalar_with_default(one_of(["date", "name"]), "date")),
        (
            "range",
            scalar_with_default(array(int(), ","), Value::array([1, 7])),
        ),
        ("at", scalar(tuple([("a", float()), ("b", float())], " "))),
        ("cursor", scalar(string())),
        ("tag", multiple(string())),
        ("id", multiple(int())),
    ])
}

fn all_schemas() -> Vec<Schema> {
    let mut schemas = vec![every_kind(), Schema::new()];
    schemas.extend(Preset::ALL.into_iter().map(Preset::schema));
    schemas
}

#[test]
fn serialized_defaults_are_empty() {
    for schema in all_schemas() {
        let params = serialize(&schema, &defaults(&schema));
        assert!(params.is_empty(), "{schema}: {params}");
    }
}

#[test]
fn parse_of_serialized_defaults_is_defaults() {
    for schema in all_schemas() {
        let reparsed = parse(&schema, &serialize(&schema, &defaults(&schema)));
        assert_eq!(reparsed, defaults(&schema), "{schema}");
        assert!(equals(&schema, &reparsed, &defaults(&schema)));
    }
}

#[test]
fn multiple_field_with_one_bad_occurrence_is_empty() {
    let schema = every_kind();
    let record = parse(&schema, &QueryParams::parse("id=1&id=x&id=3"));
    assert_eq!(record.get("id"), Some(&FieldValue::Multiple(Vec::new())));
}

#[test]
fn scalar_with_default_degrades_on_garbage() {
    let schema = schema([("n", scalar_with_default(int(), 7))]);
    let record = parse(&schema, &QueryParams::parse("n=notanumber"));
    assert_eq!(record.scalar("n"), Some(&Value::Int(7)));
}

#[test]
fn boolean_is_permissive() {
    assert_eq!(boolean().parse("false"), Some(Value::Bool(false)));
    assert_eq!(boolean().parse(""), Some(Value::Bool(false)));
}

#[test]
fn array_of_empty_string_is_empty() {
    assert_eq!(array(int(), ",").parse(""), Some(Value::Array(Vec::new())));
}

#[test]
fn tuple_arity_is_enforced() {
    let ty = tuple([("a", float()), ("b", float())], " ");
    assert_eq!(ty.parse("1.0"), None);
    assert_eq!(
        ty.parse("1.0 2.0"),
        Some(Value::tuple([("a", 1.0), ("b", 2.0)]))
    );
}

#[test]
fn equals_detects_any_single_change() {
    let schema = every_kind();
    let base = defaults(&schema);
    assert!(equals(&schema, &base, &base.clone()));

    let single_changes: Vec<Record> = vec![
        base.clone().with_scalar("q", "cons"),
        base.clone().with_scalar("page", 2),
        base.clone().with_scalar("ratio", 0.25),
        base.clone().with_scalar("desc", true),
        base.clone().with_scalar("sort", "name"),
        base.clone().with_scalar("range", Value::array([1, 8])),
        base.clone()
            .with_scalar("at", Value::tuple([("a", 0.0), ("b", 0.0)])),
        base.clone().with_scalar("cursor", ""),
        base.clone().with_multiple("tag", ["x"]),
        base.clone().with_multiple("id", [1, 2]),
    ];
    for changed in single_changes {
        assert!(!equals(&schema, &base, &changed), "{changed:?}");
    }
}

// Regression: a field that is equal must never short-circuit the comparison
// to `false`, and differing fields must never yield `true`.
#[test]
fn equals_is_not_inverted() {
    let schema = schema([
        ("a", scalar_with_default(int(), 0)),
        ("b", scalar_with_default(int(), 0)),
    ]);
    let zeros = defaults(&schema);
    let ones = Record::new().with_scalar("a", 1).with_scalar("b", 1);
    let mixed = Record::new().with_scalar("a", 0).with_scalar("b", 1);

    assert!(equals(&schema, &zeros, &zeros));
    assert!(!equals(&schema, &zeros, &ones));
    assert!(!equals(&schema, &zeros, &mixed));
}

#[test]
fn absent_scalar_is_not_written() {
    let schema = every_kind();
    let record = defaults(&schema).with_absent("cursor").with_absent("at");
    assert!(serialize(&schema, &record).is_empty());

    let record = defaults(&schema).with_scalar("cursor", "");
    assert_eq!(serialize(&schema, &record).to_query_string(), "cursor=");
}

#[test]
fn literal_serializes_constant() {
    let schema = schema([("tz", scalar(literal(string(), "yours")))]);
    let record = Record::new().with_scalar("tz", "mine");
    assert_eq!(serialize(&schema, &record).to_query_string(), "tz=yours");
}

#[test]
fn filter_and_layout_share_one_query_string() {
    let filter = Preset::Filter.schema();
    let map = Preset::Map.schema();

    let query = QueryParams::parse("q=fur&center=40.7+-74+11&maxDays=3&unrelated=1");
    let filter_state = parse(&filter, &query);
    let map_state = parse(&map, &query);

    let mut out = QueryParams::new();
    serialize_into(&filter, &filter_state, &mut out);
    serialize_into(&map, &map_state, &mut out);
    assert_eq!(out.to_query_string(), "q=fur&maxDays=3&center=40.7+-74+11");

    let list = Preset::List.schema();
    assert!(serialize(&list, &parse(&list, &query)).is_empty());
}

#[test]
fn malformed_queries_never_fail() {
    let schema = every_kind();
    for raw in [
        "",
        "?",
        "&&&",
        "=",
        "q",
        "%",
        "%zz=%ff",
        "page=&ratio=&desc=&range=&at=&id=",
        "range=1,,2&at=1+2+3&mode=yours&sort=size",
    ] {
        let record = parse(&schema, &QueryParams::parse(raw));
        assert_eq!(record.len(), schema.len(), "{raw}");
        let reparsed = parse(&schema, &serialize(&schema, &record));
        assert!(equals(&schema, &record, &reparsed), "{raw}");
    }
}

#[test]
fn preset_re_encoding_is_stable() {
    for raw in [
        "continents=XX+EU&minDays=0x2&maxDays=99999999999999999999",
        "continents=&q=%20&attending=yes&followed=1",
        "sort=followed&sort=date&desc=true",
        "center=1e3+-Infinity+0.10&inYourTimeZone=1",
        "center=1+2&continents=ZZ",
    ] {
        let params = QueryParams::parse(raw);
        for preset in Preset::ALL {
            let schema = preset.schema();
            let record = parse(&schema, &params);
            let encoded = serialize(&schema, &record);
            let reparsed = parse(&schema, &encoded);
            assert!(equals(&schema, &record, &reparsed), "{preset}: {raw}");
            assert_eq!(serialize(&schema, &reparsed), encoded, "{preset}: {raw}");
        }
    }
}
