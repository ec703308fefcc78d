use parqset_core::{
    FieldType, ObjectRow, RawFieldSpec, RowCodec, RowError, Schema, TimeUnit, TypeCatalog, Value,
};

fn id_name_schema() -> Schema {
    let catalog = TypeCatalog::new(
        [("INT32", FieldType::Int32), ("UTF8", FieldType::Utf8)],
        [("MILLI", TimeUnit::Milli)],
    );
    Schema::try_new(
        &catalog,
        [
            ("id", RawFieldSpec::new("INT32")),
            ("name", RawFieldSpec::new("UTF8")),
        ],
    )
    .unwrap()
}

fn object(pairs: &[(&str, Value)]) -> ObjectRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn to_array_follows_schema_order() {
    let schema = id_name_schema();
    let codec = RowCodec::new(&schema);
    let row = object(&[("name", Value::string("oatmeal")), ("id", Value::I32(7))]);

    assert_eq!(
        codec.to_array(&row),
        vec![Value::I32(7), Value::string("oatmeal")]
    );
}

#[test]
fn to_array_fills_missing_fields_with_null_and_ignores_extras() {
    let schema = id_name_schema();
    let codec = RowCodec::new(&schema);
    let row = object(&[("id", Value::I32(1)), ("extra", Value::Bool(true))]);

    assert_eq!(codec.to_array(&row), vec![Value::I32(1), Value::Null]);
}

#[test]
fn to_object_rejects_wrong_arity() {
    let schema = id_name_schema();
    let codec = RowCodec::new(&schema);

    for row in [vec![], vec![Value::I32(1)], vec![Value::I32(1), Value::Null, Value::Null]] {
        let actual = row.len();
        assert_eq!(
            codec.to_object(row),
            Err(RowError::Arity {
                expected: 2,
                actual
            })
        );
    }
}

#[test]
fn object_round_trips_through_array_form() {
    let schema = id_name_schema();
    let codec = RowCodec::new(&schema);
    let original = object(&[("id", Value::I32(3)), ("name", Value::string("rye"))]);

    let back = codec.to_object(codec.to_array(&original)).unwrap();
    assert_eq!(back, original);

    let array = vec![Value::I32(9), Value::Null];
    let once = codec.to_object(array).unwrap();
    let twice = codec.to_object(codec.to_array(&once)).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn codec_over_bare_column_names() {
    let names = vec!["a".to_string(), "b".to_string()];
    let codec = RowCodec::from_names(&names);
    let row = codec.to_object(vec![Value::U8(1), Value::U8(2)]).unwrap();
    assert_eq!(row.get("b"), Some(&Value::U8(2)));
    assert_eq!(codec.field_count(), 2);
}
