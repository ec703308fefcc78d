use parqset_core::{
    FieldKind, FieldType, RawFieldSpec, Schema, SchemaError, TimeUnit, TypeCatalog,
};

fn catalog() -> TypeCatalog {
    TypeCatalog::new(
        [
            ("BOOL", FieldType::Bool),
            ("INT32", FieldType::Int32),
            ("INT64", FieldType::Int64),
            ("UTF8", FieldType::Utf8),
            ("STRING", FieldType::Utf8),
            ("FIXED_SIZE_BINARY", FieldType::FixedSizeBinary),
            ("DATE32", FieldType::Date32),
            ("TIMESTAMP", FieldType::Timestamp),
            ("TIME32", FieldType::Time32),
            ("TIME64", FieldType::Time64),
        ],
        [
            ("MILLI", TimeUnit::Milli),
            ("MICRO", TimeUnit::Micro),
            ("NANO", TimeUnit::Nano),
        ],
    )
}

#[test]
fn catalog_resolves_names_case_insensitively() {
    let catalog = catalog();
    assert_eq!(catalog.resolve("int32").unwrap(), FieldType::Int32);
    assert_eq!(catalog.resolve("STRING").unwrap(), FieldType::Utf8);
    assert_eq!(catalog.code_of("INT32").unwrap(), 7);
    assert_eq!(catalog.resolve_unit("micro").unwrap(), TimeUnit::Micro);
    assert!(catalog.resolve("DECIMAL128").is_err());
    assert!(catalog.resolve_unit("SECOND").is_err());
}

#[test]
fn field_type_codes_round_trip() {
    for t in FieldType::ALL {
        assert_eq!(FieldType::from_code(t.code()), Some(t));
    }
    for u in TimeUnit::ALL {
        assert_eq!(TimeUnit::from_code(u.code()), Some(u));
    }
    assert_eq!(FieldType::from_code(10), None);
}

#[test]
fn schema_preserves_declaration_order() {
    let schema = Schema::try_new(
        &catalog(),
        [
            ("id", RawFieldSpec::new("INT32")),
            ("name", RawFieldSpec::new("UTF8").nullable()),
            ("ts", RawFieldSpec::new("TIMESTAMP").with_unit("MILLI")),
            ("hash", RawFieldSpec::new("FIXED_SIZE_BINARY").with_width(16)),
        ],
    )
    .unwrap();

    assert_eq!(schema.field_order(), ["id", "name", "ts", "hash"]);
    assert_eq!(schema.field_count(), 4);
    assert_eq!(schema.index_of("ts"), Some(2));
    assert!(schema.spec_of("name").unwrap().is_nullable());
    assert_eq!(
        schema.spec_of("ts").unwrap().kind(),
        FieldKind::Temporal(FieldType::Timestamp, TimeUnit::Milli)
    );
    assert_eq!(schema.spec_of("hash").unwrap().width(), Some(16));
    assert!(schema.spec_of("missing").is_none());
}

#[test]
fn unknown_type_fails_at_construction() {
    let err = Schema::try_new(&catalog(), [("x", RawFieldSpec::new("INT128"))]).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownType { ref field, ref type_name }
        if field == "x" && type_name == "INT128"));
}

#[test]
fn temporal_types_require_a_known_supported_unit() {
    let catalog = catalog();

    let err = Schema::try_new(&catalog, [("ts", RawFieldSpec::new("TIMESTAMP"))]).unwrap_err();
    assert!(matches!(err, SchemaError::MissingUnit { .. }));

    let err = Schema::try_new(
        &catalog,
        [("ts", RawFieldSpec::new("TIMESTAMP").with_unit("FORTNIGHT"))],
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::UnknownUnit { .. }));

    let err = Schema::try_new(
        &catalog,
        [("t", RawFieldSpec::new("TIME32").with_unit("NANO"))],
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedUnit { .. }));

    let err = Schema::try_new(
        &catalog,
        [("d", RawFieldSpec::new("DATE32").with_unit("MILLI"))],
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::UnexpectedUnit { .. }));
}

#[test]
fn fixed_size_binary_requires_positive_width() {
    let catalog = catalog();

    for raw in [
        RawFieldSpec::new("FIXED_SIZE_BINARY"),
        RawFieldSpec::new("FIXED_SIZE_BINARY").with_width(0),
        RawFieldSpec::new("FIXED_SIZE_BINARY").with_width(-4),
    ] {
        let err = Schema::try_new(&catalog, [("h", raw)]).unwrap_err();
        assert!(matches!(err, SchemaError::MissingWidth { .. }));
    }

    let err = Schema::try_new(&catalog, [("i", RawFieldSpec::new("INT32").with_width(4))])
        .unwrap_err();
    assert!(matches!(err, SchemaError::UnexpectedWidth { .. }));
}

#[test]
fn duplicate_and_empty_schemas_are_rejected() {
    let catalog = catalog();

    let err = Schema::try_new(
        &catalog,
        [
            ("id", RawFieldSpec::new("INT32")),
            ("id", RawFieldSpec::new("INT64")),
        ],
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateField { ref field } if field == "id"));

    let err = Schema::try_new(&catalog, Vec::<(String, RawFieldSpec)>::new()).unwrap_err();
    assert!(matches!(err, SchemaError::Empty));
}

#[test]
fn from_json_keeps_object_key_order() {
    let schema = Schema::from_json(
        &catalog(),
        r#"{
            "zeta": { "type": "INT64" },
            "alpha": { "type": "UTF8", "nullable": true },
            "when": { "type": "TIME64", "unit": "MICRO" }
        }"#,
    )
    .unwrap();

    assert_eq!(schema.field_order(), ["zeta", "alpha", "when"]);
    assert_eq!(
        schema.to_string(),
        "zeta: { type: INT64, nullable: false }\n\
         alpha: { type: UTF8, nullable: true }\n\
         when: { type: TIME64, unit: MICRO, nullable: false }\n"
    );
}

#[test]
fn from_json_rejects_malformed_field_specs() {
    let err = Schema::from_json(&catalog(), r#"{ "id": { "kind": "INT32" } }"#).unwrap_err();
    assert!(matches!(err, SchemaError::Parse(_)));

    let err = Schema::from_json(&catalog(), "[1, 2]").unwrap_err();
    assert!(matches!(err, SchemaError::Parse(_)));
}

#[test]
fn from_json_rejects_repeated_keys() {
    let err = Schema::from_json(
        &catalog(),
        r#"{ "id": { "type": "INT32" }, "name": { "type": "UTF8" }, "id": { "type": "UTF8" } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateField { ref field } if field == "id"));
}
