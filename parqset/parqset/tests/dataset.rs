use std::{fs, path::Path};

use parqset::{
    DatasetError, DatasetReader, DatasetWriter, RawFieldSpec, Schema, Value, type_catalog,
};

fn id_name() -> Schema {
    Schema::try_new(
        type_catalog(),
        [
            ("id", RawFieldSpec::new("INT32")),
            ("name", RawFieldSpec::new("UTF8")),
        ],
    )
    .unwrap()
}

fn write_shard(path: &Path, schema: &Schema, rows: &[Vec<Value>]) {
    let mut writer = DatasetWriter::builder(schema.clone(), path)
        .with_row_group_size(2)
        .build()
        .unwrap();
    writer.open().unwrap();
    for row in rows {
        writer.append_row(row).unwrap();
    }
    writer.close().unwrap();
}

fn row(id: i32, name: &str) -> Vec<Value> {
    vec![Value::I32(id), Value::string(name)]
}

#[test]
fn two_parquet_shards_form_one_table() {
    let dir = tempfile::tempdir().unwrap();
    let schema = id_name();
    write_shard(
        &dir.path().join("part-0.parquet"),
        &schema,
        &[row(0, "a"), row(1, "b"), row(2, "c")],
    );
    write_shard(
        &dir.path().join("part-1.parquet"),
        &schema,
        &[row(3, "d"), row(4, "e")],
    );

    let mut reader = DatasetReader::open_path(dir.path()).unwrap();
    assert_eq!(reader.get_filepath(), dir.path());
    assert_eq!(reader.get_row_count().unwrap(), 5);
    assert_eq!(reader.unit_row_counts().unwrap(), vec![3, 2]);
    assert_eq!(reader.get_column_names().unwrap(), ["id", "name"]);
    assert_eq!(reader.schema().unwrap(), Some(&schema));

    assert_eq!(reader.resolve(2).unwrap(), (0, 2));
    assert_eq!(reader.resolve(3).unwrap(), (1, 0));
    assert_eq!(reader.read_row_as_array(3).unwrap(), row(3, "d"));
    let object = reader.read_row(4).unwrap();
    assert_eq!(object.get("name"), Some(&Value::string("e")));
    assert!(matches!(
        reader.read_row(5),
        Err(DatasetError::IndexOutOfRange { .. })
    ));

    let all: Vec<_> = reader.rows().unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[1], row(1, "b"));

    reader.close().unwrap();
}

#[test]
fn differing_column_counts_fail_with_schema_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    write_shard(&dir.path().join("part-0.parquet"), &id_name(), &[row(0, "a")]);

    let narrow = Schema::try_new(type_catalog(), [("id", RawFieldSpec::new("INT32"))]).unwrap();
    write_shard(
        &dir.path().join("part-1.parquet"),
        &narrow,
        &[vec![Value::I32(1)]],
    );

    let err = DatasetReader::open_path(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        DatasetError::SchemaMismatch { unit_index: 1, .. }
    ));
}

#[test]
fn non_parquet_shard_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    write_shard(&dir.path().join("part-0.parquet"), &id_name(), &[row(0, "a")]);
    fs::write(dir.path().join("part-1.parquet"), b"not a parquet file").unwrap();

    let err = DatasetReader::open_path(dir.path()).unwrap_err();
    assert!(matches!(err, DatasetError::Io { ref path, .. } if path.ends_with("part-1.parquet")));
}

#[test]
fn all_field_types_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("types.parquet");
    let schema = Schema::from_json(
        type_catalog(),
        r#"{
            "bool": { "type": "BOOL" },
            "uint8": { "type": "UINT8" },
            "int8": { "type": "INT8" },
            "uint16": { "type": "UINT16" },
            "int16": { "type": "INT16" },
            "uint32": { "type": "UINT32" },
            "int32": { "type": "INT32" },
            "uint64": { "type": "UINT64" },
            "int64": { "type": "INT64" },
            "float": { "type": "FLOAT" },
            "double": { "type": "DOUBLE" },
            "string": { "type": "STRING" },
            "binary": { "type": "BINARY" },
            "digest": { "type": "FIXED_SIZE_BINARY", "width": 4 },
            "date32": { "type": "DATE32" },
            "timestamp": { "type": "TIMESTAMP", "unit": "MILLI" },
            "time32": { "type": "TIME32", "unit": "MILLI" },
            "time64": { "type": "TIME64", "unit": "MICRO" }
        }"#,
    )
    .unwrap();

    let input = vec![
        Value::Bool(true),
        Value::I32(1),
        Value::I32(2),
        Value::I32(3),
        Value::I32(4),
        Value::I32(5),
        Value::I32(6),
        Value::I32(7),
        Value::I32(8),
        Value::F64(1.0),
        Value::F64(2.0),
        Value::string("oatmeal"),
        Value::bytes(b"\x00\x01"),
        Value::bytes(b"abcd"),
        Value::I32(1),
        Value::I32(2),
        Value::I32(3),
        Value::I32(4),
    ];
    let expected = vec![
        Value::Bool(true),
        Value::U8(1),
        Value::I8(2),
        Value::U16(3),
        Value::I16(4),
        Value::U32(5),
        Value::I32(6),
        Value::U64(7),
        Value::I64(8),
        Value::F32(1.0),
        Value::F64(2.0),
        Value::string("oatmeal"),
        Value::bytes(b"\x00\x01"),
        Value::bytes(b"abcd"),
        Value::I32(1),
        Value::I64(2),
        Value::I32(3),
        Value::I64(4),
    ];

    let mut writer = DatasetWriter::create(schema.clone(), &path).unwrap();
    writer.append_row(&input).unwrap();
    writer.close().unwrap();

    let reader = DatasetReader::open_path(&path).unwrap();
    assert_eq!(reader.read_row_as_array(0).unwrap(), expected);
    assert_eq!(reader.schema().unwrap(), Some(&schema));
}
