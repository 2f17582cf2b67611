use super::*;
use std::io::Write;

fn write_config(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn defaults_are_sensible() {
    let cfg = Config::default();
    assert_eq!(cfg.metadata_schema, "vx_metadata");
    assert_eq!(cfg.database_prefix, "mv_");
    assert_eq!(cfg.fact_table, "line_data_sl1l2");
    assert_eq!(cfg.level_prefix, "P");
    assert_eq!(cfg.cardinality_limit, 10_000_000_000);
    assert_eq!(cfg.store.path, ":memory:");
    cfg.validate().unwrap();
}

#[test]
fn loads_partial_yaml_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "vxmeta.yml",
        "metadata_schema: my_meta\ncardinality_limit: 500\n",
    );

    let cfg = Config::load(&path).unwrap();
    assert_eq!(cfg.metadata_schema, "my_meta");
    assert_eq!(cfg.cardinality_limit, 500);
    assert_eq!(cfg.fact_table, "line_data_sl1l2");
}

#[test]
fn load_from_dir_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(cfg.metadata_schema, "vx_metadata");
}

#[test]
fn load_from_dir_prefers_yml() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "vxmeta.yml", "metadata_schema: from_yml\n");
    write_config(dir.path(), "vxmeta.yaml", "metadata_schema: from_yaml\n");

    let cfg = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(cfg.metadata_schema, "from_yml");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let err = Config::load(Path::new("/nonexistent/vxmeta.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn rejects_unknown_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "vxmeta.yml", "no_such_field: 1\n");
    assert!(Config::load(&path).is_err());
}

#[test]
fn rejects_non_identifier_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "vxmeta.yml", "metadata_schema: \"bad;drop\"\n");
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn rejects_zero_cardinality_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "vxmeta.yml", "cardinality_limit: 0\n");
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}
