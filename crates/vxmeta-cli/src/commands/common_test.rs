use super::*;
use crate::cli::GlobalArgs;
use std::io::Write;

fn global_with(config: Option<&str>) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        config: config.map(str::to_string),
        store: None,
        metadata_schema: None,
        limit: None,
    }
}

#[test]
fn overrides_replace_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vxmeta.yml");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(b"metadata_schema: from_file\ncardinality_limit: 7\n")
        .unwrap();

    let mut global = global_with(path.to_str());
    global.metadata_schema = Some("from_cli".to_string());
    global.limit = Some(42);
    global.store = Some(":memory:".to_string());

    let config = load_config(&global).unwrap();
    assert_eq!(config.metadata_schema, "from_cli");
    assert_eq!(config.cardinality_limit, 42);
    assert_eq!(config.store.path, ":memory:");
}

#[test]
fn invalid_override_is_rejected() {
    let mut global = global_with(None);
    global.metadata_schema = Some("bad name".to_string());
    assert!(load_config(&global).is_err());
}

#[test]
fn missing_explicit_config_fails() {
    let global = global_with(Some("/nonexistent/vxmeta.yml"));
    assert!(load_config(&global).is_err());
}
