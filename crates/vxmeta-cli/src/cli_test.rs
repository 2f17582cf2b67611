use super::*;

#[test]
fn parses_run_with_overrides() {
    let cli = Cli::try_parse_from([
        "vxmeta",
        "run",
        "--json",
        "--store",
        "/tmp/meta.duckdb",
        "-m",
        "my_meta",
        "-d",
        "1000",
    ])
    .unwrap();

    assert_eq!(cli.global.store.as_deref(), Some("/tmp/meta.duckdb"));
    assert_eq!(cli.global.metadata_schema.as_deref(), Some("my_meta"));
    assert_eq!(cli.global.limit, Some(1000));
    match cli.command {
        Commands::Run(args) => assert!(args.json),
        _ => panic!("expected run command"),
    }
}

#[test]
fn parses_show() {
    let cli = Cli::try_parse_from(["vxmeta", "show"]).unwrap();
    assert!(matches!(cli.command, Commands::Show));
    assert!(cli.global.store.is_none());
}

#[test]
fn global_flags_work_after_subcommand() {
    let cli = Cli::try_parse_from(["vxmeta", "show", "--verbose", "-c", "alt.yml"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.config.as_deref(), Some("alt.yml"));
}

#[test]
fn requires_a_subcommand() {
    assert!(Cli::try_parse_from(["vxmeta"]).is_err());
}
