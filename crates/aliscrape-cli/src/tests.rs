use super::*;

#[test]
fn parses_single_command() {
    let cli = Cli::try_parse_from([
        "aliscrape",
        "single",
        "https://www.aliexpress.com/item/1005006123456.html",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Single { ref link } if link.ends_with("1005006123456.html")
    ));
    assert_eq!(cli.out_dir, PathBuf::from("exports"));
    assert!(!cli.skip_upload);
    assert!(!cli.reviews_photos);
}

#[test]
fn query_limit_defaults_to_ten() {
    let cli = Cli::try_parse_from(["aliscrape", "query", "usb cable"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Query { ref query, limit: 10 } if query == "usb cable"
    ));
}

#[test]
fn query_limit_accepts_explicit_value() {
    let cli = Cli::try_parse_from(["aliscrape", "query", "lamp", "--limit", "60"]).unwrap();
    assert!(matches!(cli.command, Commands::Query { limit: 60, .. }));
}

#[test]
fn query_limit_out_of_range_is_rejected() {
    assert!(Cli::try_parse_from(["aliscrape", "query", "lamp", "--limit", "0"]).is_err());
    assert!(Cli::try_parse_from(["aliscrape", "query", "lamp", "--limit", "61"]).is_err());
}

#[test]
fn parses_multiple_command() {
    let cli =
        Cli::try_parse_from(["aliscrape", "multiple", "https://a/item/1.html,https://a/item/2.html"])
            .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Multiple { ref links } if links.contains(',')
    ));
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "aliscrape",
        "single",
        "42",
        "--skip-upload",
        "--reviews-photos",
        "--out-dir",
        "/tmp/out",
    ])
    .unwrap();
    assert!(cli.skip_upload);
    assert!(cli.reviews_photos);
    assert_eq!(cli.out_dir, PathBuf::from("/tmp/out"));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["aliscrape"]).is_err());
}
