use super::*;

#[test]
fn test_inspect_arguments() {
    let args = CliArgs::try_parse_from([
        "texplorer",
        "inspect",
        "--program",
        "program.json",
        "--file",
        "main.ts",
        "--line",
        "3",
        "--character",
        "6",
        "--max-depth",
        "4",
        "--reference-defined-types",
    ])
    .unwrap();

    let Command::Inspect {
        tree,
        location,
        expand_depth,
        server,
    } = args.command
    else {
        panic!("expected inspect");
    };
    assert_eq!(tree.program, PathBuf::from("program.json"));
    assert_eq!(
        tree.tree_config(),
        TreeConfig {
            max_depth: 4,
            reference_defined_types: true,
        }
    );
    assert_eq!(location.location(), SourceFileLocation::at("main.ts", 3, 6));
    assert_eq!(expand_depth, 3);
    assert!(server.is_none());
}

#[test]
fn test_tree_defaults() {
    let args = ServerArgs::try_parse_from(["texplorer-server", "--program", "p.json"]).unwrap();
    assert_eq!(args.tree.tree_config(), TreeConfig::default());
}

#[test]
fn test_location_is_required() {
    let err = CliArgs::try_parse_from(["texplorer", "expand", "--program", "p.json", "--file", "a.ts"])
        .unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}
