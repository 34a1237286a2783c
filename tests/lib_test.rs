//! Library integration tests.

use provision::ProvisionError;

#[test]
fn error_types_are_public() {
    let err = ProvisionError::PrivilegeRequired {
        component: "test".into(),
    };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> provision::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use provision::cli::{Cli, Commands};

    let cli = Cli::parse_from(["provision", "status", "--json"]);
    if let Some(Commands::Status(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Status command");
    }
}

#[test]
fn phases_are_public_and_ordered() {
    use provision::registry::{InstallerKind, PHASES};

    assert_eq!(PHASES.first(), Some(&InstallerKind::Script));
    assert_eq!(PHASES.last(), Some(&InstallerKind::Git));
}
