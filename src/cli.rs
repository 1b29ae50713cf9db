use clap::{Parser, Subcommand};

use crate::command::generate::GenerateArgs;

#[derive(Parser)]
#[command(name = "cargo-retarget", bin_name = "cargo", version)]
pub struct CargoCli {
    #[command(subcommand)]
    pub command: CargoCommand,
}

#[derive(Subcommand)]
pub enum CargoCommand {
    /// Retarget path dependencies of a workspace manifest to a git revision or a local checkout.
    Retarget(GenerateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_as_cargo_subcommand() {
        let cli = CargoCli::try_parse_from(["cargo", "retarget", "-c", "abc", "-o", "out.toml"])
            .unwrap();
        let CargoCommand::Retarget(args) = cli.command;
        assert_eq!(args.commit.as_deref(), Some("abc"));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(CargoCli::try_parse_from(["cargo", "-c", "abc", "-o", "out.toml"]).is_err());
    }
}
