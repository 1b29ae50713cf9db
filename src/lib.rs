#![doc = include_str!("../README.md")]

pub mod cli;
pub mod command;
pub mod error;
pub mod ops;
pub mod source;

pub use error::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() -> Result<()> {
    use clap::Parser;
    use cli::CargoCommand;

    let cli = cli::CargoCli::parse();
    match cli.command {
        CargoCommand::Retarget(args) => command::generate::execute(args),
    }
}
