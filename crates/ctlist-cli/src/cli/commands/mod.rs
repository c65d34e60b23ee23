pub mod generate;
pub mod spki;

use super::args::{Cli, Command};

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Generate(args) => Ok(generate::cmd_generate(args)),
        Command::Spki(args) => Ok(spki::cmd_spki(&args)),
    }
}

/// Exit code for a failed command.
pub(crate) fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ctlist_core::CtListError>()
        .map(ctlist_core::CtListError::exit_code)
        .unwrap_or(crate::exit_codes::INTERNAL_ERROR)
}
