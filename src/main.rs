//! folcheck main: load settings, dispatch the subcommand, map the outcome to
//! an exit status.
use clap::Parser; // trait import enables FolCli::parse()

use folcheck::cli::{Command, FolCli};
use folcheck::commands::{self, Options};
use folcheck::config::{load_settings, resolve_config_path};

fn main() -> anyhow::Result<()> {
    let args = FolCli::parse();

    let cfg_path = resolve_config_path(&args.config);
    let settings = load_settings(cfg_path.as_deref())?;
    if !settings.color {
        colored::control::set_override(false);
    }

    let opts = Options {
        pretty_errors: args.pretty_errors,
        no_sema: args.no_sema,
        json: args.json,
        out: args.out.clone(),
        settings,
    };

    let input = args.cmd.input();
    let code = match &args.cmd {
        Command::Check { .. } => commands::check::main(input, &opts)?,
        Command::Table { .. } => commands::table::main(input, &opts)?,
        Command::Ast { .. } => commands::ast::main(input, &opts)?,
    };
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
