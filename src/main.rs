use clap::Parser;
use trioseg::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{concat, low_ils, merge, segments, windows},
    utils::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Segments(_) => "segments",
        Command::Merge(_) => "merge",
        Command::Windows(_) => "windows",
        Command::LowIls(_) => "low-ils",
        Command::Concat(_) => "concat",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Segments(args) => segments::segments(args)?,
        Command::Merge(args) => merge::merge(args)?,
        Command::Windows(args) => windows::windows(args)?,
        Command::LowIls(args) => low_ils::low_ils(args)?,
        Command::Concat(args) => concat::concat(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
