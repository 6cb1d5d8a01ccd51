use anyhow::Result;
use clap::Parser;
use ticklist::cli::{Cli, CliCommand, TuiArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli
        .command
        .clone()
        .unwrap_or_else(|| CliCommand::Tui(TuiArgs::default()));

    match command {
        CliCommand::Tui(args) => {
            let config = ticklist::config::from_cli(&cli)?;
            let options = ticklist::tui::TuiOptions {
                theme: args.theme,
                log_filter: cli.log_filter.clone(),
            };
            ticklist::tui::run(config, options)?;
        }
        CliCommand::Serve(args) => {
            let config = ticklist::ServerConfig {
                addr: args.addr,
                data_dir: cli.data_dir.clone(),
                web_root: args.web_root,
                seed: args.seed,
                log_filter: cli.log_filter.clone(),
            };
            ticklist::server::run_server(config)?;
        }
        command => {
            let config = ticklist::config::from_cli(&cli)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            ticklist::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
