mod cli;
mod commands;
mod io;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ShortcutsCommand};
use commands::CommandHandler;
use decoderpp::codec::{Dependencies, Registry};
use decoderpp::{error, types, Context};

fn main() -> ExitCode {
    let cli = Cli::parse();
    install_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            e.exit_code().into()
        }
    }
}

fn install_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> error::Result<()> {
    let ctx = Context::new(
        Registry::global(),
        Dependencies::bundled().without(&cli.disabled_dependencies),
    );

    let handler: Box<dyn CommandHandler> = match cli.command {
        Command::Run { codecs, r#in, out } => Box::new(commands::RunCommand {
            codecs,
            input: types::InputSource::parse(&r#in),
            output: types::OutputDest::parse(&out),
        }),

        Command::List { category, json } => Box::new(commands::ListCommand {
            category: category.map(Into::into),
            json,
        }),

        Command::Info { codec, json } => Box::new(commands::InfoCommand { codec, json }),

        Command::Shortcuts(ShortcutsCommand::List { source, json }) => {
            Box::new(commands::ShortcutListCommand {
                file: PathBuf::from(source.file),
                filter: source.filter,
                json,
            })
        }

        Command::Shortcuts(ShortcutsCommand::Set { source, id, key }) => {
            Box::new(commands::ShortcutSetCommand {
                file: PathBuf::from(source.file),
                filter: source.filter,
                id,
                key,
            })
        }
    };

    handler.execute(&ctx)
}
