use std::{
    fs,
    io::{self, Read},
};

use anyhow::Context;
use bibhook::{
    cli::{self, Cli, Command, Input},
    dictionary::Dictionary,
    pipeline::Pipeline,
    server,
    translator::SaveItems,
};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Serve {
            address,
            port,
            output,
            format,
        } => {
            let config = cli::server_config(address, port, output);
            let sources = format.dictionary_sources();
            let dictionary = Dictionary::load(&sources.words, &sources.personal)?;
            server::serve(&config, Pipeline::new(dictionary, format.options())).await?;
        }
        Command::Convert { input, format } => {
            let text = match &input {
                Input::Stdin => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read stdin")?;
                    buf
                }
                Input::File(path) => fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
            };
            let request: SaveItems =
                serde_json::from_str(&text).context("input is not a saveItems document")?;

            let sources = format.dictionary_sources();
            let dictionary = Dictionary::load(&sources.words, &sources.personal)?;
            let records = Pipeline::new(dictionary, format.options()).convert(request.items);
            if !records.is_empty() {
                println!("{}", records.join("\n\n"));
            }
            eprintln!("{} {}", "✓".green(), records.len());
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "bibhook=debug,tower_http=debug"
    } else {
        "bibhook=info,tower_http=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
