use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ontogen::cli::Cli;
use ontogen::config::GeneratorConfig;
use ontogen::generator;
use ontogen::io::GenError;

fn run(cli: &Cli) -> anyhow::Result<()> {
    let args = cli.command.args();
    let file_config = match &args.config {
        Some(path) => GeneratorConfig::from_yaml_file(path)
            .with_context(|| format!("reading configuration {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    let config = file_config.merge(cli.command.overrides()).resolve()?;

    let written = generator::generate(&args.files, &config, cli.command.target())?;
    println!(
        "Generated {} file(s) for vocabulary '{}'",
        written.len(),
        config.vocab_name
    );
    Ok(())
}

fn report(cli: &Cli, err: &anyhow::Error) {
    match err.chain().find_map(|e| e.downcast_ref::<GenError>()) {
        Some(GenError::Configuration(message)) => {
            println!("{message}\n");
            print!("{}", cli.subcommand_help());
        }
        Some(GenError::Io(_) | GenError::NotFound(_)) => {
            eprintln!("I/O error: {err:#}");
        }
        _ => eprintln!("Error: {err:?}"),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ontogen=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&cli, &err);
            ExitCode::FAILURE
        }
    }
}
