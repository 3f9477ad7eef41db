// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use notionx::{catalog, AsyncClient, Catalog, CommandLineInput, Dispatch, NotionError};

/// Sets up logging on stderr so stdout carries only the response.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .build(Root::builder().appender("stderr").build(log_level))?;

    log4rs::init_config(config)?;
    Ok(())
}

/// Prints one line per operation: name, verb, path and body parameter.
fn print_catalog(catalog: &Catalog) {
    for operation in catalog.operations() {
        let body = match (operation.body_param(), operation.body_target()) {
            (Some(param), Some(target)) => format!("{} ({:?})", param, target),
            _ => String::new(),
        };
        println!(
            "{:<27} {:<6} {:<42} {}",
            operation.name(),
            operation.verb().as_str(),
            operation.path(),
            body
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let catalog = catalog()?;
    if cli.list {
        print_catalog(catalog);
        return Ok(());
    }

    let name = cli
        .operation
        .as_deref()
        .context("an operation name is required unless --list is given")?;
    let operation = catalog
        .get(name)
        .ok_or_else(|| NotionError::UnknownOperation(name.to_string()))
        .context("run with --list to see the available operations")?;
    let args = cli.call_args(operation)?;

    let options = cli
        .client_options()
        .context("failed to load the client configuration")?;
    let client = AsyncClient::new(options)?;

    let response = client
        .call(name, args)
        .await
        .with_context(|| format!("{} failed", name))?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
