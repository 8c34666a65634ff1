use anyhow::{Result, bail};
use colored::Colorize;
use serde_json::json;
use std::sync::Arc;

use deepcap_core::controller::CommitError;
use deepcap_core::endpoints::EffectiveEndpoints;
use deepcap_core::{AppCore, request};
use deepcap_storage::ServerConfig;

use crate::cli::{ConfigCommands, CustomArgs, Environment};
use crate::output::{OutputFormat, print_json};

pub async fn run(core: Arc<AppCore>, command: ConfigCommands, format: OutputFormat) -> Result<()> {
    match command {
        ConfigCommands::Show => show(&core, format),
        ConfigCommands::Use { environment } => {
            let candidate = match environment {
                Environment::Production => ServerConfig::production(),
                Environment::Staging => ServerConfig::staging(),
            };
            commit(&core, candidate, format)
        }
        ConfigCommands::Custom(args) => commit(&core, custom_candidate(args), format),
    }
}

fn custom_candidate(args: CustomArgs) -> ServerConfig {
    ServerConfig::custom(
        args.web_server,
        args.api_server,
        args.serverless,
        args.identifier,
    )
}

fn show(core: &AppCore, format: OutputFormat) -> Result<()> {
    let (config, endpoints) = core.config.current();

    if format.is_json() {
        return print_json(&json!({
            "config": config,
            "endpoints": endpoints,
        }));
    }

    println!(
        "Active configuration: {}",
        config.active_config.as_str().bold()
    );
    print_endpoints(&endpoints)
}

fn commit(core: &AppCore, candidate: ServerConfig, format: OutputFormat) -> Result<()> {
    let endpoints = match core.config.commit(candidate) {
        Ok(endpoints) => endpoints,
        Err(CommitError::Invalid(errors)) => {
            for error in &errors {
                eprintln!("{} {error}", "error:".red().bold());
            }
            bail!("configuration is invalid, nothing was saved");
        }
        Err(err @ CommitError::Persist(_)) => return Err(err.into()),
    };

    if format.is_json() {
        return print_json(&json!({
            "status": "saved",
            "endpoints": endpoints,
        }));
    }

    println!("{}", "Configuration saved.".green());
    print_endpoints(&endpoints)
}

fn print_endpoints(endpoints: &EffectiveEndpoints) -> Result<()> {
    println!("Identifier:  {}", endpoints.identifier);
    println!("Web server:  {}", endpoints.web_url);
    println!("API server:  {}", endpoints.api_url);
    println!("Serverless:  {}", endpoints.serverless_url);
    println!("GraphQL:     {}", request::graphql_endpoint(endpoints)?);
    Ok(())
}
