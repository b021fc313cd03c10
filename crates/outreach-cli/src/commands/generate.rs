//! Generate command implementation.

use crate::cli::GenerateArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use outreach_domain::ProspectQuery;
use outreach_generator::{Generator, GeneratorError, LogOutcome};
use outreach_llm::{GeminiGateway, LlmError};
use outreach_store::JsonlLog;
use std::fs;
use std::time::Duration;
use tracing::info;

/// Execute the generate command.
pub fn execute_generate(args: GenerateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let query = build_query(&args)?;
    // Reject bad input before asking for credentials
    query
        .validate()
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let gateway = build_gateway(config)?;
    let log = JsonlLog::new(&config.paths.log);

    let mut generator_config = config.generator_config()?;
    if let Some(knowledge) = args.knowledge {
        generator_config = generator_config.with_knowledge_path(knowledge);
    }

    let generator = Generator::new(gateway, log, generator_config);
    let effort = args.effort.into();

    if formatter.format() == OutputFormat::Table {
        eprintln!(
            "{}",
            formatter.info(&format!("Researching {} (this can take a while)...", query.person_name.trim()))
        );
    }

    let result = generator.generate(&query, effort).map_err(|e| match e {
        GeneratorError::Gateway(message) => CliError::Gateway {
            message,
            key_env: config.gateway.api_key_env.clone(),
        },
        other => CliError::Generator(other),
    })?;

    if let LogOutcome::Recorded(id) = &result.log {
        info!("Logged request as {}", id);
    }

    println!("{}", formatter.format_generation(&result)?);
    Ok(())
}

/// Turn command-line arguments into a prospect query.
fn build_query(args: &GenerateArgs) -> Result<ProspectQuery> {
    let mut query = ProspectQuery::new(args.name.clone());
    query.linkedin_url = args.linkedin.clone();
    query.company_website = args.company.clone();
    query.x_profile_url = args.x.clone();
    query.custom_instructions = args.instructions.clone();
    query.word_limit = args.word_limit;

    if let Some(path) = &args.past_conversation {
        let transcript = fs::read_to_string(path).map_err(|e| {
            CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
        })?;
        query.past_conversation = Some(transcript);
    }

    Ok(query)
}

fn build_gateway(config: &Config) -> Result<GeminiGateway> {
    let settings = &config.gateway;
    let api_key = std::env::var(&settings.api_key_env)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| LlmError::MissingApiKey(settings.api_key_env.clone()))?;

    Ok(GeminiGateway::with_timeout(
        &settings.endpoint,
        &settings.model,
        api_key,
        Duration::from_secs(settings.timeout_secs),
    )?)
}
