use std::time::Duration;

use anyhow::Context;
use colored::Colorize;
use larder_client::{ApiClient, ClientConfig};
use larder_server::{LarderServer, ServerConfig};
use larder_types::{
    LeftoverFood, LeftoverPatch, LeftoverSummary, LevelTier, NewLeftover, RecordId, MAX_LEVEL,
};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Leftovers(args) => cmd_leftovers(args, cli.format).await,
    }
}

fn server_config(args: ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(base_path) = args.base_path {
        config.base_path = base_path;
    }
    if let Some(data_file) = args.data_file {
        config.data_file = Some(data_file);
    }
    if let Some(api_key) = args.api_key {
        config.api_key = Some(api_key);
    }
    config.validate()?;
    Ok(config)
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = server_config(args)?;
    println!(
        "{} Larder API on {}{}",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.normalized_base_path()
    );
    match &config.data_file {
        Some(path) => println!("  Table: {}", path.display().to_string().cyan()),
        None => println!("  Table: {}", "in-memory".yellow()),
    }
    LarderServer::new(config)?.serve().await?;
    Ok(())
}

async fn cmd_leftovers(args: LeftoversArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut config = ClientConfig::new(&args.url, &args.key);
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let client = ApiClient::new(config)?;

    match args.action {
        LeftoverAction::List => {
            let foods = client
                .try_get_leftover_foods()
                .await
                .with_context(|| format!("listing leftovers from {}", args.url))?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&foods)?),
                OutputFormat::Text if foods.is_empty() => println!("No leftovers."),
                OutputFormat::Text => {
                    foods.iter().for_each(print_food);
                    print_summary(&LeftoverSummary::of(&foods));
                }
            }
        }
        LeftoverAction::Add { name, level, description } => {
            let mut draft = NewLeftover::new(name);
            if let Some(level) = level {
                draft = draft.with_level(level);
            }
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            let food = client.create_leftover_food(&draft).await?;
            emit(format, "Added", &food)?;
        }
        LeftoverAction::Set { id, level, name, description } => {
            let patch = LeftoverPatch { name, level, description };
            let food = client
                .update_leftover_food(&RecordId::from(id), &patch)
                .await?;
            emit(format, "Updated", &food)?;
        }
        LeftoverAction::Rm { id } => {
            let id = RecordId::from(id);
            client.delete_leftover_food(&id).await?;
            match format {
                OutputFormat::Json => println!(r#"{{"success":true}}"#),
                OutputFormat::Text => println!("{} Deleted {}", "✓".green(), id.short_id().yellow()),
            }
        }
    }
    Ok(())
}

fn emit(format: OutputFormat, verb: &str, food: &LeftoverFood) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(food)?),
        OutputFormat::Text => {
            print!("{} {verb} ", "✓".green().bold());
            print_food(food);
        }
    }
    Ok(())
}

fn print_food(food: &LeftoverFood) {
    let tier = food.fields.tier();
    let label = match tier {
        LevelTier::Low => tier.label().red(),
        LevelTier::Little => tier.label().yellow(),
        LevelTier::Normal | LevelTier::Plenty => tier.label().green(),
    };
    println!(
        "{}  {}  {:>2}/{MAX_LEVEL} ({label})",
        food.id.short_id().dimmed(),
        food.fields.name.bold(),
        food.fields.level,
    );
    if !food.fields.description.is_empty() {
        println!("    {}", food.fields.description);
    }
}

fn print_summary(summary: &LeftoverSummary) {
    println!(
        "\n{} total: {} low, {} a little, {} normal",
        summary.total().to_string().bold(),
        summary.low.to_string().red(),
        summary.little.to_string().yellow(),
        summary.normal.to_string().green(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    fn serve_args() -> ServeArgs {
        ServeArgs {
            config: None,
            bind: None,
            base_path: None,
            data_file: None,
            api_key: None,
        }
    }

    #[test]
    fn flags_override_defaults() {
        let config = server_config(ServeArgs {
            bind: Some("0.0.0.0:9000".parse().unwrap()),
            data_file: Some(PathBuf::from("/tmp/t.json")),
            ..serve_args()
        })
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/t.json")));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let err = server_config(ServeArgs {
            base_path: Some("larder".into()),
            ..serve_args()
        });
        assert!(err.is_err());
        let err = server_config(ServeArgs {
            api_key: Some("  ".into()),
            ..serve_args()
        });
        assert!(err.is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = server_config(ServeArgs {
            config: Some(PathBuf::from("/nonexistent/larder.toml")),
            ..serve_args()
        });
        assert!(err.is_err());
    }
}
