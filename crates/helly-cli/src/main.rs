//! Helly CLI - team feedback journal from the terminal
//!
//! Thin client over the Helly HTTP API.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Password};
use std::fs;
use tracing_subscriber::EnvFilter;

use api::{AskRequest, CreateFeedbackRequest, CreateTeamMemberRequest, HellyClient, Window};
use config::Config;

#[derive(Parser)]
#[command(name = "helly")]
#[command(about = "Helly CLI - record feedback about your team and ask questions about it", long_about = None)]
#[command(version)]
struct Cli {
    /// Server URL (overrides the configured one)
    #[arg(long, global = true, env = "HELLY_URL")]
    base_url: Option<String>,

    /// Log HTTP requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Team member operations
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// Feedback operations
    Feedback {
        #[command(subcommand)]
        action: FeedbackAction,
    },

    /// Ask a question about your team
    Ask {
        /// The question
        question: String,
        /// Only consider feedback from this time on (ISO-8601)
        #[arg(long)]
        from: Option<String>,
        /// Only consider feedback up to this time (ISO-8601)
        #[arg(long)]
        to: Option<String>,
        /// Who the question is about
        #[arg(long)]
        hint: Option<String>,
    },

    /// Show current configuration
    Config {
        /// Save a new default server URL
        #[arg(long)]
        set_base_url: Option<String>,
    },
}

#[derive(Subcommand)]
enum MemberAction {
    /// Register a team member
    Add {
        /// Full name
        name: String,
        /// Role (e.g. "Backend Engineer")
        #[arg(short, long)]
        role: String,
        /// Relationship to you (e.g. "direct report")
        #[arg(long, default_value = "direct report")]
        relationship: String,
        /// Start date, stored as given
        #[arg(long)]
        start_date: String,
    },
    /// List team members
    List {
        /// Case-insensitive name filter
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one team member
    Show {
        /// Team member ID
        id: String,
    },
    /// Rebuild a member's AI corpus from stored feedback
    Sync {
        /// Team member ID
        id: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Subcommand)]
enum FeedbackAction {
    /// Record feedback
    Add {
        /// Feedback text (or use -f for file)
        content: Option<String>,
        /// Read content from file
        #[arg(short, long)]
        file: Option<String>,
        /// Team member ID the feedback is about
        #[arg(short, long)]
        member: Option<String>,
        /// Free-text hint about who the feedback is about
        #[arg(long)]
        hint: Option<String>,
        /// When it happened (ISO-8601, defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
    /// List recorded feedback
    List {
        /// Only feedback for this team member ID
        #[arg(short, long)]
        member: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let base_url = config.base_url(cli.base_url.as_deref()).to_string();

    match cli.command {
        Commands::Login { key } => cmd_login(config, &base_url, key).await,
        Commands::Member { action } => cmd_member(&client(&config, &base_url), action).await,
        Commands::Feedback { action } => cmd_feedback(&client(&config, &base_url), action).await,
        Commands::Ask {
            question,
            from,
            to,
            hint,
        } => {
            cmd_ask(
                &client(&config, &base_url),
                AskRequest {
                    text: question,
                    window: Window { from, to },
                    person_hint: hint,
                },
            )
            .await
        }
        Commands::Config { set_base_url } => cmd_config(config, &base_url, set_base_url),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "helly_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("HELLY_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn client(config: &Config, base_url: &str) -> HellyClient {
    HellyClient::new(base_url, config.api_key.as_deref())
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(mut config: Config, base_url: &str, key: Option<String>) -> Result<()> {
    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    let client = HellyClient::new(base_url, Some(&api_key));
    print!("Testing connection to {}... ", base_url);

    match client.health().await {
        Ok(true) => {}
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach Helly API at {}", base_url);
        }
    }
    if let Err(e) = client.verify_key().await {
        println!("{}", "Rejected".red());
        bail!("API key not accepted: {}", e);
    }
    println!("{}", "OK".green());

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);

    Ok(())
}

async fn cmd_member(client: &HellyClient, action: MemberAction) -> Result<()> {
    match action {
        MemberAction::Add {
            name,
            role,
            relationship,
            start_date,
        } => {
            let member = client
                .create_member(&CreateTeamMemberRequest {
                    name,
                    role,
                    relationship_to_manager: relationship,
                    start_date,
                })
                .await?;

            println!(
                "{} Added {} ({})",
                "✓".green(),
                member.name.cyan().bold(),
                member.id.dimmed()
            );
        }

        MemberAction::List { search } => {
            let members = client.list_members(search.as_deref()).await?;

            if members.is_empty() {
                println!("No team members found.");
                println!("\n{}", "Add one with:".dimmed());
                println!("  helly member add \"<name>\" --role <role> --start-date <date>");
                return Ok(());
            }

            println!("{}", "Team members:".bold());
            for member in members {
                println!(
                    "  {} {} {}",
                    member.id.dimmed(),
                    member.name.cyan().bold(),
                    member.role.dimmed()
                );
            }
        }

        MemberAction::Show { id } => {
            let member = client.get_member(&id).await?;

            println!("{}", member.name.cyan().bold());
            println!("  ID: {}", member.id);
            println!("  Role: {}", member.role);
            println!("  Relationship: {}", member.relationship_to_manager);
            println!("  Start date: {}", member.start_date);
        }

        MemberAction::Sync { id, from, to } => {
            let result = client.sync_corpus(&id, &Window { from, to }).await?;

            println!(
                "{} Corpus rebuilt for {} ({} items)",
                "✓".green(),
                result.team_member_id.cyan(),
                result.item_count
            );
        }
    }

    Ok(())
}

async fn cmd_feedback(client: &HellyClient, action: FeedbackAction) -> Result<()> {
    match action {
        FeedbackAction::Add {
            content,
            file,
            member,
            hint,
            at,
        } => {
            let feedback_content = match (content, file) {
                (Some(c), None) => c,
                (None, Some(f)) => {
                    fs::read_to_string(&f).with_context(|| format!("Failed to read file: {}", f))?
                }
                (Some(_), Some(_)) => {
                    bail!("Cannot specify both content and --file");
                }
                (None, None) => Input::new()
                    .with_prompt("Feedback")
                    .interact_text()
                    .context("Failed to read input")?,
            };

            let result = client
                .add_feedback(&CreateFeedbackRequest {
                    content: feedback_content.clone(),
                    created_at: at,
                    person_hint: hint,
                    team_member_id: member,
                })
                .await?;

            println!(
                "{} Feedback {} recorded for {}",
                "✓".green(),
                result.id.dimmed(),
                result.team_member_id.cyan()
            );
            println!("  {}", truncate_string(&feedback_content, 80).dimmed());

            if !result.corpus_synced {
                println!(
                    "{} Stored, but the AI corpus was not updated: {}",
                    "!".yellow(),
                    result.corpus_sync_error.as_deref().unwrap_or("unknown error")
                );
                println!("  Retry later with: helly member sync {}", result.team_member_id);
            }
            if !result.event_published {
                println!("{} FeedbackCreated event was not published", "!".yellow());
            }
        }

        FeedbackAction::List { member, from, to } => {
            let feedback = client
                .list_feedback(member.as_deref(), &Window { from, to })
                .await?;

            if feedback.is_empty() {
                println!("No feedback found.");
                return Ok(());
            }

            println!("{} entries:", feedback.len().to_string().green());
            for entry in feedback {
                println!(
                    "  {} {} {}",
                    entry.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                    entry.team_member_id.cyan(),
                    truncate_string(&entry.content, 60)
                );
            }
        }
    }

    Ok(())
}

async fn cmd_ask(client: &HellyClient, request: AskRequest) -> Result<()> {
    let response = client.ask(&request).await?;

    println!("{}", response.answer);

    if !response.citations.is_empty() {
        println!("\n{}", "Sources:".bold());
        for citation in response.citations {
            println!(
                "  {} {} {}",
                citation.created_at.dimmed(),
                citation.id.dimmed(),
                truncate_string(&citation.snippet, 60)
            );
        }
    }

    Ok(())
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}

fn cmd_config(mut config: Config, base_url: &str, set_base_url: Option<String>) -> Result<()> {
    if let Some(url) = set_base_url {
        config.base_url = url.trim_end_matches('/').to_string();
        config.save()?;
        println!("{} Base URL set to {}", "✓".green(), config.base_url);
        return Ok(());
    }

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    if base_url != config.base_url {
        println!("  Active URL: {} {}", base_url, "(override)".dimmed());
    }
    println!(
        "  API Key: {}",
        if config.api_key.is_some() {
            "Set".green()
        } else {
            "Not set".red()
        }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("Grüße aus Köln", 5), "Grüße...");
    }

    #[test]
    fn test_cli_parses_feedback_add() {
        let cli = Cli::try_parse_from([
            "helly",
            "feedback",
            "add",
            "Max shipped the release",
            "--member",
            "m-1",
            "--at",
            "2024-06-01",
        ])
        .unwrap();

        match cli.command {
            Commands::Feedback {
                action:
                    FeedbackAction::Add {
                        content, member, at, ..
                    },
            } => {
                assert_eq!(content.as_deref(), Some("Max shipped the release"));
                assert_eq!(member.as_deref(), Some("m-1"));
                assert_eq!(at.as_deref(), Some("2024-06-01"));
            }
            _ => panic!("expected feedback add"),
        }
    }

    #[test]
    fn test_cli_global_base_url() {
        let cli = Cli::try_parse_from([
            "helly",
            "ask",
            "What should I discuss with Max?",
            "--base-url",
            "http://localhost:9000",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
        assert!(matches!(cli.command, Commands::Ask { .. }));
    }
}
