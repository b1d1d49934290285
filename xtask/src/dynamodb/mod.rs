//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;
mod seed;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy the player-info table.
    Deploy(DeployCommand),

    /// Fill the player-info table with random players.
    Seed(SeedCommand),
}

/// Deploy or destroy the player-info table.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy the player-info DynamoDB table.

By default, this command creates the table keyed by the `UserId` string
attribute, billed per request. An existing table keyed by another attribute
is reported and left alone.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the table instead of creating it.
    #[arg(long)]
    pub destroy: bool,

    /// Table name to use.
    #[arg(long, default_value = config::DEFAULT_TABLE_NAME)]
    pub table_name: String,

    #[command(flatten)]
    pub aws: client::AwsArgs,
}

/// Fill the player-info table with random players.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Generate and insert random player records into DynamoDB.

Each player gets an identity-pool style user id, two or three uppercase
initials and a random high score. About a fifth of the players have a zero
high score, so `scoreboard high-scores` lists fewer rows than `scoreboard scan`.")]
pub struct SeedCommand {
    /// Number of players to generate.
    #[arg(long, default_value = "20")]
    pub count: u32,

    /// Table name to use.
    #[arg(long, default_value = config::DEFAULT_TABLE_NAME)]
    pub table_name: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub aws: client::AwsArgs,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
        DynamodbAction::Seed(seed_cmd) => run_seed(seed_cmd, &global).await,
    }
}

fn confirm(prompt: &str, default: bool) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

    if confirmed {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), cmd.aws.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&cmd.aws).await;
    let current_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;

    if cmd.destroy {
        let plan = planning::calculate_destroy_plan(current_state.as_ref(), &cmd.table_name);

        if !global.is_silent() {
            aprintln!("{}", p_y("Destroy Plan:"));
            for line in planning::format_destroy_plan(&plan) {
                aprintln!("  {}", p_r(&line));
            }
            aprintln!();
        }

        if matches!(plan, planning::DestroyPlan::AlreadyGone { .. }) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Nothing to destroy."));
            }
            return Ok(());
        }

        if !cmd.force {
            confirm(
                "Are you sure you want to delete this table? ALL DATA WILL BE LOST",
                false,
            )?;
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Deleting table..."));
        }

        deploy::execute_destroy_plan(&dynamo_client, &plan).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Table destroyed successfully."));
        }
        return Ok(());
    }

    let table_config = config::player_table_config().with_table_name(&cmd.table_name);
    let plan = planning::calculate_deploy_plan(current_state.as_ref(), &table_config);

    if !global.is_silent() {
        aprintln!("{}", p_c("Deploy Plan:"));
        for line in planning::format_deploy_plan(&plan) {
            if line.starts_with('+') {
                aprintln!("  {}", p_g(&line));
            } else if line.starts_with('~') {
                aprintln!("  {}", p_y(&line));
            } else {
                aprintln!("  {}", line);
            }
        }
        aprintln!();
    }

    match plan {
        planning::DeployPlan::NoChanges { .. } => {
            if !global.is_silent() {
                aprintln!("{}", p_g("Infrastructure is up to date."));
            }
            return Ok(());
        }
        // Reported by the executor without prompting.
        planning::DeployPlan::KeyMismatch { .. } => {}
        planning::DeployPlan::CreateTable { .. } => {
            if !cmd.force {
                confirm("Apply these changes?", true)?;
            }
            if !global.is_silent() {
                aprintln!("{}", p_b("Applying changes..."));
            }
        }
    }

    deploy::execute_deploy_plan(&dynamo_client, &plan).await?;

    if !global.is_silent() {
        aprintln!("{}", p_g("Infrastructure deployed successfully."));
    }

    Ok(())
}

async fn run_seed(cmd: SeedCommand, global: &crate::Global) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), cmd.aws.target_display());
        aprintln!("{} {}", p_b("Table:"), cmd.table_name);
        aprintln!("{} {}", p_b("Player count:"), cmd.count);
        aprintln!();
    }

    let dynamo_client = client::create_client(&cmd.aws).await;

    let table_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;
    if table_state.is_none() {
        return Err(DynamodbError::TableNotFound {
            table_name: cmd.table_name,
        });
    }

    let players = seed::generate_players(&mut rand::rng(), &cmd.aws.region, cmd.count);

    if !global.is_silent() {
        aprintln!("{}", p_c("Players to create:"));
        for player in players.iter().take(5) {
            aprintln!(
                "  {} - {} ({})",
                player.initials,
                player.high_score,
                player.user_id
            );
        }
        if players.len() > 5 {
            aprintln!("  ... and {} more", players.len() - 5);
        }
        aprintln!();
    }

    if !cmd.force {
        confirm(&format!("Insert {} players?", players.len()), true)?;
    }

    let inserted = seed::seed_players(&dynamo_client, &cmd.table_name, &players).await?;

    if !global.is_silent() {
        aprintln!("{} {} players inserted.", p_g("Success:"), inserted);
    }

    Ok(())
}
