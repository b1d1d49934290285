use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio_stream::StreamExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scoreboard::cli::{Cli, Commands, OutputFormat};
use scoreboard::display::{ChannelDisplay, TerminalDisplay};
use scoreboard::output::{format_output, pretty};
use scoreboard::storage::DynamoDbStore;
use scoreboard::sync::{BrowseQuery, RecordSynchronizer, SyncHandle};
use scoreboard_core::display::DisplaySink;
use scoreboard_core::player::{PlayerForm, PlayerRecord};
use scoreboard_core::SyncError;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scoreboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.config();
    config.validate()?;

    tracing::info!(
        table = %config.table_name,
        target = %config.aws.target_display(),
        "Connecting to data store"
    );
    let store = DynamoDbStore::connect(&config.aws, &config.table_name).await;

    // JSON output is printed by the commands themselves. Failures surface through the exit error.
    let display: Arc<dyn DisplaySink> = match cli.format {
        OutputFormat::Pretty => Arc::new(TerminalDisplay),
        OutputFormat::Json => Arc::new(ChannelDisplay::new()),
    };

    let handle = RecordSynchronizer::initialize(&config.user_id, Arc::new(store), display)?;

    match run(&cli, &handle).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Already shown on the display
        Err(SyncError::StoreUnavailable(_)) if cli.format == OutputFormat::Pretty => {
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

async fn run(cli: &Cli, handle: &SyncHandle) -> scoreboard_core::Result<()> {
    // Nothing is shown or saved on top of a record that failed to load
    handle.ready().await?;

    match &cli.command {
        Commands::Show => print_record(&handle.current(), cli.format),
        Commands::Scan => browse(handle, BrowseQuery::All, cli.format).await?,
        Commands::HighScores => browse(handle, BrowseQuery::HighScores, cli.format).await?,
        Commands::SetInitials { initials } => {
            handle.update_initials(initials).await?;
            if cli.format == OutputFormat::Json {
                print_record(&handle.current(), cli.format);
            }
        }
        Commands::SetHighScore { score } => {
            handle.update_high_score(score).await?;
            if cli.format == OutputFormat::Json {
                print_record(&handle.current(), cli.format);
            }
        }
        Commands::Submit {
            id,
            initials,
            high_score,
        } => {
            let current = PlayerForm::from_record(&handle.current());
            let form = PlayerForm {
                user_id: id.clone().unwrap_or(current.user_id),
                initials: initials.clone().unwrap_or(current.initials),
                high_score: high_score.clone().unwrap_or(current.high_score),
            };
            let outcome = handle.submit(form).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&outcome, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_outcome(&outcome)),
            }
        }
    }

    Ok(())
}

fn print_record(record: &PlayerRecord, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", format_output(record, format)),
        OutputFormat::Pretty => println!("{}", pretty::format_record(record)),
    }
}

async fn browse(
    handle: &SyncHandle,
    query: BrowseQuery,
    format: OutputFormat,
) -> scoreboard_core::Result<()> {
    match format {
        OutputFormat::Pretty => {
            let shown = match query {
                BrowseQuery::All => handle.scan_all().await?,
                BrowseQuery::HighScores => handle.scan_high_scores().await?,
            };
            tracing::info!(rows = shown, "Scan complete");
        }
        OutputFormat::Json => {
            let mut rows = handle.browse(query);
            let mut records = Vec::new();
            while let Some(item) = rows.next().await {
                records.push(PlayerRecord::from_item(&item?)?);
            }
            println!("{}", format_output(&records, format));
        }
    }
    Ok(())
}
