//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{AwsConfig, Config, DEFAULT_REGION, DEFAULT_TABLE_NAME};

/// View, edit and browse player records stored in DynamoDB.
#[derive(Debug, Parser)]
#[command(name = "scoreboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// User id of the current player, as issued by the identity provider.
    #[arg(long, env = "SCOREBOARD_USER_ID", default_value = "")]
    pub user_id: String,

    /// DynamoDB table holding player records.
    #[arg(long, env = "SCOREBOARD_TABLE_NAME", default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,

    /// AWS region.
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Custom endpoint URL (for local DynamoDB).
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Startup configuration from the parsed arguments.
    pub fn config(&self) -> Config {
        Config {
            user_id: self.user_id.clone(),
            table_name: self.table_name.clone(),
            aws: AwsConfig {
                endpoint_url: self
                    .endpoint_url
                    .clone()
                    .filter(|url| !url.is_empty()),
                region: self.region.clone(),
            },
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output with colors.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the current player's record.
    Show,
    /// List every player.
    Scan,
    /// List players with a high score above zero.
    HighScores,
    /// Change the current player's initials.
    SetInitials {
        /// New initials.
        initials: String,
    },
    /// Change the current player's high score.
    SetHighScore {
        /// New high score (integer).
        #[arg(allow_hyphen_values = true)]
        score: String,
    },
    /// Save a whole record. Another user id creates a new record.
    ///
    /// Omitted values are taken from the current record.
    Submit {
        /// User id of the record.
        #[arg(long)]
        id: Option<String>,
        /// Initials.
        #[arg(long)]
        initials: Option<String>,
        /// High score (integer).
        #[arg(long, allow_hyphen_values = true)]
        high_score: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "scoreboard",
            "--user-id",
            "A",
            "--format",
            "json",
            "submit",
            "--id",
            "B",
            "--initials",
            "XY",
            "--high-score",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.user_id, "A");
        assert!(matches!(
            &cli.command,
            Commands::Submit { id, initials, high_score }
                if id.as_deref() == Some("B")
                    && initials.as_deref() == Some("XY")
                    && high_score.as_deref() == Some("5")
        ));
    }

    #[test]
    fn test_submit_values_are_optional() {
        let cli = Cli::try_parse_from(["scoreboard", "submit", "--high-score", "-3"]).unwrap();

        assert!(matches!(
            &cli.command,
            Commands::Submit { id: None, initials: None, high_score: Some(score) } if score == "-3"
        ));
    }

    #[test]
    fn test_format_after_subcommand() {
        let cli = Cli::try_parse_from(["scoreboard", "scan", "--format", "json"]).unwrap();

        assert!(matches!(cli.command, Commands::Scan));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_config_from_arguments() {
        let cli = Cli::try_parse_from([
            "scoreboard",
            "--user-id",
            "us-east-1:abc",
            "--table-name",
            "Scores",
            "--region",
            "eu-west-1",
            "--endpoint-url",
            "http://localhost:8000",
            "show",
        ])
        .unwrap();

        let config = cli.config();

        assert_eq!(config.user_id, "us-east-1:abc");
        assert_eq!(config.table_name, "Scores");
        assert_eq!(config.aws.region, "eu-west-1");
        assert_eq!(
            config.aws.endpoint_url.as_deref(),
            Some("http://localhost:8000")
        );
    }

    #[test]
    fn test_set_high_score_keeps_raw_text() {
        let cli = Cli::try_parse_from(["scoreboard", "set-high-score", "abc"]).unwrap();

        assert!(matches!(&cli.command, Commands::SetHighScore { score } if score == "abc"));
    }

    #[test]
    fn test_negative_high_score_is_not_a_flag() {
        let cli = Cli::try_parse_from(["scoreboard", "set-high-score", "-5"]).unwrap();

        assert!(matches!(&cli.command, Commands::SetHighScore { score } if score == "-5"));
    }
}
