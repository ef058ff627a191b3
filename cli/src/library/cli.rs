use std::io::stdout;

use clap::Parser;
use snapprune_library::RetentionMode;

use crate::library::{
    config::{Credentials, Settings},
    constant::{DEFAULT_ENDPOINT, DEFAULT_KEEP_PERCENTAGE, DEFAULT_MAX_SNAPSHOTS},
    error::PruneError,
    http::HttpStorageApi,
    pruner::{Outcome, prune},
};

/// Prunes block-storage snapshots, keeping the most recent ones per volume.
#[derive(Parser, Debug)]
#[command(name = "snapprune", version)]
#[command(about = "Block-Storage Snapshot Pruner", long_about = None)]
pub struct Cli {
    /// Access key identifier for the storage API.
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// Secret credential for the storage API.
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// Base URL of the storage API.
    #[arg(long, env = "SNAPPRUNE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Total snapshot count that must be reached before anything is pruned.
    #[arg(long, env = "SNAPPRUNE_MAX_SNAPSHOTS", default_value_t = DEFAULT_MAX_SNAPSHOTS)]
    pub max_snapshots: usize,

    /// Fraction of each volume's completed snapshots to keep.
    #[arg(
        long,
        env = "SNAPPRUNE_KEEP_PERCENTAGE",
        default_value_t = DEFAULT_KEEP_PERCENTAGE,
        value_parser = parse_percentage
    )]
    pub keep_percentage: f64,

    /// Keep exactly the computed number of snapshots instead of one fewer.
    #[arg(long, env = "SNAPPRUNE_EXACT_RETENTION", default_value_t = false)]
    pub exact_retention: bool,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            credentials: Credentials::from_parts(
                self.access_key_id.as_deref(),
                self.secret_access_key.as_deref(),
            ),
            endpoint: self.endpoint.clone(),
            max_snapshots: self.max_snapshots,
            keep_percentage: self.keep_percentage,
            retention_mode: match self.exact_retention {
                true => RetentionMode::Exact,
                false => RetentionMode::Compatible,
            },
        }
    }
}

fn parse_percentage(value: &str) -> Result<f64, String> {
    let percentage = value
        .parse::<f64>()
        .map_err(|_| format!("`{}` is not a number", value))?;

    if !(0.0..=1.0).contains(&percentage) {
        return Err(format!("{} is not within 0.0..=1.0", percentage));
    }

    Ok(percentage)
}

pub async fn run(args: Cli) -> Result<Outcome, PruneError> {
    let settings = args.settings();
    let api = HttpStorageApi::new(&settings)?;

    prune(&api, &settings, &mut stdout()).await
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, FromArgMatches};

    use super::*;

    /// Parses flags only, so variables in the test process can't leak in.
    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let matches = Cli::command()
            .mut_args(|arg| arg.env(None))
            .try_get_matches_from(args.iter().copied())?;

        Cli::from_arg_matches(&matches)
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["snapprune"]).unwrap();

        assert_eq!(cli.access_key_id, None);
        assert_eq!(cli.secret_access_key, None);
        assert_eq!(cli.endpoint, DEFAULT_ENDPOINT);

        assert_eq!(cli.max_snapshots, 500);
        assert_eq!(cli.keep_percentage, 0.40);
        assert!(!cli.exact_retention);
        assert_eq!(cli.settings().retention_mode, RetentionMode::Compatible);
    }

    #[test]
    fn test_flags_build_settings() {
        let cli = parse(&[
            "snapprune",
            "--access-key-id",
            "AKIA",
            "--secret-access-key",
            "secret",
            "--endpoint",
            "https://storage.example.com",
            "--max-snapshots",
            "100",
            "--keep-percentage",
            "0.25",
            "--exact-retention",
        ])
        .unwrap();

        let settings = cli.settings();

        assert_eq!(
            settings.credentials,
            Credentials::from_parts(Some("AKIA"), Some("secret"))
        );
        assert_eq!(settings.endpoint, "https://storage.example.com");
        assert_eq!(settings.max_snapshots, 100);
        assert_eq!(settings.keep_percentage, 0.25);
        assert_eq!(settings.retention_mode, RetentionMode::Exact);
    }

    #[test]
    fn test_keep_percentage_out_of_range_rejected() {
        assert!(parse(&["snapprune", "--keep-percentage", "1.5"]).is_err());
        assert!(parse(&["snapprune", "--keep-percentage", "-0.1"]).is_err());
        assert!(parse(&["snapprune", "--keep-percentage", "half"]).is_err());
    }
}
