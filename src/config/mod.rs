use crate::utils::validation::{self, Validate};
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Calls shorter than this are treated as never answered.
pub const DEFAULT_MIN_DURATION_SECONDS: u64 = 30;
pub const DEFAULT_TIMEZONE: &str = "US/Central";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "call-log-report")]
#[command(about = "Analyze call-log CSV exports and produce a per-PBX XLSX report")]
pub struct CliConfig {
    /// User identifier to filter logs by
    pub user: String,

    /// One or more CSV file paths to analyze
    #[arg(required = true)]
    pub csv_files: Vec<PathBuf>,

    /// Path to the output XLSX file
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// Minimum call duration in seconds to count as an active call
    #[arg(long, default_value_t = DEFAULT_MIN_DURATION_SECONDS)]
    pub min_duration: u64,

    /// Timezone for call times on the detail sheet
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// Optional TOML file with PBX identifier rules
    #[arg(long)]
    pub pbx_rules: Option<PathBuf>,

    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("user", &self.user)?;
        validation::validate_file_extension("output", &self.output, &["xlsx"])?;
        validation::validate_timezone("timezone", &self.timezone)?;
        Ok(())
    }
}
