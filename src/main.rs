use anyhow::Result;
use clap::Parser;
use csvcombine::{combine, modes, CombineOutcome};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Combine multiple CSV files into a single CSV file.
#[derive(Debug, Parser)]
#[command(name = "csvcombine", version)]
struct Cli {
    /// Base directory where the CSV files are located
    #[arg(long = "base_dir", visible_alias = "base-dir", value_name = "DIR")]
    base_dir: PathBuf,

    /// Prefix of the CSV files to combine
    #[arg(
        long = "csv_type",
        visible_alias = "csv-type",
        value_name = "MODE",
        default_value = modes::DEFAULT_MODE
    )]
    csv_type: String,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env).with_target(false).init();

    let cli = Cli::parse();
    debug!(base_dir = %cli.base_dir.display(), csv_type = %cli.csv_type, "args");

    match combine(&cli.base_dir, &cli.csv_type)? {
        CombineOutcome::Written(summary) => debug!(
            rows = summary.rows,
            files_read = summary.files_read,
            files_missing = summary.files_missing,
            "wrote {}",
            summary.output.display()
        ),
        CombineOutcome::NothingToCombine | CombineOutcome::UnsupportedMode => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_mode() {
        let cli = Cli::try_parse_from(["csvcombine", "--base_dir", "/data"]).unwrap();
        assert_eq!(cli.base_dir, PathBuf::from("/data"));
        assert_eq!(cli.csv_type, "cc12m_images_extracted_pos");
    }

    #[test]
    fn test_aliases_and_required() {
        let cli = Cli::try_parse_from([
            "csvcombine",
            "--base-dir",
            "d",
            "--csv-type",
            "cc12m_images_pos_neg_filtered",
        ])
        .unwrap();
        assert_eq!(cli.csv_type, "cc12m_images_pos_neg_filtered");

        assert!(Cli::try_parse_from(["csvcombine"]).is_err());
    }
}
