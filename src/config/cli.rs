use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "job-tracker")]
#[command(about = "Scrape job postings, extract details with an LLM and file them in Notion")]
pub struct CliArgs {
    /// Process this URL without showing the menu
    #[arg(long, conflicts_with = "batch")]
    pub url: Option<String>,

    /// Process every URL in the jobs file without showing the menu
    #[arg(long)]
    pub batch: bool,

    /// URL list used in batch mode (defaults to jobs.txt or the config file value)
    #[arg(long)]
    pub jobs_file: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Single(String),
    Batch,
}

/// What the user typed at the menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Single,
    Batch,
    Invalid,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuChoice::Single,
            "2" => MenuChoice::Batch,
            _ => MenuChoice::Invalid,
        }
    }
}

impl CliArgs {
    /// `None` means the interactive menu decides.
    pub fn run_mode(&self) -> Option<RunMode> {
        if let Some(url) = &self.url {
            return Some(RunMode::Single(url.trim().to_string()));
        }
        if self.batch {
            return Some(RunMode::Batch);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice() {
        assert_eq!(MenuChoice::parse("1"), MenuChoice::Single);
        assert_eq!(MenuChoice::parse(" 2\n"), MenuChoice::Batch);
        assert_eq!(MenuChoice::parse("3"), MenuChoice::Invalid);
        assert_eq!(MenuChoice::parse(""), MenuChoice::Invalid);
    }

    #[test]
    fn test_run_mode_from_flags() {
        let args = CliArgs::parse_from(["job-tracker", "--url", "https://jobs.example.com/1"]);
        assert_eq!(
            args.run_mode(),
            Some(RunMode::Single("https://jobs.example.com/1".to_string()))
        );

        let args = CliArgs::parse_from(["job-tracker", "--batch", "--jobs-file", "inbox.txt"]);
        assert_eq!(args.run_mode(), Some(RunMode::Batch));
        assert_eq!(args.jobs_file.as_deref(), Some("inbox.txt"));

        let args = CliArgs::parse_from(["job-tracker", "-v"]);
        assert_eq!(args.run_mode(), None);
        assert!(args.verbose);
    }

    #[test]
    fn test_url_and_batch_conflict() {
        let result =
            CliArgs::try_parse_from(["job-tracker", "--batch", "--url", "https://x.example"]);
        assert!(result.is_err());
    }
}
