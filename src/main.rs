use clap::Parser;
use dialoguer::Input;
use job_tracker::adapters::input::read_urls_from_file;
use job_tracker::config::cli::{MenuChoice, RunMode};
use job_tracker::domain::ports::JobProcessor;
use job_tracker::utils::logger;
use job_tracker::{
    BatchRunner, CliArgs, HttpPageFetcher, JobPipeline, NotionStore, OpenAiClient, TrackerConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);
    tracing::info!("Starting job-tracker");

    // 憑證缺少時立即結束
    let mut config = match TrackerConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    if let Some(jobs_file) = &args.jobs_file {
        config.jobs_file = jobs_file.clone();
    }
    tracing::debug!("Config: {:?}", config);

    let mode = match args.run_mode() {
        Some(mode) => mode,
        None => match prompt_menu()? {
            Some(mode) => mode,
            None => {
                println!("Invalid choice. Please enter 1 or 2.");
                return Ok(());
            }
        },
    };

    let pipeline = JobPipeline::new(
        HttpPageFetcher::new(&config)?,
        OpenAiClient::new(&config),
        NotionStore::new(&config),
    );
    let runner = BatchRunner::new(pipeline);

    match mode {
        RunMode::Single(url) => {
            let outcome = runner.run_one(&url).await;
            println!("{}", outcome.message);
        }
        RunMode::Batch => run_batch(&runner, &config.jobs_file).await,
    }

    Ok(())
}

fn prompt_menu() -> anyhow::Result<Option<RunMode>> {
    println!("Choose an option:");
    println!("1. Process single URL");
    println!("2. Process all URLs from the jobs file");

    let choice: String = Input::new()
        .with_prompt("Enter your choice (1 or 2)")
        .allow_empty(true)
        .interact_text()?;

    match MenuChoice::parse(&choice) {
        MenuChoice::Single => {
            let url: String = Input::new()
                .with_prompt("Enter job posting URL")
                .interact_text()?;
            Ok(Some(RunMode::Single(url.trim().to_string())))
        }
        MenuChoice::Batch => Ok(Some(RunMode::Batch)),
        MenuChoice::Invalid => Ok(None),
    }
}

async fn run_batch<P: JobProcessor>(runner: &BatchRunner<P>, jobs_file: &str) {
    if let Ok(cwd) = std::env::current_dir() {
        println!("Looking for {} in: {}", jobs_file, cwd.display());
    }

    match read_urls_from_file(jobs_file) {
        Ok(urls) => {
            println!("Found {} URLs to process", urls.len());
            if urls.is_empty() {
                println!(
                    "No URLs found to process. Please check your {} file.",
                    jobs_file
                );
                return;
            }
            runner.run_many(&urls).await;
        }
        Err(e) => {
            tracing::error!("❌ {}", e);
            println!("Error: {}", e);
            println!("💡 {}", e.recovery_suggestion());
        }
    }
}
