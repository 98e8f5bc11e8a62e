use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use lodestone::config::{CliOverrides, ConfigLoader};
use lodestone::engine::LoadTestEngine;
use lodestone::executor::HttpExecutor;
use lodestone::metrics::MetricsSnapshot;
use lodestone::report::ConsoleReport;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "lodestone")]
#[command(version = "0.1.0")]
#[command(about = "Fire concurrent GET requests at a URL and report latency", long_about = None)]
struct Cli {
    /// Number of requests to make [default: 1]
    #[arg(short = 'n', long)]
    requests: Option<usize>,

    /// Number of concurrent clients [default: 1]
    #[arg(short, long)]
    clients: Option<usize>,

    /// Load options from a file (JSON/YAML/TOML); flags take precedence
    #[arg(short = 'f', long)]
    config: Option<PathBuf>,

    /// Show a progress bar (stderr)
    #[arg(short, long, default_value_t = false)]
    progress: bool,

    /// Target URL
    url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        unsafe { std::env::set_var("RUST_LOG", "warn"); }
    }
    let cli = Cli::parse();
    let logger = env_logger::Builder::from_default_env().build();
    let level = logger.filter();
    let multi = Arc::new(indicatif::MultiProgress::new());

    if cli.progress {
        indicatif_log_bridge::LogWrapper::new((*multi).clone(), logger).try_init()?;
    } else {
        log::set_boxed_logger(Box::new(logger))?;
    }
    log::set_max_level(level);

    let options = ConfigLoader::resolve(
        cli.config.as_deref(),
        CliOverrides {
            url: cli.url,
            requests: cli.requests,
            clients: cli.clients,
        },
    )?;

    println!("Making {} requests to {}", options.requests, options.url);

    let executor = Arc::new(HttpExecutor::new()?);
    let engine = LoadTestEngine::new(options, None);

    let mut progress_bar: Option<ProgressBar> = None;
    let mut progress_task = None;
    if cli.progress {
        let pb = multi.add(ProgressBar::new(engine.options().requests as u64));
        pb.set_style(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"));

        let mut metrics_rx = engine.watch_metrics();
        let pb_clone = pb.clone();
        progress_bar = Some(pb);
        progress_task = Some(tokio::spawn(async move {
            while metrics_rx.changed().await.is_ok() {
                let snapshot: MetricsSnapshot = metrics_rx.borrow().clone();
                pb_clone.set_position(snapshot.outcomes_collected);
                pb_clone.set_message(format!(
                    "In flight: {} | RPS: {:.2}",
                    snapshot.active_workers, snapshot.requests_per_second
                ));
            }
        }));
    }

    let report = ConsoleReport::new(cli.progress.then(|| multi.clone()));
    engine.execute(executor, &report).await?;

    if let Some(task) = progress_task {
        task.abort();
    }
    if let Some(pb) = progress_bar {
        let final_metrics = engine.get_metrics();
        pb.set_position(final_metrics.outcomes_collected);
        pb.finish_with_message(format!(
            "RPS: {:.2} | Total Time: {:.1}s - Completed",
            final_metrics.requests_per_second, final_metrics.elapsed_seconds
        ));
    }

    Ok(())
}
