use anyhow::{Context, Result};
use clap::Parser;

use env_logger::Builder;
use log::{info, debug};

use pollwatch::args::{Args, load_config};
use pollwatch::modules::fetcher::HttpFetcher;
use pollwatch::modules::scheduler::Watcher;
use pollwatch::notifiers::Notifier;

#[tokio::main]
async fn main() -> Result<()> {
    // Get arguments
    let args = Args::parse();

    // Build logger
    let level = match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_level(level)
        .init();
    debug!("Verbosity level: {:?}", level);

    // Validated once, read-only from here on
    let config = load_config(&args)?;

    let fetcher = HttpFetcher::new(&config).context("Building HTTP client")?;
    let notifier = Notifier::from_config(&config).context("Building notifiers")?;
    if notifier.is_empty() {
        info!("No --command or Telegram target set, matches will only be printed");
    }
    notifier.verify().await;

    info!(
        "pollwatch: watching {} every {}s{}",
        config.url,
        config.interval,
        if config.once { " until the first match" } else { ". Press Ctrl+C to quit.." }
    );
    let watcher = Watcher::new(config, Box::new(fetcher), notifier)?;
    watcher.run().await;

    info!("Done. Bye!");
    Ok(())
}
