//! The poll loop: fetch, evaluate, notify, sleep, repeat.
//!
//! A failed fetch is printed and the loop simply waits for the next poll.
//! In single-shot mode the loop ends right after the first trigger has been
//! dispatched; otherwise it only ends with the process.

use chrono::Local;
use log::{debug, info, trace};
use std::ops::ControlFlow;
use tokio::time::{sleep, Instant};

use crate::config::PollConfig;
use crate::error::WatchError;
use crate::modules::condition::Rules;
use crate::modules::fetcher::Fetcher;
use crate::notifiers::Notifier;
use crate::utils::date::{timestamp, until_next_hour};
use crate::utils::template::build_message;

/// What a single poll ended with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    FetchFailed,
    Idle,
    Triggered,
}

pub struct Watcher {
    config: PollConfig,
    rules: Rules,
    fetcher: Box<dyn Fetcher>,
    notifier: Notifier,
    polls: u64,
    started: Instant,
}

impl Watcher {
    pub fn new(
        config: PollConfig,
        fetcher: Box<dyn Fetcher>,
        notifier: Notifier,
    ) -> Result<Self, WatchError> {
        config.validate()?;
        let rules = Rules::from_config(&config)?;
        Ok(Self { config, rules, fetcher, notifier, polls: 0, started: Instant::now() })
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    /// Fetch once and, if the page satisfies every condition, notify.
    pub async fn poll_once(&mut self) -> PollOutcome {
        self.polls += 1;
        debug!(
            "Poll #{} ({}s since start)",
            self.polls,
            self.started.elapsed().as_secs()
        );

        let content = match self.fetcher.fetch().await {
            Ok(content) => content,
            Err(e) => {
                eprintln!("[{}] Request failed: {e}", timestamp());
                return PollOutcome::FetchFailed;
            }
        };

        let eval = self.rules.evaluate(&content);
        trace!("{eval:?}");
        if !eval.triggered {
            return PollOutcome::Idle;
        }

        println!("[{}] Match detected.", timestamp());
        info!(
            "Hits: {:?}, available regions: {:?}",
            eval.hits, eval.available_regions
        );
        let message = build_message(
            &self.config.telegram_message,
            &eval,
            self.config.include_matches,
        );
        self.notifier.dispatch(&message).await;
        PollOutcome::Triggered
    }

    /// One full cycle: poll, then either stop (single-shot after a trigger)
    /// or sleep for the interval.
    pub async fn tick(&mut self) -> ControlFlow<()> {
        let outcome = self.poll_once().await;
        if outcome == PollOutcome::Triggered && self.config.once {
            info!("Match found, stopping after {} poll(s)", self.polls);
            return ControlFlow::Break(());
        }
        sleep(self.config.interval()).await;
        ControlFlow::Continue(())
    }

    /// Wait for the top of the hour if asked to, then poll until stopped.
    pub async fn run(mut self) {
        if self.config.align_hour {
            let wait = until_next_hour(Local::now().naive_local());
            info!("Aligning to the next hour, first poll in {}s", wait.as_secs());
            sleep(wait).await;
        }
        self.started = Instant::now();
        while self.tick().await.is_continue() {}
    }
}
