//! The sample-match-dispatch loop
//!
//! Runs on one dedicated thread. Each tick: sample key state, evaluate
//! every registered shortcut, dispatch the matches sequentially in
//! registration order, record cooldowns, sleep, and re-check the shutdown
//! flag. Dispatch happens on this thread, so hotkey detection stalls for
//! the duration of each HTTP call; at a 10 ms tick that is the accepted
//! cost of keeping the loop single-threaded.
//!
//! Cooldown is per shortcut: a just-fired shortcut is skipped until its
//! window elapses while the others keep being evaluated every tick.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::dispatch::Dispatcher;
use crate::lifecycle::ShutdownFlag;
use crate::matcher;
use crate::registry::ShortcutRegistry;
use crate::report::ErrorSink;
use crate::sampler::KeyStateSource;

/// Loop timing, taken from the validated config
#[derive(Debug, Clone, Copy)]
pub struct WorkerOptions {
    /// Sleep between ticks.
    pub poll_interval: Duration,
    /// Window during which a just-fired shortcut will not re-fire.
    pub cooldown: Duration,
}

/// Errors that can occur while starting the worker
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("failed to spawn worker thread: {0}")]
    ThreadSpawn(String),
}

/// The worker that owns the loop state
pub struct Worker<S, D, E> {
    registry: Arc<ShortcutRegistry>,
    sampler: S,
    dispatcher: D,
    errors: E,
    options: WorkerOptions,
    /// Last firing time per shortcut, indexed like the registry.
    fired_at: Vec<Option<Instant>>,
}

impl<S, D, E> Worker<S, D, E>
where
    S: KeyStateSource,
    D: Dispatcher,
    E: ErrorSink,
{
    pub fn new(
        registry: Arc<ShortcutRegistry>,
        sampler: S,
        dispatcher: D,
        errors: E,
        options: WorkerOptions,
    ) -> Self {
        let fired_at = vec![None; registry.len()];
        Self {
            registry,
            sampler,
            dispatcher,
            errors,
            options,
            fired_at,
        }
    }

    /// Run one tick at the given instant. Returns how many shortcuts fired.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut fired = 0;

        for index in matcher::evaluate(&self.sampler, &self.registry) {
            if let Some(at) = self.fired_at[index] {
                if now.duration_since(at) < self.options.cooldown {
                    continue;
                }
            }

            let shortcut = &self.registry.shortcuts()[index];
            let started = Instant::now();
            let outcome = self.dispatcher.dispatch(shortcut);
            let elapsed_ms = started.elapsed().as_millis() as u64;

            if outcome.is_success() {
                info!(
                    index,
                    combo = %shortcut.combo(),
                    url = %shortcut.url,
                    status = outcome.status,
                    elapsed_ms,
                    "webhook delivered"
                );
            } else if shortcut.alert_on_error {
                warn!(
                    index,
                    combo = %shortcut.combo(),
                    url = %shortcut.url,
                    status = outcome.status,
                    elapsed_ms,
                    "webhook failed"
                );
                self.errors.report(&format!(
                    "webhook {} {} failed: {}",
                    shortcut.method,
                    shortcut.url,
                    outcome.describe()
                ));
            } else {
                debug!(
                    index,
                    url = %shortcut.url,
                    status = outcome.status,
                    "webhook failed, alerts disabled for this shortcut"
                );
            }

            self.fired_at[index] = Some(now);
            fired += 1;
        }

        fired
    }

    /// Run the loop until the shutdown flag is observed.
    ///
    /// The flag is checked at tick boundaries only; an in-flight dispatch
    /// is never aborted. Returns once Stopping is observed.
    pub fn run(mut self, shutdown: ShutdownFlag) {
        info!(shortcuts = self.registry.len(), "worker started");

        while !shutdown.is_set() {
            self.tick(Instant::now());
            thread::sleep(self.options.poll_interval);
        }

        info!("worker stopped");
    }

    /// Start the loop on a dedicated named thread.
    ///
    /// The caller keeps the [`ShutdownFlag`] to request a stop and must join
    /// the returned handle before finishing teardown.
    pub fn spawn(self, shutdown: ShutdownFlag) -> Result<thread::JoinHandle<()>, WorkerError>
    where
        S: Send + 'static,
        D: Send + 'static,
        E: Send + 'static,
    {
        thread::Builder::new()
            .name("shortcut-worker".to_string())
            .spawn(move || self.run(shutdown))
            .map_err(|e| WorkerError::ThreadSpawn(e.to_string()))
    }
}
