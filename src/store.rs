//! Submission store
//!
//! Owns the ranked submission list plus the loading/error/celebration flags
//! the views render from. State lives in a `watch` channel so any number of
//! views can follow it; only the store (and its own dismiss timer) writes.
//!
//! Mutating operations take `&mut self`, so submits are serialized: each one
//! finishes persisting and installing its celebration before the next starts.
//!
//! The dismiss timer is spawned with `tokio::spawn`, so `submit` must run
//! inside a tokio runtime.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::celebration::CelebrationEvent;
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::{PersistenceError, SubmissionError};
use crate::persistence::SubmissionRepository;
use crate::ranking::rank_in_place;
use crate::submission::{IdGenerator, Submission, SubmissionInput};
use crate::validation::validate_input;

/// Message shown when the persisted list cannot be read
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load submissions";

/// Everything a view needs to render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Always in leaderboard order
    pub submissions: Vec<Submission>,
    pub loading: bool,
    pub error: Option<String>,
    /// Visible celebration, if any
    pub celebration: Option<CelebrationEvent>,
    /// Bumped every time a celebration is installed
    celebration_generation: u64,
}

/// Pending auto-dismiss. Aborted when dropped.
struct DismissTimer {
    handle: JoinHandle<()>,
}

impl DismissTimer {
    fn start(state: Arc<watch::Sender<StoreState>>, generation: u64, after: Duration) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            state.send_if_modified(|s| {
                // A newer celebration owns its own timer
                if s.celebration.is_some() && s.celebration_generation == generation {
                    log::debug!("Celebration {} auto-dismissed", generation);
                    s.celebration = None;
                    true
                } else {
                    false
                }
            });
        });
        Self { handle }
    }
}

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Clears `loading` when an operation ends, including when its future is
/// dropped before completing.
struct LoadingGuard {
    state: Arc<watch::Sender<StoreState>>,
}

impl LoadingGuard {
    fn begin(state: &Arc<watch::Sender<StoreState>>) -> Self {
        state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        Self {
            state: Arc::clone(state),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state
            .send_if_modified(|s| std::mem::replace(&mut s.loading, false));
    }
}

/// Ranked submissions plus loading/error/celebration state, backed by a
/// [`SubmissionRepository`]
pub struct SubmissionStore<R> {
    repository: R,
    config: StoreConfig,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
    state: Arc<watch::Sender<StoreState>>,
    dismiss_timer: Option<DismissTimer>,
}

impl<R: SubmissionRepository> SubmissionStore<R> {
    /// Create an empty store. Call [`initialize`](Self::initialize) to load.
    pub fn new(repository: R, config: StoreConfig) -> Self {
        Self::with_clock(repository, config, Arc::new(SystemClock))
    }

    /// Create an empty store that takes timestamps and ids from `clock`
    pub fn with_clock(repository: R, config: StoreConfig, clock: Arc<dyn Clock>) -> Self {
        let (tx, _rx) = watch::channel(StoreState::default());
        Self {
            repository,
            config,
            clock,
            ids: IdGenerator::new(),
            state: Arc::new(tx),
            dismiss_timer: None,
        }
    }

    /// Settings the store was built with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Backing repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Snapshot of the current state
    pub fn state(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Ranked submissions
    pub fn submissions(&self) -> Vec<Submission> {
        self.state.borrow().submissions.clone()
    }

    /// True while a load or submit is in flight
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Store-level error message, if any
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Visible celebration, if any
    pub fn celebration(&self) -> Option<CelebrationEvent> {
        self.state.borrow().celebration.clone()
    }

    /// Follow state changes
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Load the persisted list.
    ///
    /// On failure the list is emptied, `error` carries
    /// [`LOAD_FAILED_MESSAGE`] and the cause is returned as well. Calling
    /// again retries.
    pub async fn initialize(&mut self) -> Result<usize, PersistenceError> {
        let _loading = LoadingGuard::begin(&self.state);

        let delay = self.config.load_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match self.repository.load().await {
            Ok(mut submissions) => {
                // Out-of-band edits can repeat an id; the first copy wins
                let mut seen = HashSet::new();
                submissions.retain(|submission| {
                    let fresh = seen.insert(submission.id);
                    if !fresh {
                        log::warn!("Dropping duplicate submission id {}", submission.id);
                    }
                    fresh
                });
                rank_in_place(&mut submissions);
                for submission in &submissions {
                    self.ids.observe(submission.id);
                }
                let count = submissions.len();
                self.state.send_modify(|s| s.submissions = submissions);
                Ok(count)
            }
            Err(e) => {
                log::error!("Loading submissions failed: {}", e);
                self.state.send_modify(|s| {
                    s.submissions.clear();
                    s.error = Some(LOAD_FAILED_MESSAGE.to_string());
                });
                Err(e)
            }
        }
    }

    /// Record a new submission, re-rank, persist and celebrate.
    ///
    /// Invalid input is rejected before any state changes. A failed save is
    /// logged and otherwise ignored; the in-memory list stays authoritative.
    pub async fn submit(&mut self, input: SubmissionInput) -> Result<Submission, SubmissionError> {
        validate_input(&input)?;

        let loading = LoadingGuard::begin(&self.state);

        let delay = self.config.submit_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let now = self.clock.now();
        let submission = Submission {
            id: self.ids.next_id(now),
            name: input.name.trim().to_string(),
            score: input.score,
            time: input.time,
            audio_reference: input.audio_reference,
            created_at: now,
        };

        let mut ranked = self.state.borrow().submissions.clone();
        ranked.push(submission.clone());
        rank_in_place(&mut ranked);
        self.state.send_modify(|s| s.submissions = ranked.clone());

        if let Err(e) = self.repository.save(&ranked).await {
            log::warn!("Saving submissions failed, keeping them in memory: {}", e);
        }

        self.celebrate(CelebrationEvent::new(submission.name.clone(), submission.score));
        drop(loading);

        log::info!(
            "Accepted submission {} ({} scored {} in {}s)",
            submission.id,
            submission.name,
            submission.score,
            submission.time
        );
        Ok(submission)
    }

    /// Clear the store-level error. No-op when there is none.
    pub fn clear_error(&mut self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    /// Hide the celebration and cancel its timer. No-op when hidden.
    pub fn dismiss_celebration(&mut self) {
        self.dismiss_timer = None;
        self.state.send_if_modified(|s| s.celebration.take().is_some());
    }

    fn celebrate(&mut self, event: CelebrationEvent) {
        // Cancel first so the old timer can never race the new event
        self.dismiss_timer = None;

        let mut generation = 0;
        self.state.send_modify(|s| {
            s.celebration_generation += 1;
            generation = s.celebration_generation;
            s.celebration = Some(event);
        });

        self.dismiss_timer = Some(DismissTimer::start(
            Arc::clone(&self.state),
            generation,
            self.config.celebration_duration(),
        ));
    }
}
