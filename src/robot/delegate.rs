//! Background move delegation.
//!
//! A [`Robot`] owns at most one worker thread. The worker sleeps, decides
//! with its strategy under the session lock, then submits the chosen
//! direction through a [`MoveProcessor`]. Stopping is synchronous: once
//! `stop_delegation` returns, the old worker has exited and can submit
//! nothing further.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{info, instrument, trace, warn};

use crate::controller::Session;
use crate::core::{Direction, GameRng, PlayerId};
use crate::rules::MoveResolver;

use super::config::RobotConfig;
use super::interval::{FixedInterval, IntervalSource};
use super::strategy::MoveStrategy;

/// Sink for moves chosen by a delegate.
pub trait MoveProcessor: Send + Sync {
    fn submit(&self, direction: Direction);
}

impl<F> MoveProcessor for F
where
    F: Fn(Direction) + Send + Sync,
{
    fn submit(&self, direction: Direction) {
        self(direction)
    }
}

/// Something that can play on a player's behalf.
pub trait MoveDelegate {
    /// Begin submitting moves to `processor`, replacing any running delegation.
    fn start_delegation(&mut self, processor: Arc<dyn MoveProcessor>);

    /// Stop submitting moves. Returns after the worker has exited.
    fn stop_delegation(&mut self);
}

struct Worker {
    stop_flag: Arc<AtomicBool>,
    stop_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

/// Automated player for one seat of a session.
pub struct Robot<R: MoveResolver + 'static> {
    session: Session<R>,
    player: PlayerId,
    config: RobotConfig,
    interval: Arc<dyn IntervalSource>,
    rng: GameRng,
    worker: Option<Worker>,
}

impl<R: MoveResolver + 'static> Robot<R> {
    #[must_use]
    pub fn new(session: Session<R>, player: PlayerId, config: RobotConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let interval = Arc::new(FixedInterval(config.interval));
        Self {
            session,
            player,
            config,
            interval,
            rng,
            worker: None,
        }
    }

    /// Replace the configured fixed interval, e.g. with a `JitteredInterval`.
    #[must_use]
    pub fn with_interval_source(mut self, interval: Arc<dyn IntervalSource>) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    #[must_use]
    pub fn is_delegating(&self) -> bool {
        self.worker.is_some()
    }

    /// Start delegating straight into this robot's own session.
    pub fn start(&mut self) {
        let processor = Arc::new(self.session.processor(self.player));
        self.start_delegation(processor);
    }

    fn spawn_worker(&mut self, processor: Arc<dyn MoveProcessor>) -> Worker {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let flag = Arc::clone(&stop_flag);
        let session = self.session.clone();
        let interval = Arc::clone(&self.interval);
        let strategy: Box<dyn MoveStrategy> = self.config.build_strategy();
        let mut rng = self.rng.fork();
        let player = self.player;

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval.next_interval(&mut rng)) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
            if flag.load(Ordering::Acquire) {
                break;
            }

            let choice = session.read(|c| strategy.choose(&c.view(), player, &mut rng));

            if flag.load(Ordering::Acquire) {
                break;
            }
            match choice {
                Some(direction) => {
                    trace!(%player, %direction, "Robot submits move");
                    processor.submit(direction);
                }
                None => trace!(%player, "Robot has no move"),
            }
        });

        Worker {
            stop_flag,
            stop_tx,
            handle,
        }
    }
}

impl<R: MoveResolver + 'static> MoveDelegate for Robot<R> {
    #[instrument(skip_all, fields(player = %self.player))]
    fn start_delegation(&mut self, processor: Arc<dyn MoveProcessor>) {
        self.stop_delegation();
        let worker = self.spawn_worker(processor);
        self.worker = Some(worker);
        info!(player = %self.player, strategy = ?self.config.strategy, "Robot delegation started");
    }

    #[instrument(skip_all, fields(player = %self.player))]
    fn stop_delegation(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        worker.stop_flag.store(true, Ordering::Release);
        let _ = worker.stop_tx.send(());

        // A processor that stops its own robot runs on the worker thread.
        if worker.handle.thread().id() == thread::current().id() {
            return;
        }
        if worker.handle.join().is_err() {
            warn!(player = %self.player, "Robot worker panicked");
        }
        info!(player = %self.player, "Robot delegation stopped");
    }
}

impl<R: MoveResolver + 'static> Drop for Robot<R> {
    fn drop(&mut self) {
        self.stop_delegation();
    }
}
