//! Async driver for an [`Animator`].
//!
//! A `LiveTracker` owns one spawned task holding the animator, the marker and
//! at most one pending tick deadline. Every call is a request to that task and
//! only returns after the task applied it, so once `load_batch` or `cancel`
//! returned no tick of the previous batch can run anymore.

use model::live::RawLiveTrackSample;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
    time::{sleep_until, Instant},
};

use crate::{
    animator::{Animator, PlaybackState},
    batch::LiveTrackBatch,
    marker::MarkerSink,
    Result, TrackingConfig,
};

#[derive(Debug)]
enum Command {
    LoadBatch {
        batch: LiveTrackBatch,
        responder: oneshot::Sender<PlaybackState>,
    },
    Cancel {
        responder: oneshot::Sender<()>,
    },
    Snapshot {
        responder: oneshot::Sender<PlaybackState>,
    },
}

pub struct LiveTracker {
    sender: mpsc::Sender<Command>,
    task: JoinHandle<()>,
}

impl LiveTracker {
    pub fn spawn<S: MarkerSink>(sink: S, config: TrackingConfig) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let task = tokio::spawn(run(Animator::new(config), sink, receiver));
        Self { sender, task }
    }

    /// Replaces whatever is playing with `batch`.
    pub async fn load_batch(&self, batch: LiveTrackBatch) -> Result<PlaybackState> {
        let (responder, response) = oneshot::channel();
        self.sender.send(Command::LoadBatch { batch, responder }).await?;
        Ok(response.await?)
    }

    /// Validates a batch as delivered by the subscription and plays it. An
    /// invalid batch is dropped and the current playback keeps running.
    pub async fn load_raw(&self, raw: Vec<RawLiveTrackSample>) -> Result<PlaybackState> {
        let batch = LiveTrackBatch::from_raw(raw).map_err(|why| {
            log::warn!("live batch rejected: {}", why);
            why
        })?;
        self.load_batch(batch).await
    }

    pub async fn cancel(&self) -> Result<()> {
        let (responder, response) = oneshot::channel();
        self.sender.send(Command::Cancel { responder }).await?;
        Ok(response.await?)
    }

    /// Playback state and the sample currently on the marker.
    pub async fn snapshot(&self) -> Result<PlaybackState> {
        let (responder, response) = oneshot::channel();
        self.sender.send(Command::Snapshot { responder }).await?;
        Ok(response.await?)
    }

    /// Stops the task, dropping any playback in progress.
    pub async fn shutdown(self) {
        drop(self.sender);
        if let Err(why) = self.task.await {
            log::error!("live tracker task failed: {:?}", why);
        }
    }
}

async fn run<S: MarkerSink>(
    mut animator: Animator,
    mut sink: S,
    mut commands: mpsc::Receiver<Command>,
) {
    let mut next_tick: Option<Instant> = None;
    loop {
        tokio::select! {
            biased;
            command = commands.recv() => {
                let Some(command) = command else {
                    break;
                };
                match command {
                    Command::LoadBatch { batch, responder } => {
                        if animator.load_batch(batch) {
                            log::debug!("live batch superseded by a newer one");
                        }
                        next_tick = animator.is_playing().then(Instant::now);
                        respond(responder, animator.state());
                    }
                    Command::Cancel { responder } => {
                        animator.cancel();
                        next_tick = None;
                        respond(responder, ());
                    }
                    Command::Snapshot { responder } => {
                        respond(responder, animator.state());
                    }
                }
            }
            _ = wait_for(next_tick) => {
                let deadline = next_tick.take().unwrap_or_else(Instant::now);
                let Some(frame) = animator.tick(chrono::Utc::now().timestamp()) else {
                    continue;
                };
                if sink.update_marker(frame.update) {
                    next_tick = frame.next_in.map(|delay| deadline + delay);
                } else {
                    log::warn!("marker is gone, stopping live playback");
                    animator.cancel();
                }
            }
        }
    }
    log::debug!("live tracker stopped");
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn respond<T>(responder: oneshot::Sender<T>, value: T) {
    if responder.send(value).is_err() {
        log::error!("Can not respond to live tracker request!");
    }
}
