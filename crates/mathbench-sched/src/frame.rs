// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cancellable repeating frame task.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, instrument, trace};

use crate::cancel::CancelToken;

/// One display refresh at 60 Hz.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Passed to the frame callback on every iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Zero-based frame counter.
    pub index: u64,
    /// Time since the loop started.
    pub elapsed: Duration,
}

/// Returned by the frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    /// Schedule the next frame.
    Continue,
    /// End the loop after this frame.
    Stop,
}

/// A redraw cycle running on the tokio runtime until cancelled.
///
/// The loop owns its [`CancelToken`]; cancelling (or dropping the loop) stops
/// it at the next suspension point, so no frame callback runs after
/// [`stop`](Self::stop) returns.
#[derive(Debug)]
pub struct FrameLoop {
    token: CancelToken,
    handle: Option<JoinHandle<u64>>,
}

impl FrameLoop {
    /// Spawn the loop. Must be called from within a tokio runtime.
    pub fn spawn<F>(interval: Duration, on_frame: F) -> Self
    where
        F: FnMut(FrameTick) -> FrameControl + Send + 'static,
    {
        let token = CancelToken::new();
        let handle = tokio::spawn(run_frames(interval, token.clone(), on_frame));
        Self {
            token,
            handle: Some(handle),
        }
    }

    /// A clone of the loop's token.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Request cancellation without waiting.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the loop to end on its own. Returns the number of frames run.
    pub async fn join(mut self) -> u64 {
        match self.handle.take() {
            Some(handle) => handle.await.unwrap_or_default(),
            None => 0,
        }
    }

    /// Cancel and wait for the task to exit. Returns the number of frames run.
    pub async fn stop(self) -> u64 {
        self.cancel();
        self.join().await
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[instrument(skip(token, on_frame))]
async fn run_frames<F>(interval: Duration, token: CancelToken, mut on_frame: F) -> u64
where
    F: FnMut(FrameTick) -> FrameControl + Send + 'static,
{
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let start = Instant::now();
    let mut index = 0u64;

    debug!("frame loop started");
    loop {
        tokio::select! {
            biased;
            () = token.cancelled() => break,
            _ = ticker.tick() => {}
        }
        let tick = FrameTick {
            index,
            elapsed: start.elapsed(),
        };
        index += 1;
        trace!(frame = tick.index, "frame");
        if on_frame(tick) == FrameControl::Stop {
            break;
        }
    }
    debug!(frames = index, "frame loop stopped");
    index
}
