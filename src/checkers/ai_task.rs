//! Awaitable AI turn for async render surfaces.
//!
//! The task sleeps for the pacing delay, then picks its move. Cancelling (or
//! dropping the handle) during the delay abandons the move.

use super::ai::AiRequest;
use super::types::Move;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handle to a scheduled AI move.
pub struct AiTask {
    cancel_tx: watch::Sender<bool>,
    handle: JoinHandle<Option<Move>>,
}

impl AiTask {
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the move. None if cancelled or the side had no move.
    pub async fn join(self) -> Option<Move> {
        let AiTask { cancel_tx, handle } = self;
        let result = handle.await;
        drop(cancel_tx);
        match result {
            Ok(mv) => mv,
            Err(err) => {
                tracing::warn!(%err, "AI task failed");
                None
            }
        }
    }
}

/// Schedule the AI's move for `request` after `delay`, seeding its RNG with
/// `seed`. Must be called from within a tokio runtime.
pub fn spawn_ai_move(request: AiRequest, delay: Duration, seed: u64) -> AiTask {
    let (cancel_tx, mut cancel_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = cancel_rx.changed() => {
                tracing::debug!("AI move cancelled");
                return None;
            }
        }
        if *cancel_rx.borrow() {
            return None;
        }

        let mut rng = StdRng::seed_from_u64(seed);
        request.choose(&mut rng)
    });

    AiTask { cancel_tx, handle }
}
