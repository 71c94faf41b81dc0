//! Single-owner session loop.
//!
//! The session task is the only owner of [`GameState`]. Intents arrive over a
//! channel and are applied between generation ticks, so a step never observes
//! a half-applied edit.

use std::io;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use super::{GameState, Intent, Outcome};

/// Rendering boundary of the session loop
pub trait Canvas {
    fn present(&mut self, state: &GameState) -> io::Result<()>;
}

/// Drive `state` until a quit intent arrives or every sender is dropped.
///
/// Returns the final state so callers can inspect it after shutdown.
pub async fn run<C: Canvas + ?Sized>(
    mut state: GameState,
    mut intents: UnboundedReceiver<Intent>,
    canvas: &mut C,
    tick: Duration,
) -> io::Result<GameState> {
    let mut ticker = time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    canvas.present(&state)?;
    info!(?tick, "session started");

    loop {
        tokio::select! {
            biased;

            intent = intents.recv() => {
                let Some(intent) = intent else {
                    debug!("intent channel closed");
                    break;
                };
                let shown = state.status.clone();
                match state.apply(intent) {
                    Outcome::Quit => break,
                    Outcome::Applied => canvas.present(&state)?,
                    // A rejection can still set or clear the status line
                    Outcome::Rejected if state.status != shown => canvas.present(&state)?,
                    Outcome::Rejected => {}
                }
            }
            _ = ticker.tick() => {
                if state.tick() {
                    canvas.present(&state)?;
                }
            }
        }
    }

    info!(generation = state.engine.generation(), "session ended");
    Ok(state)
}
