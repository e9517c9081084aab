/// Valentine Quest: nine terminal mini-games and one question.
///
///   - `domain`: level indices, the progress store, routing, the finale
///   - `games`:  the nine mini-games and their shared plumbing
///   - `sim`:    world state, timers and the per-tick `step`
///   - `ui`:     terminal rendering and input devices

pub mod config;
pub mod domain;
pub mod error;
pub mod games;
pub mod logging;
pub mod sim;
pub mod ui;
