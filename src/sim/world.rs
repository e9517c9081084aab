/// WorldState: the complete snapshot of a running session.
///
/// ## Ownership
///
///   - `progress` is the single source of truth for where the player is.
///     It only changes through its own three operations.
///   - `stage` / `finale` hold the local state of whatever is mounted.
///     They are created and discarded by `step::sync_mounts` whenever the
///     routed scene changes; nothing else replaces them.
///
/// Disjoint fields let a mounted level borrow `progress` as its completion
/// sink while the world holds the level mutably.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{GameConfig, LevelTuning};
use crate::domain::assets::AssetCatalog;
use crate::domain::finale::Finale;
use crate::domain::geometry::Point;
use crate::domain::progress::GameProgress;
use crate::domain::scene::{self, RevealCard, Scene};
use crate::games::{Stage, START_POINTER};

pub struct WorldState {
    // ── Progress ──
    pub progress: GameProgress,

    // ── Mounted scene state ──
    pub stage: Option<Stage>,
    pub finale: Option<Finale>,
    /// Scene the mounts currently belong to. `None` before the first sync.
    pub mounted: Option<Scene>,

    // ── Pointer ──
    pub pointer: Point,

    // ── Content ──
    pub tuning: LevelTuning,
    pub assets: AssetCatalog,
    pub nickname: String,
    pub full_name: String,
    pub pet_name: String,

    // ── Meta ──
    pub rng: StdRng,
    pub tick: u64,
    pub paused: bool,

    // ── UI ──
    pub message: String,
    pub message_ms: u64,

    // ── Animation ──
    pub anim_tick: u32,
}

// ── Construction ──

impl WorldState {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        WorldState {
            progress: GameProgress::new(),
            stage: None,
            finale: None,
            mounted: None,
            pointer: START_POINTER,
            tuning: config.levels.clone(),
            assets: AssetCatalog::new(&config.images_dir),
            nickname: config.general.nickname.clone(),
            full_name: config.general.full_name.clone(),
            pet_name: config.general.pet_name.clone(),
            rng: StdRng::seed_from_u64(seed),
            tick: 0,
            paused: false,
            message: String::new(),
            message_ms: 0,
            anim_tick: 0,
        }
    }

    pub fn set_message(&mut self, msg: &str, duration_ms: u64) {
        self.message = msg.to_string();
        self.message_ms = duration_ms;
    }
}

// ── Queries ──

impl WorldState {
    /// The scene progress currently routes to.
    pub fn scene(&self) -> Scene {
        scene::route(&self.progress)
    }

    /// The reveal card to show, if the reveal is up.
    pub fn reveal(&self) -> Option<RevealCard<'_>> {
        scene::reveal_for(self.progress.current_level(), self.progress.showing_reveal(), &self.assets)
    }

    /// True while the mounted level wants raw characters.
    pub fn wants_text(&self) -> bool {
        self.stage.as_ref().is_some_and(|s| s.game().accepts_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::level::LevelIndex;

    #[test]
    fn fresh_world_starts_on_welcome() {
        let w = WorldState::new(&GameConfig::default(), 1);
        assert_eq!(w.scene(), Scene::Welcome);
        assert_eq!(w.progress.current_level(), LevelIndex::WELCOME);
        assert!(w.stage.is_none());
        assert!(w.reveal().is_none());
        assert!(!w.wants_text());
        assert_eq!(w.nickname, "Riya");
    }

    #[test]
    fn message_is_replaced() {
        let mut w = WorldState::new(&GameConfig::default(), 1);
        w.set_message("one", 100);
        w.set_message("two", 200);
        assert_eq!(w.message, "two");
        assert_eq!(w.message_ms, 200);
    }
}
