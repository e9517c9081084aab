/// The nine mini-games.
///
/// Each level is a small state machine over its own private state. It sees
/// input as `Action`s, keeps its delays in a `Timers` it owns, and reports a
/// win through the one capability it is handed (`Completion`), exactly once,
/// guarded by a `WinLatch`.
///
/// `Stage` is the closed set of mounted levels. The world creates a fresh
/// `Stage` whenever a level's scene is entered and tears it down on exit.

pub mod emoji_rain;
pub mod ghost_button;
pub mod heart_pop;
pub mod keyhole;
pub mod love_slider;
pub mod password;
pub mod pattern_match;
pub mod puzzle;
pub mod scratch_off;

use rand::rngs::StdRng;

use crate::config::LevelTuning;
use crate::domain::geometry::{MoveDir, Point, FIELD_H};
use crate::domain::level::{Challenge, LevelIndex};
use crate::domain::progress::Completion;
use crate::sim::event::GameEvent;

use emoji_rain::EmojiRain;
use ghost_button::GhostButton;
use heart_pop::HeartPop;
use keyhole::Keyhole;
use love_slider::LoveSlider;
use password::Password;
use pattern_match::PatternMatch;
use puzzle::Puzzle;
use scratch_off::ScratchOff;

/// Where the pointer sits when a level mounts.
pub const START_POINTER: Point = Point::new(1, FIELD_H - 1);

/// Input as the levels see it. Each level ignores what its modality
/// does not use.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    /// Pointer moved to this field cell.
    Hover(Point),
    /// Click / tap at this field cell.
    Press(Point),
    /// One directional step (slider-style input).
    Steer(MoveDir),
    Type(char),
    Erase,
    Submit,
    Restart,
}

/// What a level may touch while handling input or time.
pub struct Ctx<'a> {
    pub sink: &'a mut dyn Completion,
    pub events: &'a mut Vec<GameEvent>,
}

pub trait MiniGame {
    fn challenge(&self) -> Challenge;

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>);

    /// Advance this level's clock and run whatever came due.
    fn advance(&mut self, dt_ms: u64, ctx: &mut Ctx<'_>);

    /// Cancel everything pending. Called before the level is discarded.
    fn teardown(&mut self);

    /// Win predicate has fired (completion may still be pending).
    fn is_won(&self) -> bool;

    /// Text entry wants raw characters instead of movement keys.
    fn accepts_text(&self) -> bool {
        false
    }
}

/// Single-fire guard: `arm` succeeds once, `report` reaches the sink once.
#[derive(Clone, Copy, Default, Debug)]
pub struct WinLatch {
    won: bool,
    reported: bool,
}

impl WinLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only on the first call.
    pub fn arm(&mut self) -> bool {
        if self.won {
            false
        } else {
            self.won = true;
            true
        }
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Report the win if armed and not yet reported.
    pub fn report(&mut self, level: LevelIndex, sink: &mut dyn Completion) -> bool {
        if self.won && !self.reported {
            self.reported = true;
            sink.report_win(level);
            true
        } else {
            false
        }
    }
}

pub enum Stage {
    GhostButton(GhostButton),
    HeartPop(HeartPop),
    LoveSlider(LoveSlider),
    ScratchOff(ScratchOff),
    Password(Password),
    PatternMatch(PatternMatch),
    EmojiRain(EmojiRain),
    Keyhole(Keyhole),
    Puzzle(Puzzle),
}

impl Stage {
    /// Fresh local state for `challenge`.
    pub fn mount(challenge: Challenge, tuning: &LevelTuning, rng: StdRng) -> Stage {
        match challenge {
            Challenge::GhostButton => Stage::GhostButton(GhostButton::new(tuning, rng)),
            Challenge::HeartPop => Stage::HeartPop(HeartPop::new(tuning, rng)),
            Challenge::LoveSlider => Stage::LoveSlider(LoveSlider::new(tuning)),
            Challenge::ScratchOff => Stage::ScratchOff(ScratchOff::new(tuning)),
            Challenge::Password => Stage::Password(Password::new(tuning)),
            Challenge::PatternMatch => Stage::PatternMatch(PatternMatch::new(tuning)),
            Challenge::EmojiRain => Stage::EmojiRain(EmojiRain::new(tuning, rng)),
            Challenge::Keyhole => Stage::Keyhole(Keyhole::new(tuning, rng)),
            Challenge::Puzzle => Stage::Puzzle(Puzzle::new(rng)),
        }
    }

    pub fn challenge(&self) -> Challenge {
        self.game().challenge()
    }

    pub fn game(&self) -> &dyn MiniGame {
        match self {
            Stage::GhostButton(g) => g,
            Stage::HeartPop(g) => g,
            Stage::LoveSlider(g) => g,
            Stage::ScratchOff(g) => g,
            Stage::Password(g) => g,
            Stage::PatternMatch(g) => g,
            Stage::EmojiRain(g) => g,
            Stage::Keyhole(g) => g,
            Stage::Puzzle(g) => g,
        }
    }

    pub fn game_mut(&mut self) -> &mut dyn MiniGame {
        match self {
            Stage::GhostButton(g) => g,
            Stage::HeartPop(g) => g,
            Stage::LoveSlider(g) => g,
            Stage::ScratchOff(g) => g,
            Stage::Password(g) => g,
            Stage::PatternMatch(g) => g,
            Stage::EmojiRain(g) => g,
            Stage::Keyhole(g) => g,
            Stage::Puzzle(g) => g,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CountingSink;
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn latch_arms_once() {
        let mut latch = WinLatch::new();
        assert!(!latch.is_won());
        assert!(latch.arm());
        assert!(!latch.arm());
        assert!(latch.is_won());
    }

    #[test]
    fn latch_reports_once_and_only_after_arming() {
        let mut latch = WinLatch::new();
        let mut sink = CountingSink::default();
        assert!(!latch.report(LevelIndex::FIRST, &mut sink));
        latch.arm();
        assert!(latch.report(LevelIndex::FIRST, &mut sink));
        assert!(!latch.report(LevelIndex::FIRST, &mut sink));
        assert_eq!(sink.wins, vec![LevelIndex::FIRST]);
    }

    #[test]
    fn mount_builds_the_matching_stage() {
        let tuning = LevelTuning::default();
        for c in Challenge::ALL {
            let stage = Stage::mount(c, &tuning, StdRng::seed_from_u64(1));
            assert_eq!(stage.challenge(), c);
            assert!(!stage.game().is_won());
        }
    }

    #[test]
    fn only_password_takes_text() {
        let tuning = LevelTuning::default();
        for c in Challenge::ALL {
            let stage = Stage::mount(c, &tuning, StdRng::seed_from_u64(1));
            assert_eq!(stage.game().accepts_text(), c == Challenge::Password);
        }
    }
}
