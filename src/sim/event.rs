/// Events emitted during a simulation step.
/// The presentation layer consumes these for sound and messages.

use crate::domain::level::LevelIndex;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    LevelStarted { level: LevelIndex },
    /// Win predicate just became true; completion follows after the level's delay.
    LevelWon { level: LevelIndex },
    LevelFailed { level: LevelIndex },
    LevelRestarted { level: LevelIndex },
    Dodged,
    HeartPopped { remaining: usize },
    CountdownTick { seconds_left: u32 },
    WrongGuess { attempts: u32 },
    PatternError,
    PatternStep { matched: usize },
    ItemMissed { misses: u32 },
    CardFlipped { has_key: bool },
    TileRotated,
    FinaleQuestion,
    DeclineDodged { presses: u32 },
    Accepted,
}
