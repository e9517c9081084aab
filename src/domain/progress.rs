/// GameProgress: the single source of truth for where the player is.
///
/// Only three operations mutate it:
///   - `go_to_level`       sets the level and clears the reveal flag
///   - `complete_level`    records a win and raises the reveal flag
///   - `set_showing_reveal` overrides the reveal flag
///
/// `completed` only ever grows. The struct is owned by the world and handed
/// to mini-games as a `&mut dyn Completion`, so a level can report its own
/// win and nothing else.

use std::collections::BTreeSet;

use log::info;

use super::level::LevelIndex;

/// The one capability a mini-game gets: reporting that it was won.
pub trait Completion {
    fn report_win(&mut self, level: LevelIndex);
}

#[derive(Clone, Debug)]
pub struct GameProgress {
    current_level: LevelIndex,
    completed: BTreeSet<LevelIndex>,
    showing_reveal: bool,
}

impl GameProgress {
    pub fn new() -> Self {
        GameProgress {
            current_level: LevelIndex::WELCOME,
            completed: BTreeSet::new(),
            showing_reveal: false,
        }
    }

    pub fn current_level(&self) -> LevelIndex {
        self.current_level
    }

    pub fn completed_levels(&self) -> &BTreeSet<LevelIndex> {
        &self.completed
    }

    pub fn is_completed(&self, level: LevelIndex) -> bool {
        self.completed.contains(&level)
    }

    pub fn showing_reveal(&self) -> bool {
        self.showing_reveal
    }

    pub fn go_to_level(&mut self, level: LevelIndex) {
        info!("go to level {} (from {})", level, self.current_level);
        self.current_level = level;
        self.showing_reveal = false;
    }

    /// Idempotent: a second call for the same level changes nothing.
    pub fn complete_level(&mut self, level: LevelIndex) {
        if self.completed.insert(level) {
            info!("level {} complete ({} of 9)", level, self.completed.len());
        }
        self.showing_reveal = true;
    }

    pub fn set_showing_reveal(&mut self, showing: bool) {
        self.showing_reveal = showing;
    }
}

impl Default for GameProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Completion for GameProgress {
    fn report_win(&mut self, level: LevelIndex) {
        self.complete_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lvl(n: u8) -> LevelIndex {
        LevelIndex::new(n).unwrap()
    }

    #[test]
    fn starts_on_welcome_with_nothing_done() {
        let p = GameProgress::new();
        assert_eq!(p.current_level(), LevelIndex::WELCOME);
        assert!(p.completed_levels().is_empty());
        assert!(!p.showing_reveal());
    }

    #[test]
    fn completing_each_level_raises_reveal_and_keeps_level() {
        for n in 1..=9 {
            let mut p = GameProgress::new();
            p.go_to_level(lvl(n));
            p.report_win(lvl(n));
            assert!(p.is_completed(lvl(n)));
            assert!(p.showing_reveal());
            assert_eq!(p.current_level(), lvl(n));
        }
    }

    #[test]
    fn complete_level_is_idempotent() {
        let mut p = GameProgress::new();
        p.go_to_level(lvl(4));
        p.complete_level(lvl(4));
        let snapshot = p.completed_levels().clone();
        p.complete_level(lvl(4));
        assert_eq!(p.completed_levels(), &snapshot);
        assert_eq!(p.completed_levels().len(), 1);
        assert_eq!(p.current_level(), lvl(4));
    }

    #[test]
    fn go_to_level_clears_reveal_for_every_index() {
        for n in 0..=10 {
            let mut p = GameProgress::new();
            p.complete_level(lvl(3));
            p.go_to_level(lvl(n));
            assert_eq!(p.current_level(), lvl(n));
            assert!(!p.showing_reveal());
        }
    }

    #[test]
    fn completed_set_never_shrinks() {
        let mut p = GameProgress::new();
        p.complete_level(lvl(1));
        p.go_to_level(lvl(2));
        p.complete_level(lvl(2));
        p.go_to_level(lvl(1));
        p.set_showing_reveal(false);
        assert!(p.is_completed(lvl(1)));
        assert!(p.is_completed(lvl(2)));
    }

    #[test]
    fn set_showing_reveal_overrides_flag_only() {
        let mut p = GameProgress::new();
        p.go_to_level(lvl(5));
        p.complete_level(lvl(5));
        p.set_showing_reveal(false);
        assert!(!p.showing_reveal());
        assert_eq!(p.current_level(), lvl(5));
        assert!(p.is_completed(lvl(5)));
    }
}
