/// Level indices and the static tables keyed by them.
///
/// Index 0 is the welcome screen, 1..=9 are the mini-games, 10 is the
/// finale. `Challenge` names the nine mini-games so the router can match
/// on them exhaustively instead of on raw numbers.

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LevelIndex(u8);

impl LevelIndex {
    pub const WELCOME: LevelIndex = LevelIndex(0);
    pub const FIRST: LevelIndex = LevelIndex(1);
    pub const LAST_GAME: LevelIndex = LevelIndex(9);
    pub const FINALE: LevelIndex = LevelIndex(10);

    pub const fn new(n: u8) -> Option<LevelIndex> {
        if n <= 10 { Some(LevelIndex(n)) } else { None }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// The following level, or `None` past the finale.
    pub const fn next(self) -> Option<LevelIndex> {
        LevelIndex::new(self.0 + 1)
    }

    /// True for 1..=9.
    pub const fn is_game(self) -> bool {
        self.0 >= 1 && self.0 <= 9
    }

    pub fn title(self) -> Option<&'static str> {
        LEVEL_TITLES.get(self.0 as usize).copied().flatten()
    }
}

impl fmt::Display for LevelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const LEVEL_TITLES: [Option<&str>; 11] = [
    None,
    Some("The Ghost Button"),
    Some("Heart Pop"),
    Some("The Love Slider"),
    Some("Scratch & Reveal"),
    Some("Secret Password"),
    Some("Pattern Match"),
    Some("Emoji Rain"),
    Some("The Keyhole"),
    Some("Photo Puzzle"),
    Some("The Finale"),
];

/// Reveal message per level. Level 9 has none.
const REVEAL_MESSAGES: [(u8, &str); 8] = [
    (1, "You found me! Just like you always do..."),
    (2, "Every heartbeat is for you."),
    (3, "Infinity wouldn't be enough."),
    (4, "Beneath it all, it's always you."),
    (5, "You know me better than anyone."),
    (6, "Our love is a beautiful pattern."),
    (7, "You're my one in a million."),
    (8, "The key to my heart is yours."),
];

pub fn reveal_message(level: LevelIndex) -> Option<&'static str> {
    REVEAL_MESSAGES.iter()
        .find(|(n, _)| *n == level.get())
        .map(|(_, msg)| *msg)
}

/// The nine mini-games, in play order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Challenge {
    GhostButton,
    HeartPop,
    LoveSlider,
    ScratchOff,
    Password,
    PatternMatch,
    EmojiRain,
    Keyhole,
    Puzzle,
}

impl Challenge {
    pub const ALL: [Challenge; 9] = [
        Challenge::GhostButton,
        Challenge::HeartPop,
        Challenge::LoveSlider,
        Challenge::ScratchOff,
        Challenge::Password,
        Challenge::PatternMatch,
        Challenge::EmojiRain,
        Challenge::Keyhole,
        Challenge::Puzzle,
    ];

    pub fn from_level(level: LevelIndex) -> Option<Challenge> {
        if level.is_game() {
            Some(Self::ALL[level.get() as usize - 1])
        } else {
            None
        }
    }

    pub fn level(self) -> LevelIndex {
        LevelIndex(self as u8 + 1)
    }

    pub fn title(self) -> &'static str {
        self.level().title().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_out_of_range() {
        assert!(LevelIndex::new(10).is_some());
        assert!(LevelIndex::new(11).is_none());
    }

    #[test]
    fn next_stops_after_finale() {
        assert_eq!(LevelIndex::LAST_GAME.next(), Some(LevelIndex::FINALE));
        assert_eq!(LevelIndex::FINALE.next(), None);
    }

    #[test]
    fn challenge_round_trips_through_level() {
        for (i, c) in Challenge::ALL.iter().enumerate() {
            assert_eq!(c.level().get() as usize, i + 1);
            assert_eq!(Challenge::from_level(c.level()), Some(*c));
        }
        assert_eq!(Challenge::from_level(LevelIndex::WELCOME), None);
        assert_eq!(Challenge::from_level(LevelIndex::FINALE), None);
    }

    #[test]
    fn titles_cover_games_and_finale_only() {
        assert_eq!(LevelIndex::WELCOME.title(), None);
        assert_eq!(Challenge::Password.title(), "Secret Password");
        assert_eq!(LevelIndex::FINALE.title(), Some("The Finale"));
    }

    #[test]
    fn reveal_messages_miss_level_nine() {
        assert!(reveal_message(LevelIndex::FIRST).is_some());
        assert!(reveal_message(LevelIndex::LAST_GAME).is_none());
        assert!(reveal_message(LevelIndex::WELCOME).is_none());
    }
}
