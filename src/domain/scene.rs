/// View routing: which screen the current progress selects.
///
/// ┌───────────────────────────────────────┬──────────────────┐
/// │ Progress                              │ Scene            │
/// ├───────────────────────────────────────┼──────────────────┤
/// │ showing_reveal && level in 1..=9      │ Reveal(level)    │
/// │ level == 0                            │ Welcome          │
/// │ level in 1..=9                        │ Level(level)     │
/// │ level == 10                           │ Finale           │
/// └───────────────────────────────────────┴──────────────────┘

use std::path::Path;

use super::assets::AssetCatalog;
use super::level::{reveal_message, Challenge, LevelIndex};
use super::progress::GameProgress;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Scene {
    Welcome,
    Level(Challenge),
    Reveal(Challenge),
    Finale,
}

pub fn route(progress: &GameProgress) -> Scene {
    let level = progress.current_level();
    match Challenge::from_level(level) {
        Some(c) if progress.showing_reveal() => Scene::Reveal(c),
        Some(c) => Scene::Level(c),
        None if level == LevelIndex::WELCOME => Scene::Welcome,
        None => Scene::Finale,
    }
}

/// Header and progress dots are drawn only during the nine games.
pub fn shows_chrome(level: LevelIndex) -> bool {
    level.is_game()
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dot {
    Done,
    Current,
    Pending,
}

/// One dot per game level, relative to `current`.
pub fn progress_dots(current: LevelIndex) -> [Dot; 9] {
    let mut dots = [Dot::Pending; 9];
    for (i, dot) in dots.iter_mut().enumerate() {
        let n = i as u8 + 1;
        *dot = if n < current.get() {
            Dot::Done
        } else if n == current.get() {
            Dot::Current
        } else {
            Dot::Pending
        };
    }
    dots
}

/// Everything the reveal screen shows for one level.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealCard<'a> {
    pub level: LevelIndex,
    pub message: Option<&'static str>,
    pub image: Option<&'a Path>,
    pub continue_label: &'static str,
    pub next: LevelIndex,
}

/// The reveal for `level`, if one should be on screen.
pub fn reveal_for(level: LevelIndex, showing: bool, assets: &AssetCatalog) -> Option<RevealCard<'_>> {
    if !showing || !level.is_game() {
        return None;
    }
    let next = level.next()?;
    let continue_label = if level == LevelIndex::LAST_GAME {
        "The Finale Awaits..."
    } else {
        "Continue to Next Level"
    };
    Some(RevealCard {
        level,
        message: reveal_message(level),
        image: assets.image_for_reveal(level),
        continue_label,
        next,
    })
}

/// The reveal's one action: move on to the following level.
pub fn continue_from(level: LevelIndex, progress: &mut GameProgress) {
    if let Some(next) = level.next() {
        progress.go_to_level(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lvl(n: u8) -> LevelIndex {
        LevelIndex::new(n).unwrap()
    }

    #[test]
    fn routes_every_reachable_state() {
        let mut p = GameProgress::new();
        assert_eq!(route(&p), Scene::Welcome);

        p.go_to_level(lvl(3));
        assert_eq!(route(&p), Scene::Level(Challenge::LoveSlider));

        p.complete_level(lvl(3));
        assert_eq!(route(&p), Scene::Reveal(Challenge::LoveSlider));

        p.go_to_level(LevelIndex::FINALE);
        assert_eq!(route(&p), Scene::Finale);
    }

    #[test]
    fn reveal_flag_is_ignored_outside_games() {
        let mut p = GameProgress::new();
        p.set_showing_reveal(true);
        assert_eq!(route(&p), Scene::Welcome);
        p.go_to_level(LevelIndex::FINALE);
        p.set_showing_reveal(true);
        assert_eq!(route(&p), Scene::Finale);
    }

    #[test]
    fn chrome_only_for_games() {
        assert!(!shows_chrome(LevelIndex::WELCOME));
        assert!(shows_chrome(lvl(1)));
        assert!(shows_chrome(lvl(9)));
        assert!(!shows_chrome(LevelIndex::FINALE));
    }

    #[test]
    fn dots_split_around_current() {
        let dots = progress_dots(lvl(4));
        assert_eq!(&dots[..3], &[Dot::Done; 3]);
        assert_eq!(dots[3], Dot::Current);
        assert!(dots[4..].iter().all(|d| *d == Dot::Pending));
    }

    #[test]
    fn reveal_card_contents() {
        let assets = AssetCatalog::new(Path::new("img"));
        let card = reveal_for(lvl(2), true, &assets).unwrap();
        assert_eq!(card.message, Some("Every heartbeat is for you."));
        assert_eq!(card.image, Some(Path::new("img/reveal-2.jpg")));
        assert_eq!(card.continue_label, "Continue to Next Level");
        assert_eq!(card.next, lvl(3));

        assert!(reveal_for(lvl(2), false, &assets).is_none());
        assert!(reveal_for(LevelIndex::WELCOME, true, &assets).is_none());
        assert!(reveal_for(LevelIndex::FINALE, true, &assets).is_none());
    }

    #[test]
    fn level_nine_reveal_leads_to_finale() {
        let assets = AssetCatalog::empty();
        let card = reveal_for(lvl(9), true, &assets).unwrap();
        assert_eq!(card.message, None);
        assert_eq!(card.image, None);
        assert_eq!(card.continue_label, "The Finale Awaits...");
        assert_eq!(card.next, LevelIndex::FINALE);

        let mut p = GameProgress::new();
        p.go_to_level(lvl(9));
        p.complete_level(lvl(9));
        continue_from(lvl(9), &mut p);
        assert_eq!(p.current_level(), LevelIndex::FINALE);
        assert!(!p.showing_reveal());
    }
}
