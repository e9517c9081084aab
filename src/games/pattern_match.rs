/// Level 6: tap the icons in the secret order.
///
/// Nine icons on a 3 x 3 grid. Any wrong prefix throws the whole selection
/// away and flashes an error.

use super::{Action, Ctx, MiniGame, WinLatch};
use crate::config::LevelTuning;
use crate::domain::geometry::{Point, Rect, FIELD_W};
use crate::domain::level::Challenge;
use crate::sim::event::GameEvent;
use crate::sim::timer::{TimerId, Timers};

pub const CELL_W: i32 = 10;
pub const CELL_H: i32 = 3;
const GAP_X: i32 = 1;
const GAP_Y: i32 = 1;
const TOP: i32 = 2;

const ERROR_FLASH_MS: u64 = 600;
const COMPLETE_DELAY_MS: u64 = 1000;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Icon {
    Star,
    Heart,
    Flower,
    Moon,
    Diamond,
    Rose,
    Ring,
    Music,
    Key,
}

impl Icon {
    /// Grid order, left to right, top to bottom.
    pub const ALL: [Icon; 9] = [
        Icon::Star,
        Icon::Heart,
        Icon::Flower,
        Icon::Moon,
        Icon::Diamond,
        Icon::Rose,
        Icon::Ring,
        Icon::Music,
        Icon::Key,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Icon::Star => "star",
            Icon::Heart => "heart",
            Icon::Flower => "flower",
            Icon::Moon => "moon",
            Icon::Diamond => "diamond",
            Icon::Rose => "rose",
            Icon::Ring => "ring",
            Icon::Music => "music",
            Icon::Key => "key",
        }
    }

    pub fn from_id(id: &str) -> Option<Icon> {
        let id = id.trim().to_lowercase();
        Self::ALL.into_iter().find(|i| i.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Icon::Star => "Star",
            Icon::Heart => "Heart",
            Icon::Flower => "Flower",
            Icon::Moon => "Moon",
            Icon::Diamond => "Diamond",
            Icon::Rose => "Rose",
            Icon::Ring => "Ring",
            Icon::Music => "Music",
            Icon::Key => "Key",
        }
    }

    /// Single-cell glyph for the terminal.
    pub fn glyph(self) -> char {
        match self {
            Icon::Star => '*',
            Icon::Heart => '♥',
            Icon::Flower => '✿',
            Icon::Moon => '☾',
            Icon::Diamond => '◆',
            Icon::Rose => '❀',
            Icon::Ring => 'o',
            Icon::Music => '♪',
            Icon::Key => 'k',
        }
    }

    /// Cell of this icon on the field.
    pub fn cell(self) -> Rect {
        let i = Self::ALL.iter().position(|c| *c == self).unwrap_or(0) as i32;
        let grid_w = 3 * CELL_W + 2 * GAP_X;
        let left = (FIELD_W - grid_w) / 2;
        Rect::new(
            left + (i % 3) * (CELL_W + GAP_X),
            TOP + (i / 3) * (CELL_H + GAP_Y),
            CELL_W,
            CELL_H,
        )
    }

    pub fn at(p: Point) -> Option<Icon> {
        Self::ALL.into_iter().find(|i| i.cell().contains(p))
    }
}

#[derive(Clone, Copy, Debug)]
enum Task {
    ClearError,
    Complete,
}

pub struct PatternMatch {
    pattern: Vec<Icon>,
    selected: Vec<Icon>,
    error: bool,
    flash: Option<TimerId>,
    timers: Timers<Task>,
    latch: WinLatch,
}

impl PatternMatch {
    pub fn new(tuning: &LevelTuning) -> Self {
        PatternMatch {
            pattern: tuning.pattern.clone(),
            selected: Vec::new(),
            error: false,
            flash: None,
            timers: Timers::new(),
            latch: WinLatch::new(),
        }
    }

    pub fn pattern(&self) -> &[Icon] {
        &self.pattern
    }

    pub fn selected(&self) -> &[Icon] {
        &self.selected
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    pub fn tap(&mut self, icon: Icon, ctx: &mut Ctx<'_>) {
        if self.latch.is_won() || self.selected.contains(&icon) {
            return;
        }
        self.selected.push(icon);

        let n = self.selected.len();
        if self.pattern.get(..n) != Some(&self.selected[..]) {
            self.selected.clear();
            self.error = true;
            if let Some(id) = self.flash.take() {
                self.timers.cancel(id);
            }
            self.flash = Some(self.timers.schedule(ERROR_FLASH_MS, Task::ClearError));
            ctx.events.push(GameEvent::PatternError);
            return;
        }

        ctx.events.push(GameEvent::PatternStep { matched: n });
        if n == self.pattern.len() && self.latch.arm() {
            ctx.events.push(GameEvent::LevelWon { level: self.challenge().level() });
            self.timers.schedule(COMPLETE_DELAY_MS, Task::Complete);
        }
    }
}

impl MiniGame for PatternMatch {
    fn challenge(&self) -> Challenge {
        Challenge::PatternMatch
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) {
        if let Action::Press(p) = action {
            if let Some(icon) = Icon::at(p) {
                self.tap(icon, ctx);
            }
        }
    }

    fn advance(&mut self, dt_ms: u64, ctx: &mut Ctx<'_>) {
        for task in self.timers.advance(dt_ms) {
            match task {
                Task::ClearError => {
                    self.error = false;
                    self.flash = None;
                }
                Task::Complete => {
                    self.latch.report(self.challenge().level(), ctx.sink);
                }
            }
        }
    }

    fn teardown(&mut self) {
        self.timers.cancel_all();
        self.flash = None;
    }

    fn is_won(&self) -> bool {
        self.latch.is_won()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::Harness;

    fn press(h: &mut Harness, g: &mut PatternMatch, icon: Icon) {
        h.act(g, Action::Press(icon.cell().origin()));
    }

    #[test]
    fn from_id_is_case_insensitive() {
        assert_eq!(Icon::from_id("Heart"), Some(Icon::Heart));
        assert_eq!(Icon::from_id(" ring "), Some(Icon::Ring));
        assert_eq!(Icon::from_id("unicorn"), None);
    }

    #[test]
    fn cells_are_disjoint_and_inside_the_field() {
        for icon in Icon::ALL {
            let c = icon.cell();
            assert!(c.x >= 0 && c.x + c.w <= FIELD_W);
            assert_eq!(Icon::at(c.origin()), Some(icon));
        }
    }

    #[test]
    fn correct_order_wins() {
        let mut h = Harness::new();
        let mut g = PatternMatch::new(&LevelTuning::default());
        for icon in [Icon::Heart, Icon::Rose, Icon::Ring] {
            press(&mut h, &mut g, icon);
        }
        assert!(g.is_won());
        assert!(!g.is_error());
        h.wait(&mut g, 999);
        assert_eq!(h.wins(), 0);
        h.wait(&mut g, 1);
        assert_eq!(h.wins(), 1);
    }

    #[test]
    fn wrong_order_clears_and_flashes_error() {
        let mut h = Harness::new();
        let mut g = PatternMatch::new(&LevelTuning::default());
        press(&mut h, &mut g, Icon::Heart);
        press(&mut h, &mut g, Icon::Ring);
        assert!(g.selected().is_empty());
        assert!(g.is_error());
        assert!(h.saw(|e| *e == GameEvent::PatternError));

        press(&mut h, &mut g, Icon::Rose);
        assert!(g.selected().is_empty());
        h.wait(&mut g, 5000);
        assert!(!g.is_won());
        assert!(!g.is_error());
        assert_eq!(h.wins(), 0);
    }

    #[test]
    fn retapping_a_selected_icon_is_ignored() {
        let mut h = Harness::new();
        let mut g = PatternMatch::new(&LevelTuning::default());
        press(&mut h, &mut g, Icon::Heart);
        press(&mut h, &mut g, Icon::Heart);
        assert_eq!(g.selected(), &[Icon::Heart]);
        assert!(!g.is_error());
    }

    #[test]
    fn can_recover_after_an_error() {
        let mut h = Harness::new();
        let mut g = PatternMatch::new(&LevelTuning::default());
        press(&mut h, &mut g, Icon::Star);
        assert!(g.is_error());
        for icon in [Icon::Heart, Icon::Rose, Icon::Ring] {
            press(&mut h, &mut g, icon);
        }
        assert!(g.is_won());
    }

    #[test]
    fn presses_between_cells_do_nothing() {
        let mut h = Harness::new();
        let mut g = PatternMatch::new(&LevelTuning::default());
        h.act(&mut g, Action::Press(Point::new(0, 0)));
        assert!(g.selected().is_empty());
        assert!(!g.is_error());
    }
}
