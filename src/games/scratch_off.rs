/// Level 4: scratch the cover off a hidden photo.
///
/// The cover is a `MASK_W` x `MASK_H` grid laid over the field. `Press`
/// starts and ends a stroke; while a stroke is active every pointer move
/// clears an elliptical brush. The cleared share is measured when a stroke
/// ends.

use super::{Action, Ctx, MiniGame, WinLatch};
use crate::config::LevelTuning;
use crate::domain::geometry::{Point, Rect, FIELD_W};
use crate::domain::level::Challenge;
use crate::sim::event::GameEvent;
use crate::sim::timer::Timers;

pub const MASK_W: i32 = 32;
pub const MASK_H: i32 = 10;
const BRUSH_RX: i32 = 3;
const BRUSH_RY: i32 = 1;
const COMPLETE_DELAY_MS: u64 = 800;

#[derive(Clone, Copy, Debug)]
enum Task {
    Complete,
}

pub struct ScratchOff {
    /// `true` = still covered. Row-major.
    cover: Vec<bool>,
    scratching: bool,
    percent: u8,
    threshold: u8,
    timers: Timers<Task>,
    latch: WinLatch,
}

impl ScratchOff {
    pub fn new(tuning: &LevelTuning) -> Self {
        ScratchOff {
            cover: vec![true; (MASK_W * MASK_H) as usize],
            scratching: false,
            percent: 0,
            threshold: tuning.scratch_threshold,
            timers: Timers::new(),
            latch: WinLatch::new(),
        }
    }

    /// Where the cover sits on the field.
    pub fn area() -> Rect {
        Rect::new((FIELD_W - MASK_W) / 2, 2, MASK_W, MASK_H)
    }

    pub fn is_covered(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 || col >= MASK_W || row >= MASK_H {
            return false;
        }
        self.cover[(row * MASK_W + col) as usize]
    }

    pub fn is_scratching(&self) -> bool {
        self.scratching
    }

    /// Cleared share as of the last finished stroke.
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Cleared share right now, rounded to a whole percent.
    pub fn measure(&self) -> u8 {
        let total = self.cover.len();
        let cleared = self.cover.iter().filter(|c| !**c).count();
        ((cleared * 100 + total / 2) / total) as u8
    }

    fn scratch(&mut self, p: Point) {
        let area = Self::area();
        let cx = p.x - area.x;
        let cy = p.y - area.y;
        for dy in -BRUSH_RY..=BRUSH_RY {
            for dx in -BRUSH_RX..=BRUSH_RX {
                let inside = dx * dx * BRUSH_RY * BRUSH_RY + dy * dy * BRUSH_RX * BRUSH_RX
                    <= BRUSH_RX * BRUSH_RX * BRUSH_RY * BRUSH_RY;
                let (col, row) = (cx + dx, cy + dy);
                if inside && self.is_covered(col, row) {
                    self.cover[(row * MASK_W + col) as usize] = false;
                }
            }
        }
    }

    /// Record a measured share and fire the win once it reaches the threshold.
    pub fn evaluate(&mut self, percent: u8, ctx: &mut Ctx<'_>) {
        self.percent = percent;
        if percent >= self.threshold && self.latch.arm() {
            ctx.events.push(GameEvent::LevelWon { level: self.challenge().level() });
            self.timers.schedule(COMPLETE_DELAY_MS, Task::Complete);
        }
    }
}

impl MiniGame for ScratchOff {
    fn challenge(&self) -> Challenge {
        Challenge::ScratchOff
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) {
        if self.latch.is_won() {
            return;
        }
        match action {
            Action::Press(p) => {
                if self.scratching {
                    self.scratching = false;
                    let pct = self.measure();
                    self.evaluate(pct, ctx);
                } else {
                    self.scratching = true;
                    self.scratch(p);
                }
            }
            Action::Hover(p) if self.scratching => self.scratch(p),
            _ => {}
        }
    }

    fn advance(&mut self, dt_ms: u64, ctx: &mut Ctx<'_>) {
        for task in self.timers.advance(dt_ms) {
            match task {
                Task::Complete => {
                    self.latch.report(self.challenge().level(), ctx.sink);
                }
            }
        }
    }

    fn teardown(&mut self) {
        self.timers.cancel_all();
    }

    fn is_won(&self) -> bool {
        self.latch.is_won()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::Harness;

    fn eval(h: &mut Harness, g: &mut ScratchOff, pct: u8) {
        let mut ctx = Ctx { sink: &mut h.sink, events: &mut h.events };
        g.evaluate(pct, &mut ctx);
    }

    #[test]
    fn sixty_nine_percent_is_not_enough() {
        let mut h = Harness::new();
        let mut g = ScratchOff::new(&LevelTuning::default());
        eval(&mut h, &mut g, 69);
        h.wait(&mut g, 5000);
        assert!(!g.is_won());
        assert_eq!(h.wins(), 0);
    }

    #[test]
    fn seventy_percent_completes_exactly_once() {
        let mut h = Harness::new();
        let mut g = ScratchOff::new(&LevelTuning::default());
        eval(&mut h, &mut g, 70);
        eval(&mut h, &mut g, 70);
        eval(&mut h, &mut g, 85);
        h.wait(&mut g, 799);
        assert_eq!(h.wins(), 0);
        h.wait(&mut g, 1);
        eval(&mut h, &mut g, 90);
        h.wait(&mut g, 5000);
        assert_eq!(h.wins(), 1);
    }

    #[test]
    fn brush_is_an_ellipse() {
        let mut h = Harness::new();
        let mut g = ScratchOff::new(&LevelTuning::default());
        let area = ScratchOff::area();
        let c = Point::new(area.x + 10, area.y + 5);
        h.act(&mut g, Action::Press(c));
        assert!(g.is_scratching());
        for dx in -3..=3 {
            assert!(!g.is_covered(10 + dx, 5));
        }
        assert!(g.is_covered(14, 5));
        assert!(!g.is_covered(10, 4));
        assert!(!g.is_covered(10, 6));
        assert!(g.is_covered(11, 4));
        assert!(g.is_covered(10, 3));
    }

    #[test]
    fn hover_only_scratches_during_a_stroke() {
        let mut h = Harness::new();
        let mut g = ScratchOff::new(&LevelTuning::default());
        let area = ScratchOff::area();
        h.act(&mut g, Action::Hover(Point::new(area.x + 5, area.y + 5)));
        assert_eq!(g.measure(), 0);
    }

    #[test]
    fn percentage_is_measured_when_the_stroke_ends() {
        let mut h = Harness::new();
        let mut g = ScratchOff::new(&LevelTuning::default());
        let area = ScratchOff::area();
        h.act(&mut g, Action::Press(area.origin()));
        assert_eq!(g.percent(), 0);
        h.act(&mut g, Action::Press(area.origin()));
        assert!(!g.is_scratching());
        assert!(g.percent() > 0);
        assert_eq!(g.percent(), g.measure());
    }

    #[test]
    fn full_sweep_wins() {
        let mut h = Harness::new();
        let mut g = ScratchOff::new(&LevelTuning::default());
        let area = ScratchOff::area();
        h.act(&mut g, Action::Press(area.origin()));
        for row in (0..MASK_H).step_by(3) {
            for col in 0..MASK_W {
                h.act(&mut g, Action::Hover(Point::new(area.x + col, area.y + row)));
            }
        }
        h.act(&mut g, Action::Press(area.origin()));
        assert_eq!(g.percent(), 100);
        assert!(g.is_won());
        h.wait(&mut g, 800);
        assert_eq!(h.wins(), 1);
    }
}
