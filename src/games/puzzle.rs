/// Level 9: turn the four photo tiles back upright.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{Action, Ctx, MiniGame, WinLatch};
use crate::domain::geometry::{Rect, FIELD_W};
use crate::domain::level::Challenge;
use crate::sim::event::GameEvent;
use crate::sim::timer::Timers;

pub const TILE_W: i32 = 12;
pub const TILE_H: i32 = 5;
const GAP: i32 = 1;
const TOP: i32 = 2;
const START_ROTATIONS: [u16; 3] = [90, 180, 270];
const COMPLETE_DELAY_MS: u64 = 1000;

#[derive(Clone, Copy, Debug)]
enum Task {
    Complete,
}

pub struct Puzzle {
    /// Degrees, always a multiple of 90 in 0..360. Row-major 2 x 2.
    rotations: [u16; 4],
    moves: u32,
    timers: Timers<Task>,
    latch: WinLatch,
}

impl Puzzle {
    pub fn new(mut rng: StdRng) -> Self {
        let mut rotations = [0u16; 4];
        for r in rotations.iter_mut() {
            *r = START_ROTATIONS.choose(&mut rng).copied().unwrap_or(90);
        }
        Puzzle {
            rotations,
            moves: 0,
            timers: Timers::new(),
            latch: WinLatch::new(),
        }
    }

    /// Screen rect of tile `i` (row-major).
    pub fn tile(i: usize) -> Rect {
        let left = (FIELD_W - (2 * TILE_W + GAP)) / 2;
        let (row, col) = ((i / 2) as i32, (i % 2) as i32);
        Rect::new(left + col * (TILE_W + GAP), TOP + row * (TILE_H + GAP), TILE_W, TILE_H)
    }

    pub fn rotations(&self) -> [u16; 4] {
        self.rotations
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        self.rotations.iter().all(|r| *r == 0)
    }

    fn rotate(&mut self, i: usize, ctx: &mut Ctx<'_>) {
        self.rotations[i] = (self.rotations[i] + 90) % 360;
        self.moves += 1;
        ctx.events.push(GameEvent::TileRotated);
        if self.is_solved() && self.latch.arm() {
            ctx.events.push(GameEvent::LevelWon { level: self.challenge().level() });
            self.timers.schedule(COMPLETE_DELAY_MS, Task::Complete);
        }
    }
}

impl MiniGame for Puzzle {
    fn challenge(&self) -> Challenge {
        Challenge::Puzzle
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) {
        if self.latch.is_won() {
            return;
        }
        if let Action::Press(p) = action {
            if let Some(i) = (0..4).find(|i| Self::tile(*i).contains(p)) {
                self.rotate(i, ctx);
            }
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
    use rand::SeedableRng;

    fn solve(h: &mut Harness, g: &mut Puzzle) {
        for i in 0..4 {
            while g.rotations()[i] != 0 {
                h.act(g, Action::Press(Puzzle::tile(i).origin()));
            }
        }
    }

    #[test]
    fn starts_scrambled() {
        for seed in 0..20 {
            let g = Puzzle::new(StdRng::seed_from_u64(seed));
            assert!(g.rotations().iter().all(|r| START_ROTATIONS.contains(r)));
            assert!(!g.is_solved());
        }
    }

    #[test]
    fn tiles_form_a_two_by_two_grid() {
        assert_eq!(Puzzle::tile(0).y, Puzzle::tile(1).y);
        assert_eq!(Puzzle::tile(0).x, Puzzle::tile(2).x);
        assert!(Puzzle::tile(1).x > Puzzle::tile(0).x + TILE_W - 1);
        assert!(Puzzle::tile(3).x + TILE_W <= FIELD_W);
    }

    #[test]
    fn press_adds_ninety_mod_360() {
        let mut h = Harness::new();
        let mut g = Puzzle::new(StdRng::seed_from_u64(4));
        let start = g.rotations()[0];
        h.act(&mut g, Action::Press(Puzzle::tile(0).origin()));
        assert_eq!(g.rotations()[0], (start + 90) % 360);
        assert_eq!(g.moves(), 1);
    }

    #[test]
    fn solving_completes_after_delay_once() {
        let mut h = Harness::new();
        let mut g = Puzzle::new(StdRng::seed_from_u64(4));
        solve(&mut h, &mut g);
        assert!(g.is_won());
        let moves = g.moves();
        h.act(&mut g, Action::Press(Puzzle::tile(0).origin()));
        assert_eq!(g.moves(), moves);
        h.wait(&mut g, 999);
        assert_eq!(h.wins(), 0);
        h.wait(&mut g, 1);
        assert_eq!(h.wins(), 1);
    }
}
