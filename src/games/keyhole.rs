/// Level 8: find the key behind one of the face-down heart cards.

use rand::rngs::StdRng;
use rand::Rng;

use super::{Action, Ctx, MiniGame, WinLatch};
use crate::config::LevelTuning;
use crate::domain::geometry::{Rect, FIELD_W};
use crate::domain::level::Challenge;
use crate::sim::event::GameEvent;
use crate::sim::timer::Timers;

pub const CARD_W: i32 = 5;
pub const CARD_H: i32 = 3;
const GAP: i32 = 1;
const ROW_TOPS: [i32; 2] = [3, 8];
const COMPLETE_DELAY_MS: u64 = 1500;
/// Two rows must fit across the field.
pub const MAX_CARDS: usize = (2 * ((FIELD_W + GAP) / (CARD_W + GAP))) as usize;

#[derive(Clone, Copy, Debug)]
enum Task {
    Complete,
}

pub struct Keyhole {
    cards: Vec<Rect>,
    flipped: Vec<bool>,
    key: usize,
    flips: u32,
    timers: Timers<Task>,
    latch: WinLatch,
}

/// Lay `count` cards out in two centred rows.
fn deal(count: usize) -> Vec<Rect> {
    let per_row = count.div_ceil(2) as i32;
    let row_w = per_row * CARD_W + (per_row - 1) * GAP;
    let left = ((FIELD_W - row_w) / 2).max(0);
    (0..count as i32)
        .map(|i| {
            let (row, col) = (i / per_row, i % per_row);
            Rect::new(left + col * (CARD_W + GAP), ROW_TOPS[row as usize], CARD_W, CARD_H)
        })
        .collect()
}

impl Keyhole {
    pub fn new(tuning: &LevelTuning, mut rng: StdRng) -> Self {
        let count = tuning.keyhole_cards.clamp(2, MAX_CARDS);
        Keyhole {
            cards: deal(count),
            flipped: vec![false; count],
            key: rng.gen_range(0..count),
            flips: 0,
            timers: Timers::new(),
            latch: WinLatch::new(),
        }
    }

    pub fn cards(&self) -> &[Rect] {
        &self.cards
    }

    pub fn is_flipped(&self, card: usize) -> bool {
        self.flipped.get(card).copied().unwrap_or(false)
    }

    pub fn key_card(&self) -> usize {
        self.key
    }

    pub fn flips(&self) -> u32 {
        self.flips
    }

    pub fn status(&self) -> String {
        if self.latch.is_won() {
            "The key to my heart is yours!".to_string()
        } else {
            format!("Press the hearts to flip them - Flips: {}", self.flips)
        }
    }

    fn flip(&mut self, card: usize, ctx: &mut Ctx<'_>) {
        if self.flipped[card] {
            return;
        }
        self.flipped[card] = true;
        self.flips += 1;
        let has_key = card == self.key;
        ctx.events.push(GameEvent::CardFlipped { has_key });
        if has_key && self.latch.arm() {
            ctx.events.push(GameEvent::LevelWon { level: self.challenge().level() });
            self.timers.schedule(COMPLETE_DELAY_MS, Task::Complete);
        }
    }
}

impl MiniGame for Keyhole {
    fn challenge(&self) -> Challenge {
        Challenge::Keyhole
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) {
        if self.latch.is_won() {
            return;
        }
        if let Action::Press(p) = action {
            if let Some(card) = self.cards.iter().position(|r| r.contains(p)) {
                self.flip(card, ctx);
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

    fn game() -> Keyhole {
        Keyhole::new(&LevelTuning::default(), StdRng::seed_from_u64(8))
    }

    #[test]
    fn fourteen_cards_in_two_rows() {
        let g = game();
        assert_eq!(g.cards().len(), 14);
        assert!(g.cards()[..7].iter().all(|c| c.y == ROW_TOPS[0]));
        assert!(g.cards()[7..].iter().all(|c| c.y == ROW_TOPS[1]));
        assert!(g.cards().iter().all(|c| c.x >= 0 && c.x + c.w <= FIELD_W));
        assert!(g.key_card() < 14);
    }

    #[test]
    fn wrong_card_flips_and_counts() {
        let mut h = Harness::new();
        let mut g = game();
        let wrong = (g.key_card() + 1) % 14;
        let at = g.cards()[wrong].origin();
        h.act(&mut g, Action::Press(at));
        assert!(g.is_flipped(wrong));
        assert_eq!(g.flips(), 1);
        assert!(h.saw(|e| *e == GameEvent::CardFlipped { has_key: false }));

        // re-pressing a flipped card does nothing
        let at = g.cards()[wrong].origin();
        h.act(&mut g, Action::Press(at));
        assert_eq!(g.flips(), 1);
        assert!(!g.is_won());
    }

    #[test]
    fn key_card_completes_after_delay() {
        let mut h = Harness::new();
        let mut g = game();
        let key = g.key_card();
        let at = g.cards()[key].origin();
        h.act(&mut g, Action::Press(at));
        assert!(g.is_won());
        assert_eq!(g.status(), "The key to my heart is yours!");
        h.wait(&mut g, 1499);
        assert_eq!(h.wins(), 0);
        h.wait(&mut g, 1);
        assert_eq!(h.wins(), 1);
    }

    #[test]
    fn no_flips_after_the_key_is_found() {
        let mut h = Harness::new();
        let mut g = game();
        let key = g.key_card();
        let at = g.cards()[key].origin();
        h.act(&mut g, Action::Press(at));
        let other = (key + 1) % 14;
        let at = g.cards()[other].origin();
        h.act(&mut g, Action::Press(at));
        assert!(!g.is_flipped(other));
        assert_eq!(g.flips(), 1);
    }
}
