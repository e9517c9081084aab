/// Level 7: spot the one butterfly in a shower of look-alikes.
///
/// Every item has a column, a start delay and a fall duration. Pressing a
/// regular item removes it and counts a miss; too many misses, or the last
/// item landing before the butterfly is caught, fails the round.

use rand::rngs::StdRng;
use rand::Rng;

use super::{Action, Ctx, MiniGame, WinLatch};
use crate::config::LevelTuning;
use crate::domain::geometry::{Point, FIELD_H, FIELD_W};
use crate::domain::level::Challenge;
use crate::sim::event::GameEvent;
use crate::sim::timer::Timers;

pub const REGULAR: [&str; 16] = [
    "star", "sparkle", "cloud", "sun", "drop", "leaf", "flame", "snow",
    "bell", "gem", "crown", "bolt", "wave", "shell", "fish", "bird",
];
pub const SPECIAL: &str = "butterfly";

const MAX_DELAY_MS: u64 = 8000;
const MIN_FALL_MS: u64 = 5000;
const MAX_FALL_MS: u64 = 9000;
const COMPLETE_DELAY_MS: u64 = 800;

#[derive(Clone, Copy, Debug)]
enum Task {
    RoundOver,
    Complete,
}

#[derive(Clone, Debug)]
pub struct Item {
    pub id: usize,
    /// Index into `REGULAR`; ignored for the special item.
    pub kind: usize,
    pub column: i32,
    pub delay_ms: u64,
    pub fall_ms: u64,
    pub special: bool,
}

impl Item {
    pub fn label(&self) -> &'static str {
        if self.special { SPECIAL } else { REGULAR[self.kind % REGULAR.len()] }
    }

    /// Position at `t` ms into the round, while it is falling.
    pub fn position(&self, t: u64) -> Option<Point> {
        if t < self.delay_ms || t >= self.delay_ms + self.fall_ms {
            return None;
        }
        let progress = (t - self.delay_ms) as i64 * FIELD_H as i64 / self.fall_ms as i64;
        Some(Point::new(self.column, progress as i32))
    }

    fn ends_at(&self) -> u64 {
        self.delay_ms + self.fall_ms
    }
}

pub struct EmojiRain {
    items: Vec<Item>,
    count: usize,
    misses: u32,
    miss_limit: u32,
    failed: bool,
    timers: Timers<Task>,
    rng: StdRng,
    latch: WinLatch,
}

impl EmojiRain {
    pub fn new(tuning: &LevelTuning, rng: StdRng) -> Self {
        let mut game = EmojiRain {
            items: Vec::new(),
            count: tuning.rain_items,
            misses: 0,
            miss_limit: tuning.rain_miss_limit,
            failed: false,
            timers: Timers::new(),
            rng,
            latch: WinLatch::new(),
        };
        game.start_round();
        game
    }

    fn start_round(&mut self) {
        self.timers = Timers::new();
        self.misses = 0;
        self.failed = false;
        self.items = generate(&mut self.rng, self.count);
        let round_ms = self.items.iter().map(Item::ends_at).max().unwrap_or(0);
        self.timers.schedule(round_ms, Task::RoundOver);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Milliseconds into the current round.
    pub fn elapsed_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn miss_limit(&self) -> u32 {
        self.miss_limit
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Items on screen right now with their positions.
    pub fn falling(&self) -> impl Iterator<Item = (&Item, Point)> + '_ {
        let t = self.elapsed_ms();
        self.items.iter().filter_map(move |i| i.position(t).map(|p| (i, p)))
    }

    fn fail(&mut self, ctx: &mut Ctx<'_>) {
        self.failed = true;
        self.timers.cancel_all();
        ctx.events.push(GameEvent::LevelFailed { level: self.challenge().level() });
    }

    fn hit(&mut self, p: Point, ctx: &mut Ctx<'_>) {
        let t = self.elapsed_ms();
        let under = |i: &Item| i.position(t).is_some_and(|at| p.near(at, 1, 1));
        // the butterfly sits on top of anything it overlaps
        let idx = self.items.iter().position(|i| i.special && under(i))
            .or_else(|| self.items.iter().position(|i| under(i)));
        let Some(idx) = idx else {
            return;
        };

        if self.items[idx].special {
            if self.latch.arm() {
                self.timers.cancel_all();
                ctx.events.push(GameEvent::LevelWon { level: self.challenge().level() });
                self.timers.schedule(COMPLETE_DELAY_MS, Task::Complete);
            }
            return;
        }

        self.items.remove(idx);
        self.misses += 1;
        ctx.events.push(GameEvent::ItemMissed { misses: self.misses });
        if self.misses >= self.miss_limit {
            self.fail(ctx);
        }
    }
}

/// A fresh pool with exactly one special item.
fn generate(rng: &mut StdRng, count: usize) -> Vec<Item> {
    let special = rng.gen_range(0..count);
    (0..count)
        .map(|id| Item {
            id,
            kind: rng.gen_range(0..REGULAR.len()),
            column: rng.gen_range(2..FIELD_W - 2),
            delay_ms: rng.gen_range(0..MAX_DELAY_MS),
            fall_ms: rng.gen_range(MIN_FALL_MS..MAX_FALL_MS),
            special: id == special,
        })
        .collect()
}

impl MiniGame for EmojiRain {
    fn challenge(&self) -> Challenge {
        Challenge::EmojiRain
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) {
        if self.latch.is_won() {
            return;
        }
        match action {
            Action::Press(p) if !self.failed => self.hit(p, ctx),
            Action::Restart => {
                self.start_round();
                ctx.events.push(GameEvent::LevelRestarted { level: self.challenge().level() });
            }
            _ => {}
        }
    }

    fn advance(&mut self, dt_ms: u64, ctx: &mut Ctx<'_>) {
        for task in self.timers.advance(dt_ms) {
            match task {
                Task::RoundOver => {
                    if !self.latch.is_won() {
                        self.fail(ctx);
                    }
                }
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
