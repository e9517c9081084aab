/// Level 2: pop every heart before the countdown runs out.

use rand::rngs::StdRng;
use rand::Rng;

use super::{Action, Ctx, MiniGame, WinLatch};
use crate::config::LevelTuning;
use crate::domain::geometry::{Point, FIELD_H, FIELD_W};
use crate::domain::level::Challenge;
use crate::sim::event::GameEvent;
use crate::sim::timer::{TimerId, Timers};

const TICK_MS: u64 = 1000;
const COMPLETE_DELAY_MS: u64 = 500;

#[derive(Clone, Copy, Debug)]
enum Task {
    Tick,
    Complete,
}

#[derive(Clone, Copy, Debug)]
pub struct Heart {
    pub at: Point,
    pub popped: bool,
}

pub struct HeartPop {
    hearts: Vec<Heart>,
    countdown_secs: u32,
    seconds_left: u32,
    game_over: bool,
    tick: Option<TimerId>,
    timers: Timers<Task>,
    rng: StdRng,
    latch: WinLatch,
}

impl HeartPop {
    pub fn new(tuning: &LevelTuning, rng: StdRng) -> Self {
        let mut game = HeartPop {
            hearts: Vec::new(),
            countdown_secs: tuning.heart_countdown_secs,
            seconds_left: tuning.heart_countdown_secs,
            game_over: false,
            tick: None,
            timers: Timers::new(),
            rng,
            latch: WinLatch::new(),
        };
        game.hearts = scatter(&mut game.rng, tuning.heart_count);
        game.tick = Some(game.timers.schedule(TICK_MS, Task::Tick));
        game
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    pub fn remaining(&self) -> usize {
        self.hearts.iter().filter(|h| !h.popped).count()
    }

    pub fn popped(&self) -> usize {
        self.hearts.len() - self.remaining()
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    fn pop_at(&mut self, p: Point, ctx: &mut Ctx<'_>) {
        let Some(heart) = self.hearts.iter_mut().find(|h| !h.popped && p.near(h.at, 1, 0)) else {
            return;
        };
        heart.popped = true;
        let remaining = self.remaining();
        ctx.events.push(GameEvent::HeartPopped { remaining });

        if remaining == 0 && self.latch.arm() {
            if let Some(id) = self.tick.take() {
                self.timers.cancel(id);
            }
            ctx.events.push(GameEvent::LevelWon { level: self.challenge().level() });
            self.timers.schedule(COMPLETE_DELAY_MS, Task::Complete);
        }
    }

    fn restart(&mut self, ctx: &mut Ctx<'_>) {
        self.timers.cancel_all();
        self.hearts = scatter(&mut self.rng, self.hearts.len());
        self.seconds_left = self.countdown_secs;
        self.game_over = false;
        self.tick = Some(self.timers.schedule(TICK_MS, Task::Tick));
        ctx.events.push(GameEvent::LevelRestarted { level: self.challenge().level() });
    }
}

/// Hearts on the same row sit at least three columns apart, so a press
/// pops at most one.
fn scatter(rng: &mut StdRng, count: usize) -> Vec<Heart> {
    let mut hearts: Vec<Heart> = Vec::with_capacity(count);
    while hearts.len() < count {
        let mut at = Point::new(0, 0);
        for _ in 0..64 {
            at = Point::new(rng.gen_range(1..FIELD_W - 1), rng.gen_range(1..FIELD_H - 1));
            if !hearts.iter().any(|h| at.near(h.at, 2, 0)) {
                break;
            }
        }
        hearts.push(Heart { at, popped: false });
    }
    hearts
}

impl MiniGame for HeartPop {
    fn challenge(&self) -> Challenge {
        Challenge::HeartPop
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) {
        match action {
            Action::Press(p) if !self.game_over && !self.latch.is_won() => self.pop_at(p, ctx),
            Action::Restart if !self.latch.is_won() => self.restart(ctx),
            _ => {}
        }
    }

    fn advance(&mut self, dt_ms: u64, ctx: &mut Ctx<'_>) {
        let until = self.timers.now_ms() + dt_ms;
        while let Some(task) = self.timers.pop_due(until) {
            match task {
                Task::Tick => {
                    self.seconds_left = self.seconds_left.saturating_sub(1);
                    ctx.events.push(GameEvent::CountdownTick { seconds_left: self.seconds_left });
                    if self.seconds_left == 0 {
                        self.tick = None;
                        self.game_over = true;
                        ctx.events.push(GameEvent::LevelFailed { level: self.challenge().level() });
                    } else {
                        self.tick = Some(self.timers.schedule(TICK_MS, Task::Tick));
                    }
                }
                Task::Complete => {
                    self.latch.report(self.challenge().level(), ctx.sink);
                }
            }
        }
        self.timers.settle(until);
    }

    fn teardown(&mut self) {
        self.timers.cancel_all();
        self.tick = None;
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

    fn game() -> HeartPop {
        HeartPop::new(&LevelTuning::default(), StdRng::seed_from_u64(11))
    }

    fn pop_all(h: &mut Harness, g: &mut HeartPop) {
        let spots: Vec<Point> = g.hearts().iter().map(|h| h.at).collect();
        for at in spots {
            h.act(g, Action::Press(at));
        }
    }

    #[test]
    fn hearts_do_not_crowd_each_other() {
        let g = game();
        assert_eq!(g.hearts().len(), 13);
        for (i, a) in g.hearts().iter().enumerate() {
            for b in &g.hearts()[i + 1..] {
                assert!(!a.at.near(b.at, 2, 0));
            }
        }
    }

    #[test]
    fn press_one_column_off_still_pops() {
        let mut h = Harness::new();
        let mut g = game();
        let at = g.hearts()[0].at;
        h.act(&mut g, Action::Press(at.offset_clamped(1, 0)));
        assert_eq!(g.popped(), 1);
        h.act(&mut g, Action::Press(at));
        assert_eq!(g.popped(), 1);
    }

    #[test]
    fn popping_all_in_time_completes_after_delay() {
        let mut h = Harness::new();
        let mut g = game();
        h.wait(&mut g, 3000);
        pop_all(&mut h, &mut g);
        assert!(g.is_won());
        assert_eq!(h.wins(), 0);
        h.wait(&mut g, 499);
        assert_eq!(h.wins(), 0);
        h.wait(&mut g, 1);
        assert_eq!(h.wins(), 1);

        // the countdown was cancelled
        h.wait(&mut g, 20_000);
        assert!(!g.is_over());
        assert_eq!(h.wins(), 1);
    }

    #[test]
    fn countdown_expiry_is_game_over() {
        let mut h = Harness::new();
        let mut g = game();
        h.wait(&mut g, 9_999);
        assert_eq!(g.seconds_left(), 1);
        assert!(!g.is_over());
        h.wait(&mut g, 1);
        assert!(g.is_over());
        assert!(h.saw(|e| matches!(e, GameEvent::LevelFailed { .. })));

        let at = g.hearts()[0].at;
        h.act(&mut g, Action::Press(at));
        assert_eq!(g.popped(), 0);
    }

    #[test]
    fn restart_resets_count_clock_and_positions() {
        let mut h = Harness::new();
        let mut g = game();
        let at = g.hearts()[0].at;
        h.act(&mut g, Action::Press(at));
        let before: Vec<Point> = g.hearts().iter().map(|h| h.at).collect();
        h.wait(&mut g, 10_000);
        assert!(g.is_over());

        h.act(&mut g, Action::Restart);
        assert!(!g.is_over());
        assert_eq!(g.popped(), 0);
        assert_eq!(g.seconds_left(), 10);
        let after: Vec<Point> = g.hearts().iter().map(|h| h.at).collect();
        assert_ne!(before, after);

        // a fresh, full countdown
        h.wait(&mut g, 9_000);
        assert!(!g.is_over());
        pop_all(&mut h, &mut g);
        h.wait(&mut g, 500);
        assert_eq!(h.wins(), 1);
    }

    #[test]
    fn restart_mid_countdown_leaves_no_stale_tick() {
        let mut h = Harness::new();
        let mut g = game();
        h.wait(&mut g, 999);
        h.act(&mut g, Action::Restart);
        h.wait(&mut g, 1);
        assert_eq!(g.seconds_left(), 10);
        h.wait(&mut g, 999);
        assert_eq!(g.seconds_left(), 9);
    }

    #[test]
    fn teardown_cancels_pending_completion() {
        let mut h = Harness::new();
        let mut g = game();
        pop_all(&mut h, &mut g);
        g.teardown();
        h.wait(&mut g, 1000);
        assert_eq!(h.wins(), 0);
    }
}
