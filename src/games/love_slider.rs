/// Level 3: "How much do you love me?" Push the slider all the way.

use super::{Action, Ctx, MiniGame, WinLatch};
use crate::config::LevelTuning;
use crate::domain::geometry::MoveDir;
use crate::domain::level::Challenge;
use crate::sim::event::GameEvent;
use crate::sim::timer::Timers;

const COMPLETE_DELAY_MS: u64 = 800;
pub const MAX: u8 = 100;

#[derive(Clone, Copy, Debug)]
enum Task {
    Complete,
}

pub struct LoveSlider {
    value: u8,
    step: u8,
    timers: Timers<Task>,
    latch: WinLatch,
}

impl LoveSlider {
    pub fn new(tuning: &LevelTuning) -> Self {
        LoveSlider {
            value: 0,
            step: tuning.slider_step,
            timers: Timers::new(),
            latch: WinLatch::new(),
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn message(&self) -> &'static str {
        match self.value {
            0..=19 => "Come on, you can do better...",
            20..=39 => "Getting warmer...",
            40..=59 => "That's more like it!",
            60..=79 => "Almost there...",
            80..=99 => "Just a little more!",
            _ => "To infinity and beyond!",
        }
    }

    fn set(&mut self, value: u8, ctx: &mut Ctx<'_>) {
        self.value = value.min(MAX);
        if self.value == MAX && self.latch.arm() {
            ctx.events.push(GameEvent::LevelWon { level: self.challenge().level() });
            self.timers.schedule(COMPLETE_DELAY_MS, Task::Complete);
        }
    }
}

impl MiniGame for LoveSlider {
    fn challenge(&self) -> Challenge {
        Challenge::LoveSlider
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) {
        if self.latch.is_won() {
            return;
        }
        match action {
            Action::Steer(MoveDir::Right) => self.set(self.value.saturating_add(self.step), ctx),
            Action::Steer(MoveDir::Left) => self.set(self.value.saturating_sub(self.step), ctx),
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
