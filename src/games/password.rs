/// Level 5: guess the secret phrase.
///
/// Answers compare after trimming and lowercasing. Every wrong guess clears
/// the input, shakes the box and surfaces the next hint.

use super::{Action, Ctx, MiniGame, WinLatch};
use crate::config::LevelTuning;
use crate::domain::level::Challenge;
use crate::sim::event::GameEvent;
use crate::sim::timer::{TimerId, Timers};

pub const PROMPT: &str = "3 Words - Guess the Secret Phrase";
pub const PLACEHOLDER: &str = "Type the secret nickname...";
pub const MAX_INPUT: usize = 32;

const SHAKE_MS: u64 = 500;
const COMPLETE_DELAY_MS: u64 = 1000;

const HINTS: [&str; 4] = [
    "Think about what I first told you that made you happy.",
    "It's something sweet and affectionate...",
    "Hint: It's something I often tell you that you love to hear.",
    "Try: I .... .......",
];

#[derive(Clone, Copy, Debug)]
enum Task {
    StopShake,
    Complete,
}

pub struct Password {
    input: String,
    answers: Vec<String>,
    attempts: u32,
    shaking: bool,
    shake: Option<TimerId>,
    timers: Timers<Task>,
    latch: WinLatch,
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

impl Password {
    pub fn new(tuning: &LevelTuning) -> Self {
        Password {
            input: String::new(),
            answers: tuning.passwords.clone(),
            attempts: 0,
            shaking: false,
            shake: None,
            timers: Timers::new(),
            latch: WinLatch::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_shaking(&self) -> bool {
        self.shaking
    }

    /// Hint for the current attempt count; the last one repeats.
    pub fn hint(&self) -> Option<&'static str> {
        let n = self.attempts as usize;
        if n == 0 {
            None
        } else {
            Some(HINTS[(n - 1).min(HINTS.len() - 1)])
        }
    }

    pub fn is_correct(&self, guess: &str) -> bool {
        let guess = normalize(guess);
        self.answers.iter().any(|a| *a == guess)
    }

    fn submit(&mut self, ctx: &mut Ctx<'_>) {
        if self.input.trim().is_empty() {
            return;
        }
        if self.is_correct(&self.input) {
            if self.latch.arm() {
                ctx.events.push(GameEvent::LevelWon { level: self.challenge().level() });
                self.timers.schedule(COMPLETE_DELAY_MS, Task::Complete);
            }
            return;
        }

        self.attempts += 1;
        self.input.clear();
        self.shaking = true;
        if let Some(id) = self.shake.take() {
            self.timers.cancel(id);
        }
        self.shake = Some(self.timers.schedule(SHAKE_MS, Task::StopShake));
        ctx.events.push(GameEvent::WrongGuess { attempts: self.attempts });
    }
}

impl MiniGame for Password {
    fn challenge(&self) -> Challenge {
        Challenge::Password
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) {
        if self.latch.is_won() {
            return;
        }
        match action {
            Action::Type(c) if !c.is_control() && self.input.chars().count() < MAX_INPUT => {
                self.input.push(c);
            }
            Action::Erase => {
                self.input.pop();
            }
            Action::Submit => self.submit(ctx),
            _ => {}
        }
    }

    fn advance(&mut self, dt_ms: u64, ctx: &mut Ctx<'_>) {
        for task in self.timers.advance(dt_ms) {
            match task {
                Task::StopShake => {
                    self.shaking = false;
                    self.shake = None;
                }
                Task::Complete => {
                    self.latch.report(self.challenge().level(), ctx.sink);
                }
            }
        }
    }

    fn teardown(&mut self) {
        self.timers.cancel_all();
        self.shake = None;
    }

    fn is_won(&self) -> bool {
        self.latch.is_won()
    }

    fn accepts_text(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::Harness;

    fn type_and_submit(h: &mut Harness, g: &mut Password, text: &str) {
        for c in text.chars() {
            h.act(g, Action::Type(c));
        }
        h.act(g, Action::Submit);
    }

    #[test]
    fn accepted_spellings_all_win() {
        for guess in ["I will protect", "i will protect", "  I WILL PROTECT  "] {
            let mut h = Harness::new();
            let mut g = Password::new(&LevelTuning::default());
            type_and_submit(&mut h, &mut g, guess);
            assert!(g.is_won(), "{guess:?} should be accepted");
            assert_eq!(g.attempts(), 0);
            h.wait(&mut g, 999);
            assert_eq!(h.wins(), 0);
            h.wait(&mut g, 1);
            assert_eq!(h.wins(), 1);
        }
    }

    #[test]
    fn wrong_guess_counts_once_and_clears() {
        let mut h = Harness::new();
        let mut g = Password::new(&LevelTuning::default());
        type_and_submit(&mut h, &mut g, "i will try");
        assert!(!g.is_won());
        assert_eq!(g.attempts(), 1);
        assert_eq!(g.input(), "");
        assert!(g.is_shaking());
        assert_eq!(g.hint(), Some(HINTS[0]));
        h.wait(&mut g, 500);
        assert!(!g.is_shaking());
    }

    #[test]
    fn hints_clamp_at_the_last_one() {
        let mut h = Harness::new();
        let mut g = Password::new(&LevelTuning::default());
        assert_eq!(g.hint(), None);
        for _ in 0..6 {
            type_and_submit(&mut h, &mut g, "nope");
        }
        assert_eq!(g.attempts(), 6);
        assert_eq!(g.hint(), Some("Try: I .... ......."));
    }

    #[test]
    fn empty_submit_is_not_an_attempt() {
        let mut h = Harness::new();
        let mut g = Password::new(&LevelTuning::default());
        type_and_submit(&mut h, &mut g, "   ");
        assert_eq!(g.attempts(), 0);
    }

    #[test]
    fn erase_removes_last_char() {
        let mut h = Harness::new();
        let mut g = Password::new(&LevelTuning::default());
        h.act(&mut g, Action::Type('a'));
        h.act(&mut g, Action::Type('b'));
        h.act(&mut g, Action::Erase);
        assert_eq!(g.input(), "a");
    }

    #[test]
    fn input_is_ignored_after_success() {
        let mut h = Harness::new();
        let mut g = Password::new(&LevelTuning::default());
        type_and_submit(&mut h, &mut g, "i will protect");
        type_and_submit(&mut h, &mut g, "x");
        assert_eq!(g.input(), "i will protect");
        h.wait(&mut g, 2000);
        assert_eq!(h.wins(), 1);
    }

    #[test]
    fn shake_restarts_on_rapid_misses() {
        let mut h = Harness::new();
        let mut g = Password::new(&LevelTuning::default());
        type_and_submit(&mut h, &mut g, "one");
        h.wait(&mut g, 400);
        type_and_submit(&mut h, &mut g, "two");
        h.wait(&mut g, 400);
        assert!(g.is_shaking());
        h.wait(&mut g, 100);
        assert!(!g.is_shaking());
    }
}
