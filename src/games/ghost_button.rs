/// Level 1: a button that runs away from the pointer.
///
/// Hovering the button makes it jump somewhere else on the field. After
/// enough dodges it gives up, parks in the middle and can be pressed.

use rand::rngs::StdRng;

use super::{Action, Ctx, MiniGame, WinLatch};
use crate::config::LevelTuning;
use crate::domain::geometry::{random_placement, Point, Rect};
use crate::domain::level::Challenge;
use crate::sim::event::GameEvent;

pub const BUTTON_W: i32 = 19;

const TEASES: [&str; 6] = [
    "Try to catch me!",
    "Too slow!",
    "Almost!",
    "Haha, not yet!",
    "One more try...",
    "Okay okay, I'll stay!",
];

pub struct GhostButton {
    button: Rect,
    dodges: u32,
    max_dodges: u32,
    caught: bool,
    rng: StdRng,
    latch: WinLatch,
}

impl GhostButton {
    pub fn new(tuning: &LevelTuning, rng: StdRng) -> Self {
        GhostButton {
            button: Rect::centered_on(Point::center(), BUTTON_W, 1),
            dodges: 0,
            max_dodges: tuning.ghost_dodges,
            caught: false,
            rng,
            latch: WinLatch::new(),
        }
    }

    pub fn button(&self) -> Rect {
        self.button
    }

    pub fn dodges(&self) -> u32 {
        self.dodges
    }

    pub fn is_caught(&self) -> bool {
        self.caught
    }

    pub fn label(&self) -> &'static str {
        if self.caught { "Click Me!" } else { "Start the Journey" }
    }

    pub fn tease(&self) -> &'static str {
        TEASES[(self.dodges as usize).min(TEASES.len() - 1)]
    }

    fn dodge(&mut self, pointer: Point, ctx: &mut Ctx<'_>) {
        if self.dodges + 1 < self.max_dodges {
            self.dodges += 1;
            let at = random_placement(&mut self.rng, BUTTON_W, 1, pointer);
            self.button = Rect::new(at.x, at.y, BUTTON_W, 1);
        } else {
            self.dodges = self.max_dodges;
            self.caught = true;
            self.button = Rect::centered_on(Point::center(), BUTTON_W, 1);
        }
        ctx.events.push(GameEvent::Dodged);
    }
}

impl MiniGame for GhostButton {
    fn challenge(&self) -> Challenge {
        Challenge::GhostButton
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) {
        match action {
            Action::Hover(p) if !self.caught && self.button.contains(p) => self.dodge(p, ctx),
            Action::Press(p) if self.button.contains(p) => {
                if !self.caught {
                    self.dodge(p, ctx);
                } else if self.latch.arm() {
                    let level = self.challenge().level();
                    ctx.events.push(GameEvent::LevelWon { level });
                    self.latch.report(level, ctx.sink);
                }
            }
            _ => {}
        }
    }

    fn advance(&mut self, _dt_ms: u64, _ctx: &mut Ctx<'_>) {}

    fn teardown(&mut self) {}

    fn is_won(&self) -> bool {
        self.latch.is_won()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::Harness;
    use rand::SeedableRng;

    fn game() -> GhostButton {
        GhostButton::new(&LevelTuning::default(), StdRng::seed_from_u64(3))
    }

    fn hover_button(h: &mut Harness, g: &mut GhostButton) {
        let at = g.button().origin();
        h.act(g, Action::Hover(at));
    }

    #[test]
    fn hover_moves_button_away_from_pointer() {
        let mut h = Harness::new();
        let mut g = game();
        let at = g.button().origin();
        h.act(&mut g, Action::Hover(at));
        assert_eq!(g.dodges(), 1);
        assert!(!g.button().contains(at));
        assert_eq!(g.tease(), "Too slow!");
    }

    #[test]
    fn hovering_elsewhere_does_nothing() {
        let mut h = Harness::new();
        let mut g = game();
        h.act(&mut g, Action::Hover(Point::new(0, 0)));
        assert_eq!(g.dodges(), 0);
        assert_eq!(g.tease(), "Try to catch me!");
    }

    #[test]
    fn caught_after_max_dodges_and_parks_in_centre() {
        let mut h = Harness::new();
        let mut g = game();
        for _ in 0..5 {
            hover_button(&mut h, &mut g);
        }
        assert!(g.is_caught());
        assert_eq!(g.dodges(), 5);
        assert_eq!(g.label(), "Click Me!");
        assert_eq!(g.tease(), "Okay okay, I'll stay!");
        assert_eq!(g.button(), Rect::centered_on(Point::center(), BUTTON_W, 1));

        // no more dodging once caught
        hover_button(&mut h, &mut g);
        assert_eq!(g.dodges(), 5);
    }

    #[test]
    fn press_when_caught_completes_immediately_once() {
        let mut h = Harness::new();
        let mut g = game();
        for _ in 0..5 {
            hover_button(&mut h, &mut g);
        }
        let at = g.button().origin();
        h.act(&mut g, Action::Press(at));
        h.act(&mut g, Action::Press(at));
        assert!(g.is_won());
        assert_eq!(h.wins(), 1);
    }

    #[test]
    fn press_before_caught_only_dodges() {
        let mut h = Harness::new();
        let mut g = game();
        let at = g.button().origin();
        h.act(&mut g, Action::Press(at));
        assert_eq!(g.dodges(), 1);
        assert_eq!(h.wins(), 0);
    }
}
