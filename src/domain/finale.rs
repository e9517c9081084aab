/// The finale: error splash → question → accepted.
///
/// Independent of `GameProgress`. The decline button can be chased around
/// the field forever; every touch moves it and makes the accept button a
/// little bigger. Only `accept` leaves the question, and `Accepted` is final.

use rand::rngs::StdRng;
use rand::Rng;

use super::geometry::{Point, Rect, FIELD_H, FIELD_W};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FinalePhase {
    Error,
    Question,
    Accepted,
}

pub const DECLINE_MESSAGES: [&str; 15] = [
    "No",
    "Are you sure?",
    "Really sure?",
    "Think again!",
    "Last chance!",
    "Surely not?",
    "You might regret this!",
    "Give it another thought!",
    "Are you being serious?",
    "This is your final answer?",
    "You're breaking my heart...",
    "I'm gonna cry...",
    "Okay fine, I won't ask again...",
    "Just kidding, PLEASE?",
    "I'll be really sad...",
];

const BUTTON_ROW: i32 = 8;
const ACCEPT_CENTER_X: i32 = 14;
const DECLINE_HOME: Point = Point::new(30, BUTTON_ROW);
const ACCEPT_BASE_W: f32 = 8.0;

/// What a press in the question phase did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FinalePress {
    Accepted,
    Dodged,
    Nothing,
}

pub struct Finale {
    phase: FinalePhase,
    decline_pos: Point,
    presses: u32,
    rng: StdRng,
}

impl Finale {
    pub fn new(rng: StdRng) -> Self {
        Finale {
            phase: FinalePhase::Error,
            decline_pos: DECLINE_HOME,
            presses: 0,
            rng,
        }
    }

    pub fn phase(&self) -> FinalePhase {
        self.phase
    }

    /// Error → Question. Returns whether the phase changed.
    pub fn proceed(&mut self) -> bool {
        if self.phase == FinalePhase::Error {
            self.phase = FinalePhase::Question;
            true
        } else {
            false
        }
    }

    /// Question → Accepted. Returns whether the phase changed.
    pub fn accept(&mut self) -> bool {
        if self.phase == FinalePhase::Question {
            self.phase = FinalePhase::Accepted;
            true
        } else {
            false
        }
    }

    /// Any attempt at the decline button: move it somewhere the pointer
    /// is not and escalate. Never changes the phase.
    pub fn dodge_decline(&mut self, pointer: Point) -> bool {
        if self.phase != FinalePhase::Question {
            return false;
        }
        self.presses += 1;
        let w = self.decline_width();
        let accept = self.accept_rect();
        // Any row off the pointer and outside the accept button's band.
        let rows: Vec<i32> = (0..FIELD_H)
            .filter(|&y| y != pointer.y && (y < accept.y || y >= accept.y + accept.h))
            .collect();
        let y = rows[self.rng.gen_range(0..rows.len())];
        let x = self.rng.gen_range(0..=(FIELD_W - w).max(0));
        self.decline_pos = Point::new(x, y);
        true
    }

    /// Pointer moved onto the decline button.
    pub fn hover(&mut self, pointer: Point) -> bool {
        self.phase == FinalePhase::Question
            && self.decline_rect().contains(pointer)
            && self.dodge_decline(pointer)
    }

    pub fn press(&mut self, pointer: Point) -> FinalePress {
        if self.phase != FinalePhase::Question {
            return FinalePress::Nothing;
        }
        if self.accept_rect().contains(pointer) {
            self.accept();
            FinalePress::Accepted
        } else if self.decline_rect().contains(pointer) {
            self.dodge_decline(pointer);
            FinalePress::Dodged
        } else {
            FinalePress::Nothing
        }
    }

    pub fn presses(&self) -> u32 {
        self.presses
    }

    pub fn accept_scale(&self) -> f32 {
        1.0 + self.presses as f32 * 0.15
    }

    /// Perceived size of the decline button: 16 shrinking to 8.
    pub fn decline_size(&self) -> u32 {
        16u32.saturating_sub(self.presses).max(8)
    }

    pub fn decline_label(&self) -> &'static str {
        let idx = (self.presses as usize).min(DECLINE_MESSAGES.len() - 1);
        DECLINE_MESSAGES[idx]
    }

    pub fn accept_rect(&self) -> Rect {
        let w = ((ACCEPT_BASE_W * self.accept_scale()).round() as i32).min(FIELD_W - 2);
        let h = if self.accept_scale() >= 1.9 { 3 } else { 1 };
        let mut rect = Rect::centered_on(Point::new(ACCEPT_CENTER_X, BUTTON_ROW), w, h);
        rect.x = rect.x.clamp(1, FIELD_W - w - 1);
        rect
    }

    pub fn decline_rect(&self) -> Rect {
        Rect::new(self.decline_pos.x, self.decline_pos.y, self.decline_width(), 1)
    }

    fn decline_width(&self) -> i32 {
        self.decline_label().chars().count() as i32 + 4
    }
}
