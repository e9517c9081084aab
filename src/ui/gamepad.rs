/// Gamepad input tracker using gilrs.
///
/// Button mapping comes from the `[gamepad]` section of config.toml via
/// `load_button_config()`. Default mapping:
///   D-pad / Left Stick    →  Pointer
///   A / Start             →  Confirm (press at the pointer)
///   Y                     →  Restart level
///   Select                →  Pause / quit

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::domain::geometry::MoveDir;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.25;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,      // LeftTrigger
    R1,      // RightTrigger
    Start,
    Select,
}

const BTN_COUNT: usize = 8;

impl Btn {
    pub fn from_name(s: &str) -> Option<Btn> {
        match s.trim().to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South     => Some(Btn::A),
            Button::East      => Some(Btn::B),
            Button::West      => Some(Btn::X),
            Button::North     => Some(Btn::Y),
            Button::LeftTrigger  => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::Start     => Some(Btn::Start),
            Button::Select    => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Per-button state: held (continuous) and just_pressed (edge).
#[derive(Clone, Copy, Debug, Default)]
struct BtnState {
    held: bool,
    just_pressed: bool,
}

/// Action-to-button mapping (loaded from config).
struct ActionMap {
    confirm: Vec<Btn>,
    cancel: Vec<Btn>,
    restart: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            confirm: vec![Btn::A, Btn::Start],
            cancel:  vec![Btn::Select],
            restart: vec![Btn::Y],
        }
    }
}

fn dir_index(dir: MoveDir) -> usize {
    match dir {
        MoveDir::Up => 0,
        MoveDir::Down => 1,
        MoveDir::Left => 2,
        MoveDir::Right => 3,
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    buttons: [BtnState; BTN_COUNT],

    /// D-pad, indexed by `dir_index`.
    dpad: [BtnState; 4],
    /// Left stick folded to four directions, indexed by `dir_index`.
    stick: [BtnState; 4],
    stick_x: f32,
    stick_y: f32,

    action_map: ActionMap,

    pub connected: bool,
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = match Gilrs::new() {
            Ok(g) => {
                let has_pad = g.gamepads().next().is_some();
                (Some(g), has_pad)
            }
            Err(e) => {
                log::warn!("gamepad support unavailable: {e}");
                (None, false)
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            buttons: [BtnState::default(); BTN_COUNT],
            dpad: [BtnState::default(); 4],
            stick: [BtnState::default(); 4],
            stick_x: 0.0,
            stick_y: 0.0,
            action_map: ActionMap::default(),
            connected,
        }
    }

    /// Load button mapping from config. Unknown names are skipped; an
    /// action with no usable names keeps its default.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        fn parse_list(names: &[String]) -> Vec<Btn> {
            names.iter()
                .filter_map(|s| {
                    let btn = Btn::from_name(s);
                    if btn.is_none() {
                        log::warn!("unknown gamepad button {s:?} in config");
                    }
                    btn
                })
                .collect()
        }
        let map = &mut self.action_map;
        let cf = parse_list(&cfg.confirm);
        if !cf.is_empty() { map.confirm = cf; }
        let ca = parse_list(&cfg.cancel);
        if !ca.is_empty() { map.cancel = ca; }
        let rs = parse_list(&cfg.restart);
        if !rs.is_empty() { map.restart = rs; }
    }

    pub fn update(&mut self) {
        self.clear_just_pressed();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    self.set_button(btn, true);
                }
                EventType::ButtonReleased(btn, _) => {
                    self.connected = true;
                    self.set_button(btn, false);
                }
                EventType::AxisChanged(axis, value, _) => {
                    self.connected = true;
                    self.update_axis(axis, value);
                }
                EventType::Connected => {
                    log::info!("gamepad connected");
                    self.connected = true;
                }
                EventType::Disconnected => {
                    log::info!("gamepad disconnected");
                    self.connected = false;
                    self.release_all();
                }
                _ => {}
            }
        }

        // Derive stick digital states
        let now = [
            self.stick_y > STICK_DEADZONE,
            self.stick_y < -STICK_DEADZONE,
            self.stick_x < -STICK_DEADZONE,
            self.stick_x > STICK_DEADZONE,
        ];
        for (state, held) in self.stick.iter_mut().zip(now) {
            if held && !state.held {
                state.just_pressed = true;
            }
            state.held = held;
        }
    }

    #[cfg(feature = "gamepad")]
    fn set_button(&mut self, gilrs_btn: Button, held: bool) {
        // D-pad handled separately (not in Btn enum)
        let dir = match gilrs_btn {
            Button::DPadUp    => Some(MoveDir::Up),
            Button::DPadDown  => Some(MoveDir::Down),
            Button::DPadLeft  => Some(MoveDir::Left),
            Button::DPadRight => Some(MoveDir::Right),
            _ => None,
        };
        let state = match dir {
            Some(d) => &mut self.dpad[dir_index(d)],
            None => match Btn::from_gilrs(gilrs_btn) {
                Some(btn) => &mut self.buttons[btn as usize],
                None => return,
            },
        };
        state.held = held;
        if held {
            state.just_pressed = true;
        }
    }

    #[cfg(feature = "gamepad")]
    fn update_axis(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::LeftStickX => self.stick_x = value,
            Axis::LeftStickY => self.stick_y = value,
            _ => {}
        }
    }

    // ── Action queries (config-driven) ──

    fn any_just_pressed(&self, btns: &[Btn]) -> bool {
        btns.iter().any(|&b| self.buttons[b as usize].just_pressed)
    }

    pub fn confirm_pressed(&self) -> bool {
        self.any_just_pressed(&self.action_map.confirm)
    }
    pub fn cancel_pressed(&self) -> bool {
        self.any_just_pressed(&self.action_map.cancel)
    }
    pub fn restart_pressed(&self) -> bool {
        self.any_just_pressed(&self.action_map.restart)
    }

    // Pointer (continuous, held)
    pub fn dir_held(&self, dir: MoveDir) -> bool {
        let i = dir_index(dir);
        self.dpad[i].held || self.stick[i].held
    }

    pub fn dir_pressed(&self, dir: MoveDir) -> bool {
        let i = dir_index(dir);
        self.dpad[i].just_pressed || self.stick[i].just_pressed
    }

    // ── Internal ──

    fn clear_just_pressed(&mut self) {
        for b in self.buttons.iter_mut().chain(self.dpad.iter_mut()).chain(self.stick.iter_mut()) {
            b.just_pressed = false;
        }
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn release_all(&mut self) {
        for b in self.buttons.iter_mut().chain(self.dpad.iter_mut()).chain(self.stick.iter_mut()) {
            *b = BtnState::default();
        }
        self.stick_x = 0.0;
        self.stick_y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_names_are_case_insensitive_with_aliases() {
        assert_eq!(Btn::from_name("a"), Some(Btn::A));
        assert_eq!(Btn::from_name(" south "), Some(Btn::A));
        assert_eq!(Btn::from_name("Back"), Some(Btn::Select));
        assert_eq!(Btn::from_name("turbo"), None);
    }

    #[test]
    fn config_replaces_only_usable_lists() {
        let mut pad = GamepadState::new();
        pad.load_button_config(&GamepadConfig {
            confirm: vec!["B".into()],
            cancel: vec!["nonsense".into()],
            restart: vec![],
        });
        assert_eq!(pad.action_map.confirm, vec![Btn::B]);
        assert_eq!(pad.action_map.cancel, vec![Btn::Select]);
        assert_eq!(pad.action_map.restart, vec![Btn::Y]);
    }

    #[test]
    fn nothing_is_pressed_without_events() {
        let mut pad = GamepadState::new();
        pad.update();
        assert!(!pad.confirm_pressed());
        assert!(!pad.dir_held(MoveDir::Left));
    }
}
