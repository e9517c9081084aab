/// Entry point and game loop.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use log::{error, info, warn};

use valentine_quest::config::GameConfig;
use valentine_quest::domain::finale::FinalePhase;
use valentine_quest::domain::geometry::MoveDir;
use valentine_quest::domain::scene::Scene;
use valentine_quest::error::AppError;
use valentine_quest::logging;
use valentine_quest::sim::event::GameEvent;
use valentine_quest::sim::step::{self, Command};
use valentine_quest::sim::world::WorldState;
use valentine_quest::ui::gamepad::GamepadState;
use valentine_quest::ui::input::InputState;
use valentine_quest::ui::renderer::Renderer;
use valentine_quest::ui::sound::{Cue, SoundEngine};

const FRAME_SLEEP: Duration = Duration::from_millis(5);
/// Longest slice of time a single step may cover (e.g. after a suspend).
const MAX_STEP_MS: u64 = 250;

fn main() {
    let (config, warnings) = GameConfig::load();

    if let Err(e) = logging::init(config.log_file.as_deref(), config.general.log_level) {
        eprintln!("{e}; continuing without a log");
    }
    for w in &warnings {
        warn!("{w}; using defaults");
    }
    info!("starting: tick {} ms, images from {}", config.timing.tick_rate_ms, config.images_dir.display());

    let mut world = WorldState::new(&config, rand::random());
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut world, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        error!("game loop failed: {e}");
        eprintln!("Game error: {e}");
    }

    println!();
    if accepted(&world) {
        println!("Happy Valentine's Day, {}! ♥", world.nickname);
    } else {
        println!("See you soon, {}.", world.nickname);
    }
}

fn accepted(world: &WorldState) -> bool {
    world.finale.as_ref().is_some_and(|f| f.phase() == FinalePhase::Accepted)
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), AppError> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    let tick_rate = Duration::from_millis(config.timing.tick_rate_ms);
    let mut last_tick = Instant::now();

    let mut pending: Vec<Command> = Vec::new();
    let mut repeat = PointerRepeat::new(config.timing.pointer_repeat_ticks);

    loop {
        kb.drain_events();
        gp.update();

        if kb.ctrl_c_pressed() {
            break;
        }
        match handle_meta(world, &kb, &gp) {
            Meta::Quit => break,
            Meta::Handled => {}
            Meta::Pass => collect_commands(world, &kb, &gp, &mut pending, &mut repeat),
        }

        if last_tick.elapsed() >= tick_rate {
            let dt_ms = (last_tick.elapsed().as_millis() as u64).min(MAX_STEP_MS);
            last_tick = Instant::now();

            if !world.paused && !world.wants_text() {
                if let Some(dir) = repeat.tick(held_direction(&kb, &gp)) {
                    pending.push(Command::Move(dir));
                }
            }
            let events = step::step(world, &pending, dt_ms);
            pending.clear();
            process_sound_events(sound, &events);
        }

        renderer.render(world)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    info!("quit at level {}", world.progress.current_level());
    Ok(())
}

fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let Some(sfx) = sound else { return };
    for cue in events.iter().filter_map(Cue::for_event) {
        sfx.play(cue);
    }
}

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc];

/// Arrow keys only; letters belong to text entry.
const TEXT_MODE_ARROWS: [(KeyCode, MoveDir); 4] = [
    (KeyCode::Up, MoveDir::Up),
    (KeyCode::Down, MoveDir::Down),
    (KeyCode::Left, MoveDir::Left),
    (KeyCode::Right, MoveDir::Right),
];

const DIRECTIONS: [(&[KeyCode], MoveDir); 4] = [
    (KEYS_UP, MoveDir::Up),
    (KEYS_DOWN, MoveDir::Down),
    (KEYS_LEFT, MoveDir::Left),
    (KEYS_RIGHT, MoveDir::Right),
];

fn held_direction(kb: &InputState, gp: &GamepadState) -> Option<MoveDir> {
    DIRECTIONS.iter()
        .find(|(keys, dir)| kb.any_held(keys) || gp.dir_held(*dir))
        .map(|(_, dir)| *dir)
}

/// Turns a held direction into a move every `every` ticks. A fresh press
/// moves at once (see `collect_commands`) and restarts the count.
struct PointerRepeat {
    every: u32,
    count: u32,
}

impl PointerRepeat {
    fn new(every: u32) -> Self {
        PointerRepeat { every: every.max(1), count: 0 }
    }

    fn reset(&mut self) {
        self.count = 0;
    }

    fn tick(&mut self, held: Option<MoveDir>) -> Option<MoveDir> {
        let Some(dir) = held else {
            self.count = 0;
            return None;
        };
        self.count += 1;
        if self.count > self.every {
            self.count = 1;
            Some(dir)
        } else {
            None
        }
    }
}

// ── Meta keys ──

enum Meta {
    Quit,
    /// Input consumed (pause toggle, or paused).
    Handled,
    Pass,
}

fn handle_meta(world: &mut WorldState, kb: &InputState, gp: &GamepadState) -> Meta {
    let cancel = kb.any_pressed(&[KeyCode::Esc]) || gp.cancel_pressed();

    // F1: Pause / Resume
    if kb.any_pressed(&[KeyCode::F(1)]) {
        world.paused = !world.paused;
        if world.paused {
            world.set_message("PAUSED  [F1] Resume", 0);
        } else {
            world.message.clear();
            world.message_ms = 0;
        }
        info!("paused: {}", world.paused);
        return Meta::Handled;
    }

    if world.paused {
        return if cancel { Meta::Quit } else { Meta::Handled };
    }

    let can_quit = match world.scene() {
        Scene::Welcome => true,
        Scene::Finale => accepted(world),
        _ => false,
    };
    if can_quit && (kb.any_pressed(KEYS_QUIT) || cancel) {
        return Meta::Quit;
    }
    Meta::Pass
}

// ── Commands ──

fn collect_commands(
    world: &WorldState,
    kb: &InputState,
    gp: &GamepadState,
    out: &mut Vec<Command>,
    repeat: &mut PointerRepeat,
) {
    if world.wants_text() {
        for &c in kb.typed() {
            out.push(Command::Type(c));
        }
        for _ in 0..kb.press_count(KeyCode::Backspace) {
            out.push(Command::Erase);
        }
        if kb.was_pressed(KeyCode::Enter) || gp.confirm_pressed() {
            out.push(Command::Submit);
        }
        for (code, dir) in TEXT_MODE_ARROWS {
            if kb.was_pressed(code) {
                out.push(Command::Move(dir));
            }
        }
    } else {
        for (keys, dir) in DIRECTIONS {
            if kb.any_pressed(keys) || gp.dir_pressed(dir) {
                out.push(Command::Move(dir));
                repeat.reset();
            }
        }
        if kb.any_pressed(KEYS_CONFIRM) || gp.confirm_pressed() {
            out.push(Command::Activate);
        }
        if kb.any_pressed(KEYS_RESTART) {
            out.push(Command::Restart);
        }
    }

    if kb.any_pressed(&[KeyCode::F(2)]) || gp.restart_pressed() {
        out.push(Command::Restart);
    }
}
