/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Mount sync (the scene may have changed since the last step)
///   2. Commands, in order; mounts re-sync after each one
///   3. Level clock (scheduled tasks that came due)
///   4. Mount sync again (a completion may have raised a reveal)
///   5. Message timer
///
/// While paused nothing but the mount sync runs, so every level timer is
/// frozen.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::event::GameEvent;
use super::world::WorldState;
use crate::domain::finale::{Finale, FinalePhase, FinalePress};
use crate::domain::geometry::MoveDir;
use crate::domain::level::LevelIndex;
use crate::domain::scene::{self, Scene};
use crate::games::{Action, Ctx, Stage, START_POINTER};

const FAIL_MESSAGE_MS: u64 = 3000;
const LEVEL_MESSAGE_MS: u64 = 2000;

/// One frame's worth of player intent, already stripped of device detail.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(MoveDir),
    /// Space / Enter / gamepad confirm.
    Activate,
    Type(char),
    Erase,
    Submit,
    Restart,
}

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState, commands: &[Command], dt_ms: u64) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();
    resync(world, &mut events);
    if world.paused {
        return events;
    }
    world.tick += 1;
    world.anim_tick = world.anim_tick.wrapping_add(1);

    for &cmd in commands {
        apply(world, cmd, &mut events);
        resync(world, &mut events);
    }

    if let Some(stage) = world.stage.as_mut() {
        let mut ctx = Ctx { sink: &mut world.progress, events: &mut events };
        stage.game_mut().advance(dt_ms, &mut ctx);
    }
    resync(world, &mut events);

    if world.message_ms > 0 {
        world.message_ms = world.message_ms.saturating_sub(dt_ms);
        if world.message_ms == 0 {
            world.message.clear();
        }
    }
    react(world, &events);

    events
}

// ══════════════════════════════════════════════════════════════
// Mounting
// ══════════════════════════════════════════════════════════════

/// Bring the mounted state in line with the routed scene.
///
/// Entering a level mounts fresh local state with its own generator;
/// leaving one tears it down first so none of its timers survive. The
/// finale lives exactly as long as its scene. Returns the scene just
/// entered, or `None` if nothing changed.
pub fn sync_mounts(world: &mut WorldState) -> Option<Scene> {
    let scene = world.scene();
    if world.mounted == Some(scene) {
        return None;
    }

    if let Some(mut stage) = world.stage.take() {
        stage.game_mut().teardown();
        debug!("tore down {:?}", stage.challenge());
    }

    match scene {
        Scene::Level(challenge) => {
            let rng = StdRng::seed_from_u64(world.rng.gen());
            world.stage = Some(Stage::mount(challenge, &world.tuning, rng));
            world.pointer = START_POINTER;
            info!("level {} mounted: {}", challenge.level(), challenge.title());
        }
        Scene::Finale => {
            if world.finale.is_none() {
                let rng = StdRng::seed_from_u64(world.rng.gen());
                world.finale = Some(Finale::new(rng));
                world.pointer = START_POINTER;
                info!("finale mounted");
            }
        }
        Scene::Welcome | Scene::Reveal(_) => {}
    }
    if scene != Scene::Finale {
        world.finale = None;
    }

    debug!("scene {:?} -> {:?}", world.mounted, scene);
    world.mounted = Some(scene);
    Some(scene)
}

fn resync(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if let Some(Scene::Level(challenge)) = sync_mounts(world) {
        events.push(GameEvent::LevelStarted { level: challenge.level() });
    }
}

// ══════════════════════════════════════════════════════════════
// Commands
// ══════════════════════════════════════════════════════════════

fn apply(world: &mut WorldState, cmd: Command, events: &mut Vec<GameEvent>) {
    match world.scene() {
        Scene::Welcome => {
            if cmd == Command::Activate || cmd == Command::Submit {
                world.progress.go_to_level(LevelIndex::FIRST);
            } else if let Command::Move(dir) = cmd {
                move_pointer(world, dir);
            }
        }
        Scene::Reveal(challenge) => {
            if cmd == Command::Activate || cmd == Command::Submit {
                scene::continue_from(challenge.level(), &mut world.progress);
            }
        }
        Scene::Level(_) => apply_level(world, cmd, events),
        Scene::Finale => apply_finale(world, cmd, events),
    }
}

/// Translate a command into the level's input vocabulary.
fn apply_level(world: &mut WorldState, cmd: Command, events: &mut Vec<GameEvent>) {
    let mut actions: Vec<Action> = Vec::with_capacity(2);
    match cmd {
        Command::Move(dir) => {
            actions.push(Action::Steer(dir));
            if move_pointer(world, dir) {
                actions.push(Action::Hover(world.pointer));
            }
        }
        Command::Activate => actions.push(Action::Press(world.pointer)),
        Command::Type(c) => actions.push(Action::Type(c)),
        Command::Erase => actions.push(Action::Erase),
        Command::Submit => actions.push(Action::Submit),
        Command::Restart => actions.push(Action::Restart),
    }

    let Some(stage) = world.stage.as_mut() else { return };
    let mut ctx = Ctx { sink: &mut world.progress, events };
    for action in actions {
        stage.game_mut().handle(action, &mut ctx);
    }
}

fn apply_finale(world: &mut WorldState, cmd: Command, events: &mut Vec<GameEvent>) {
    if let Command::Move(dir) = cmd {
        move_pointer(world, dir);
    }
    let pointer = world.pointer;
    let Some(finale) = world.finale.as_mut() else { return };

    match (finale.phase(), cmd) {
        (FinalePhase::Error, Command::Activate | Command::Submit) => {
            if finale.proceed() {
                events.push(GameEvent::FinaleQuestion);
            }
        }
        (FinalePhase::Question, Command::Move(_)) => {
            if finale.hover(pointer) {
                events.push(GameEvent::DeclineDodged { presses: finale.presses() });
            }
        }
        (FinalePhase::Question, Command::Activate) => match finale.press(pointer) {
            FinalePress::Accepted => {
                info!("finale accepted after {} decline attempt(s)", finale.presses());
                events.push(GameEvent::Accepted);
            }
            FinalePress::Dodged => {
                events.push(GameEvent::DeclineDodged { presses: finale.presses() });
            }
            FinalePress::Nothing => {}
        },
        _ => {}
    }
}

/// Returns whether the pointer actually moved.
fn move_pointer(world: &mut WorldState, dir: MoveDir) -> bool {
    let (dx, dy) = dir.delta();
    let next = world.pointer.offset_clamped(dx, dy);
    let moved = next != world.pointer;
    world.pointer = next;
    moved
}

// ══════════════════════════════════════════════════════════════
// Messages
// ══════════════════════════════════════════════════════════════

fn react(world: &mut WorldState, events: &[GameEvent]) {
    for ev in events {
        match ev {
            GameEvent::LevelStarted { level } => {
                let msg = format!("Level {}: {}", level, level.title().unwrap_or(""));
                world.set_message(&msg, LEVEL_MESSAGE_MS);
            }
            GameEvent::LevelFailed { level } => {
                info!("level {} failed", level);
                world.set_message("Press R to try again", FAIL_MESSAGE_MS);
            }
            GameEvent::LevelRestarted { level } => {
                debug!("level {} restarted", level);
                world.message.clear();
                world.message_ms = 0;
            }
            _ => {}
        }
    }
}
