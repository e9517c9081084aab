/// Terminal front end: input devices, sound and the renderer.

pub mod gamepad;
pub mod input;
pub mod renderer;
pub mod sound;
