/// Core state: level indices, the progress store, scene routing, the finale.
/// No terminal, timing or input code lives here.

pub mod assets;
pub mod finale;
pub mod geometry;
pub mod level;
pub mod progress;
pub mod scene;
