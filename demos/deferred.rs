//! Deferred-shading demo scene: a lit cube grid over a wooden floor with
//! orbiting sunlight, four colored point lights, bloom and a skybox.
//!
//! Controls: `WASD` move, mouse looks, scroll zooms, `F11` cycles the
//! G-buffer debug overlay, `F5` turns it off, `Esc` quits.

use glimmer::app::{AppDesc, run};

fn main() -> glimmer::Result<()> {
    env_logger::init();
    run(AppDesc {
        title: "glimmer deferred".to_string(),
        ..AppDesc::default()
    })
}
