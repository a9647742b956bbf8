//! NeoWatch: near-Earth asteroid explorer. Runs the asteroid_scene app.

use asteroid_scene::prelude::*;

fn main() {
    let _ = dotenvy::dotenv();

    SceneBuilder::new()
        .config(SceneConfig::from_env())
        .build()
        .run();
}
