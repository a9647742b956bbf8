//! Per-frame animation: orbital motion, self-rotation and glow.
//!
//! The step is a function of (state, dt, elapsed, paused). Pausing only stops
//! motion; glow, twinkle and camera damping keep running.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::interaction::Selection;
use crate::placement::orbit_position;
use crate::scene::bodies::{BodyRegistry, BodyState};
use crate::scene::SceneControls;

/// Earth rotation in rad/s at 1x speed.
pub const EARTH_ROTATION_SPEED: f32 = 0.3;

const HOVER_SCALE: f32 = 1.3;
const HOVER_INTENSITY: f32 = 2.5;
const DECAY: f32 = 0.1;

/// Monotonic scene clock. Never paused.
#[derive(Resource, Default, Debug)]
pub struct SceneClock {
    pub elapsed: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    pub dt: f32,
    pub elapsed: f32,
    pub speed: f32,
    pub paused: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GlowMode {
    Selected,
    Hovered,
    /// Continuous low-amplitude glow, offset by `phase` so bodies don't pulse
    /// in lockstep.
    Pulsing { phase: f32 },
    Resting,
}

/// Earth rotation for this frame. Zero while paused.
pub fn earth_rotation_step(input: &FrameInput) -> f32 {
    if input.paused {
        0.0
    } else {
        EARTH_ROTATION_SPEED * input.speed * input.dt
    }
}

/// Advances orbit angle and spin, then recomputes the position. `y` stays at
/// the orbit height.
pub fn advance_body(body: &mut BodyState, dt: f32, speed: f32) {
    body.angle = (body.angle + body.orbit_speed * speed * dt).rem_euclid(TAU);
    body.spin = (body.spin + body.spin_speed * speed * dt).rem_euclid(TAU);
    body.position = orbit_position(body.radius, body.angle, body.height);
}

pub fn glow_mode(body: &BodyState, index: usize, selection: &Selection) -> GlowMode {
    if selection.is_selected(&body.id) {
        GlowMode::Selected
    } else if selection.is_hovered(&body.id) {
        GlowMode::Hovered
    } else if body.glows {
        GlowMode::Pulsing {
            phase: index as f32,
        }
    } else {
        GlowMode::Resting
    }
}

pub fn apply_glow(body: &mut BodyState, mode: GlowMode, elapsed: f32) {
    match mode {
        GlowMode::Selected => {
            let wave = (elapsed * 2.0).sin();
            body.scale = body.base_scale() * (1.0 + 0.25 * wave);
            body.emissive_intensity = 2.0 + 1.5 * wave;
        }
        GlowMode::Hovered => {
            body.scale = body.base_scale() * HOVER_SCALE;
            body.emissive_intensity = HOVER_INTENSITY;
        }
        GlowMode::Pulsing { phase } => {
            body.scale += (body.base_scale() - body.scale) * DECAY;
            body.emissive_intensity = 0.5 + 0.3 * (elapsed * 2.0 + phase).sin();
        }
        GlowMode::Resting => {
            body.scale += (body.base_scale() - body.scale) * DECAY;
            body.emissive_intensity += (body.base_intensity() - body.emissive_intensity) * DECAY;
        }
    }
}

/// One frame for every body in the registry.
pub fn step_bodies(registry: &mut BodyRegistry, selection: &Selection, input: &FrameInput) {
    let ids: Vec<String> = registry.bodies().map(|b| b.id.clone()).collect();
    for (index, id) in ids.iter().enumerate() {
        let Some(body) = registry.get_mut(id) else {
            continue;
        };
        if !input.paused {
            advance_body(body, input.dt, input.speed);
        }
        body.press_timer = (body.press_timer - input.dt).max(0.0);
        let mode = glow_mode(body, index, selection);
        apply_glow(body, mode, input.elapsed);
    }
}

/// Builds the frame input from the clock and the current selection.
pub fn frame_input(
    time: &Time,
    clock: &mut SceneClock,
    controls: &SceneControls,
    selection: &Selection,
) -> FrameInput {
    let dt = time.delta_secs();
    clock.elapsed += dt;
    FrameInput {
        dt,
        elapsed: clock.elapsed,
        speed: controls.animation_speed,
        paused: selection.paused(),
    }
}

/// The current frame's input, shared by the Earth, body and overlay systems.
#[derive(Resource, Debug)]
pub struct CurrentFrame(pub FrameInput);

impl Default for CurrentFrame {
    fn default() -> Self {
        Self(FrameInput {
            dt: 0.0,
            elapsed: 0.0,
            speed: 1.0,
            paused: false,
        })
    }
}

pub fn tick_clock_system(
    time: Res<Time>,
    mut clock: ResMut<SceneClock>,
    controls: Res<SceneControls>,
    selection: Res<Selection>,
    mut frame: ResMut<CurrentFrame>,
) {
    frame.0 = frame_input(&time, &mut clock, &controls, &selection);
}

pub fn animate_bodies_system(
    frame: Res<CurrentFrame>,
    selection: Res<Selection>,
    mut registry: ResMut<BodyRegistry>,
) {
    step_bodies(&mut registry, &selection, &frame.0);
}
