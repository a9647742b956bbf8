//! Orbit camera around the Earth: drag to rotate, wheel to zoom, with damping.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::ecs::schedule::SystemConfigs;
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::interaction::PointerTracker;
use crate::scene::SceneSet;

const ROTATE_SENSITIVITY: f32 = 0.005;
const ZOOM_STEP: f32 = 0.1;
const PIXELS_PER_LINE: f32 = 40.0;
const MIN_RADIUS: f32 = 6.0;
const MAX_RADIUS: f32 = 120.0;
const ELEVATION_LIMIT: f32 = FRAC_PI_2 - 0.1;
/// Fraction of the remaining distance to the target covered per 1/60 s.
const DAMPING: f32 = 0.15;

/// Spherical camera rig. `azimuth`/`elevation`/`radius` chase their targets.
#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub radius: f32,
    pub azimuth: f32,
    pub elevation: f32,
    target_radius: f32,
    target_azimuth: f32,
    target_elevation: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        // Starts at (25, 10, 25) looking at the origin.
        let radius = (25.0f32 * 25.0 * 2.0 + 10.0 * 10.0).sqrt();
        let elevation = (10.0 / radius).asin();
        Self::new(Vec3::ZERO, radius, FRAC_PI_4, elevation)
    }
}

impl OrbitCamera {
    pub fn new(focus: Vec3, radius: f32, azimuth: f32, elevation: f32) -> Self {
        let radius = radius.clamp(MIN_RADIUS, MAX_RADIUS);
        let elevation = elevation.clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
        Self {
            focus,
            radius,
            azimuth,
            elevation,
            target_radius: radius,
            target_azimuth: azimuth,
            target_elevation: elevation,
        }
    }

    /// Distance from the focus, shown in the HUD.
    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.target_azimuth -= delta.x * ROTATE_SENSITIVITY;
        self.target_elevation = (self.target_elevation + delta.y * ROTATE_SENSITIVITY)
            .clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
    }

    /// Positive `scroll` zooms in.
    pub fn zoom(&mut self, scroll: f32) {
        self.target_radius =
            (self.target_radius * (1.0 - scroll * ZOOM_STEP)).clamp(MIN_RADIUS, MAX_RADIUS);
    }

    /// Eases the current angles and radius toward the targets.
    pub fn damp(&mut self, dt: f32) {
        let t = 1.0 - (1.0 - DAMPING).powf(dt * 60.0);
        self.radius += (self.target_radius - self.radius) * t;
        self.azimuth += (self.target_azimuth - self.azimuth) * t;
        self.elevation += (self.target_elevation - self.elevation) * t;
    }

    pub fn transform(&self) -> Transform {
        let offset = Vec3::new(
            self.radius * self.elevation.cos() * self.azimuth.sin(),
            self.radius * self.elevation.sin(),
            self.radius * self.elevation.cos() * self.azimuth.cos(),
        );
        Transform::from_translation(self.focus + offset).looking_at(self.focus, Vec3::Y)
    }
}

pub fn orbit_camera_plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            after_pointer_update(orbit_camera_input_system),
            orbit_camera_damping_system.in_set(SceneSet::Animate),
        ),
    );
}

/// Camera input reads `PointerTracker`, so it must see this frame's press and
/// drag state rather than last frame's.
fn after_pointer_update<M>(systems: impl IntoSystemConfigs<M>) -> SystemConfigs {
    systems.in_set(SceneSet::Input).after(SceneSet::Pointer)
}

fn orbit_camera_input_system(
    tracker: Res<PointerTracker>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let pointer_over_ui = contexts.ctx_mut().is_pointer_over_area();
    let drag: Vec2 = motion.read().map(|ev| ev.delta).sum();
    let scroll: f32 = wheel
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_LINE,
        })
        .sum();

    let Ok(mut orbit) = cameras.get_single_mut() else {
        return;
    };
    if tracker.is_dragging() {
        orbit.rotate(drag);
    }
    if scroll != 0.0 && !pointer_over_ui {
        orbit.zoom(scroll);
    }
}

fn orbit_camera_damping_system(
    time: Res<Time>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    for (mut orbit, mut transform) in &mut cameras {
        orbit.damp(time.delta_secs());
        *transform = orbit.transform();
    }
}
