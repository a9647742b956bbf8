//! Pointer handling: press/drag/click disambiguation, picking and selection.
//!
//! Picking uses a manual ray-sphere test against the body registry rather
//! than Bevy's mesh picking, so egui panels never swallow or duplicate input.

use std::time::Duration;

use bevy::input::mouse::MouseButton;
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::scene::bodies::{BodyRegistry, BodyState};

/// Cumulative pointer travel (px) past which a press becomes a drag.
pub const DRAG_THRESHOLD_PX: f32 = 5.0;
/// A release strictly within this window after the press is a click.
pub const CLICK_WINDOW: Duration = Duration::from_millis(300);
/// Duration of the scale-down feedback on a clicked body.
pub const PRESS_FEEDBACK_SECS: f32 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum PointerPhase {
    #[default]
    Idle,
    Pressed {
        at: Duration,
        origin: Vec2,
    },
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerRelease {
    Click,
    Drag,
    /// Released too late, or without a matching press.
    Ignored,
}

/// Press / drag / click state machine, one per pointer.
#[derive(Resource, Default, Debug)]
pub struct PointerTracker {
    phase: PointerPhase,
}

impl PointerTracker {
    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, PointerPhase::Dragging)
    }

    pub fn press(&mut self, now: Duration, position: Vec2) {
        self.phase = PointerPhase::Pressed {
            at: now,
            origin: position,
        };
    }

    /// Records pointer movement. Returns true once the press has become a drag.
    pub fn moved(&mut self, position: Vec2) -> bool {
        if let PointerPhase::Pressed { origin, .. } = self.phase {
            if origin.distance(position) > DRAG_THRESHOLD_PX {
                self.phase = PointerPhase::Dragging;
            }
        }
        self.is_dragging()
    }

    /// Ends the gesture and returns to `Idle`.
    pub fn release(&mut self, now: Duration) -> PointerRelease {
        let outcome = match self.phase {
            PointerPhase::Pressed { at, .. } if now.saturating_sub(at) < CLICK_WINDOW => {
                PointerRelease::Click
            }
            PointerPhase::Dragging => PointerRelease::Drag,
            _ => PointerRelease::Ignored,
        };
        self.phase = PointerPhase::Idle;
        outcome
    }
}

/// Current hover and selection, by record id. The two are independent.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct Selection {
    pub selected: Option<String>,
    pub hovered: Option<String>,
}

impl Selection {
    /// Orbital and rotational motion stop while anything is selected.
    pub fn paused(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    pub fn is_hovered(&self, id: &str) -> bool {
        self.hovered.as_deref() == Some(id)
    }
}

/// A click resolved against the scene. `target` is `None` on empty space.
#[derive(Event, Clone, Debug, PartialEq)]
pub struct BodyClicked {
    pub target: Option<String>,
}

/// Selection changed; carries the new selection.
#[derive(Event, Clone, Debug, PartialEq)]
pub struct SelectionChanged {
    pub selected: Option<String>,
}

/// Ray-sphere intersection. Returns the distance along the ray to the first
/// hit in front of the origin.
pub fn ray_sphere_intersect(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    let far = -b + sqrt_d;
    if far < 0.0 {
        None
    } else {
        Some(near.max(0.0))
    }
}

/// Nearest body hit by the ray, if any.
pub fn pick<'a>(
    origin: Vec3,
    dir: Vec3,
    bodies: impl IntoIterator<Item = &'a BodyState>,
) -> Option<&'a BodyState> {
    bodies
        .into_iter()
        .filter_map(|body| {
            ray_sphere_intersect(origin, dir, body.position, body.pick_radius())
                .map(|dist| (body, dist))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(body, _)| body)
}

pub fn interaction_plugin(app: &mut App) {
    app.init_resource::<PointerTracker>()
        .init_resource::<Selection>()
        .add_event::<BodyClicked>()
        .add_event::<SelectionChanged>()
        .add_systems(
            Update,
            (pointer_input_system, apply_clicks_system)
                .chain()
                .in_set(crate::scene::SceneSet::Pointer),
        );
}

#[allow(clippy::too_many_arguments)]
fn pointer_input_system(
    time: Res<Time<Real>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut contexts: EguiContexts,
    mut tracker: ResMut<PointerTracker>,
    mut selection: ResMut<Selection>,
    mut registry: ResMut<BodyRegistry>,
    mut clicks: EventWriter<BodyClicked>,
) {
    let pointer_over_ui = contexts.ctx_mut().is_pointer_over_area();
    let Ok(window) = windows.get_single() else {
        return;
    };
    let cursor = window.cursor_position();
    let now = time.elapsed();

    if mouse.just_pressed(MouseButton::Left) && !pointer_over_ui {
        if let Some(position) = cursor {
            tracker.press(now, position);
        }
    }

    if let Some(position) = cursor {
        tracker.moved(position);
    }

    let ray = cursor.and_then(|position| {
        let (camera, transform) = cameras.get_single().ok()?;
        camera.viewport_to_world(transform, position).ok()
    });
    let hit = ray
        .filter(|_| !pointer_over_ui)
        .and_then(|ray| pick(ray.origin, *ray.direction, registry.bodies()))
        .map(|body| body.id.clone());

    if !tracker.is_dragging() {
        update_hover(&mut selection, &mut registry, hit.clone());
    }

    if mouse.just_released(MouseButton::Left) {
        let release = tracker.release(now);
        if release == PointerRelease::Drag {
            debug!("drag released, selection unchanged");
        }
        if let Some(click) = click_event(release, hit) {
            clicks.send(click);
        }
    }
}

/// Only a click produces a selection event; a drag release never does,
/// whatever lies under the pointer.
pub fn click_event(release: PointerRelease, hit: Option<String>) -> Option<BodyClicked> {
    match release {
        PointerRelease::Click => Some(BodyClicked { target: hit }),
        PointerRelease::Drag | PointerRelease::Ignored => None,
    }
}

/// Moves hover to `hit`, restoring the previous hover body's base look.
pub fn update_hover(selection: &mut Selection, registry: &mut BodyRegistry, hit: Option<String>) {
    if selection.hovered == hit {
        return;
    }
    if let Some(previous) = selection.hovered.take() {
        if let Some(body) = registry.get_mut(&previous) {
            body.reset_appearance();
        }
    }
    selection.hovered = hit;
}

/// Applies resolved clicks: select on hit, clear on miss.
pub fn apply_clicks_system(
    mut clicks: EventReader<BodyClicked>,
    mut selection: ResMut<Selection>,
    mut registry: ResMut<BodyRegistry>,
    mut changed: EventWriter<SelectionChanged>,
) {
    for click in clicks.read() {
        match &click.target {
            Some(id) => {
                let Some(body) = registry.get_mut(id) else {
                    continue;
                };
                body.press_timer = PRESS_FEEDBACK_SECS;
                info!("selected {id}");
                selection.selected = Some(id.clone());
            }
            None => {
                if selection.selected.take().is_some() {
                    info!("selection cleared");
                }
            }
        }
        changed.send(SelectionChanged {
            selected: selection.selected.clone(),
        });
    }
}
