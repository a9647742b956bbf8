//! Trajectory overlay: curves from the selected body to the surface points of
//! its risk zones, each ending in a pulsing impact marker.

use bevy::color::Alpha;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

use crate::animation::CurrentFrame;
use crate::catalog::{Catalog, CelestialBodyRecord};
use crate::geo;
use crate::interaction::SelectionChanged;
use crate::scene::bodies::{BodyRegistry, BodyState};
use crate::scene::earth::{Earth, EARTH_RADIUS};

/// Height of the curve's control point above the chord midpoint.
pub const TRAJECTORY_LIFT: f32 = 4.0;
const CURVE_SEGMENTS: usize = 48;
const MARKER_RADIUS: f32 = 0.15;
/// Lift markers slightly off the surface so they don't z-fight the Earth.
const SURFACE_OFFSET: f32 = 1.01;

/// Root of the overlay group. At most one exists.
#[derive(Component, Debug)]
pub struct TrajectoryOverlay {
    pub body_id: String,
}

#[derive(Component, Debug)]
pub struct ImpactMarker {
    phase: f32,
}

/// Tracks the live overlay and the assets it owns.
#[derive(Resource, Default)]
pub struct OverlayState {
    root: Option<Entity>,
    meshes: Vec<Handle<Mesh>>,
    materials: Vec<Handle<StandardMaterial>>,
}

impl OverlayState {
    pub fn root(&self) -> Option<Entity> {
        self.root
    }

    pub fn teardown(
        &mut self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) {
        if let Some(root) = self.root.take() {
            commands.entity(root).despawn_recursive();
        }
        for mesh in self.meshes.drain(..) {
            meshes.remove(&mesh);
        }
        for material in self.materials.drain(..) {
            materials.remove(&material);
        }
    }
}

/// One curve of the overlay, in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryPath {
    pub zone: String,
    pub points: Vec<Vec3>,
    pub impact: Vec3,
}

fn quadratic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    u * u * p0 + 2.0 * u * t * p1 + t * t * p2
}

/// Control point: chord midpoint pushed outward from the Earth's centre.
fn raised_midpoint(from: Vec3, to: Vec3) -> Vec3 {
    let mid = (from + to) / 2.0;
    let outward = mid.try_normalize().unwrap_or(Vec3::Y);
    mid + outward * TRAJECTORY_LIFT
}

/// Curves for every risk zone with a known coordinate. Zones without one are
/// skipped. `earth_rotation` maps Earth-local points to world space.
pub fn trajectory_paths(
    from: Vec3,
    record: &CelestialBodyRecord,
    earth_rotation: Quat,
) -> Vec<TrajectoryPath> {
    record
        .impact
        .risk_zones
        .iter()
        .filter_map(|zone| {
            let coord = geo::zone_coordinate(zone)?;
            let impact = earth_rotation * geo::surface_point(coord, EARTH_RADIUS * SURFACE_OFFSET);
            let control = raised_midpoint(from, impact);
            let points = (0..=CURVE_SEGMENTS)
                .map(|s| quadratic_bezier(from, control, impact, s as f32 / CURVE_SEGMENTS as f32))
                .collect();
            Some(TrajectoryPath {
                zone: zone.clone(),
                points,
                impact,
            })
        })
        .collect()
}

fn line_mesh(points: &[Vec3]) -> Mesh {
    let positions: Vec<[f32; 3]> = points.iter().map(|p| p.to_array()).collect();
    Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

/// Spawns the overlay group for `body`. Replaces nothing; callers tear down
/// the previous overlay first.
pub fn spawn_overlay(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    state: &mut OverlayState,
    body: &BodyState,
    record: &CelestialBodyRecord,
    earth_rotation: Quat,
) -> usize {
    let paths = trajectory_paths(body.position, record, earth_rotation);

    let line_material = materials.add(StandardMaterial {
        base_color: body.base_color.with_alpha(0.85),
        emissive: body.base_emissive * 2.0,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    let marker_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.25, 0.1),
        emissive: LinearRgba::rgb(2.0, 0.4, 0.1),
        unlit: true,
        ..default()
    });
    let marker_mesh = meshes.add(Sphere::new(MARKER_RADIUS).mesh().uv(16, 12));
    state.materials.push(line_material.clone());
    state.materials.push(marker_material.clone());
    state.meshes.push(marker_mesh.clone());

    let mut line_meshes = Vec::with_capacity(paths.len());
    for path in &paths {
        line_meshes.push(meshes.add(line_mesh(&path.points)));
    }
    state.meshes.extend(line_meshes.iter().cloned());

    let root = commands
        .spawn((
            Transform::IDENTITY,
            Visibility::Visible,
            TrajectoryOverlay {
                body_id: body.id.clone(),
            },
            Name::new(format!("trajectory {}", body.id)),
        ))
        .with_children(|parent| {
            for (index, (path, mesh)) in paths.iter().zip(line_meshes).enumerate() {
                parent.spawn((
                    Mesh3d(mesh),
                    MeshMaterial3d(line_material.clone()),
                    Transform::IDENTITY,
                ));
                parent.spawn((
                    Mesh3d(marker_mesh.clone()),
                    MeshMaterial3d(marker_material.clone()),
                    Transform::from_translation(path.impact),
                    ImpactMarker {
                        phase: index as f32,
                    },
                    Name::new(format!("impact {}", path.zone)),
                ));
            }
        })
        .id();
    state.root = Some(root);

    paths.len()
}

pub fn trajectory_plugin(app: &mut App) {
    app.init_resource::<OverlayState>().add_systems(
        Update,
        (sync_overlay_system, pulse_markers_system)
            .chain()
            .in_set(crate::scene::SceneSet::Animate),
    );
}

/// Keeps the overlay in step with the selection: torn down on every change,
/// respawned when something is selected.
#[allow(clippy::too_many_arguments)]
pub fn sync_overlay_system(
    mut commands: Commands,
    mut changes: EventReader<SelectionChanged>,
    catalog: Res<Catalog>,
    registry: Res<BodyRegistry>,
    earth: Query<&Transform, With<Earth>>,
    mut state: ResMut<OverlayState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(latest) = changes.read().last() else {
        return;
    };

    state.teardown(&mut commands, &mut meshes, &mut materials);

    let Some(id) = &latest.selected else {
        return;
    };
    let Some(body) = registry.get(id) else {
        return;
    };
    let Some(record) = catalog.get(body.record_index) else {
        return;
    };
    let earth_rotation = earth
        .get_single()
        .map(|t| t.rotation)
        .unwrap_or(Quat::IDENTITY);

    let drawn = spawn_overlay(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut state,
        body,
        record,
        earth_rotation,
    );
    debug!(
        "trajectory overlay for {}: {drawn} of {} zones located",
        record.name,
        record.impact.risk_zones.len()
    );
}

pub fn pulse_markers_system(
    frame: Res<CurrentFrame>,
    mut markers: Query<(&ImpactMarker, &mut Transform)>,
) {
    for (marker, mut transform) in &mut markers {
        let pulse = 1.0 + 0.4 * (frame.0.elapsed * 4.0 + marker.phase).sin();
        transform.scale = Vec3::splat(pulse);
    }
}
