//! Asteroid bodies: the registry that owns per-body state, and the rebuild
//! system that tears down and respawns them when the operator controls change.

use std::collections::HashMap;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::Catalog;
use crate::interaction::{Selection, SelectionChanged};
use crate::placement::{self, BodyPlan, Tier};
use crate::scene::rings::{self, OrbitRing};
use crate::scene::SceneControls;

const SPHERE_SECTORS: u32 = 24;
const SPHERE_STACKS: u32 = 16;

/// Marker on asteroid entities. The state lives in `BodyRegistry`.
#[derive(Component, Debug)]
pub struct AsteroidBody {
    pub id: String,
}

/// Mutable per-body state, keyed by record id in `BodyRegistry`.
#[derive(Clone, Debug)]
pub struct BodyState {
    pub id: String,
    /// Index of the source record in the catalog.
    pub record_index: usize,
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub tier: Tier,
    pub radius: f32,
    pub angle: f32,
    pub height: f32,
    pub orbit_speed: f32,
    pub spin_speed: f32,
    pub spin: f32,
    pub position: Vec3,
    /// Visual radius of the mesh at scale 1.
    pub size: f32,
    pub base_color: Color,
    pub base_emissive: LinearRgba,
    pub glows: bool,
    pub scale: f32,
    pub emissive_intensity: f32,
    pub press_timer: f32,
    // Captured once at creation; hover reset restores these.
    base_scale: f32,
    base_intensity: f32,
}

impl BodyState {
    pub fn from_plan(
        plan: &BodyPlan,
        entity: Entity,
        mesh: Handle<Mesh>,
        material: Handle<StandardMaterial>,
    ) -> Self {
        Self {
            id: plan.id.clone(),
            record_index: plan.record_index,
            entity,
            mesh,
            material,
            tier: plan.tier,
            radius: plan.radius,
            angle: plan.angle,
            height: plan.height,
            orbit_speed: plan.orbit_speed,
            spin_speed: plan.spin_speed,
            spin: 0.0,
            position: plan.position(),
            size: plan.size,
            base_color: plan.palette.color,
            base_emissive: plan.palette.emissive,
            glows: plan.glows,
            scale: 1.0,
            emissive_intensity: 1.0,
            press_timer: 0.0,
            base_scale: 1.0,
            base_intensity: 1.0,
        }
    }

    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    pub fn base_intensity(&self) -> f32 {
        self.base_intensity
    }

    pub fn reset_appearance(&mut self) {
        self.scale = self.base_scale;
        self.emissive_intensity = self.base_intensity;
    }

    /// Radius used for hit testing, following the current scale.
    pub fn pick_radius(&self) -> f32 {
        self.size * self.scale.max(self.base_scale)
    }

    pub fn emissive(&self) -> LinearRgba {
        self.base_emissive * self.emissive_intensity
    }

    pub fn transform(&self) -> Transform {
        let press = if self.press_timer > 0.0 { 0.8 } else { 1.0 };
        Transform::from_translation(self.position)
            .with_rotation(Quat::from_rotation_y(self.spin))
            .with_scale(Vec3::splat(self.scale * press))
    }
}

/// Owns every spawned body and orbit ring, plus the settings they were built
/// from.
#[derive(Resource, Default)]
pub struct BodyRegistry {
    bodies: HashMap<String, BodyState>,
    /// Record ids in catalog order.
    order: Vec<String>,
    rings: Vec<OrbitRing>,
    built_with: Option<(usize, bool)>,
}

impl BodyRegistry {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&BodyState> {
        self.bodies.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut BodyState> {
        self.bodies.get_mut(id)
    }

    /// Bodies in catalog order.
    pub fn bodies(&self) -> impl Iterator<Item = &BodyState> {
        self.order.iter().filter_map(|id| self.bodies.get(id))
    }

    pub fn bodies_mut(&mut self) -> impl Iterator<Item = &mut BodyState> {
        self.bodies.values_mut()
    }

    pub fn rings(&self) -> &[OrbitRing] {
        &self.rings
    }

    pub fn insert(&mut self, body: BodyState) {
        self.order.push(body.id.clone());
        self.bodies.insert(body.id.clone(), body);
    }

    /// Whether the registry needs rebuilding for these controls.
    pub fn is_stale(&self, visible_count: usize, show_orbits: bool) -> bool {
        self.built_with != Some((visible_count, show_orbits))
    }

    /// Despawns every body and ring and releases their mesh and material
    /// assets.
    pub fn teardown(
        &mut self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) {
        for body in self.bodies.values() {
            commands.entity(body.entity).despawn_recursive();
            meshes.remove(&body.mesh);
            materials.remove(&body.material);
        }
        for ring in self.rings.drain(..) {
            ring.teardown(commands, meshes, materials);
        }
        self.bodies.clear();
        self.order.clear();
        self.built_with = None;
    }
}

/// Seeded RNG for radius and height jitter.
#[derive(Resource)]
pub struct LayoutRng(pub StdRng);

impl LayoutRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Spawns one body entity from a plan and returns its registry state.
pub fn spawn_body(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    plan: &BodyPlan,
) -> BodyState {
    let mesh = meshes.add(
        Sphere::new(plan.size)
            .mesh()
            .uv(SPHERE_SECTORS, SPHERE_STACKS),
    );
    let material = materials.add(StandardMaterial {
        base_color: plan.palette.color,
        emissive: plan.palette.emissive,
        perceptual_roughness: 0.8,
        ..default()
    });

    let entity = commands
        .spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(plan.position()),
            Visibility::Visible,
            AsteroidBody {
                id: plan.id.clone(),
            },
            Name::new(format!("asteroid {}", plan.id)),
        ))
        .id();

    BodyState::from_plan(plan, entity, mesh, material)
}

/// Rebuilds bodies and rings when the visible count or orbit toggle changes.
#[allow(clippy::too_many_arguments)]
pub fn rebuild_bodies_system(
    mut commands: Commands,
    controls: Res<SceneControls>,
    catalog: Res<Catalog>,
    mut rng: ResMut<LayoutRng>,
    mut registry: ResMut<BodyRegistry>,
    mut selection: ResMut<Selection>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut changed: EventWriter<SelectionChanged>,
) {
    let count = catalog.clamp_count(controls.visible_count);
    if !registry.is_stale(count, controls.show_orbits) {
        return;
    }

    registry.teardown(&mut commands, &mut meshes, &mut materials);

    let records = catalog.visible(count);
    let plans = placement::plan_bodies(records, &mut rng.0);
    for plan in &plans {
        let body = spawn_body(&mut commands, &mut meshes, &mut materials, plan);
        registry.insert(body);
    }

    let tiers = placement::tiers_present(&plans);
    if controls.show_orbits {
        for tier in &tiers {
            let ring = rings::spawn_ring(&mut commands, &mut meshes, &mut materials, *tier);
            registry.rings.push(ring);
        }
    }
    registry.built_with = Some((count, controls.show_orbits));

    info!(
        "built {} bodies across {} tiers (orbits {})",
        registry.len(),
        tiers.len(),
        if controls.show_orbits { "on" } else { "off" }
    );

    selection.hovered = None;
    if let Some(selected) = selection.selected.clone() {
        if registry.get(&selected).is_none() {
            selection.selected = None;
        }
        // The overlay referenced the old body position; respawn or remove it.
        changed.send(SelectionChanged {
            selected: selection.selected.clone(),
        });
    }
}

/// Writes registry state to transforms and materials.
pub fn sync_body_visuals_system(
    registry: Res<BodyRegistry>,
    mut transforms: Query<&mut Transform, With<AsteroidBody>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for body in registry.bodies() {
        if let Ok(mut transform) = transforms.get_mut(body.entity) {
            *transform = body.transform();
        }
        // `get_mut` flags the asset for re-upload; only touch it on change.
        let emissive = body.emissive();
        let stale = materials
            .get(&body.material)
            .is_some_and(|material| material.emissive != emissive);
        if stale {
            if let Some(material) = materials.get_mut(&body.material) {
                material.emissive = emissive;
            }
        }
    }
}
