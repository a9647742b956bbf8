//! Flat orbit-path rings, one per tier present in the visible set.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::placement::Tier;

const RING_HALF_WIDTH: f32 = 0.08;
const RING_RESOLUTION: u32 = 96;

#[derive(Component, Debug)]
pub struct OrbitRingMarker {
    pub tier: Tier,
}

/// A spawned ring and the assets it owns.
#[derive(Debug)]
pub struct OrbitRing {
    pub tier: Tier,
    pub entity: Entity,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

impl OrbitRing {
    pub fn teardown(
        self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) {
        commands.entity(self.entity).despawn_recursive();
        meshes.remove(&self.mesh);
        materials.remove(&self.material);
    }
}

pub fn spawn_ring(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    tier: Tier,
) -> OrbitRing {
    let radius = tier.base_radius();
    let mesh = meshes.add(
        Annulus::new(radius - RING_HALF_WIDTH, radius + RING_HALF_WIDTH)
            .mesh()
            .resolution(RING_RESOLUTION),
    );
    let material = materials.add(StandardMaterial {
        base_color: tier.ring_color(),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    // Annulus meshes lie in the XY plane; lay them flat in XZ.
    let entity = commands
        .spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            Visibility::Visible,
            OrbitRingMarker { tier },
            Name::new(format!("{} orbit ring", tier.label())),
        ))
        .id();

    OrbitRing {
        tier,
        entity,
        mesh,
        material,
    }
}
