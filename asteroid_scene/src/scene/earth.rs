//! Earth: textured sphere at the origin, rotating unless a body is selected.

use bevy::prelude::*;
use rand::Rng;

use crate::animation::{earth_rotation_step, CurrentFrame};
use crate::scene::textures;

pub const EARTH_RADIUS: f32 = 3.0;
const ATMOSPHERE_RADIUS: f32 = 3.12;

#[derive(Component)]
pub struct Earth;

pub fn spawn_earth(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
    rng: &mut impl Rng,
) -> Entity {
    let mask = textures::land_mask(rng);
    let surface = images.add(textures::surface_image(&mask));
    let roughness = images.add(textures::roughness_image(&mask));

    let earth = commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(EARTH_RADIUS).mesh().uv(64, 32))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(surface),
                metallic_roughness_texture: Some(roughness),
                metallic: 0.0,
                perceptual_roughness: 1.0,
                ..default()
            })),
            Transform::IDENTITY,
            Earth,
            Name::new("Earth"),
        ))
        .id();

    commands.entity(earth).with_children(|parent| {
        parent.spawn((
            Mesh3d(meshes.add(Sphere::new(ATMOSPHERE_RADIUS).mesh().uv(48, 24))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(0.4, 0.65, 1.0, 0.12),
                emissive: LinearRgba::rgb(0.05, 0.1, 0.25),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            })),
            Transform::IDENTITY,
            Name::new("Atmosphere"),
        ));
    });

    earth
}

pub fn rotate_earth_system(frame: Res<CurrentFrame>, mut earth: Query<&mut Transform, With<Earth>>) {
    let step = earth_rotation_step(&frame.0);
    if step == 0.0 {
        return;
    }
    for mut transform in &mut earth {
        transform.rotate_y(step);
    }
}
