//! Background starfield: a colored point cloud whose opacity twinkles.

use bevy::color::Alpha;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use rand::Rng;

use crate::animation::CurrentFrame;

const FIELD_EXTENT: f32 = 2000.0;
const BASE_OPACITY: f32 = 0.8;
const TWINKLE_AMPLITUDE: f32 = 0.2;

/// Holds the starfield material so the twinkle system can reach it.
#[derive(Component)]
pub struct Starfield {
    material: Handle<StandardMaterial>,
}

/// Star color by spectral draw: mostly white, then blue, yellow, red.
pub fn star_color(draw: f32) -> [f32; 4] {
    if draw < 0.7 {
        [1.0, 1.0, 1.0, 1.0]
    } else if draw < 0.85 {
        [0.7, 0.8, 1.0, 1.0]
    } else if draw < 0.95 {
        [1.0, 1.0, 0.7, 1.0]
    } else {
        [1.0, 0.7, 0.7, 1.0]
    }
}

pub fn starfield_mesh(count: usize, rng: &mut impl Rng) -> Mesh {
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        positions.push([
            rng.gen_range(-FIELD_EXTENT..FIELD_EXTENT),
            rng.gen_range(-FIELD_EXTENT..FIELD_EXTENT),
            rng.gen_range(-FIELD_EXTENT..FIELD_EXTENT),
        ]);
        colors.push(star_color(rng.gen::<f32>()));
    }

    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
}

pub fn twinkle_opacity(elapsed: f32) -> f32 {
    BASE_OPACITY + (elapsed * 0.5).sin() * TWINKLE_AMPLITUDE
}

pub fn spawn_starfield(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    count: usize,
    rng: &mut impl Rng,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, BASE_OPACITY),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(starfield_mesh(count, rng))),
        MeshMaterial3d(material.clone()),
        Transform::IDENTITY,
        Starfield { material },
        Name::new("Starfield"),
    ));
    debug!("starfield with {count} stars");
}

pub fn twinkle_system(
    frame: Res<CurrentFrame>,
    stars: Query<&Starfield>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let opacity = twinkle_opacity(frame.0.elapsed);
    for starfield in &stars {
        if let Some(material) = materials.get_mut(&starfield.material) {
            material.base_color.set_alpha(opacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn mesh_has_one_vertex_per_star() {
        let mesh = starfield_mesh(500, &mut StdRng::seed_from_u64(9));
        assert_eq!(mesh.count_vertices(), 500);
    }

    #[test]
    fn twinkle_stays_within_bounds() {
        for i in 0..1000 {
            let opacity = twinkle_opacity(i as f32 * 0.1);
            assert!((0.6..=1.0).contains(&opacity));
        }
    }

    #[test]
    fn star_colors_follow_draw_buckets() {
        assert_eq!(star_color(0.1), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(star_color(0.8), [0.7, 0.8, 1.0, 1.0]);
        assert_eq!(star_color(0.9), [1.0, 1.0, 0.7, 1.0]);
        assert_eq!(star_color(0.99), [1.0, 0.7, 0.7, 1.0]);
    }
}
