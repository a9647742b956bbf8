//! Scene construction and per-frame scene systems.

pub(crate) mod bodies;
pub(crate) mod earth;
pub(crate) mod rings;
pub(crate) mod starfield;
pub(crate) mod textures;
pub(crate) mod trajectory;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::{animate_bodies_system, tick_clock_system, CurrentFrame, SceneClock};
use crate::camera::OrbitCamera;
use crate::catalog::Catalog;
use crate::config::SceneConfig;

pub use bodies::{
    rebuild_bodies_system, sync_body_visuals_system, AsteroidBody, BodyRegistry, BodyState,
    LayoutRng,
};
pub use earth::{Earth, EARTH_RADIUS};
pub use rings::OrbitRingMarker;
pub use trajectory::{
    sync_overlay_system, trajectory_paths, trajectory_plugin, ImpactMarker, OverlayState,
    TrajectoryOverlay, TrajectoryPath,
};

/// Frame ordering: a rebuild never races input or a stale animation step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneSet {
    Rebuild,
    Input,
    /// Pointer tracking and picking. Runs first within `Input`.
    Pointer,
    Animate,
}

/// Operator inputs to the scene. The HUD writes these; the scene reads them.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SceneControls {
    pub visible_count: usize,
    pub show_orbits: bool,
    pub animation_speed: f32,
}

impl SceneControls {
    pub fn from_config(config: &SceneConfig, catalog: &Catalog) -> Self {
        Self {
            visible_count: catalog.clamp_count(config.visible_count.unwrap_or(catalog.len())),
            show_orbits: config.show_orbits,
            animation_speed: config.animation_speed,
        }
    }
}

pub(crate) fn configure_scene_sets(app: &mut App) -> &mut App {
    app.configure_sets(
        Update,
        (SceneSet::Rebuild, SceneSet::Input, SceneSet::Animate).chain(),
    )
    .configure_sets(Update, SceneSet::Pointer.in_set(SceneSet::Input))
}

pub fn scene_plugin(app: &mut App) {
    configure_scene_sets(app)
        .init_resource::<BodyRegistry>()
        .init_resource::<SceneClock>()
        .init_resource::<CurrentFrame>()
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            bodies::rebuild_bodies_system.in_set(SceneSet::Rebuild),
        )
        .add_systems(
            Update,
            (
                tick_clock_system,
                (
                    earth::rotate_earth_system,
                    animate_bodies_system,
                    starfield::twinkle_system,
                ),
                bodies::sync_body_visuals_system,
            )
                .chain()
                .in_set(SceneSet::Animate),
        );
}

/// Builds the static environment: camera, lights, starfield and Earth.
pub fn setup_scene(
    mut commands: Commands,
    config: Res<SceneConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let mut rng = StdRng::seed_from_u64(config.layout_seed);

    let orbit = OrbitCamera::default();
    commands.spawn((Camera3d::default(), orbit.transform(), orbit));

    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            ..default()
        },
        Transform::from_xyz(10.0, 0.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Sun"),
    ));
    // Sky/ground fill in place of a hemisphere light.
    commands.spawn((
        DirectionalLight {
            color: Color::srgb(0.35, 0.45, 0.8),
            illuminance: 1_500.0,
            ..default()
        },
        Transform::from_xyz(0.0, -10.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
        Name::new("Fill"),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.25, 0.25, 0.25),
        brightness: 300.0,
    });

    starfield::spawn_starfield(
        &mut commands,
        &mut meshes,
        &mut materials,
        config.star_count,
        &mut rng,
    );
    earth::spawn_earth(&mut commands, &mut meshes, &mut materials, &mut images, &mut rng);

    info!("scene ready ({} stars)", config.star_count);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_scene_spawns_camera_lights_and_earth() {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .insert_resource(SceneConfig {
                star_count: 100,
                ..SceneConfig::default()
            })
            .add_systems(Startup, setup_scene);

        app.update();

        assert!(app.world().get_resource::<AmbientLight>().is_some());

        let world = app.world_mut();
        assert_eq!(world.query::<&Camera3d>().iter(world).count(), 1);
        assert_eq!(world.query::<&OrbitCamera>().iter(world).count(), 1);
        assert!(world.query::<&DirectionalLight>().iter(world).count() >= 1);
        assert_eq!(world.query::<&Earth>().iter(world).count(), 1);
    }

    #[test]
    fn controls_clamp_configured_count() {
        let catalog = Catalog::builtin();
        let config = SceneConfig {
            visible_count: Some(40),
            ..SceneConfig::default()
        };

        assert_eq!(SceneControls::from_config(&config, &catalog).visible_count, 6);
        assert_eq!(
            SceneControls::from_config(&SceneConfig::default(), &catalog).visible_count,
            6
        );
    }
}
