use std::io::Write;
use std::time::Duration;

use bevy::prelude::*;

use asteroid_scene::animation::{tick_clock_system, CurrentFrame, SceneClock};
use asteroid_scene::interaction::{
    apply_clicks_system, click_event, pick, BodyClicked, PointerRelease, PointerTracker,
    Selection, SelectionChanged,
};
use asteroid_scene::placement::{classify, Tier};
use asteroid_scene::prelude::*;
use asteroid_scene::scene::{
    rebuild_bodies_system, sync_overlay_system, LayoutRng, OverlayState, TrajectoryOverlay,
};

fn scene_app(catalog: Catalog, visible_count: usize, show_orbits: bool) -> App {
    let mut app = App::new();
    app.init_resource::<Assets<Mesh>>()
        .init_resource::<Assets<StandardMaterial>>()
        .init_resource::<BodyRegistry>()
        .init_resource::<Selection>()
        .init_resource::<OverlayState>()
        .init_resource::<SceneClock>()
        .init_resource::<CurrentFrame>()
        .insert_resource(Time::<()>::default())
        .add_event::<BodyClicked>()
        .add_event::<SelectionChanged>()
        .insert_resource(catalog)
        .insert_resource(LayoutRng::seeded(42))
        .insert_resource(SceneControls {
            visible_count,
            show_orbits,
            animation_speed: 1.0,
        })
        .add_systems(
            Update,
            (
                rebuild_bodies_system,
                apply_clicks_system,
                tick_clock_system,
                sync_overlay_system,
            )
                .chain(),
        );
    app.update();
    app
}

fn click(app: &mut App, target: Option<&str>) {
    app.world_mut().send_event(BodyClicked {
        target: target.map(str::to_string),
    });
    app.update();
}

fn overlays(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&TrajectoryOverlay>().iter(world).count()
}

#[test]
fn builtin_catalog_is_ranked_by_importance() {
    let catalog = Catalog::builtin();
    let records = catalog.records();

    assert_eq!(records.first().map(|r| r.name.as_str()), Some("394051 (2006 AM4)"));
    assert_eq!(records.last().map(|r| r.name.as_str()), Some("4769 Castalia"));
}

#[test]
fn single_visible_body_gets_at_most_one_ring() {
    let mut app = scene_app(Catalog::builtin(), 1, true);

    let registry = app.world().resource::<BodyRegistry>();
    assert_eq!(registry.len(), 1);
    assert!(registry.rings().len() <= 1);
}

/// Runs a press, one move and a release over the body `id`, resolving the hit
/// the way the pointer system does.
fn gesture_over(app: &mut App, id: &str, moved_by: Vec2) -> PointerRelease {
    let registry = app.world().resource::<BodyRegistry>();
    let body = registry.get(id).unwrap();
    let origin = body.position + Vec3::Z * (body.pick_radius() + 1.0);
    let hit = pick(origin, Vec3::NEG_Z, registry.bodies()).map(|body| body.id.clone());
    assert_eq!(hit.as_deref(), Some(id));

    let mut tracker = PointerTracker::default();
    let cursor = Vec2::new(400.0, 300.0);
    tracker.press(Duration::from_millis(0), cursor);
    tracker.moved(cursor + moved_by);
    let release = tracker.release(Duration::from_millis(120));

    if let Some(event) = click_event(release, hit) {
        app.world_mut().send_event(event);
    }
    app.update();
    release
}

#[test]
fn click_over_a_body_selects_it() {
    let mut app = scene_app(Catalog::builtin(), 6, false);

    let release = gesture_over(&mut app, "2099942", Vec2::new(2.0, 1.0));

    assert_eq!(release, PointerRelease::Click);
    assert_eq!(
        app.world().resource::<Selection>().selected.as_deref(),
        Some("2099942")
    );
    assert_eq!(overlays(&mut app), 1);
}

#[test]
fn drag_over_a_body_never_selects_it() {
    let mut app = scene_app(Catalog::builtin(), 6, false);

    let release = gesture_over(&mut app, "2099942", Vec2::new(20.0, 0.0));

    assert_eq!(release, PointerRelease::Drag);
    assert_eq!(app.world().resource::<Selection>().selected, None);
    assert_eq!(overlays(&mut app), 0);
}

#[test]
fn escape_key_leaves_the_selection_alone() {
    let mut app = scene_app(Catalog::builtin(), 6, false);
    click(&mut app, Some("2394051"));

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::Escape);
    app.insert_resource(keys);
    app.update();

    assert_eq!(
        app.world().resource::<Selection>().selected.as_deref(),
        Some("2394051")
    );
    assert_eq!(overlays(&mut app), 1);
}

#[test]
fn selection_pauses_and_deselection_resumes_within_a_frame() {
    let mut app = scene_app(Catalog::builtin(), 6, false);
    assert!(!app.world().resource::<CurrentFrame>().0.paused);

    click(&mut app, Some("2394051"));
    assert!(app.world().resource::<CurrentFrame>().0.paused);
    assert_eq!(overlays(&mut app), 1);

    click(&mut app, None);
    assert!(!app.world().resource::<CurrentFrame>().0.paused);
    assert_eq!(overlays(&mut app), 0);
}

#[test]
fn shrinking_the_view_drops_a_hidden_selection() {
    let mut app = scene_app(Catalog::builtin(), 6, true);
    click(&mut app, Some("2004769"));
    assert_eq!(overlays(&mut app), 1);

    app.world_mut().resource_mut::<SceneControls>().visible_count = 2;
    app.update();

    assert_eq!(app.world().resource::<BodyRegistry>().len(), 2);
    assert_eq!(app.world().resource::<Selection>().selected, None);
    assert_eq!(overlays(&mut app), 0);
}

#[test]
fn tiers_are_stable_across_rebuilds() {
    let catalog = Catalog::builtin();
    let mut app = scene_app(catalog.clone(), 6, false);
    let before: Vec<(String, Tier)> = app
        .world()
        .resource::<BodyRegistry>()
        .bodies()
        .map(|b| (b.id.clone(), b.tier))
        .collect();

    app.world_mut().resource_mut::<SceneControls>().visible_count = 3;
    app.update();
    app.world_mut().resource_mut::<SceneControls>().visible_count = 6;
    app.update();

    let after: Vec<(String, Tier)> = app
        .world()
        .resource::<BodyRegistry>()
        .bodies()
        .map(|b| (b.id.clone(), b.tier))
        .collect();
    assert_eq!(before, after);
    for (id, tier) in &after {
        let record = catalog.find(id).unwrap();
        assert_eq!(classify(record), *tier);
    }
}

#[test]
fn scene_runs_from_a_json_catalog() {
    let records: Vec<CelestialBodyRecord> = Catalog::builtin().visible(2).to_vec();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&records).unwrap().as_bytes())
        .unwrap();

    let config = SceneConfig {
        catalog_path: Some(file.path().to_path_buf()),
        ..SceneConfig::default()
    };
    let catalog = config.try_load_catalog().unwrap();
    assert_eq!(catalog.len(), 2);

    let mut app = scene_app(catalog, 6, true);
    assert_eq!(app.world().resource::<BodyRegistry>().len(), 2);

    click(&mut app, Some("2394051"));
    assert_eq!(overlays(&mut app), 1);
}
