//! SDK entry points and builder for composing the asteroid scene app.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::camera::orbit_camera_plugin;
use crate::catalog::Catalog;
use crate::config::SceneConfig;
use crate::interaction::interaction_plugin;
use crate::scene::{scene_plugin, trajectory_plugin, LayoutRng, SceneControls};
use crate::ui::{hud_plugin, inspector_plugin};

/// Builder for constructing a NeoWatch app with customizable plugins.
pub struct SceneBuilder {
    config: Option<SceneConfig>,
    catalog: Option<Catalog>,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_orbit_camera: bool,
    enable_hud: bool,
    enable_inspector: bool,
    enable_trajectories: bool,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self {
            config: None,
            catalog: None,
            window_title: "NeoWatch".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.0, 0.0, 0.07),
            enable_orbit_camera: true,
            enable_hud: true,
            enable_inspector: true,
            enable_trajectories: true,
        }
    }
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit scene configuration instead of reading the environment.
    pub fn config(mut self, config: SceneConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use this catalog instead of the configured one.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_orbit_camera(mut self) -> Self {
        self.enable_orbit_camera = false;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_inspector(mut self) -> Self {
        self.enable_inspector = false;
        self
    }

    pub fn disable_trajectories(mut self) -> Self {
        self.enable_trajectories = false;
        self
    }

    /// Resolves the configuration and catalog, then seeds the scene
    /// resources. Split out so the resources can be checked without a window.
    pub fn resources(&mut self) -> (SceneConfig, Catalog, SceneControls) {
        let config = self.config.take().unwrap_or_else(SceneConfig::from_env);
        let catalog = self
            .catalog
            .take()
            .unwrap_or_else(|| config.load_catalog());
        let controls = SceneControls::from_config(&config, &catalog);
        (config, catalog, controls)
    }

    /// Build the Bevy app with the selected configuration and plugins.
    pub fn build(mut self) -> App {
        let (config, catalog, controls) = self.resources();

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(LayoutRng::seeded(config.layout_seed))
        .insert_resource(config)
        .insert_resource(catalog)
        .insert_resource(controls)
        .add_plugins((scene_plugin, interaction_plugin));

        if self.enable_orbit_camera {
            app.add_plugins(orbit_camera_plugin);
        }
        if self.enable_trajectories {
            app.add_plugins(trajectory_plugin);
        }
        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }
        if self.enable_inspector {
            app.add_plugins(inspector_plugin);
        }

        app
    }
}
