//! HUD overlay: operator controls, camera distance, FPS counter and legend.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::camera::OrbitCamera;
use crate::catalog::Catalog;
use crate::config::{MAX_ANIMATION_SPEED, MIN_ANIMATION_SPEED};
use crate::placement::Palette;
use crate::scene::SceneControls;

pub fn hud_plugin(app: &mut App) {
    app.add_plugins(FrameTimeDiagnosticsPlugin)
        .add_systems(Update, (hud_controls_system, legend_system));
}

fn hud_controls_system(
    mut contexts: EguiContexts,
    catalog: Res<Catalog>,
    mut controls: ResMut<SceneControls>,
    cameras: Query<&OrbitCamera>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);
    let distance = cameras.get_single().map(OrbitCamera::distance).ok();

    let mut edited = controls.clone();

    egui::Window::new("Near-Earth Objects")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            ui.label(
                egui::RichText::new("NeoWatch")
                    .size(16.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            ui.add_space(4.0);

            ui.checkbox(&mut edited.show_orbits, "Show orbit paths");
            ui.add_space(4.0);

            ui.label("Animation speed");
            ui.add(
                egui::Slider::new(
                    &mut edited.animation_speed,
                    MIN_ANIMATION_SPEED..=MAX_ANIMATION_SPEED,
                )
                .step_by(0.1)
                .suffix("x"),
            );
            ui.add_space(4.0);

            ui.label(format!(
                "Shown  {} / {}",
                edited.visible_count,
                catalog.len()
            ));
            ui.add(egui::Slider::new(&mut edited.visible_count, 1..=catalog.len().max(1)));
            ui.label(
                egui::RichText::new("Ranked by importance (Torino scale)")
                    .size(11.0)
                    .color(egui::Color32::from_rgb(120, 120, 140)),
            );
            ui.add_space(4.0);

            ui.separator();
            if let Some(distance) = distance {
                ui.label(format!("Camera  {distance:.1}"));
            }
            ui.label(format!("FPS  {fps:.0}"));
        });

    // Only touch the resource on an actual edit so change detection stays quiet.
    if edited != *controls {
        *controls = edited;
    }
}

fn legend_system(mut contexts: EguiContexts) {
    egui::Window::new("Legend")
        .anchor(egui::Align2::LEFT_BOTTOM, [10.0, -10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                .inner_margin(egui::Margin::same(10))
                .corner_radius(egui::CornerRadius::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            for (label, color) in legend_entries() {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("●").color(color));
                    ui.label(label);
                });
            }
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new("Click an asteroid for details, drag to orbit, scroll to zoom")
                    .size(11.0)
                    .color(egui::Color32::from_rgb(120, 120, 140)),
            );
        });
}

/// Legend rows, colored like the bodies and rings they describe.
pub(crate) fn legend_entries() -> [(&'static str, egui::Color32); 5] {
    [
        ("Earth", egui::Color32::from_rgb(60, 120, 220)),
        ("Sentry object (critical)", to_egui(Palette::SENTRY.color)),
        ("Hazardous asteroid", to_egui(Palette::HAZARDOUS.color)),
        ("Large asteroid (>10 km)", to_egui(Palette::LARGE.color)),
        ("Regular asteroid", to_egui(Palette::REGULAR.color)),
    ]
}

pub(crate) fn to_egui(color: Color) -> egui::Color32 {
    let [r, g, b, _] = color.to_srgba().to_u8_array();
    egui::Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_colors_are_distinct() {
        let entries = legend_entries();
        for (i, (_, a)) in entries.iter().enumerate() {
            for (_, b) in &entries[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn color_conversion_keeps_channels() {
        assert_eq!(
            to_egui(Color::srgb(1.0, 0.0, 0.0)),
            egui::Color32::from_rgb(255, 0, 0)
        );
    }
}
