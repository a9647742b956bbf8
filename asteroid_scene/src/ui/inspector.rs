//! Detail panel: the selected asteroid's record, or catalog aggregates when
//! nothing is selected.
//!
//! Reads `Selection` only. Mitigation buttons post an acknowledgment and never
//! touch selection or scene state.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::catalog::{Catalog, CelestialBodyRecord};
use crate::config::SceneConfig;
use crate::interaction::{Selection, SelectionChanged};
use crate::scene::SceneControls;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    Critical,
    High,
    Moderate,
    Low,
}

impl RiskLevel {
    pub fn of(record: &CelestialBodyRecord) -> Self {
        if record.is_sentry_object {
            RiskLevel::Critical
        } else if record.is_potentially_hazardous {
            RiskLevel::High
        } else if record.importance_score > 6 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::High => "HIGH",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::Low => "LOW",
        }
    }

    fn color(self) -> egui::Color32 {
        match self {
            RiskLevel::Critical => egui::Color32::from_rgb(240, 80, 80),
            RiskLevel::High => egui::Color32::from_rgb(240, 150, 60),
            RiskLevel::Moderate => egui::Color32::from_rgb(230, 210, 70),
            RiskLevel::Low => egui::Color32::from_rgb(100, 220, 140),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mitigation {
    KineticImpactor,
    GravityTractor,
    NuclearDeflection,
}

impl Mitigation {
    pub const ALL: [Mitigation; 3] = [
        Mitigation::KineticImpactor,
        Mitigation::GravityTractor,
        Mitigation::NuclearDeflection,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mitigation::KineticImpactor => "Kinetic Impactor Mission",
            Mitigation::GravityTractor => "Gravity Tractor",
            Mitigation::NuclearDeflection => "Nuclear Deflection",
        }
    }

    pub fn acknowledgment(self, name: &str) -> String {
        let plan = match self {
            Mitigation::KineticImpactor => "a kinetic impactor would redirect it by spacecraft impact",
            Mitigation::GravityTractor => {
                "a gravity tractor would slowly alter its orbit by gravitational pull"
            }
            Mitigation::NuclearDeflection => {
                "nuclear deflection would change its trajectory with a controlled explosion"
            }
        };
        format!("For {name}: {plan}")
    }
}

/// Last acknowledged mitigation request. Cleared whenever the selection
/// changes.
#[derive(Resource, Default, Debug, PartialEq)]
pub struct MitigationNotice(pub Option<String>);

/// Aggregates shown while nothing is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overview {
    pub shown: usize,
    pub total: usize,
    pub sentry: usize,
    pub hazardous: usize,
    pub stars: usize,
}

impl Overview {
    pub fn new(catalog: &Catalog, visible_count: usize, stars: usize) -> Self {
        Self {
            shown: catalog.clamp_count(visible_count),
            total: catalog.len(),
            sentry: catalog.sentry_count(visible_count),
            hazardous: catalog.hazardous_count(visible_count),
            stars,
        }
    }
}

pub fn inspector_plugin(app: &mut App) {
    app.init_resource::<MitigationNotice>().add_systems(
        Update,
        (clear_notice_system, inspector_panel_system).chain(),
    );
}

pub fn clear_notice_system(
    mut changes: EventReader<SelectionChanged>,
    mut notice: ResMut<MitigationNotice>,
) {
    if changes.read().count() > 0 && notice.0.is_some() {
        notice.0 = None;
    }
}

fn inspector_panel_system(
    mut contexts: EguiContexts,
    selection: Res<Selection>,
    catalog: Res<Catalog>,
    controls: Res<SceneControls>,
    config: Res<SceneConfig>,
    mut notice: ResMut<MitigationNotice>,
) {
    let record = selection.selected.as_deref().and_then(|id| catalog.find(id));

    egui::SidePanel::right("inspector")
        .default_width(300.0)
        .frame(inspector_frame())
        .show(contexts.ctx_mut(), |ui| {
            apply_inspector_style(ui);

            ui.label(
                egui::RichText::new("Mission Control")
                    .size(18.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| match record {
                Some(record) => show_record(ui, record, &mut notice),
                None => show_overview(
                    ui,
                    Overview::new(&catalog, controls.visible_count, config.star_count),
                ),
            });
        });
}

fn show_record(ui: &mut egui::Ui, record: &CelestialBodyRecord, notice: &mut MitigationNotice) {
    let risk = RiskLevel::of(record);

    ui.label(egui::RichText::new(&record.name).size(16.0));
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!("{} RISK", risk.label()))
                .strong()
                .color(risk.color()),
        );
        ui.label(format!("Torino {}", record.torino_scale));
    });
    ui.label(format!("Importance   {}/10", record.importance_score));
    ui.hyperlink_to("View on NASA JPL", &record.nasa_jpl_url);
    ui.add_space(8.0);

    section(ui, "Physical properties");
    ui.label(format!(
        "Diameter     {} - {} km",
        format_number(record.estimated_diameter.km_min),
        format_number(record.estimated_diameter.km_max)
    ));
    ui.label(format!("Magnitude H  {}", record.absolute_magnitude_h));
    ui.label(format!(
        "Velocity     {} km/s",
        format_number(record.relative_velocity.km_s)
    ));
    ui.add_space(8.0);

    section(ui, "Close approach");
    ui.label(format!("Date         {}", record.close_approach_date_full));
    ui.label(format!("Orbiting     {}", record.orbiting_body));
    ui.label(format!(
        "Miss         {} AU / {} LD",
        format_number(record.miss_distance.au),
        format_number(record.miss_distance.lunar)
    ));
    ui.label(format!(
        "             {} km",
        format_number(record.miss_distance.km)
    ));
    ui.add_space(8.0);

    section(ui, "Impact analysis");
    ui.label(
        egui::RichText::new(format!(
            "Energy       {} Mt TNT",
            format_number(record.impact.energy_megatons)
        ))
        .color(egui::Color32::from_rgb(240, 120, 120)),
    );
    ui.label(format!(
        "Crater       {} km",
        format_number(record.impact.crater_km)
    ));
    ui.label("Risk zones");
    ui.horizontal_wrapped(|ui| {
        for zone in &record.impact.risk_zones {
            ui.label(
                egui::RichText::new(zone)
                    .size(11.0)
                    .background_color(egui::Color32::from_rgb(90, 20, 20)),
            );
        }
    });
    ui.add_space(8.0);

    section(ui, "Mitigation");
    for mitigation in Mitigation::ALL {
        if ui.button(mitigation.label()).clicked() {
            info!("{} requested for {}", mitigation.label(), record.name);
            notice.0 = Some(mitigation.acknowledgment(&record.name));
        }
    }
    if let Some(message) = &notice.0 {
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new(message)
                .size(11.0)
                .color(egui::Color32::from_rgb(200, 180, 100)),
        );
    }

    ui.add_space(12.0);
    dismiss_hint(ui);
}

fn show_overview(ui: &mut egui::Ui, overview: Overview) {
    ui.label("Click an asteroid to view detailed analysis");
    ui.add_space(8.0);

    section(ui, "System overview");
    ui.label(format!("Shown        {}", overview.shown));
    ui.label(format!("Tracked      {}", overview.total));
    ui.label(
        egui::RichText::new(format!("Sentry       {}", overview.sentry))
            .color(RiskLevel::Critical.color()),
    );
    ui.label(
        egui::RichText::new(format!("Hazardous    {}", overview.hazardous))
            .color(RiskLevel::High.color()),
    );
    ui.label(format!("Stars        {}", group_thousands(overview.stars)));
}

fn section(ui: &mut egui::Ui, title: &str) {
    ui.label(
        egui::RichText::new(title)
            .strong()
            .color(egui::Color32::from_rgb(140, 160, 180)),
    );
}

fn inspector_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 220))
        .inner_margin(egui::Margin::same(14))
}

fn apply_inspector_style(ui: &mut egui::Ui) {
    ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
    ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));
}

fn dismiss_hint(ui: &mut egui::Ui) {
    ui.label(
        egui::RichText::new("Click empty space to dismiss")
            .size(11.0)
            .color(egui::Color32::from_rgb(120, 120, 140)),
    );
}

/// Up to six significant decimals, trailing zeros trimmed.
fn format_number(n: f64) -> String {
    let text = format!("{n:.6}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> CelestialBodyRecord {
        Catalog::builtin()
            .records()
            .iter()
            .find(|r| r.name == name)
            .cloned()
            .unwrap()
    }

    #[test]
    fn risk_levels_follow_flags_then_importance() {
        assert_eq!(RiskLevel::of(&record("394051 (2006 AM4)")), RiskLevel::Critical);
        assert_eq!(RiskLevel::of(&record("99942 Apophis")), RiskLevel::High);

        let mut quiet = record("433 Eros");
        assert_eq!(RiskLevel::of(&quiet), RiskLevel::Low);
        quiet.importance_score = 7;
        assert_eq!(RiskLevel::of(&quiet), RiskLevel::Moderate);
    }

    #[test]
    fn acknowledgment_names_the_body() {
        for mitigation in Mitigation::ALL {
            assert!(mitigation.acknowledgment("433 Eros").starts_with("For 433 Eros:"));
        }
    }

    #[test]
    fn overview_counts_the_visible_prefix() {
        let catalog = Catalog::builtin();
        let all = Overview::new(&catalog, 6, 15_000);
        assert_eq!(all.shown, 6);
        assert_eq!(all.total, 6);
        assert_eq!(all.sentry, catalog.sentry_count(6));

        let top = Overview::new(&catalog, 1, 15_000);
        assert_eq!(top.shown, 1);
        assert_eq!(top.sentry, 1);
    }

    #[test]
    fn numbers_render_compactly() {
        assert_eq!(format_number(0.48), "0.48");
        assert_eq!(format_number(38.9), "38.9");
        assert_eq!(format_number(12.0), "12");
        assert_eq!(group_thousands(15_000), "15,000");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn notice_clears_on_selection_change() {
        let mut app = App::new();
        app.add_event::<SelectionChanged>()
            .insert_resource(MitigationNotice(Some("ack".into())))
            .add_systems(Update, clear_notice_system);

        app.update();
        assert!(app.world().resource::<MitigationNotice>().0.is_some());

        app.world_mut()
            .send_event(SelectionChanged { selected: None });
        app.update();
        assert_eq!(*app.world().resource::<MitigationNotice>(), MitigationNotice(None));
    }
}
