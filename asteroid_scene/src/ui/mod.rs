mod hud;
mod inspector;

pub use hud::hud_plugin;
pub use inspector::{inspector_plugin, Mitigation, MitigationNotice, Overview, RiskLevel};
