//! Body placement rules: tier, size, ring position and palette for each
//! catalog record. Pure functions; the ECS side lives in `scene::bodies`.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::catalog::CelestialBodyRecord;

pub const MIN_VISIBLE_SIZE: f32 = 0.3;
pub const MAX_VISIBLE_SIZE: f32 = 2.5;

const RADIUS_JITTER: f32 = 0.6;
const HEIGHT_JITTER: f32 = 0.8;
const LARGE_DIAMETER_KM: f64 = 10.0;

/// Hazard-derived classification bucket. Determines orbit ring and color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Critical = 0,
    Hazardous = 1,
    Regular = 2,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Critical, Tier::Hazardous, Tier::Regular];

    pub fn base_radius(self) -> f32 {
        match self {
            Tier::Critical => 8.0,
            Tier::Hazardous => 12.0,
            Tier::Regular => 16.0,
        }
    }

    pub fn ring_color(self) -> Color {
        match self {
            Tier::Critical => Color::srgba(1.0, 0.2, 0.2, 0.35),
            Tier::Hazardous => Color::srgba(1.0, 0.53, 0.0, 0.3),
            Tier::Regular => Color::srgba(0.6, 0.6, 0.7, 0.2),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Critical => "critical",
            Tier::Hazardous => "hazardous",
            Tier::Regular => "regular",
        }
    }
}

/// First match wins: sentry or Torino >= 3, then PHA or Torino >= 1.
pub fn classify(record: &CelestialBodyRecord) -> Tier {
    if record.is_sentry_object || record.torino_scale >= 3 {
        Tier::Critical
    } else if record.is_potentially_hazardous || record.torino_scale >= 1 {
        Tier::Hazardous
    } else {
        Tier::Regular
    }
}

/// Visual radius for a diameter in km. Continuous and non-decreasing across
/// the three brackets, clamped to `[MIN_VISIBLE_SIZE, MAX_VISIBLE_SIZE]`.
pub fn visual_size(diameter_km: f64) -> f32 {
    let d = diameter_km.max(0.0);
    let size = if d <= 1.0 {
        0.3 + 0.6 * d
    } else if d <= 10.0 {
        0.9 + 0.08 * (d - 1.0)
    } else {
        1.62 + 0.35 * (d / 10.0).ln()
    };
    (size as f32).clamp(MIN_VISIBLE_SIZE, MAX_VISIBLE_SIZE)
}

/// Base color and emissive of a body. Classification first, diameter second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub color: Color,
    pub emissive: LinearRgba,
}

impl Palette {
    pub const SENTRY: Palette = Palette {
        color: Color::srgb(1.0, 0.2, 0.2),
        emissive: LinearRgba::rgb(0.6, 0.05, 0.05),
    };
    pub const HAZARDOUS: Palette = Palette {
        color: Color::srgb(1.0, 0.53, 0.0),
        emissive: LinearRgba::rgb(0.45, 0.18, 0.0),
    };
    pub const LARGE: Palette = Palette {
        color: Color::srgb(1.0, 0.87, 0.0),
        emissive: LinearRgba::rgb(0.3, 0.26, 0.0),
    };
    pub const REGULAR: Palette = Palette {
        color: Color::srgb(0.67, 0.67, 0.67),
        emissive: LinearRgba::rgb(0.03, 0.03, 0.03),
    };
}

pub fn palette(record: &CelestialBodyRecord) -> Palette {
    if record.is_sentry_object {
        Palette::SENTRY
    } else if record.is_potentially_hazardous {
        Palette::HAZARDOUS
    } else if record.diameter_km() > LARGE_DIAMETER_KM {
        Palette::LARGE
    } else {
        Palette::REGULAR
    }
}

/// Orbital angular speed in rad/s for a relative velocity in km/s.
pub fn orbit_speed(velocity_km_s: f64) -> f32 {
    0.02 + 0.006 * velocity_km_s as f32
}

/// Self-rotation rate in rad/s.
pub fn spin_speed(velocity_km_s: f64) -> f32 {
    0.02 * velocity_km_s as f32
}

/// Everything needed to spawn one body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyPlan {
    pub record_index: usize,
    pub id: String,
    pub tier: Tier,
    pub radius: f32,
    pub angle: f32,
    pub height: f32,
    pub size: f32,
    pub orbit_speed: f32,
    pub spin_speed: f32,
    pub palette: Palette,
    /// True for bodies that glow continuously (sentry or PHA).
    pub glows: bool,
}

impl BodyPlan {
    pub fn position(&self) -> Vec3 {
        orbit_position(self.radius, self.angle, self.height)
    }
}

pub fn orbit_position(radius: f32, angle: f32, height: f32) -> Vec3 {
    Vec3::new(radius * angle.cos(), height, radius * angle.sin())
}

/// Plans one body per record, in catalog order. Bodies sharing a tier are
/// evenly spaced around that tier's ring.
pub fn plan_bodies(records: &[CelestialBodyRecord], rng: &mut impl Rng) -> Vec<BodyPlan> {
    let tiers: Vec<Tier> = records.iter().map(classify).collect();
    let bucket_len = |tier: Tier| tiers.iter().filter(|t| **t == tier).count();
    let mut bucket_cursor = [0usize; 3];

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let tier = tiers[index];
            let slot = bucket_cursor[tier as usize];
            bucket_cursor[tier as usize] += 1;

            BodyPlan {
                record_index: index,
                id: record.id.clone(),
                tier,
                radius: tier.base_radius() + rng.gen_range(-RADIUS_JITTER..=RADIUS_JITTER),
                angle: TAU * slot as f32 / bucket_len(tier) as f32,
                height: rng.gen_range(-HEIGHT_JITTER..=HEIGHT_JITTER),
                size: visual_size(record.diameter_km()),
                orbit_speed: orbit_speed(record.velocity_km_s()),
                spin_speed: spin_speed(record.velocity_km_s()),
                palette: palette(record),
                glows: record.is_sentry_object || record.is_potentially_hazardous,
            }
        })
        .collect()
}

/// Distinct tiers among the plans, in tier order. One ring per entry.
pub fn tiers_present(plans: &[BodyPlan]) -> Vec<Tier> {
    Tier::ALL
        .into_iter()
        .filter(|tier| plans.iter().any(|p| p.tier == *tier))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::Catalog;

    fn record(sentry: bool, pha: bool, torino: u8) -> CelestialBodyRecord {
        let mut record = Catalog::builtin().records()[5].clone();
        record.is_sentry_object = sentry;
        record.is_potentially_hazardous = pha;
        record.torino_scale = torino;
        record
    }

    #[test]
    fn classification_priority() {
        assert_eq!(classify(&record(true, false, 0)), Tier::Critical);
        assert_eq!(classify(&record(false, false, 3)), Tier::Critical);
        assert_eq!(classify(&record(false, true, 0)), Tier::Hazardous);
        assert_eq!(classify(&record(false, false, 1)), Tier::Hazardous);
        assert_eq!(classify(&record(false, false, 0)), Tier::Regular);
        assert_eq!(classify(&record(true, true, 10)), Tier::Critical);
    }

    #[test]
    fn builtin_tiers() {
        let catalog = Catalog::builtin();
        let tiers: Vec<Tier> = catalog.records().iter().map(classify).collect();

        assert_eq!(
            tiers,
            vec![
                Tier::Critical,
                Tier::Hazardous,
                Tier::Regular,
                Tier::Hazardous,
                Tier::Regular,
                Tier::Regular,
            ]
        );
    }

    #[test]
    fn size_is_monotonic_and_bounded() {
        let mut previous = 0.0;
        for step in 0..=20_000 {
            let d = step as f64 * 0.01;
            let size = visual_size(d);
            assert!(size >= previous, "size dropped at {d} km");
            assert!((MIN_VISIBLE_SIZE..=MAX_VISIBLE_SIZE).contains(&size));
            previous = size;
        }
    }

    #[test]
    fn size_covers_catalog_extremes() {
        let small = visual_size(0.4853331752);
        let large = visual_size(38.9);

        assert!(small > MIN_VISIBLE_SIZE && small < MAX_VISIBLE_SIZE);
        assert!(large > small && large < MAX_VISIBLE_SIZE);
        assert!(visual_size(0.01) >= MIN_VISIBLE_SIZE);
        assert_eq!(visual_size(40_000.0), MAX_VISIBLE_SIZE);
    }

    #[test]
    fn palette_prefers_classification_over_size() {
        let mut big_sentry = record(true, false, 0);
        big_sentry.estimated_diameter.km_max = 50.0;
        assert_eq!(palette(&big_sentry).color, Color::srgb(1.0, 0.2, 0.2));

        let mut big_regular = record(false, false, 0);
        big_regular.estimated_diameter.km_max = 50.0;
        assert_eq!(palette(&big_regular).color, Color::srgb(1.0, 0.87, 0.0));

        assert_eq!(
            palette(&record(false, false, 0)).color,
            Color::srgb(0.67, 0.67, 0.67)
        );
    }

    #[test]
    fn same_tier_bodies_are_evenly_spaced() {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(7);
        let plans = plan_bodies(catalog.records(), &mut rng);

        let regular: Vec<f32> = plans
            .iter()
            .filter(|p| p.tier == Tier::Regular)
            .map(|p| p.angle)
            .collect();
        assert_eq!(regular.len(), 3);
        assert!((regular[0] - 0.0).abs() < 1e-6);
        assert!((regular[1] - TAU / 3.0).abs() < 1e-5);
        assert!((regular[2] - 2.0 * TAU / 3.0).abs() < 1e-5);
    }

    #[test]
    fn radius_stays_near_tier_base() {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(42);

        for plan in plan_bodies(catalog.records(), &mut rng) {
            assert!((plan.radius - plan.tier.base_radius()).abs() <= RADIUS_JITTER);
            assert!(plan.height.abs() <= HEIGHT_JITTER);
        }
    }

    #[test]
    fn tiers_present_for_single_body() {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(1);
        let plans = plan_bodies(catalog.visible(1), &mut rng);

        assert_eq!(plans.len(), 1);
        assert_eq!(tiers_present(&plans), vec![Tier::Critical]);
    }
}
