//! The fixed catalog shipped with the binary.

use super::model::{
    CelestialBodyRecord, EstimatedDiameter, Impact, MissDistance, RelativeVelocity,
};

fn jpl_url(id: &str) -> String {
    format!("https://ssd.jpl.nasa.gov/tools/sbdb_lookup.html#/?sstr={id}")
}

fn zones(names: &[&str]) -> Vec<String> {
    names.iter().map(|z| z.to_string()).collect()
}

/// Unsorted builtin records; `Catalog::builtin` applies the importance order.
pub(crate) fn records() -> Vec<CelestialBodyRecord> {
    vec![
        CelestialBodyRecord {
            id: "2465633".into(),
            name: "465633 (2009 JR5)".into(),
            nasa_jpl_url: jpl_url("2465633"),
            absolute_magnitude_h: 20.44,
            estimated_diameter: EstimatedDiameter {
                km_min: 0.2170475943,
                km_max: 0.4853331752,
                m_min: 217.0475943071,
                m_max: 485.3331752235,
                mi_min: 0.1348670807,
                mi_max: 0.3015719604,
                ft_min: 712.0984293066,
                ft_max: 1592.3004946003,
            },
            is_potentially_hazardous: true,
            is_sentry_object: false,
            close_approach_date: "2015-09-08".into(),
            close_approach_date_full: "2015-Sep-08 20:28".into(),
            epoch_date_close_approach: 1_441_744_080_000,
            relative_velocity: RelativeVelocity {
                km_s: 18.1279360862,
                km_h: 65260.5699103704,
                mph: 40550.3802312521,
            },
            miss_distance: MissDistance {
                au: 0.3027469457,
                lunar: 117.7685618773,
                km: 45_290_298.225_725_66,
                mi: 28_142_086.351_581_734,
            },
            orbiting_body: "Earth".into(),
            impact: Impact {
                energy_megatons: 150.0,
                crater_km: 3.2,
                risk_zones: zones(&["Pacific Ocean", "Coastal Japan"]),
            },
            torino_scale: 1,
            importance_score: 5,
        },
        CelestialBodyRecord {
            id: "2394051".into(),
            name: "394051 (2006 AM4)".into(),
            nasa_jpl_url: jpl_url("2394051"),
            absolute_magnitude_h: 18.9,
            estimated_diameter: EstimatedDiameter {
                km_min: 0.4,
                km_max: 0.9,
                m_min: 400.0,
                m_max: 900.0,
                mi_min: 0.248548,
                mi_max: 0.559234,
                ft_min: 1312.336,
                ft_max: 2952.756,
            },
            is_potentially_hazardous: true,
            is_sentry_object: true,
            close_approach_date: "2029-04-13".into(),
            close_approach_date_full: "2029-Apr-13 21:46".into(),
            epoch_date_close_approach: 1_871_234_080_000,
            relative_velocity: RelativeVelocity {
                km_s: 7.42,
                km_h: 26712.0,
                mph: 16590.2,
            },
            miss_distance: MissDistance {
                au: 0.0255,
                lunar: 9.93,
                km: 3_816_906.0,
                mi: 2_371_234.0,
            },
            orbiting_body: "Earth".into(),
            impact: Impact {
                energy_megatons: 875.0,
                crater_km: 8.5,
                risk_zones: zones(&["Atlantic Ocean", "European Coast", "African Coast"]),
            },
            torino_scale: 3,
            importance_score: 10,
        },
        CelestialBodyRecord {
            id: "2099942".into(),
            name: "99942 Apophis".into(),
            nasa_jpl_url: jpl_url("2099942"),
            absolute_magnitude_h: 19.7,
            estimated_diameter: EstimatedDiameter {
                km_min: 0.31,
                km_max: 0.34,
                m_min: 310.0,
                m_max: 340.0,
                mi_min: 0.192625,
                mi_max: 0.211266,
                ft_min: 1017.06,
                ft_max: 1115.49,
            },
            is_potentially_hazardous: true,
            is_sentry_object: false,
            close_approach_date: "2029-04-13".into(),
            close_approach_date_full: "2029-Apr-13 21:46".into(),
            epoch_date_close_approach: 1_871_234_080_000,
            relative_velocity: RelativeVelocity {
                km_s: 7.42,
                km_h: 26712.0,
                mph: 16590.2,
            },
            miss_distance: MissDistance {
                au: 0.0255,
                lunar: 9.93,
                km: 3_816_906.0,
                mi: 2_371_234.0,
            },
            orbiting_body: "Earth".into(),
            impact: Impact {
                energy_megatons: 506.0,
                crater_km: 5.1,
                risk_zones: zones(&["Indian Ocean", "Southeast Asia"]),
            },
            torino_scale: 2,
            importance_score: 8,
        },
        CelestialBodyRecord {
            id: "2001036".into(),
            name: "1036 Ganymed".into(),
            nasa_jpl_url: jpl_url("2001036"),
            absolute_magnitude_h: 9.45,
            estimated_diameter: EstimatedDiameter {
                km_min: 31.7,
                km_max: 38.9,
                m_min: 31700.0,
                m_max: 38900.0,
                mi_min: 19.7,
                mi_max: 24.2,
                ft_min: 104_000.0,
                ft_max: 127_600.0,
            },
            is_potentially_hazardous: false,
            is_sentry_object: false,
            close_approach_date: "2024-10-13".into(),
            close_approach_date_full: "2024-Oct-13 14:56".into(),
            epoch_date_close_approach: 1_728_825_360_000,
            relative_velocity: RelativeVelocity {
                km_s: 19.56,
                km_h: 70416.0,
                mph: 43750.8,
            },
            miss_distance: MissDistance {
                au: 0.381,
                lunar: 148.2,
                km: 57_000_000.0,
                mi: 35_418_600.0,
            },
            orbiting_body: "Earth".into(),
            impact: Impact {
                energy_megatons: 50_000.0,
                crater_km: 45.0,
                risk_zones: zones(&["Global Impact", "Mass Extinction Event"]),
            },
            torino_scale: 0,
            importance_score: 7,
        },
        CelestialBodyRecord {
            id: "2000433".into(),
            name: "433 Eros".into(),
            nasa_jpl_url: jpl_url("2000433"),
            absolute_magnitude_h: 10.4,
            estimated_diameter: EstimatedDiameter {
                km_min: 16.84,
                km_max: 16.84,
                m_min: 16840.0,
                m_max: 16840.0,
                mi_min: 10.46,
                mi_max: 10.46,
                ft_min: 55250.0,
                ft_max: 55250.0,
            },
            is_potentially_hazardous: false,
            is_sentry_object: false,
            close_approach_date: "2031-01-31".into(),
            close_approach_date_full: "2031-Jan-31 02:17".into(),
            epoch_date_close_approach: 1_927_758_720_000,
            relative_velocity: RelativeVelocity {
                km_s: 23.04,
                km_h: 82944.0,
                mph: 51544.3,
            },
            miss_distance: MissDistance {
                au: 0.178,
                lunar: 69.3,
                km: 26_640_000.0,
                mi: 16_553_600.0,
            },
            orbiting_body: "Earth".into(),
            impact: Impact {
                energy_megatons: 15_000.0,
                crater_km: 30.0,
                risk_zones: zones(&["Continental Devastation"]),
            },
            torino_scale: 0,
            importance_score: 4,
        },
        CelestialBodyRecord {
            id: "2004769".into(),
            name: "4769 Castalia".into(),
            nasa_jpl_url: jpl_url("2004769"),
            absolute_magnitude_h: 16.9,
            estimated_diameter: EstimatedDiameter {
                km_min: 1.4,
                km_max: 1.8,
                m_min: 1400.0,
                m_max: 1800.0,
                mi_min: 0.87,
                mi_max: 1.12,
                ft_min: 4593.0,
                ft_max: 5906.0,
            },
            is_potentially_hazardous: false,
            is_sentry_object: false,
            close_approach_date: "2028-08-19".into(),
            close_approach_date_full: "2028-Aug-19 12:03".into(),
            epoch_date_close_approach: 1_850_825_380_000,
            relative_velocity: RelativeVelocity {
                km_s: 8.89,
                km_h: 32004.0,
                mph: 19884.8,
            },
            miss_distance: MissDistance {
                au: 0.545,
                lunar: 212.0,
                km: 81_500_000.0,
                mi: 50_642_500.0,
            },
            orbiting_body: "Earth".into(),
            impact: Impact {
                energy_megatons: 800.0,
                crater_km: 12.0,
                risk_zones: zones(&["Regional Damage"]),
            },
            torino_scale: 0,
            importance_score: 2,
        },
    ]
}
