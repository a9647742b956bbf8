//! Risk-zone coordinates and projection onto the Earth sphere.

use bevy::prelude::*;

/// Latitude / longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoCoord {
    pub lat: f32,
    pub lon: f32,
}

const KNOWN_ZONES: &[(&str, GeoCoord)] = &[
    ("Pacific Ocean", GeoCoord { lat: 0.0, lon: -160.0 }),
    ("Coastal Japan", GeoCoord { lat: 35.7, lon: 139.7 }),
    ("Atlantic Ocean", GeoCoord { lat: 14.6, lon: -28.7 }),
    ("European Coast", GeoCoord { lat: 43.3, lon: -3.0 }),
    ("African Coast", GeoCoord { lat: 6.5, lon: 3.4 }),
    ("Indian Ocean", GeoCoord { lat: -20.0, lon: 80.0 }),
    ("Southeast Asia", GeoCoord { lat: 13.7, lon: 100.5 }),
];

/// Coordinate of a named risk zone, or `None` for zones with no single
/// location (e.g. "Global Impact").
pub fn zone_coordinate(zone: &str) -> Option<GeoCoord> {
    KNOWN_ZONES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(zone))
        .map(|(_, coord)| *coord)
}

/// Point on a sphere of `radius` centred at the origin, in the sphere's local
/// frame (Y up, longitude 0 on +X, east towards -Z).
pub fn surface_point(coord: GeoCoord, radius: f32) -> Vec3 {
    let lat = coord.lat.to_radians();
    let lon = coord.lon.to_radians();
    Vec3::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.sin(),
        -radius * lat.cos() * lon.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_zones_resolve() {
        assert!(zone_coordinate("Pacific Ocean").is_some());
        assert!(zone_coordinate("coastal japan").is_some());
    }

    #[test]
    fn unlocatable_zones_are_none() {
        for zone in [
            "Global Impact",
            "Mass Extinction Event",
            "Continental Devastation",
            "Regional Damage",
        ] {
            assert_eq!(zone_coordinate(zone), None);
        }
    }

    #[test]
    fn surface_point_lies_on_sphere() {
        for (_, coord) in KNOWN_ZONES {
            let p = surface_point(*coord, 3.0);
            assert!((p.length() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn poles_and_meridian() {
        let north = surface_point(GeoCoord { lat: 90.0, lon: 0.0 }, 1.0);
        assert!((north - Vec3::Y).length() < 1e-5);

        let meridian = surface_point(GeoCoord { lat: 0.0, lon: 0.0 }, 1.0);
        assert!((meridian - Vec3::X).length() < 1e-5);
    }
}
