//! Procedurally painted Earth textures: a surface color map and a matching
//! roughness map (land rough, oceans glossy).

use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use rand::Rng;

pub const TEXTURE_WIDTH: u32 = 512;
pub const TEXTURE_HEIGHT: u32 = 256;

const OCEAN: [u8; 4] = [26, 84, 144, 255];
const LAND: [u8; 4] = [34, 139, 34, 255];
const ICE: [u8; 4] = [235, 240, 245, 255];

/// Rough continent outlines as (x, y, w, h) rectangles on a 512x256 map.
const CONTINENTS: &[(u32, u32, u32, u32)] = &[
    (60, 40, 80, 60),
    (40, 50, 40, 40),
    (90, 110, 30, 80),
    (85, 130, 20, 60),
    (200, 60, 40, 30),
    (210, 90, 50, 100),
    (215, 100, 40, 80),
    (250, 50, 120, 70),
    (280, 80, 80, 40),
    (350, 140, 50, 25),
];

const ISLAND_COUNT: usize = 20;
const POLAR_ROWS: u32 = 12;

/// Land mask: true where the surface is land or ice.
pub fn land_mask(rng: &mut impl Rng) -> Vec<bool> {
    let (w, h) = (TEXTURE_WIDTH, TEXTURE_HEIGHT);
    let mut mask = vec![false; (w * h) as usize];
    let mut fill = |x0: u32, y0: u32, rw: u32, rh: u32| {
        for y in y0..(y0 + rh).min(h) {
            for x in x0..(x0 + rw).min(w) {
                mask[(y * w + x) as usize] = true;
            }
        }
    };

    for &(x, y, rw, rh) in CONTINENTS {
        fill(x, y, rw, rh);
    }
    for _ in 0..ISLAND_COUNT {
        let size = rng.gen_range(2..10);
        fill(rng.gen_range(0..w), rng.gen_range(0..h), size, size);
    }
    mask
}

fn is_polar(y: u32) -> bool {
    y < POLAR_ROWS || y >= TEXTURE_HEIGHT - POLAR_ROWS
}

fn image_from_pixels(data: Vec<u8>, format: TextureFormat) -> Image {
    Image::new(
        Extent3d {
            width: TEXTURE_WIDTH,
            height: TEXTURE_HEIGHT,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        format,
        RenderAssetUsages::RENDER_WORLD,
    )
}

pub fn surface_image(mask: &[bool]) -> Image {
    let mut data = Vec::with_capacity(mask.len() * 4);
    for (i, land) in mask.iter().enumerate() {
        let y = i as u32 / TEXTURE_WIDTH;
        let texel = if is_polar(y) {
            ICE
        } else if *land {
            LAND
        } else {
            OCEAN
        };
        data.extend_from_slice(&texel);
    }
    image_from_pixels(data, TextureFormat::Rgba8UnormSrgb)
}

/// Metallic-roughness map: green channel carries roughness.
pub fn roughness_image(mask: &[bool]) -> Image {
    let mut data = Vec::with_capacity(mask.len() * 4);
    for land in mask {
        let roughness = if *land { 230 } else { 70 };
        data.extend_from_slice(&[0, roughness, 0, 255]);
    }
    image_from_pixels(data, TextureFormat::Rgba8Unorm)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn mask_covers_continents() {
        let mask = land_mask(&mut StdRng::seed_from_u64(1));

        assert_eq!(mask.len(), (TEXTURE_WIDTH * TEXTURE_HEIGHT) as usize);
        // Inside the Africa block.
        assert!(mask[(120 * TEXTURE_WIDTH + 230) as usize]);
        let land = mask.iter().filter(|l| **l).count();
        assert!(land < mask.len() / 2);
    }

    #[test]
    fn images_have_expected_size() {
        let mask = land_mask(&mut StdRng::seed_from_u64(2));
        let surface = surface_image(&mask);
        let roughness = roughness_image(&mask);

        assert_eq!(surface.width(), TEXTURE_WIDTH);
        assert_eq!(roughness.height(), TEXTURE_HEIGHT);
        assert_eq!(surface.data.len(), mask.len() * 4);
    }
}
