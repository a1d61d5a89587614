//! Coordinate Tests - Conversion Laws
//!
//! Round-trip and metric properties of the offset, axial, pixel and world
//! conversions, checked over whole map-sized ranges.

use approx::assert_abs_diff_eq;
use test_case::test_case;
use warlords_map_engine::hex::{
    AxialCoord, HexDirection, axial_distance, axial_neighbors, axial_to_offset, offset_to_axial,
};
use warlords_map_engine::map::HexMap;
use warlords_map_engine::world::{
    DEFAULT_HEX_SIZE, HexLayout, axial_to_pixel, axial_to_world, pixel_to_axial, world_to_axial,
};

#[test]
fn test_offset_axial_inverse_over_wide_range() {
    for x in -100..=100 {
        for y in -100..=100 {
            let axial = offset_to_axial(x, y);
            let back = axial_to_offset(axial.q, axial.r);
            assert_eq!((back.x, back.y), (x, y));
        }
    }
}

#[test]
fn test_offset_2_1_maps_to_axial_2_0() {
    assert_eq!(offset_to_axial(2, 1), AxialCoord::new(2, 0));
}

#[test_case(10, 10)]
#[test_case(16, 12)]
#[test_case(64, 48)]
fn test_world_roundtrip_every_valid_coordinate(width: u32, height: u32) {
    let map = HexMap::new(width, height).unwrap();
    let layout = HexLayout::new(width, height, DEFAULT_HEX_SIZE);
    let w = width as i32;
    let h = height as i32;

    for q in 0..w {
        for r in -w..(h + w) {
            assert!(map.is_valid_coordinate(q, r));
            let coord = AxialCoord::new(q, r);
            assert_eq!(layout.from_world(layout.to_world(coord)), coord);
        }
    }
}

#[test]
fn test_world_grid_is_centered() {
    // Opposite offset-grid corners are symmetric around the origin, up to
    // one column of spacing and the odd-column shift.
    let (width, height) = (10, 6);
    let size = 2.0;
    let first = offset_to_axial(0, 0);
    let last = offset_to_axial(width as i32 - 1, height as i32 - 1);

    let a = axial_to_world(first.q, first.r, width, height, size);
    let b = axial_to_world(last.q, last.r, width, height, size);
    let column = 1.5 * (2.0 / 3.0_f64.sqrt()) * size;

    assert_abs_diff_eq!(a.x + b.x, -column, epsilon = 1e-9);
    // Column 9 is odd, so it sits `size` lower than an even column would.
    assert_abs_diff_eq!(a.y + b.y, -2.0 * size + size, epsilon = 1e-9);
}

#[test]
fn test_world_to_axial_tolerates_small_offsets() {
    let center = axial_to_world(3, 1, 10, 10, DEFAULT_HEX_SIZE);
    let hit = world_to_axial(center.x + 0.4, center.y - 0.4, 10, 10, DEFAULT_HEX_SIZE);
    assert_eq!(hit, AxialCoord::new(3, 1));
}

#[test]
fn test_pixel_roundtrip_and_scale() {
    for q in -10..=10 {
        for r in -10..=10 {
            let p = axial_to_pixel(q, r, DEFAULT_HEX_SIZE);
            assert_eq!(pixel_to_axial(p.x, p.y, DEFAULT_HEX_SIZE), AxialCoord::new(q, r));

            let unit = axial_to_pixel(q, r, 1.0);
            assert_abs_diff_eq!(p.x, unit.x * DEFAULT_HEX_SIZE, epsilon = 1e-9);
            assert_abs_diff_eq!(p.y, unit.y * DEFAULT_HEX_SIZE, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_neighbors_distance_one_everywhere() {
    for q in -30..=30 {
        for r in -30..=30 {
            let center = AxialCoord::new(q, r);
            let neighbors = axial_neighbors(q, r);
            assert_eq!(neighbors.len(), 6);
            assert!(neighbors.iter().all(|n| axial_distance(center, *n) == 1));
        }
    }
}

#[test]
fn test_distance_laws() {
    let points = [
        AxialCoord::new(0, 0),
        AxialCoord::new(3, -7),
        AxialCoord::new(-5, 2),
        AxialCoord::new(9, 9),
    ];
    for a in points {
        assert_eq!(axial_distance(a, a), 0);
        for b in points {
            assert_eq!(axial_distance(a, b), axial_distance(b, a));
            if a != b {
                assert!(axial_distance(a, b) > 0);
            }
            for c in points {
                assert!(axial_distance(a, c) <= axial_distance(a, b) + axial_distance(b, c));
            }
        }
    }
}

#[test]
fn test_distance_linear_along_each_direction() {
    for direction in HexDirection::ALL {
        let step = direction.offset();
        for n in 0..20 {
            let far = AxialCoord::new(step.q * n, step.r * n);
            assert_eq!(axial_distance(AxialCoord::ORIGIN, far), n as u64);
        }
    }
}
