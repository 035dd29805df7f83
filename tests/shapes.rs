mod common;

use common::{assert_counts, counting_settings, CountingMap};
use fovcast::{fov_circle, Shape};

const OPEN_15: [&str; 15] = [
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    ".......@.......",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
];

fn scan_open_15(shape: Shape, radius: u32) -> CountingMap {
    let (mut map, (px, py)) = CountingMap::from_raster(&OPEN_15);
    let mut settings = counting_settings();
    settings.set_shape(shape);
    fov_circle(&mut settings, &mut map, &(), px, py, radius);
    map
}

#[test]
fn circle_radius_six() {
    let map = scan_open_15(Shape::Circle, 6);
    assert_counts(
        &map.apply_rows(),
        &[
            "000000000000000",
            "000000000000000",
            "000011111110000",
            "000111111111000",
            "001111111111100",
            "001111111111100",
            "001111111111100",
            "001111101111100",
            "001111111111100",
            "001111111111100",
            "001111111111100",
            "000111111111000",
            "000011111110000",
            "000000000000000",
            "000000000000000",
        ],
        "apply counts",
    );
    assert_counts(
        &map.opaque_rows(),
        &[
            "000000000000000",
            "000000000000000",
            "000011121110000",
            "000111121111000",
            "001111121111100",
            "001111121111100",
            "001111121111100",
            "002222202222200",
            "001111121111100",
            "001111121111100",
            "001111121111100",
            "000111121111000",
            "000011121110000",
            "000000000000000",
            "000000000000000",
        ],
        "opacity counts",
    );
}

#[test]
fn octagon_radius_six() {
    let map = scan_open_15(Shape::Octagon, 6);
    assert_counts(
        &map.apply_rows(),
        &[
            "000000000000000",
            "000000000000000",
            "000001111100000",
            "000111111111000",
            "000111111111000",
            "001111111111100",
            "001111111111100",
            "001111101111100",
            "001111111111100",
            "001111111111100",
            "000111111111000",
            "000111111111000",
            "000001111100000",
            "000000000000000",
            "000000000000000",
        ],
        "apply counts",
    );
    assert_counts(
        &map.opaque_rows(),
        &[
            "000000000000000",
            "000000000000000",
            "000001121100000",
            "000111121111000",
            "000111121111000",
            "001111121111100",
            "001111121111100",
            "002222202222200",
            "001111121111100",
            "001111121111100",
            "000111121111000",
            "000111121111000",
            "000001121100000",
            "000000000000000",
            "000000000000000",
        ],
        "opacity counts",
    );
}

/// The table-driven circle must agree with the on-the-fly circle, in the
/// open and around obstacles.
#[test]
fn precalculated_circle_matches_circle() {
    for radius in [1u32, 3, 6, 11] {
        let direct = scan_open_15(Shape::Circle, radius);
        let tabled = scan_open_15(Shape::CirclePrecalculate, radius);
        assert_eq!(
            direct.apply_rows(),
            tabled.apply_rows(),
            "open field, radius {radius}"
        );
    }

    let raster = [
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
        "......#........",
        "...............",
        ".......@..##...",
        "........#......",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
    ];
    let (mut direct_map, (px, py)) = CountingMap::from_raster(&raster);
    let mut settings = counting_settings();
    settings.set_shape(Shape::Circle);
    fov_circle(&mut settings, &mut direct_map, &(), px, py, 6);

    let (mut tabled_map, _) = CountingMap::from_raster(&raster);
    let mut settings = counting_settings();
    settings.set_shape(Shape::CirclePrecalculate);
    fov_circle(&mut settings, &mut tabled_map, &(), px, py, 6);

    assert_eq!(direct_map.apply_rows(), tabled_map.apply_rows(), "pillars");
}

/// One settings value serves many radii; the table grows and stays correct.
#[test]
fn precalculated_circle_reuses_settings_across_radii() {
    let mut settings = counting_settings();
    settings.set_shape(Shape::CirclePrecalculate);
    for radius in [6u32, 2, 6, 9, 6] {
        let (mut map, (px, py)) = CountingMap::from_raster(&OPEN_15);
        fov_circle(&mut settings, &mut map, &(), px, py, radius);
        let fresh = scan_open_15(Shape::Circle, radius);
        assert_eq!(map.apply_rows(), fresh.apply_rows(), "radius {radius}");
    }
}

#[test]
fn octagon_is_contained_in_square() {
    let square = scan_open_15(Shape::Square, 6);
    let octagon = scan_open_15(Shape::Octagon, 6);
    let square_cells = square.applied_cells();
    for cell in octagon.applied_cells() {
        assert!(
            square_cells.contains(&cell),
            "octagon cell {:?} outside square",
            cell
        );
    }
}

#[test]
fn radius_zero_lights_nothing() {
    for shape in [
        Shape::Square,
        Shape::Circle,
        Shape::CirclePrecalculate,
        Shape::Octagon,
    ] {
        let map = scan_open_15(shape, 0);
        assert!(
            map.applied_cells().is_empty(),
            "{:?} applied cells at radius 0",
            shape
        );
    }
}

/// Growing the radius never unlights a cell (no obstacles in the way).
#[test]
fn square_grows_monotonically() {
    let mut previous: Vec<(i32, i32)> = Vec::new();
    for radius in 0..=7u32 {
        let map = scan_open_15(Shape::Square, radius);
        let cells = map.applied_cells();
        for cell in &previous {
            assert!(cells.contains(cell), "radius {radius} lost cell {:?}", cell);
        }
        previous = cells;
    }
}
