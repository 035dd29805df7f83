use fovcast::{FovSettings, Grid, Shape};
use serde::Deserialize;
use std::cell::RefCell;
use std::path::Path;

/// Host map for the suites: a wall layout plus per-cell counters for both
/// callbacks, so tests can check not only which cells were lit but how
/// often each cell was applied and how often its opacity was queried.
pub struct CountingMap {
    pub grid: Grid,
    pub apply_counts: Vec<u32>,
    pub opaque_counts: RefCell<Vec<u32>>,
    pub offsets: Vec<(i32, i32)>,
}

impl CountingMap {
    /// Build from raster rows: `#` wall, `.` floor, `@` floor + source.
    pub fn from_raster(rows: &[&str]) -> (Self, (i32, i32)) {
        let (grid, source) = Grid::from_raster(&rows.join("\n")).expect("valid raster");
        let source = source.expect("raster must mark the source with @");
        let len = (grid.cols * grid.rows) as usize;
        let map = CountingMap {
            grid,
            apply_counts: vec![0; len],
            opaque_counts: RefCell::new(vec![0; len]),
            offsets: vec![(0, 0); len],
        };
        (map, source)
    }

    pub fn apply_rows(&self) -> Vec<String> {
        render_counts(&self.apply_counts, self.grid.cols)
    }

    pub fn opaque_rows(&self) -> Vec<String> {
        render_counts(&self.opaque_counts.borrow(), self.grid.cols)
    }

    pub fn applied_cells(&self) -> Vec<(i32, i32)> {
        let mut cells = Vec::new();
        for y in 0..self.grid.rows {
            for x in 0..self.grid.cols {
                if self.apply_counts[(x + y * self.grid.cols) as usize] > 0 {
                    cells.push((x, y));
                }
            }
        }
        cells
    }
}

fn render_counts(counts: &[u32], cols: i32) -> Vec<String> {
    counts
        .chunks(cols as usize)
        .map(|row| {
            row.iter()
                .map(|&c| char::from_digit(c.min(9), 10).unwrap())
                .collect()
        })
        .collect()
}

/// Settings wired to a CountingMap: opacity queries bump the opaque
/// counter, applies bump the apply counter and remember the offsets.
/// Off-map coordinates are opaque and never counted, matching the
/// conventions a conforming host follows.
pub fn counting_settings() -> FovSettings<CountingMap> {
    let mut settings = FovSettings::new();
    settings.set_opacity_test(|map: &CountingMap, x, y| {
        if !map.grid.in_bounds(x, y) {
            return true;
        }
        map.opaque_counts.borrow_mut()[(x + y * map.grid.cols) as usize] += 1;
        map.grid.is_wall(x, y)
    });
    settings.set_apply_lighting(|map: &mut CountingMap, x, y, dx, dy, _| {
        if !map.grid.in_bounds(x, y) {
            return;
        }
        let index = (x + y * map.grid.cols) as usize;
        map.apply_counts[index] += 1;
        map.offsets[index] = (dx, dy);
        map.grid.set_seen(x, y);
    });
    settings
}

/// Compare rendered count rows against the expected grid, with a readable
/// dump on mismatch.
pub fn assert_counts(actual: &[String], expected: &[&str], label: &str) {
    let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    assert_eq!(
        actual,
        &expected[..],
        "{} mismatch\nexpected:\n{}\nactual:\n{}",
        label,
        expected.join("\n"),
        actual.join("\n")
    );
}

/// Mirror raster/count rows left-right.
pub fn flip_horizontal(rows: &[String]) -> Vec<String> {
    rows.iter().map(|row| row.chars().rev().collect()).collect()
}

/// Mirror raster/count rows top-bottom.
pub fn flip_vertical(rows: &[String]) -> Vec<String> {
    rows.iter().rev().cloned().collect()
}

/// A scan scenario stored as JSON under test_data/fixtures.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub radius: u32,
    pub shape: String,
    pub raster: Vec<String>,
    pub expected_apply: Vec<String>,
}

pub fn load_fixture(path: &Path) -> Result<Fixture, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let fixture: Fixture = serde_json::from_str(&contents)?;
    Ok(fixture)
}

pub fn shape_by_name(name: &str) -> Shape {
    match name {
        "square" => Shape::Square,
        "circle" => Shape::Circle,
        "circle_precalculate" => Shape::CirclePrecalculate,
        "octagon" => Shape::Octagon,
        other => panic!("unknown shape {:?} in fixture", other),
    }
}
