/// Rectangular cell store used by the demo and the test suites.
///
/// Cells carry a wall flag (blocks light) and a seen flag (set by the apply
/// callback, cleared before each scan). Out-of-bounds queries report walls,
/// which is the off-map-is-opaque convention opacity callbacks must follow.
#[derive(Clone)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
    walls: Vec<bool>,
    seen: Vec<bool>,
}

impl Grid {
    /// Create an open grid with all cells floor.
    pub fn new(cols: i32, rows: i32) -> Self {
        let len = (cols * rows).max(0) as usize;
        Grid {
            cols,
            rows,
            walls: vec![false; len],
            seen: vec![false; len],
        }
    }

    /// Parse a grid from a raster: one line per row, `#` wall, `.` floor,
    /// `@` floor plus remembered source position (returned separately).
    pub fn from_raster(text: &str) -> Result<(Self, Option<(i32, i32)>), String> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.is_empty() {
            return Err("empty raster".to_string());
        }
        let cols = lines[0].chars().count();
        let mut grid = Grid::new(cols as i32, lines.len() as i32);
        let mut source = None;
        for (y, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(format!("ragged raster: row {} has a different width", y));
            }
            for (x, ch) in line.chars().enumerate() {
                match ch {
                    '#' => grid.set_wall(x as i32, y as i32, true),
                    '.' => {}
                    '@' => source = Some((x as i32, y as i32)),
                    other => return Err(format!("unexpected character {:?} in raster", other)),
                }
            }
        }
        Ok((grid, source))
    }

    /// Render the layout back to raster form.
    pub fn to_raster(&self, source: Option<(i32, i32)>) -> String {
        let mut out = String::with_capacity((self.cols as usize + 1) * self.rows as usize);
        for y in 0..self.rows {
            for x in 0..self.cols {
                if source == Some((x, y)) {
                    out.push('@');
                } else if self.is_wall(x, y) {
                    out.push('#');
                } else {
                    out.push('.');
                }
            }
            out.push('\n');
        }
        out
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.cols && y >= 0 && y < self.rows
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (x + y * self.cols) as usize
    }

    /// True if the cell blocks light. Off-map counts as blocking.
    pub fn blocks_light(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.walls[self.index(x, y)]
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.walls[self.index(x, y)]
    }

    pub fn set_wall(&mut self, x: i32, y: i32, wall: bool) {
        if self.in_bounds(x, y) {
            let index = self.index(x, y);
            self.walls[index] = wall;
        }
    }

    pub fn toggle_wall(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            let index = self.index(x, y);
            self.walls[index] = !self.walls[index];
        }
    }

    pub fn is_seen(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.seen[self.index(x, y)]
    }

    /// Mark a cell lit. Off-map coordinates are ignored.
    pub fn set_seen(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            let index = self.index(x, y);
            self.seen[index] = true;
        }
    }

    /// Forget all lighting, ready for the next scan.
    pub fn clear_seen(&mut self) {
        self.seen.fill(false);
    }
}
