use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fs;

/// Serialisable capture of a grid layout plus the source position.
///
/// Wall cells are stored as flat cell IDs (x + y * cols).
#[derive(Debug, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub cols: i32,
    pub rows: i32,
    pub wall_cells: Vec<i32>,
    pub source_x: i32,
    pub source_y: i32,
}

impl LayoutSnapshot {
    /// Capture the current layout.
    pub fn from_grid(grid: &Grid, source: (i32, i32)) -> Self {
        let mut wall_cells = Vec::new();
        for y in 0..grid.rows {
            for x in 0..grid.cols {
                if grid.is_wall(x, y) {
                    wall_cells.push(x + y * grid.cols);
                }
            }
        }
        LayoutSnapshot {
            cols: grid.cols,
            rows: grid.rows,
            wall_cells,
            source_x: source.0,
            source_y: source.1,
        }
    }

    /// Save to file
    pub fn save_to_file(&self, path: &str) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize snapshot: {}", e))?;
        fs::write(path, json).map_err(|e| format!("Failed to write snapshot file: {}", e))?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: &str) -> Result<Self, String> {
        let json =
            fs::read_to_string(path).map_err(|e| format!("Failed to read snapshot file: {}", e))?;
        serde_json::from_str(&json).map_err(|e| format!("Failed to parse snapshot file: {}", e))
    }

    /// Rebuild the grid and source position.
    pub fn restore(&self) -> (Grid, (i32, i32)) {
        let mut grid = Grid::new(self.cols, self.rows);
        for &cell_id in &self.wall_cells {
            grid.set_wall(cell_id % self.cols, cell_id / self.cols, true);
        }
        (grid, (self.source_x, self.source_y))
    }
}
