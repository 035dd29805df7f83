use crate::direction::Direction;
use crate::shape::Shape;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub beam: BeamConfig,
    #[serde(default)]
    pub fov: FovConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_x")]
    pub x: i32,
    #[serde(default = "default_source_y")]
    pub y: i32,
    #[serde(default = "default_radius")]
    pub radius: u32,
}

#[derive(Debug, Deserialize)]
pub struct BeamConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default = "default_angle")]
    pub angle: f32,
}

#[derive(Debug, Deserialize)]
pub struct FovConfig {
    #[serde(default = "default_shape")]
    pub shape: String,
    #[serde(default = "default_apply_to_opaque")]
    pub apply_to_opaque: bool,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
}

#[derive(Debug, Deserialize)]
pub struct LayoutConfig {
    /// Raster file loaded at startup; empty means start with an open grid.
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_enable_session_log")]
    pub enable_session_log: bool,
    #[serde(default = "default_session_log_path")]
    pub session_log_path: String,
}

// Default values
fn default_cols() -> i32 { 40 }
fn default_rows() -> i32 { 30 }
fn default_cell_size() -> f32 { 20.0 }
fn default_source_x() -> i32 { 20 }
fn default_source_y() -> i32 { 15 }
fn default_radius() -> u32 { 12 }
fn default_direction() -> String { "east".to_string() }
fn default_angle() -> f32 { 130.0 }
fn default_shape() -> String { "circle".to_string() }
fn default_apply_to_opaque() -> bool { true }
fn default_window_title() -> String { "fovcast - FOV Demo".to_string() }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_enable_session_log() -> bool { false }
fn default_session_log_path() -> String { "session_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            x: default_source_x(),
            y: default_source_y(),
            radius: default_radius(),
        }
    }
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            direction: default_direction(),
            angle: default_angle(),
        }
    }
}

impl Default for FovConfig {
    fn default() -> Self {
        Self {
            shape: default_shape(),
            apply_to_opaque: default_apply_to_opaque(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_session_log: default_enable_session_log(),
            session_log_path: default_session_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            source: SourceConfig::default(),
            beam: BeamConfig::default(),
            fov: FovConfig::default(),
            visual: VisualConfig::default(),
            layout: LayoutConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl BeamConfig {
    /// Configured direction, falling back to east on an unknown name.
    pub fn direction(&self) -> Direction {
        match self.direction.to_lowercase().as_str() {
            "east" | "e" => Direction::East,
            "southeast" | "se" => Direction::Southeast,
            "south" | "s" => Direction::South,
            "southwest" | "sw" => Direction::Southwest,
            "west" | "w" => Direction::West,
            "northwest" | "nw" => Direction::Northwest,
            "north" | "n" => Direction::North,
            "northeast" | "ne" => Direction::Northeast,
            other => {
                eprintln!("Warning: unknown beam direction {:?}, using east", other);
                Direction::East
            }
        }
    }
}

impl FovConfig {
    /// Configured shape, falling back to circle on an unknown name.
    pub fn shape(&self) -> Shape {
        match self.shape.to_lowercase().as_str() {
            "square" => Shape::Square,
            "circle" => Shape::Circle,
            "circle_precalculate" | "precalculate" => Shape::CirclePrecalculate,
            "octagon" => Shape::Octagon,
            other => {
                eprintln!("Warning: unknown fov shape {:?}, using circle", other);
                Shape::Circle
            }
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    println!("Loaded configuration from config.toml");
                    config
                }
                Err(e) => {
                    eprintln!("Warning: Failed to parse config.toml: {}", e);
                    eprintln!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                println!("No config.toml found, using default configuration");
                Config::default()
            }
        }
    }
}
