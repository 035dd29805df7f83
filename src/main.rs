use arboard::Clipboard;
use fovcast::config::Config;
use fovcast::session_log::{Action, SessionLog};
use fovcast::snapshot::LayoutSnapshot;
use fovcast::{fov_beam, fov_circle, Direction, FovSettings, Grid, OpaqueApply, Shape};
use macroquad::prelude::*;
use std::sync::OnceLock;

const SNAPSHOT_PATH: &str = "layout_snapshot.json";

fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(Config::load)
}

/// Demo state: the grid, the scan settings and the current scan parameters.
struct DemoState {
    grid: Grid,
    settings: FovSettings<Grid>,
    source_x: i32,
    source_y: i32,
    radius: u32,
    beam: bool,
    direction: Direction,
    angle: f32,
    cell_size: f32,
    log: Option<SessionLog>,
}

impl DemoState {
    fn new(config: &Config) -> Self {
        let mut grid = Grid::new(config.grid.cols, config.grid.rows);
        let mut source_x = config.source.x;
        let mut source_y = config.source.y;

        if !config.layout.path.is_empty() {
            match std::fs::read_to_string(&config.layout.path) {
                Ok(text) => match Grid::from_raster(&text) {
                    Ok((loaded, source)) => {
                        grid = loaded;
                        if let Some((x, y)) = source {
                            source_x = x;
                            source_y = y;
                        }
                        println!("Loaded layout from {}", config.layout.path);
                    }
                    Err(e) => eprintln!("Warning: bad layout file: {}", e),
                },
                Err(e) => eprintln!("Warning: cannot read {}: {}", config.layout.path, e),
            }
        }

        let mut settings = FovSettings::new();
        settings.set_shape(config.fov.shape());
        settings.set_opaque_apply(if config.fov.apply_to_opaque {
            OpaqueApply::Apply
        } else {
            OpaqueApply::NoApply
        });
        settings.set_opacity_test(|grid: &Grid, x, y| grid.blocks_light(x, y));
        settings.set_apply_lighting(|grid: &mut Grid, x, y, _, _, _| grid.set_seen(x, y));

        let mut state = DemoState {
            grid,
            settings,
            source_x,
            source_y,
            radius: config.source.radius,
            beam: config.beam.enabled,
            direction: config.beam.direction(),
            angle: config.beam.angle,
            cell_size: config.grid.cell_size,
            log: config.logging.enable_session_log.then(SessionLog::new),
        };
        state.refresh();
        state
    }

    fn log(&mut self, action: Action) {
        if let Some(log) = &mut self.log {
            log.log(action);
        }
    }

    /// Re-run the scan after any change.
    fn refresh(&mut self) {
        self.grid.clear_seen();
        if self.beam {
            fov_beam(
                &mut self.settings,
                &mut self.grid,
                &(),
                self.source_x,
                self.source_y,
                self.radius,
                self.direction,
                self.angle,
            );
        } else {
            fov_circle(
                &mut self.settings,
                &mut self.grid,
                &(),
                self.source_x,
                self.source_y,
                self.radius,
            );
        }
    }

    /// Point the beam, and step the source when not beaming (or when the
    /// beam already points that way).
    fn steer(&mut self, direction: Direction) {
        if !self.beam || self.direction == direction {
            let (dx, dy) = direction.step();
            let nx = self.source_x + dx;
            let ny = self.source_y + dy;
            if self.grid.in_bounds(nx, ny) {
                self.source_x = nx;
                self.source_y = ny;
                self.log(Action::MoveSource { x: nx, y: ny });
            }
        }
        if self.direction != direction {
            self.direction = direction;
            self.log(Action::SetDirection {
                direction: format!("{:?}", direction),
            });
        }
        self.refresh();
    }

    fn set_shape(&mut self, shape: Shape, name: &str) {
        self.settings.set_shape(shape);
        self.log(Action::SetShape {
            shape: name.to_string(),
        });
        println!("{} limit", name);
        self.refresh();
    }

    fn toggle_wall_at(&mut self, mouse_x: f32, mouse_y: f32) {
        let x = (mouse_x / self.cell_size) as i32;
        let y = (mouse_y / self.cell_size) as i32;
        if self.grid.in_bounds(x, y) && (x, y) != (self.source_x, self.source_y) {
            self.grid.toggle_wall(x, y);
            self.log(Action::ToggleWall { x, y });
            self.refresh();
        }
    }

    fn copy_to_clipboard(&self) {
        let raster = self.grid.to_raster(Some((self.source_x, self.source_y)));
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&raster) {
                    println!("Failed to copy to clipboard: {}", e);
                } else {
                    println!("Layout copied to clipboard");
                    // Give clipboard managers a moment to capture the text
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => println!("Failed to access clipboard: {}", e),
        }
    }

    fn paste_from_clipboard(&mut self) {
        let text = match Clipboard::new().and_then(|mut c| c.get_text()) {
            Ok(text) => text,
            Err(e) => {
                println!("Failed to read clipboard: {}", e);
                return;
            }
        };
        match Grid::from_raster(&text) {
            Ok((grid, source)) => {
                if let Some((x, y)) = source {
                    self.source_x = x;
                    self.source_y = y;
                } else {
                    self.source_x = self.source_x.min(grid.cols - 1);
                    self.source_y = self.source_y.min(grid.rows - 1);
                }
                self.log(Action::PasteLayout {
                    cols: grid.cols,
                    rows: grid.rows,
                });
                self.grid = grid;
                println!("Layout pasted from clipboard");
                self.refresh();
            }
            Err(e) => println!("Clipboard does not hold a layout: {}", e),
        }
    }

    fn save_snapshot(&mut self) {
        let snapshot = LayoutSnapshot::from_grid(&self.grid, (self.source_x, self.source_y));
        match snapshot.save_to_file(SNAPSHOT_PATH) {
            Ok(()) => {
                println!("Snapshot saved to {}", SNAPSHOT_PATH);
                self.log(Action::SaveSnapshot {
                    path: SNAPSHOT_PATH.to_string(),
                });
            }
            Err(e) => println!("{}", e),
        }
    }

    fn load_snapshot(&mut self) {
        match LayoutSnapshot::load_from_file(SNAPSHOT_PATH) {
            Ok(snapshot) => {
                let (grid, (x, y)) = snapshot.restore();
                self.grid = grid;
                self.source_x = x;
                self.source_y = y;
                println!("Snapshot loaded from {}", SNAPSHOT_PATH);
                self.log(Action::LoadSnapshot {
                    path: SNAPSHOT_PATH.to_string(),
                });
                self.refresh();
            }
            Err(e) => println!("{}", e),
        }
    }

    fn draw(&self, config: &Config) {
        let visual = &config.visual;
        clear_background(Color::from_rgba(
            visual.background_r,
            visual.background_g,
            visual.background_b,
            255,
        ));

        for y in 0..self.grid.rows {
            for x in 0..self.grid.cols {
                let px = x as f32 * self.cell_size;
                let py = y as f32 * self.cell_size;
                let color = if (x, y) == (self.source_x, self.source_y) {
                    BLUE
                } else if self.grid.is_wall(x, y) {
                    if self.grid.is_seen(x, y) {
                        Color::from_rgba(190, 130, 70, 255)
                    } else {
                        Color::from_rgba(80, 60, 45, 255)
                    }
                } else if self.grid.is_seen(x, y) {
                    Color::from_rgba(215, 200, 120, 255)
                } else {
                    Color::from_rgba(55, 55, 55, 255)
                };
                draw_rectangle(px, py, self.cell_size - 1.0, self.cell_size - 1.0, color);
            }
        }

        let mode = if self.beam {
            format!("beam {:?} {:.0} deg", self.direction, self.angle)
        } else {
            "circle".to_string()
        };
        let info = format!(
            "source ({}, {})  radius {}  shape {:?}  {}  opaque {:?}\nH for keyboard help",
            self.source_x,
            self.source_y,
            self.radius,
            self.settings.shape(),
            mode,
            self.settings.opaque_apply(),
        );
        draw_text(
            &info,
            10.0,
            self.grid.rows as f32 * self.cell_size + 24.0,
            20.0,
            WHITE,
        );
    }
}

fn print_help() {
    println!("----------------------------------------------------");
    println!("Keyboard Help");
    println!("Arrows / keypad: move the source, point the beam");
    println!("=: Increase radius");
    println!("-: Decrease radius");
    println!("]: Increase angle (in beam mode)");
    println!("[: Decrease angle (in beam mode)");
    println!("A: Toggle lighting on opaque cells");
    println!("B: Toggle beam mode");
    println!("C: Circle shape");
    println!("O: Octagon shape");
    println!("P: Precalculated circle shape");
    println!("S: Square shape");
    println!("Left click: toggle a wall");
    println!("Y: Copy layout to clipboard");
    println!("V: Paste layout from clipboard");
    println!("F5/F9: Save/load layout snapshot");
    println!("H: Print this message");
    println!("Esc, Q: Quit");
    println!("----------------------------------------------------");
}

fn window_conf() -> Conf {
    let config = config();
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: (config.grid.cols as f32 * config.grid.cell_size) as i32,
        window_height: (config.grid.rows as f32 * config.grid.cell_size) as i32 + 60,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config();
    let mut state = DemoState::new(config);
    print_help();

    loop {
        if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::Kp8) {
            state.steer(Direction::North);
        }
        if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::Kp2) {
            state.steer(Direction::South);
        }
        if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::Kp4) {
            state.steer(Direction::West);
        }
        if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::Kp6) {
            state.steer(Direction::East);
        }
        if is_key_pressed(KeyCode::Kp7) {
            state.steer(Direction::Northwest);
        }
        if is_key_pressed(KeyCode::Kp9) {
            state.steer(Direction::Northeast);
        }
        if is_key_pressed(KeyCode::Kp1) {
            state.steer(Direction::Southwest);
        }
        if is_key_pressed(KeyCode::Kp3) {
            state.steer(Direction::Southeast);
        }

        if is_key_pressed(KeyCode::Equal) {
            state.radius += 1;
            state.log(Action::SetRadius {
                radius: state.radius,
            });
            println!("Increased radius to {}", state.radius);
            state.refresh();
        }
        if is_key_pressed(KeyCode::Minus) && state.radius > 1 {
            state.radius -= 1;
            state.log(Action::SetRadius {
                radius: state.radius,
            });
            println!("Decreased radius to {}", state.radius);
            state.refresh();
        }
        if is_key_pressed(KeyCode::RightBracket) {
            state.angle = (state.angle + 5.0).min(360.0);
            state.log(Action::SetAngle { angle: state.angle });
            println!("Increased angle to {:.1}", state.angle);
            state.refresh();
        }
        if is_key_pressed(KeyCode::LeftBracket) {
            state.angle = (state.angle - 5.0).max(0.0);
            state.log(Action::SetAngle { angle: state.angle });
            println!("Decreased angle to {:.1}", state.angle);
            state.refresh();
        }

        if is_key_pressed(KeyCode::S) {
            state.set_shape(Shape::Square, "Square");
        }
        if is_key_pressed(KeyCode::C) {
            state.set_shape(Shape::Circle, "Circle");
        }
        if is_key_pressed(KeyCode::P) {
            state.set_shape(Shape::CirclePrecalculate, "Precalculated circle");
        }
        if is_key_pressed(KeyCode::O) {
            state.set_shape(Shape::Octagon, "Octagon");
        }
        if is_key_pressed(KeyCode::A) {
            let policy = match state.settings.opaque_apply() {
                OpaqueApply::Apply => OpaqueApply::NoApply,
                OpaqueApply::NoApply => OpaqueApply::Apply,
            };
            state.settings.set_opaque_apply(policy);
            state.log(Action::ToggleOpaqueApply {
                apply: policy == OpaqueApply::Apply,
            });
            println!("Toggling applying to opaque cells ({:?})", policy);
            state.refresh();
        }
        if is_key_pressed(KeyCode::B) {
            state.beam = !state.beam;
            state.log(Action::ToggleBeam {
                enabled: state.beam,
            });
            println!("Toggling beam ({})", state.beam);
            state.refresh();
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            let (mx, my) = mouse_position();
            state.toggle_wall_at(mx, my);
        }
        if is_key_pressed(KeyCode::Y) {
            state.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::V) {
            state.paste_from_clipboard();
        }
        if is_key_pressed(KeyCode::F5) {
            state.save_snapshot();
        }
        if is_key_pressed(KeyCode::F9) {
            state.load_snapshot();
        }
        if is_key_pressed(KeyCode::H) {
            print_help();
        }
        if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
            break;
        }

        state.draw(config);
        next_frame().await
    }

    if let Some(log) = &state.log {
        println!("{}", log.summary());
        if let Err(e) = log.save_to_file(&config.logging.session_log_path) {
            eprintln!("Failed to save session log: {}", e);
        } else {
            println!("Session log saved to {}", config.logging.session_log_path);
        }
    }
}
