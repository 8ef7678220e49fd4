/// Terminal front end: frame loop, keyboard camera and half-block canvas
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use painter3d_core::{Camera, FramePipeline, Light, Mesh, Rgb, Vector3D, Viewport};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod controls;
pub mod renderer;

pub use controls::CameraAction;
pub use renderer::TerminalCanvas;

const BACKGROUND: Rgb = Rgb::new(255, 255, 255);

const HELP: &str = "W/S=Move A/D=Strafe Arrows=Turn Space/Ctrl=Down/Up Q=Quit";

/// Offset applied once to the loaded model so it sits in front of the camera
pub const MODEL_OFFSET: Vector3D = Vector3D::new(0.0, 0.0, 3.0);

/// The default white key light, pointing mostly down
pub fn main_light() -> Light {
    Light::new(Vector3D::new(0.3, -1.0, -0.3), Rgb::WHITE)
}

/// Viewport matching a terminal of `columns` x `rows` cells
pub fn terminal_viewport(columns: u16, rows: u16) -> Viewport {
    Viewport::new(columns.max(1) as u32, (rows.max(1) as u32) * 2)
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: Mesh,
    lights: Vec<Light>,
    camera: Camera,
    pipeline: FramePipeline,
    canvas: TerminalCanvas,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    polygons: usize,
}

impl TerminalApp {
    /// `mesh` is shown as loaded, offset by `MODEL_OFFSET`
    pub fn new(mesh: Mesh) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;

        Ok(Self {
            mesh: mesh.translated(MODEL_OFFSET),
            lights: vec![main_light()],
            camera: Camera::default(),
            pipeline: FramePipeline::new(terminal_viewport(columns, rows)),
            canvas: TerminalCanvas::for_terminal(columns, rows, BACKGROUND),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            polygons: 0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input before rendering
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => match CameraAction::from_key(&key) {
                Some(CameraAction::Quit) => self.running = false,
                Some(action) => action.apply(&mut self.camera),
                None => {}
            },
            Event::Resize(columns, rows) => {
                self.pipeline.set_viewport(terminal_viewport(columns, rows));
                self.canvas.resize(columns as usize, rows as usize * 2);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.canvas.clear();
        self.polygons = self
            .pipeline
            .draw(&self.camera, &self.mesh, &self.lights, &mut self.canvas);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::DarkBlue),
            Print(format!(
                "Painter3D | FPS: {:.1} | Polygons: {} | {}",
                self.fps, self.polygons, HELP
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_viewport_doubles_rows() {
        let viewport = terminal_viewport(120, 40);
        assert_eq!((viewport.width, viewport.height), (120, 80));
        assert_eq!(terminal_viewport(0, 0).width, 1);
    }

    #[test]
    fn test_demo_scene_renders_onto_canvas() {
        let viewport = terminal_viewport(80, 24);
        let mesh = Mesh::cube(2.0, Rgb::new(40, 120, 200))
            .translated(MODEL_OFFSET);
        let mut canvas = TerminalCanvas::for_terminal(80, 24, BACKGROUND);
        let pipeline = FramePipeline::new(viewport);

        let lights = [main_light()];
        let count = pipeline.draw(&Camera::default(), &mesh, &lights, &mut canvas);
        assert!(count > 0);
        // cube front face covers the middle of the screen
        assert_ne!(canvas.pixel(40, 24), Some(BACKGROUND));
    }
}
