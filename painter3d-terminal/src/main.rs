/// Painter3D Terminal Demo
///
/// Renders a triangulated OBJ mesh (or a built-in cube) with flat shading.
/// Usage: painter3d-terminal [path/to/mesh.obj]
/// Controls:
///   - W/S: Move forward/back
///   - A/D: Strafe
///   - Left/Right: Turn
///   - Space / Ctrl+key: Move down/up
///   - Q/ESC: Quit

use painter3d_core::{load_obj, Mesh, ObjError, Rgb};
use painter3d_terminal::TerminalApp;
use std::env;
use std::io;

const MODEL_COLOR: Rgb = Rgb::new(120, 180, 255);

fn load_mesh(path: &str) -> io::Result<Mesh> {
    println!("Loading mesh: {}", path);
    load_obj(path).map_err(|e| match e {
        ObjError::Io(io_err) => io::Error::new(
            io::ErrorKind::NotFound,
            format!("Failed to read mesh file: {}", io_err),
        ),
        other => io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to parse mesh: {}", other),
        ),
    })
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("painter3d-terminal", String::as_str);

    let mesh = match args.get(1) {
        Some(path) => load_mesh(path)?,
        None => {
            eprintln!("Usage: {} [mesh.obj]", program);
            eprintln!("\nNo mesh provided, using default cube...");
            Mesh::cube(2.0, Rgb::WHITE)
        }
    }
    .with_base_color(MODEL_COLOR);

    println!("Loaded {} triangles", mesh.len());
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(mesh)?;
    app.run()?;

    println!("Thank you for using Painter3D!");
    Ok(())
}
