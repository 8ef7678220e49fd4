/// Terminal drawing surface for flat-shaded polygons
use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use painter3d_core::{DrawSurface, Rgb};
use std::io::Write;

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '▀';

/// Colour buffer where every terminal cell holds two vertical pixels.
///
/// There is no depth buffer; later polygons simply paint over earlier ones.
pub struct TerminalCanvas {
    width: usize,
    height: usize,
    background: Rgb,
    pixels: Vec<Rgb>,
}

impl TerminalCanvas {
    /// Canvas for a terminal of `columns` x `rows` cells
    pub fn for_terminal(columns: u16, rows: u16, background: Rgb) -> Self {
        Self::new(columns as usize, rows as usize * 2, background)
    }

    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self {
            width,
            height,
            background,
            pixels: vec![background; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![self.background; width * height];
    }

    /// Fill the triangle `v0 v1 v2` by testing pixel centres
    fn fill_triangle(&mut self, v0: (f32, f32), v1: (f32, f32), v2: (f32, f32), color: Rgb) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        // Bounding box, clipped to the canvas
        let min_x = v0.0.min(v1.0).min(v2.0).floor().max(0.0) as usize;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil().min(self.width as f32 - 1.0);
        let min_y = v0.1.min(v1.1).min(v2.1).floor().max(0.0) as usize;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil().min(self.height as f32 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        let (max_x, max_y) = (max_x as usize, max_y as usize);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.pixels[y * self.width + x] = color;
                    }
                }
            }
        }
    }

    /// Write the canvas as half-block characters, one terminal row per
    /// two pixel rows
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.height.div_ceil(2) {
            for x in 0..self.width {
                let top = self.pixels[2 * row * self.width + x];
                let bottom = self
                    .pixel(x, 2 * row + 1)
                    .unwrap_or(self.background);

                writer.queue(SetForegroundColor(to_color(top)))?;
                writer.queue(SetBackgroundColor(to_color(bottom)))?;
                writer.queue(Print(HALF_BLOCK))?;
            }
            writer.queue(ResetColor)?;
            if row + 1 < self.height.div_ceil(2) {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for TerminalCanvas {
    /// Fan-fill a convex polygon
    fn draw_filled_polygon(&mut self, points: &[(f32, f32)], color: Rgb) {
        if points.len() < 3 {
            return;
        }
        for i in 1..points.len() - 1 {
            self.fill_triangle(points[0], points[i], points[i + 1], color);
        }
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Calculate barycentric coordinates for a point in a triangle.
/// `None` for degenerate (zero-area) triangles.
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
