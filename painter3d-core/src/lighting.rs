/// Directional lights and flat per-triangle shading
use crate::geometry::{Rgb, Triangle};
use crate::vector::Vector3D;

/// A directional light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    direction: Vector3D,
    pub color: Rgb,
}

impl Light {
    /// `direction` is normalized on construction
    pub fn new(direction: Vector3D, color: Rgb) -> Self {
        Self {
            direction: direction.normalize(),
            color,
        }
    }

    pub fn direction(&self) -> Vector3D {
        self.direction
    }

    /// `max(0, normal . direction)`
    pub fn strength(&self, normal: &Vector3D) -> f32 {
        normal.dot(&self.direction).max(0.0)
    }
}

/// How the contributions of several lights combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightBlend {
    /// Each light overwrites the previous result, so only the last light
    /// in the list shows. A single dominant light.
    #[default]
    LastLightWins,
    /// Contributions of all lights are summed, then clamped.
    Accumulate,
}

/// Per-channel `light * s/2 + base * s/2` for one light, unclamped
fn contribution(light: &Light, triangle: &Triangle) -> [f32; 3] {
    let strength = light.strength(&triangle.normal());
    let light_rgb = light.color.channels();
    let base_rgb = triangle.base_color.channels();
    let mut out = [0.0; 3];
    for c in 0..3 {
        // Truncate per light like an integer channel
        out[c] = (light_rgb[c] * strength / 2.0 + base_rgb[c] * strength / 2.0).trunc();
    }
    out
}

/// Flat shade colour of `triangle` under `lights`. No lights gives black.
pub fn shade(triangle: &Triangle, lights: &[Light], blend: LightBlend) -> Rgb {
    match blend {
        LightBlend::LastLightWins => lights
            .last()
            .map(|light| Rgb::clamped(contribution(light, triangle)))
            .unwrap_or(Rgb::BLACK),
        LightBlend::Accumulate => {
            let mut sum = [0.0f32; 3];
            for light in lights {
                let term = contribution(light, triangle);
                for c in 0..3 {
                    sum[c] += term[c];
                }
            }
            Rgb::clamped(sum)
        }
    }
}
