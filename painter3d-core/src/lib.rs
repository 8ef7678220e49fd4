/// Painter3D Core Library - Flat-shaded software rasterization pipeline
///
/// This library turns a triangle mesh, a camera and a set of lights into
/// depth-ordered, flat-shaded screen polygons. It covers the vector and
/// matrix algebra, plane clipping, view/projection matrices, per-triangle
/// lighting and a loader for triangulated OBJ meshes. Drawing the polygons
/// is left to a `DrawSurface` implementation.

pub mod clip;
pub mod geometry;
pub mod lighting;
pub mod obj;
pub mod pipeline;
pub mod projection;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use clip::{clip_against_planes, clip_triangle, Plane};
pub use geometry::{Mesh, Rgb, Triangle};
pub use lighting::{Light, LightBlend};
pub use obj::{load_obj, parse_obj, ObjError};
pub use pipeline::{DrawSurface, FramePipeline, ShadedPolygon};
pub use projection::{Camera, OrthonormalFrame, Viewport};
pub use transform::{Matrix4x4, Orientation};
pub use vector::{intersect_plane, Vector3D};
