/// Loader for triangulated, normal-free Wavefront OBJ meshes
///
/// Only `v x y z` and `f a b c` lines are read; every other line is
/// ignored. Face indices are 1-based and must refer to vertices declared
/// earlier in the file.
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{char, space1, u32 as index},
    combinator::opt,
    multi::many1,
    number::complete::float,
    sequence::preceded,
    IResult,
};
use std::fmt;
use std::path::Path;

use crate::geometry::{Mesh, Rgb, Triangle};
use crate::vector::Vector3D;

/// Failure to load a mesh
#[derive(Debug)]
pub enum ObjError {
    Io(std::io::Error),
    Syntax {
        line: usize,
        message: String,
    },
    FaceIndexOutOfRange {
        line: usize,
        index: u32,
        vertex_count: usize,
    },
    NotTriangulated {
        line: usize,
        count: usize,
    },
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjError::Io(e) => write!(f, "failed to read mesh: {}", e),
            ObjError::Syntax { line, message } => write!(f, "line {}: {}", line, message),
            ObjError::FaceIndexOutOfRange {
                line,
                index,
                vertex_count,
            } => write!(
                f,
                "line {}: face index {} out of range (1..={} vertices declared)",
                line, index, vertex_count
            ),
            ObjError::NotTriangulated { line, count } => write!(
                f,
                "line {}: face has {} vertices, mesh must be triangulated",
                line, count
            ),
        }
    }
}

impl std::error::Error for ObjError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ObjError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ObjError {
    fn from(e: std::io::Error) -> Self {
        ObjError::Io(e)
    }
}

/// Read and parse an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, ObjError> {
    let text = std::fs::read_to_string(path)?;
    parse_obj(&text)
}

/// Parse OBJ text. Triangle normals come from each face's winding.
///
/// OBJ carries no colour here, so every triangle starts white; use
/// [`Mesh::with_base_color`] to repaint it.
pub fn parse_obj(input: &str) -> Result<Mesh, ObjError> {
    let mut vertices: Vec<Vector3D> = Vec::new();
    let mut mesh = Mesh::new();

    for (number, raw) in input.lines().enumerate() {
        let line_no = number + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        let syntax = |message: &str| ObjError::Syntax {
            line: line_no,
            message: format!("{}: {:?}", message, line),
        };

        match line.split_whitespace().next() {
            Some("v") => {
                let (_, vertex) = parse_vertex(line).map_err(|_| syntax("malformed vertex"))?;
                vertices.push(vertex);
            }
            Some("f") => {
                let (rest, indices) = parse_face(line).map_err(|_| syntax("malformed face"))?;
                if !rest.trim().is_empty() {
                    return Err(syntax("malformed face"));
                }
                if indices.len() != 3 {
                    return Err(ObjError::NotTriangulated {
                        line: line_no,
                        count: indices.len(),
                    });
                }

                let mut points = [Vector3D::ZERO; 3];
                for (point, &i) in points.iter_mut().zip(&indices) {
                    *point = resolve(&vertices, i).ok_or(ObjError::FaceIndexOutOfRange {
                        line: line_no,
                        index: i,
                        vertex_count: vertices.len(),
                    })?;
                }
                mesh.add_triangle(Triangle::new(points, Rgb::WHITE));
            }
            _ => {}
        }
    }

    Ok(mesh)
}

fn resolve(vertices: &[Vector3D], one_based: u32) -> Option<Vector3D> {
    let i = (one_based as usize).checked_sub(1)?;
    vertices.get(i).copied()
}

fn parse_vertex(input: &str) -> IResult<&str, Vector3D> {
    let (input, _) = tag("v")(input)?;
    let (input, x) = preceded(space1, float)(input)?;
    let (input, y) = preceded(space1, float)(input)?;
    let (input, z) = preceded(space1, float)(input)?;
    Ok((input, Vector3D::new(x, y, z)))
}

/// `12`, `12/3` or `12//4`: only the position index is kept
fn parse_face_index(input: &str) -> IResult<&str, u32> {
    let (input, i) = index(input)?;
    let (input, _) = opt(preceded(char('/'), take_till(|c: char| c.is_whitespace())))(input)?;
    Ok((input, i))
}

fn parse_face(input: &str) -> IResult<&str, Vec<u32>> {
    let (input, _) = tag("f")(input)?;
    many1(preceded(space1, parse_face_index))(input)
}
