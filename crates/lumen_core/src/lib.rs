//! Lumen Core - asset-side geometry for the ray tracer.
//!
//! This crate provides:
//!
//! - **Mesh**: object-space positions, triangle indices and face normals
//! - **Transform**: independent translation / rotation / scale
//! - **OBJ support**: triangulated OBJ loading into a `Mesh`
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_obj;
//!
//! let mesh = load_obj("lowpoly_bunny.obj")?;
//! println!("Loaded {} triangles", mesh.triangle_count());
//! ```

pub mod mesh;
pub mod obj;
pub mod transform;

// Re-export commonly used types
pub use mesh::{face_normal, Mesh};
pub use obj::{load_obj, load_obj_from_reader, load_obj_from_str, LoadError, LoadResult};
pub use transform::Transform;
