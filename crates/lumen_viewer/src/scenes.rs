//! Reference scenes.
//!
//! All three share the same open box: five planes, three colored point
//! lights and a camera looking in along +Z.

use std::path::Path;

use clap::ValueEnum;
use lumen_math::Vec3;
use lumen_renderer::{
    Camera, Color, CullMode, Lambert, LambertPhong, Light, Plane, Scene, Sphere, Triangle, TriangleMesh,
};

use crate::config::ViewerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Six spheres of varying glossiness
    Spheres,
    /// Three spinning triangles, one per cull mode
    Triangles,
    /// An OBJ (or built-in) mesh spinning in the middle of the room
    Mesh,
}

/// A scene plus the meshes the frame loop spins about Y.
pub struct ReferenceScene {
    pub scene: Scene,
    pub spinning: Vec<usize>,
}

pub fn build(kind: SceneKind, obj: Option<&Path>, config: &ViewerConfig) -> ReferenceScene {
    let mut scene = Scene::new(format!("{kind:?}").to_lowercase());
    scene.set_camera(
        Camera::new(Vec3::new(0.0, 3.0, -9.0), config.fov)
            .with_speeds(config.movement_speed, config.rotation_speed),
    );

    let spinning = match kind {
        SceneKind::Spheres => {
            add_room(&mut scene);
            add_spheres(&mut scene);
            Vec::new()
        }
        SceneKind::Triangles => {
            add_room(&mut scene);
            add_triangles(&mut scene)
        }
        SceneKind::Mesh => {
            add_room(&mut scene);
            add_mesh(&mut scene, obj)
        }
    };

    scene.update();
    log::info!(
        "Built scene '{}': {} primitives, {} triangles, {} lights",
        scene.name(),
        scene.primitive_count(),
        scene.triangle_count(),
        scene.lights().len()
    );

    ReferenceScene { scene, spinning }
}

fn add_room(scene: &mut Scene) {
    let gray_blue = scene.add_material(Lambert::new(Color::new(0.49, 0.57, 0.57), 1.0));

    scene.add_plane(Plane::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z, gray_blue));
    scene.add_plane(Plane::new(Vec3::ZERO, Vec3::Y, gray_blue));
    scene.add_plane(Plane::new(Vec3::new(0.0, 10.0, 0.0), -Vec3::Y, gray_blue));
    scene.add_plane(Plane::new(Vec3::new(5.0, 0.0, 0.0), -Vec3::X, gray_blue));
    scene.add_plane(Plane::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, gray_blue));

    scene.add_light(Light::point(Vec3::new(0.0, 5.0, 5.0), 50.0, Color::new(1.0, 0.61, 0.45)));
    scene.add_light(Light::point(Vec3::new(-2.5, 5.0, -5.0), 70.0, Color::new(1.0, 0.8, 0.45)));
    scene.add_light(Light::point(Vec3::new(2.5, 2.5, -5.0), 50.0, Color::new(0.34, 0.47, 0.68)));
}

fn add_spheres(scene: &mut Scene) {
    let gray = Color::splat(0.75);
    let rough = scene.add_material(LambertPhong::new(gray, 1.0, 0.5, 3.0));
    let medium = scene.add_material(LambertPhong::new(gray, 1.0, 0.5, 15.0));
    let smooth = scene.add_material(LambertPhong::new(gray, 1.0, 0.5, 50.0));
    let silver = scene.add_material(Lambert::new(Color::new(0.97, 0.96, 0.91), 1.0));
    let red = scene.add_material(Lambert::new(Color::new(0.9, 0.2, 0.2), 1.0));
    let green = scene.add_material(Lambert::new(Color::new(0.2, 0.8, 0.3), 1.0));

    for (x, y, material) in [
        (-1.75, 1.0, rough),
        (0.0, 1.0, medium),
        (1.75, 1.0, smooth),
        (-1.75, 3.0, silver),
        (0.0, 3.0, red),
        (1.75, 3.0, green),
    ] {
        scene.add_sphere(Sphere::new(Vec3::new(x, y, 0.0), 0.75, material));
    }
}

fn add_triangles(scene: &mut Scene) -> Vec<usize> {
    let white = scene.add_material(Lambert::new(Color::ONE, 1.0));
    let base = Triangle::new(
        Vec3::new(-0.75, -1.5, 0.0),
        Vec3::new(-0.75, 0.0, 0.0),
        Vec3::new(0.75, 0.0, 0.0),
        CullMode::BackFace,
        white,
    );

    [
        (CullMode::BackFace, Vec3::new(-1.75, 4.5, 0.0)),
        (CullMode::FrontFace, Vec3::new(0.0, 4.5, 0.0)),
        (CullMode::NoCulling, Vec3::new(1.75, 4.5, 0.0)),
    ]
    .into_iter()
    .map(|(cull_mode, position)| {
        let mut mesh = TriangleMesh::empty(cull_mode, white);
        mesh.append_triangle(&base, true);
        mesh.translate(position);
        mesh.update_transforms();
        scene.add_mesh(mesh)
    })
    .collect()
}

fn add_mesh(scene: &mut Scene, obj: Option<&Path>) -> Vec<usize> {
    let white = scene.add_material(Lambert::new(Color::ONE, 1.0));

    let loaded = obj.is_some_and(|path| scene.add_obj_mesh(path, CullMode::BackFace, white));
    let index = if loaded {
        scene.meshes().len() - 1
    } else {
        scene.add_mesh(octahedron(white))
    };

    if let Some(mesh) = scene.mesh_mut(index) {
        mesh.scale(Vec3::splat(2.0));
        mesh.translate(Vec3::new(0.0, 2.0, 0.0));
    }
    vec![index]
}

/// Unit octahedron, wound counter-clockwise seen from outside.
fn octahedron(material: usize) -> TriangleMesh {
    let positions = vec![
        Vec3::X,
        -Vec3::X,
        Vec3::Y,
        -Vec3::Y,
        Vec3::Z,
        -Vec3::Z,
    ];
    let indices = vec![
        0, 2, 4, //
        4, 2, 1, //
        1, 2, 5, //
        5, 2, 0, //
        4, 3, 0, //
        1, 3, 4, //
        5, 3, 1, //
        0, 3, 5, //
    ];
    TriangleMesh::new(positions, indices, CullMode::BackFace, material)
}
