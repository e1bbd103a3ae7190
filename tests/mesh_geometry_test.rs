use cgmath::{InnerSpace, Vector3};
use party_scene::data_structures::mesh::{MeshData, MeshKind};

fn position(mesh: &MeshData, index: u32) -> Vector3<f32> {
    mesh.vertices[index as usize].position.into()
}

/// A point strictly inside the (convex) shape.
fn interior(kind: MeshKind) -> Vector3<f32> {
    match kind {
        MeshKind::Plane => Vector3::new(0.0, -1.0, 0.0),
        MeshKind::Sphere | MeshKind::Box => Vector3::new(0.0, 0.0, 0.0),
        MeshKind::Cylinder => Vector3::new(0.0, 0.5, 0.0),
        MeshKind::Cone => Vector3::new(0.0, 0.3, 0.0),
        MeshKind::Pyramid4 => Vector3::new(0.0, -0.25, 0.0),
    }
}

#[test]
fn indices_form_triangles_within_bounds() {
    for kind in MeshKind::ALL {
        let mesh = kind.geometry();
        assert!(!mesh.indices.is_empty(), "{kind:?}");
        assert_eq!(mesh.indices.len() % 3, 0, "{kind:?}");
        assert_eq!(mesh.triangle_count() * 3, mesh.indices.len());
        let len = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < len), "{kind:?}");
    }
}

#[test]
fn triangles_wind_counter_clockwise_from_outside() {
    for kind in MeshKind::ALL {
        let mesh = kind.geometry();
        let inside = interior(kind);
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| position(&mesh, i));
            let face = (b - a).cross(c - a);
            // Sphere poles produce collapsed triangles.
            if face.magnitude() < 1e-6 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(
                face.dot(centroid - inside) > 0.0,
                "{kind:?} triangle {tri:?} faces inwards"
            );
        }
    }
}

#[test]
fn normals_have_unit_length() {
    for kind in MeshKind::ALL {
        for vertex in kind.geometry().vertices {
            let normal = Vector3::from(vertex.normal);
            assert!(
                (normal.magnitude() - 1.0).abs() < 1e-5,
                "{kind:?} normal {normal:?}"
            );
        }
    }
}

#[test]
fn texture_coordinates_stay_in_the_unit_square() {
    for kind in MeshKind::ALL {
        for vertex in kind.geometry().vertices {
            let [u, v] = vertex.tex_coords;
            assert!((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v), "{kind:?}");
        }
    }
}

#[test]
fn shapes_follow_their_object_space_conventions() {
    let extent = |mesh: &MeshData, axis: usize| {
        mesh.vertices.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            (lo.min(v.position[axis]), hi.max(v.position[axis]))
        })
    };
    let near = |(lo, hi): (f32, f32), (elo, ehi): (f32, f32)| {
        (lo - elo).abs() < 1e-5 && (hi - ehi).abs() < 1e-5
    };

    let plane = MeshData::plane();
    assert!(near(extent(&plane, 0), (-1.0, 1.0)));
    assert!(near(extent(&plane, 1), (0.0, 0.0)));
    assert!(near(extent(&plane, 2), (-1.0, 1.0)));

    let cube = MeshData::cube();
    for axis in 0..3 {
        assert!(near(extent(&cube, axis), (-0.5, 0.5)));
    }
    assert_eq!(cube.vertices.len(), 24);
    assert_eq!(cube.triangle_count(), 12);

    for mesh in [MeshData::cylinder(36), MeshData::cone(36)] {
        assert!(near(extent(&mesh, 1), (0.0, 1.0)));
        assert!(near(extent(&mesh, 0), (-1.0, 1.0)));
    }

    let sphere = MeshData::sphere(36, 18);
    assert!(near(extent(&sphere, 1), (-1.0, 1.0)));
    for vertex in &sphere.vertices {
        let p = Vector3::from(vertex.position);
        assert!((p.magnitude() - 1.0).abs() < 1e-5);
    }

    let pyramid = MeshData::pyramid4();
    assert!(near(extent(&pyramid, 1), (-0.5, 0.5)));
    assert_eq!(pyramid.triangle_count(), 6);
}
