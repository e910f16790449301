//! Integration tests for the end-to-end pipeline
//!
//! These tests drive a viewer session the way the CLI does:
//! 1. A coordinates payload is decoded and accumulated
//! 2. The slice is composited over a template
//! 3. The mesh follows the threshold and exports as OBJ or a vertex stream

use brainmap::export::{encode_png, write_obj, write_vertex_buffer};
use brainmap::session::{DirtyFlags, ViewerSession};
use brainmap_volume::{
    decode_template, decode_template_u8, CoordinatesPayload, Dims, SliceAxis, TemplateFormat,
};

const PAYLOAD: &str = r#"{
    "coordinates": ["0,-16,18", "4,-16,18", "-40,20,30", "oops", "1,2"]
}"#;

fn loaded_session() -> ViewerSession {
    let payload = CoordinatesPayload::from_json(PAYLOAD).unwrap();
    let mut session = ViewerSession::default();
    let errors = session.load_payload(&payload).len();
    assert_eq!(errors, 2);
    session
}

#[test]
fn test_payload_to_slice_and_mesh() {
    let mut session = loaded_session();
    assert_eq!(session.density().point_count(), 3);
    assert_eq!(session.density().max_value(), 2);

    session.refresh().unwrap();
    assert_eq!((session.slice().width(), session.slice().height()), (45, 54));
    assert!(!session.mesh().is_empty());
    for tri in &session.mesh().triangles {
        for &i in tri {
            assert!((i as usize) < session.mesh().vertex_count());
        }
    }
}

#[test]
fn test_lower_threshold_grows_mesh() {
    let mut session = loaded_session();
    session.set_relative_level(0.9);
    session.refresh().unwrap();
    let tight = session.mesh().vertex_count();

    session.set_relative_level(0.4);
    assert_eq!(session.refresh().unwrap(), DirtyFlags::MESH);
    let loose = session.mesh().vertex_count();
    assert!(loose > tight, "{} should exceed {}", loose, tight);
}

#[test]
fn test_composited_slice_over_template() {
    let dims = Dims::new(180, 216, 180);
    let template = decode_template_u8(vec![30u8; dims.len()], dims).unwrap();
    let mut session = loaded_session().with_template(template);
    session.set_slice(SliceAxis::Axial, 50.0);
    session.refresh().unwrap();

    let slice = session.slice();
    assert_eq!((slice.width(), slice.height()), (180, 216));
    // Away from the data the overlay is the black midpoint of the ramp
    assert_eq!(slice.pixel(0, 0), [30, 30, 30, 255]);

    let png = encode_png(slice).unwrap();
    assert!(png.len() > 8);
}

#[test]
fn test_float_template_matches_rescaled_bytes() {
    let dims = Dims::new(180, 216, 180);
    // A constant float image rescales to 0 everywhere
    let bytes: Vec<u8> = std::iter::repeat(7.5f32.to_le_bytes())
        .take(dims.len())
        .flatten()
        .collect();
    let float = decode_template(bytes, TemplateFormat::F32, dims).unwrap();
    let raw = decode_template(vec![0u8; dims.len()], TemplateFormat::U8, dims).unwrap();
    assert_eq!(float, raw);

    let mut a = loaded_session().with_template(float);
    let mut b = loaded_session().with_template(raw);
    a.refresh().unwrap();
    b.refresh().unwrap();
    assert_eq!(a.slice(), b.slice());
    assert_eq!(a.slice().pixel(0, 0), [0, 0, 0, 255]);
}

#[test]
fn test_template_size_is_checked() {
    let dims = Dims::new(180, 216, 180);
    assert!(decode_template_u8(vec![0u8; 1000], dims).is_err());
}

#[test]
fn test_mesh_exports_as_obj() {
    let mut session = loaded_session();
    session.refresh().unwrap();

    let mut out = Vec::new();
    write_obj(&mut out, session.mesh()).unwrap();
    let text = String::from_utf8(out).unwrap();
    let vertices = text.lines().filter(|l| l.starts_with("v ")).count();
    let normals = text.lines().filter(|l| l.starts_with("vn ")).count();
    let faces = text.lines().filter(|l| l.starts_with("f ")).count();
    assert_eq!(vertices, session.mesh().vertex_count());
    assert_eq!(normals, session.mesh().triangle_count());
    assert_eq!(faces, session.mesh().triangle_count());
}

#[test]
fn test_mesh_exports_as_vertex_stream() {
    let mut session = loaded_session();
    session.refresh().unwrap();
    assert!(session.mesh().triangle_count() > 0);

    let mut out = Vec::new();
    write_vertex_buffer(&mut out, session.mesh()).unwrap();
    // Three corners per triangle, six f32s per corner
    assert_eq!(out.len(), session.mesh().triangle_count() * 3 * 6 * 4);
}
