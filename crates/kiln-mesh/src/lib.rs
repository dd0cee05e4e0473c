//! Wavefront OBJ mesh loading and GPU vertex-buffer layout.
//!
//! This crate turns the `v` / `vn` / `f` subset of OBJ into flat arrays that
//! can be uploaded to a vertex buffer and an index buffer as-is. It has no
//! GPU dependencies; `kiln-engine` owns the wgpu side.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`parser`] | `parse_str`, `parse_reader`, `load_path`, `ParseOptions` |
//! | [`raw`] | `RawMeshData` attribute streams |
//! | [`layout`] | `VertexLayout`, `VertexAttribute`, `Semantic` |
//! | [`assemble`] | `assemble`, `AssembledMesh` |
//! | [`error`] | `MeshError`, `LayoutError` |
//!
//! # Quick start
//!
//! ```rust
//! use kiln_mesh::{assemble, parse_str, VertexLayout};
//!
//! let src = "
//!     v 0.0 0.0 0.0
//!     v 1.0 0.0 0.0
//!     v 0.0 1.0 0.0
//!     f 1 2 3
//! ";
//!
//! let raw = parse_str(src).unwrap();
//! let mesh = assemble(&raw, &VertexLayout::position_only()).unwrap();
//! assert_eq!(mesh.index_data(), &[0, 1, 2]);
//! ```
//!
//! # Limitations
//!
//! Faces must be triangles. Each source position becomes exactly one output
//! vertex, so a position shared by faces with different normals keeps the
//! normal of the first face that references it.

pub mod assemble;
mod directive;
pub mod error;
pub mod layout;
pub mod parser;
pub mod raw;

pub use assemble::{assemble, AssembledMesh};
pub use error::{IndexStream, LayoutError, MeshError};
pub use layout::{Semantic, VertexAttribute, VertexLayout, VertexLayoutBuilder, FLOAT_SIZE};
pub use parser::{
    load_path, load_path_with, parse_reader, parse_reader_with, parse_str, parse_str_with,
    ParseOptions,
};
pub use raw::RawMeshData;

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn ok(src: &str) -> RawMeshData { parse_str(src).unwrap() }
    fn err(src: &str) -> MeshError { parse_str(src).unwrap_err() }

    const TRIANGLE: &str = "v 0.0 0.0 0.0\nv 1.0 0.0 0.0\nv 0.0 1.0 0.0\nf 1 2 3\n";

    const CUBE: &str = "\
# cube.obj
o Cube
v -1 -1 -1
v  1 -1 -1
v  1  1 -1
v -1  1 -1
v -1 -1  1
v  1 -1  1
v  1  1  1
v -1  1  1
vt 0 0
vn 0 0 -1
vn 0 0 1
s off
usemtl Default
f 1/1/1 2/1/1 3/1/1
f 1/1/1 3/1/1 4/1/1
f 5/1/2 7/1/2 6/1/2
f 5/1/2 8/1/2 7/1/2
";

    #[test] fn empty_source() {
        let raw = ok("");
        assert!(raw.positions().is_empty() && raw.face_indices().is_empty());
    }
    #[test] fn triangle_end_to_end() {
        let raw = ok(TRIANGLE);
        assert_eq!(raw.positions(), &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert_eq!(raw.face_indices(), &[0, 1, 2]);

        let mesh = assemble(&raw, &VertexLayout::position_only()).unwrap();
        assert_eq!(mesh.vertex_data(), &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(mesh.index_data(), &[0, 1, 2]);
    }
    #[test] fn counts_match_directive_lines() {
        let raw = ok(CUBE);
        assert_eq!(raw.positions().len(), CUBE.lines().filter(|l| l.starts_with("v ")).count());
        assert_eq!(raw.normals().len(), CUBE.lines().filter(|l| l.starts_with("vn ")).count());
        assert_eq!(raw.triangle_count(), CUBE.lines().filter(|l| l.starts_with("f ")).count());
        assert!(raw.normal_indices().is_none());
    }
    #[test] fn cube_with_face_normals() {
        let raw = parse_str_with(CUBE, ParseOptions { face_normals: true }).unwrap();
        assert_eq!(raw.normal_indices(), Some(&[0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1][..]));
        let mesh = assemble(&raw, &VertexLayout::position_normal()).unwrap();
        assert_eq!(mesh.vertex_data().len(), 8 * 6);
        // vertex 7 (index 6) only appears in +z faces
        assert_eq!(&mesh.vertex_data()[6 * 6 + 3..7 * 6], &[0.0, 0.0, 1.0]);
    }
    #[test] fn position_only_round_trip_sizes() {
        let raw = ok(CUBE);
        let mesh = assemble(&raw, &VertexLayout::position_only()).unwrap();
        assert_eq!(mesh.vertex_data().len(), 3 * raw.positions().len());
        assert_eq!(mesh.index_data().len(), raw.face_indices().len());
    }
    #[test] fn crlf_line_endings() {
        let raw = ok("v 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\nf 1 2 3\r\n");
        assert_eq!(raw.face_indices(), &[0, 1, 2]);
    }
    #[test] fn faces_without_normals_drop_references() {
        let raw = parse_str_with(TRIANGLE, ParseOptions { face_normals: true }).unwrap();
        assert!(raw.normal_indices().is_none());
    }

    #[test] fn err_quad() {
        let e = err("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        assert!(matches!(e, MeshError::UnsupportedTopology { line: 5, corners: 4 }));
    }
    #[test] fn err_malformed_number_reports_line() {
        let e = err("v 0 0 0\nv 1 oops 0\n");
        assert!(matches!(e, MeshError::MalformedSource { line: 2, .. }));
    }
    #[test] fn err_zero_index() {
        assert!(matches!(err(TRIANGLE.replace("f 1", "f 0").as_str()), MeshError::InvalidIndex { line: 4, .. }));
    }
    #[test] fn err_dangling_index() {
        let e = err("v 0 0 0\nv 1 0 0\nf 1 2 3\n");
        assert!(matches!(
            e,
            MeshError::IndexOutOfRange { line: Some(3), index: 2, len: 2, stream: IndexStream::Position }
        ));
    }
    #[test] fn err_dangling_normal_index() {
        let e = parse_str_with(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//2\n",
            ParseOptions { face_normals: true },
        )
        .unwrap_err();
        assert!(matches!(e, MeshError::IndexOutOfRange { stream: IndexStream::Normal, index: 1, .. }));
    }
    #[test] fn err_mixed_normal_references() {
        let e = parse_str_with(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\nf 1 2 3\n",
            ParseOptions { face_normals: true },
        )
        .unwrap_err();
        assert!(matches!(e, MeshError::MalformedSource { line: 6, .. }));
    }
    #[test] fn error_messages_name_the_line() {
        let e = err("v 0 0 0\nf 1 1 9\n");
        assert_eq!(e.to_string(), "position index 8 out of range (len 1) at line 2");
    }
}
