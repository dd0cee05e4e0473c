use std::fmt::Write;
use std::path::Path;

use kiln_engine::render::MeshBinding;
use kiln_mesh::{AssembledMesh, RawMeshData};

/// Human-readable counts for a loaded mesh.
pub fn summary(path: &Path, raw: &RawMeshData, mesh: &AssembledMesh) -> String {
    let layout = mesh.layout();
    let mut out = String::new();

    let _ = writeln!(out, "{}", path.display());
    let _ = writeln!(out, "  positions   {}", raw.positions().len());
    let _ = writeln!(out, "  normals     {}", raw.normals().len());
    let _ = writeln!(
        out,
        "  triangles   {}{}",
        raw.triangle_count(),
        if raw.normal_indices().is_some() { " (with normal references)" } else { "" }
    );
    let _ = writeln!(out, "  layout      stride {} floats / {} bytes", layout.stride(), layout.stride_bytes());
    for attr in layout.attributes() {
        let _ = writeln!(
            out,
            "    {:<10} {} x f32 @ float {}",
            attr.semantic.name(),
            attr.components,
            attr.offset
        );
    }
    let _ = writeln!(
        out,
        "  vertex data {} floats / {} bytes",
        mesh.vertex_data().len(),
        mesh.vertex_bytes().len()
    );
    let _ = writeln!(
        out,
        "  index data  {} indices / {} bytes",
        mesh.index_data().len(),
        mesh.index_bytes().len()
    );
    out
}

/// wgpu attribute table, one row per bound attribute.
pub fn binding_table(binding: &MeshBinding) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  wgpu array_stride {}", binding.array_stride());
    for attr in binding.attributes() {
        let _ = writeln!(
            out,
            "    location {:<2} {:?} @ byte {}",
            attr.shader_location, attr.format, attr.offset
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use kiln_engine::render::ShaderInterface;
    use kiln_mesh::{assemble, parse_str, VertexLayout};

    use super::*;

    const SRC: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nvn 0 0 1\nvn 0 0 1\nf 1 2 3\n";

    #[test]
    fn summary_lists_counts_and_layout() {
        let raw = parse_str(SRC).unwrap();
        let mesh = assemble(&raw, &VertexLayout::position_normal()).unwrap();
        let text = summary(Path::new("tri.obj"), &raw, &mesh);
        assert!(text.starts_with("tri.obj\n"));
        assert!(text.contains("positions   3"));
        assert!(text.contains("triangles   1\n"));
        assert!(text.contains("stride 6 floats / 24 bytes"));
        assert!(text.contains("normal     3 x f32 @ float 3"));
        assert!(text.contains("vertex data 18 floats / 72 bytes"));
        assert!(text.contains("index data  3 indices / 12 bytes"));
    }

    #[test]
    fn binding_table_lists_byte_offsets() {
        let shader = ShaderInterface::new().input("position", 0).input("normal", 1);
        let binding = MeshBinding::new(&VertexLayout::position_normal(), &shader).unwrap();
        let text = binding_table(&binding);
        assert!(text.contains("array_stride 24"));
        assert!(text.contains("location 1  Float32x3 @ byte 12"));
    }
}
