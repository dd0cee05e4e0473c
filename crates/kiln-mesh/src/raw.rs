/// Attribute streams read from a mesh source, before layout assembly.
///
/// Indices are already 0-based. Face indices come in runs of three, one run
/// per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMeshData {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    face_indices: Vec<u32>,
    normal_indices: Option<Vec<u32>>,
}

impl RawMeshData {
    /// Wraps streams built in code. No validation happens here; the
    /// assembler checks every index before writing vertex data.
    pub fn from_parts(
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        face_indices: Vec<u32>,
    ) -> Self {
        Self { positions, normals, face_indices, normal_indices: None }
    }

    /// Attaches per-corner normal references, parallel to `face_indices`.
    pub fn with_normal_indices(mut self, normal_indices: Vec<u32>) -> Self {
        self.normal_indices = Some(normal_indices);
        self
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    #[inline]
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    #[inline]
    pub fn face_indices(&self) -> &[u32] {
        &self.face_indices
    }

    /// Per-corner normal references, present only when the source was parsed
    /// with face normals enabled and every corner carried one.
    #[inline]
    pub fn normal_indices(&self) -> Option<&[u32]> {
        self.normal_indices.as_deref()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.face_indices.len() / 3
    }
}
