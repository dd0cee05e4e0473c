use crate::error::{IndexStream, MeshError};
use crate::layout::{Semantic, VertexAttribute, VertexLayout};
use crate::raw::RawMeshData;

/// Buffer-ready vertex and index arrays plus the layout they follow.
///
/// `vertex_data` holds `stride` floats per vertex, one vertex per source
/// position. `index_data` refers to vertices, not floats.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledMesh {
    vertex_data: Vec<f32>,
    index_data: Vec<u32>,
    layout: VertexLayout,
}

impl AssembledMesh {
    #[inline]
    pub fn vertex_data(&self) -> &[f32] {
        &self.vertex_data
    }

    #[inline]
    pub fn index_data(&self) -> &[u32] {
        &self.index_data
    }

    /// Layout the vertex data was written against.
    #[inline]
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Vertex data as raw bytes, ready for a vertex buffer upload.
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertex_data)
    }

    /// Index data as raw bytes (`u32` little/native endian), ready for an
    /// index buffer upload.
    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.index_data)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_data.len() / self.layout.stride() as usize
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.index_data.len() / 3
    }
}

/// Writes `raw` into a vertex buffer shaped by `layout`.
///
/// Produces exactly one vertex per position; vertices shared between faces
/// with different normals are not split. Float slots no attribute covers are
/// left at zero.
pub fn assemble(raw: &RawMeshData, layout: &VertexLayout) -> Result<AssembledMesh, MeshError> {
    let vertex_count = raw.positions().len();
    check_indices(raw.face_indices(), vertex_count, IndexStream::Position)?;

    // Resolve every requested stream before writing anything.
    let mut sources: Vec<(&VertexAttribute, Vec<[f32; 3]>)> = Vec::with_capacity(layout.attributes().len());
    for attr in layout.attributes() {
        let values = match attr.semantic {
            Semantic::Position => raw.positions().to_vec(),
            Semantic::Normal => vertex_normals(raw)?,
            other @ (Semantic::Color | Semantic::TexCoord) => {
                return Err(MeshError::LayoutMismatch {
                    semantic: other.name(),
                    reason: "OBJ sources parsed by this crate carry no such attribute".to_string(),
                });
            }
        };
        sources.push((attr, values));
    }

    let stride = layout.stride() as usize;
    let mut vertex_data = vec![0.0f32; vertex_count * stride];

    for (attr, values) in &sources {
        let offset = attr.offset as usize;
        let components = attr.components as usize;
        let pad = pad_value(attr.semantic);

        for (vertex, value) in vertex_data.chunks_exact_mut(stride).zip(values) {
            let slot = &mut vertex[offset..offset + components];
            for (c, out) in slot.iter_mut().enumerate() {
                *out = value.get(c).copied().unwrap_or(pad);
            }
        }
    }

    log::debug!(
        "assembled mesh: {} vertices x {} floats, {} indices",
        vertex_count,
        stride,
        raw.face_indices().len(),
    );

    Ok(AssembledMesh {
        vertex_data,
        index_data: raw.face_indices().to_vec(),
        layout: layout.clone(),
    })
}

/// Value for components past the source's three (`w` of a position is 1).
fn pad_value(semantic: Semantic) -> f32 {
    match semantic {
        Semantic::Position => 1.0,
        _ => 0.0,
    }
}

fn check_indices(indices: &[u32], len: usize, stream: IndexStream) -> Result<(), MeshError> {
    match indices.iter().find(|&&i| i as usize >= len) {
        None => Ok(()),
        Some(&index) => Err(MeshError::IndexOutOfRange { line: None, index, len, stream }),
    }
}

/// One normal per position.
///
/// With per-corner normal references, the first corner that references a
/// position decides its normal. Without them, normals pair with positions
/// by declaration order and must be equally many.
fn vertex_normals(raw: &RawMeshData) -> Result<Vec<[f32; 3]>, MeshError> {
    let positions = raw.positions().len();
    let normals = raw.normals();

    if normals.is_empty() {
        return Err(MeshError::LayoutMismatch {
            semantic: Semantic::Normal.name(),
            reason: "mesh declares no normals".to_string(),
        });
    }

    let Some(normal_indices) = raw.normal_indices() else {
        if normals.len() != positions {
            return Err(MeshError::LayoutMismatch {
                semantic: Semantic::Normal.name(),
                reason: format!(
                    "{} normals for {} positions and no per-corner normal references",
                    normals.len(),
                    positions
                ),
            });
        }
        return Ok(normals.to_vec());
    };

    if normal_indices.len() != raw.face_indices().len() {
        return Err(MeshError::LayoutMismatch {
            semantic: Semantic::Normal.name(),
            reason: format!(
                "{} normal references for {} face corners",
                normal_indices.len(),
                raw.face_indices().len()
            ),
        });
    }
    check_indices(normal_indices, normals.len(), IndexStream::Normal)?;

    let mut resolved: Vec<Option<[f32; 3]>> = vec![None; positions];
    let mut conflicts = 0usize;
    for (&vertex, &normal) in raw.face_indices().iter().zip(normal_indices) {
        let (vertex, n) = (vertex as usize, normals[normal as usize]);
        match resolved[vertex] {
            None => resolved[vertex] = Some(n),
            Some(existing) if existing != n => conflicts += 1,
            Some(_) => {}
        }
    }

    if conflicts > 0 {
        log::debug!("{conflicts} face corners reference a different normal than their vertex keeps");
    }

    Ok(resolved.into_iter().map(|n| n.unwrap_or([0.0; 3])).collect())
}
