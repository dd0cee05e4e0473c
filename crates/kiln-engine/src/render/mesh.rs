use anyhow::{Context, Result};
use kiln_mesh::{AssembledMesh, VertexLayout};
use wgpu::util::DeviceExt;

use super::binding::{AttributeLocations, MeshBinding};
use super::ctx::RenderCtx;

/// An [`AssembledMesh`] resident in GPU buffers.
///
/// Keeps the layout it was uploaded with so attribute bindings are always
/// derived from the same description as the buffer contents.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    vertex_count: usize,
    layout: VertexLayout,
}

impl GpuMesh {
    /// Creates vertex and index buffers initialized with the mesh data.
    pub fn upload(ctx: &RenderCtx<'_>, mesh: &AssembledMesh, label: &str) -> Result<Self> {
        anyhow::ensure!(!mesh.index_data().is_empty(), "mesh `{label}` has no triangles");

        let index_count = u32::try_from(mesh.index_data().len())
            .with_context(|| format!("mesh `{label}` has too many indices for a u32 draw"))?;

        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("kiln {label} vbo")),
            contents: mesh.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let index_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("kiln {label} ibo")),
            contents: mesh.index_bytes(),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "uploaded mesh `{label}`: {} vertices ({} bytes), {} indices",
            mesh.vertex_count(),
            mesh.vertex_bytes().len(),
            index_count,
        );

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count,
            vertex_count: mesh.vertex_count(),
            layout: mesh.layout().clone(),
        })
    }

    /// Overwrites the vertex buffer with re-assembled data of the same shape.
    ///
    /// The mesh must have been assembled against the same layout and have the
    /// same vertex count; indices are not touched.
    pub fn update_vertices(&self, ctx: &RenderCtx<'_>, mesh: &AssembledMesh) -> Result<()> {
        anyhow::ensure!(mesh.layout() == &self.layout, "vertex layout changed since upload");
        anyhow::ensure!(
            mesh.vertex_count() == self.vertex_count,
            "vertex count changed since upload ({} -> {})",
            self.vertex_count,
            mesh.vertex_count(),
        );
        ctx.queue.write_buffer(&self.vertex_buffer, 0, mesh.vertex_bytes());
        Ok(())
    }

    /// Resolves this mesh's layout against a shader's vertex inputs.
    pub fn binding(&self, shader: &impl AttributeLocations) -> Result<MeshBinding> {
        MeshBinding::new(&self.layout, shader).context("mesh layout does not match shader inputs")
    }

    #[inline]
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Binds both buffers to `slot` and issues one indexed draw.
    ///
    /// The pipeline must have been built with [`MeshBinding::buffer_layout`]
    /// at the same vertex buffer slot.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, slot: u32) {
        rpass.set_vertex_buffer(slot, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
