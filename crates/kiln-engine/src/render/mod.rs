//! GPU side of mesh rendering.
//!
//! Everything here derives byte offsets and strides from the
//! [`kiln_mesh::VertexLayout`] an [`kiln_mesh::AssembledMesh`] was built
//! against, so buffer contents and attribute bindings cannot drift apart.
//!
//! Window, surface, shader source and the frame loop belong to the caller.

mod binding;
mod ctx;
mod mesh;

pub use binding::{AttributeLocations, BindingError, MeshBinding, ShaderInterface};
pub use ctx::RenderCtx;
pub use mesh::GpuMesh;
