//! Kiln engine crate.
//!
//! This crate owns the GPU-facing half of mesh loading: turning a
//! [`kiln_mesh::VertexLayout`] into wgpu vertex-buffer layouts and uploading
//! [`kiln_mesh::AssembledMesh`] data into buffers.

pub mod logging;
pub mod render;
