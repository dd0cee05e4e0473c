use std::collections::HashMap;

use kiln_mesh::{VertexAttribute, VertexLayout};
use thiserror::Error;

/// Vertex inputs a compiled shader program expects, by attribute name.
///
/// Names match [`kiln_mesh::Semantic::name`] (`position`, `normal`, ...).
pub trait AttributeLocations {
    /// Every `(name, shader_location)` the shader consumes.
    fn inputs(&self) -> Vec<(&str, u32)>;

    /// Location bound to `name`, if the shader consumes it.
    fn location(&self, name: &str) -> Option<u32> {
        self.inputs()
            .into_iter()
            .find_map(|(n, loc)| (n == name).then_some(loc))
    }
}

/// Map-backed [`AttributeLocations`].
///
/// ```
/// use kiln_engine::render::{AttributeLocations, ShaderInterface};
///
/// let shader = ShaderInterface::new().input("position", 0).input("normal", 1);
/// assert_eq!(shader.location("normal"), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShaderInterface {
    locations: HashMap<String, u32>,
}

impl ShaderInterface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, name: impl Into<String>, location: u32) -> Self {
        self.locations.insert(name.into(), location);
        self
    }
}

impl AttributeLocations for ShaderInterface {
    fn inputs(&self) -> Vec<(&str, u32)> {
        let mut inputs: Vec<_> = self.locations.iter().map(|(n, &l)| (n.as_str(), l)).collect();
        inputs.sort_by_key(|&(_, l)| l);
        inputs
    }

    fn location(&self, name: &str) -> Option<u32> {
        self.locations.get(name).copied()
    }
}

/// Layout and shader disagree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("shader input `{name}` (location {location}) has no attribute in the vertex layout")]
    MissingAttribute { name: String, location: u32 },

    #[error("shader inputs `{first}` and `{second}` share location {location}")]
    DuplicateLocation { first: String, second: String, location: u32 },

    #[error("attribute `{name}` has {components} components; no matching vertex format")]
    UnsupportedFormat { name: &'static str, components: u32 },
}

/// wgpu attribute table for one vertex buffer, resolved against a shader.
///
/// Byte offsets and the array stride come straight from the
/// [`VertexLayout`]; shader locations come from the [`AttributeLocations`].
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBinding {
    array_stride: wgpu::BufferAddress,
    attributes: Vec<wgpu::VertexAttribute>,
}

impl MeshBinding {
    pub fn new(layout: &VertexLayout, shader: &impl AttributeLocations) -> Result<Self, BindingError> {
        let inputs = shader.inputs();

        for (i, &(name, location)) in inputs.iter().enumerate() {
            if let Some(&(first, _)) = inputs[..i].iter().find(|&&(_, l)| l == location) {
                return Err(BindingError::DuplicateLocation {
                    first: first.to_string(),
                    second: name.to_string(),
                    location,
                });
            }
            if layout.attribute_at(name).is_none() {
                return Err(BindingError::MissingAttribute { name: name.to_string(), location });
            }
        }

        let mut attributes = Vec::with_capacity(inputs.len());
        for attr in layout.attributes() {
            let name = attr.semantic.name();
            let Some(shader_location) = shader.location(name) else {
                log::debug!("vertex attribute `{name}` is not consumed by the shader; skipping");
                continue;
            };
            attributes.push(wgpu::VertexAttribute {
                format: vertex_format(attr)?,
                offset: layout.offset_bytes(attr.semantic).unwrap_or_default(),
                shader_location,
            });
        }

        Ok(Self { array_stride: layout.stride_bytes(), attributes })
    }

    #[inline]
    pub fn array_stride(&self) -> wgpu::BufferAddress {
        self.array_stride
    }

    #[inline]
    pub fn attributes(&self) -> &[wgpu::VertexAttribute] {
        &self.attributes
    }

    /// Per-vertex buffer layout for `wgpu::VertexState::buffers`.
    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.array_stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}

fn vertex_format(attr: &VertexAttribute) -> Result<wgpu::VertexFormat, BindingError> {
    match attr.components {
        1 => Ok(wgpu::VertexFormat::Float32),
        2 => Ok(wgpu::VertexFormat::Float32x2),
        3 => Ok(wgpu::VertexFormat::Float32x3),
        4 => Ok(wgpu::VertexFormat::Float32x4),
        components => Err(BindingError::UnsupportedFormat { name: attr.semantic.name(), components }),
    }
}
