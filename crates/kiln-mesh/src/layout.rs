//! Vertex layout descriptor.
//!
//! A [`VertexLayout`] is the single source of truth for where each attribute
//! lives inside one vertex. The assembler writes floats according to it and
//! the render side derives byte offsets and strides from it, so both agree
//! by construction.
//!
//! All offsets and strides are counted in `f32` units. Use
//! [`VertexLayout::stride_bytes`] / [`VertexLayout::offset_bytes`] when the
//! graphics API wants bytes.
//!
//! ```
//! use kiln_mesh::{Semantic, VertexLayout};
//!
//! let layout = VertexLayout::builder()
//!     .attribute(Semantic::Position, 3)
//!     .attribute(Semantic::Normal, 3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(layout.stride(), 6);
//! assert_eq!(layout.attribute_at("normal"), Some((3, 3)));
//! ```

use crate::error::LayoutError;

/// Size of one vertex component in bytes.
pub const FLOAT_SIZE: u32 = std::mem::size_of::<f32>() as u32;

/// Meaning of a vertex attribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Semantic {
    Position,
    Normal,
    Color,
    TexCoord,
}

impl Semantic {
    pub const ALL: [Semantic; 4] = [Self::Position, Self::Normal, Self::Color, Self::TexCoord];

    /// Name used by shaders and by [`VertexLayout::attribute_at`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Normal => "normal",
            Self::Color => "color",
            Self::TexCoord => "texcoord",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl std::fmt::Display for Semantic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One attribute slot within a vertex.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VertexAttribute {
    pub semantic: Semantic,
    /// Number of `f32` components (1 to 4).
    pub components: u32,
    /// Offset of the first component within a vertex, in floats.
    pub offset: u32,
}

impl VertexAttribute {
    #[inline]
    pub const fn new(semantic: Semantic, components: u32, offset: u32) -> Self {
        Self { semantic, components, offset }
    }

    /// One past the last float this attribute occupies.
    #[inline]
    pub const fn end(&self) -> u32 {
        self.offset + self.components
    }
}

/// Validated description of one vertex: attribute slots plus stride.
///
/// Construction fails unless every attribute fits inside the stride, no two
/// attributes share a float, and no semantic appears twice. Once built the
/// layout is immutable.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: u32,
}

impl VertexLayout {
    /// Builds a layout from explicit attribute slots and stride.
    pub fn new(attributes: Vec<VertexAttribute>, stride: u32) -> Result<Self, LayoutError> {
        validate(&attributes, stride)?;
        Ok(Self { attributes, stride })
    }

    /// Starts a packed layout; offsets are assigned in declaration order.
    pub fn builder() -> VertexLayoutBuilder {
        VertexLayoutBuilder::default()
    }

    /// `position: 3` at offset 0, stride 3.
    pub fn position_only() -> Self {
        Self {
            attributes: vec![VertexAttribute::new(Semantic::Position, 3, 0)],
            stride: 3,
        }
    }

    /// Interleaved `position: 3` then `normal: 3`, stride 6.
    pub fn position_normal() -> Self {
        Self {
            attributes: vec![
                VertexAttribute::new(Semantic::Position, 3, 0),
                VertexAttribute::new(Semantic::Normal, 3, 3),
            ],
            stride: 6,
        }
    }

    /// Attributes in declaration order.
    #[inline]
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Floats per vertex.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Bytes per vertex.
    #[inline]
    pub fn stride_bytes(&self) -> u64 {
        u64::from(self.stride) * u64::from(FLOAT_SIZE)
    }

    /// Typed lookup of an attribute slot.
    pub fn attribute(&self, semantic: Semantic) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.semantic == semantic)
    }

    /// Returns `(components, offset_in_floats)` for the attribute named
    /// `semantic`, or `None` when the layout has no such slot.
    pub fn attribute_at(&self, semantic: &str) -> Option<(u32, u32)> {
        let semantic = Semantic::from_name(semantic)?;
        self.attribute(semantic).map(|a| (a.components, a.offset))
    }

    /// Byte offset of the attribute within a vertex.
    pub fn offset_bytes(&self, semantic: Semantic) -> Option<u64> {
        self.attribute(semantic)
            .map(|a| u64::from(a.offset) * u64::from(FLOAT_SIZE))
    }
}

fn validate(attributes: &[VertexAttribute], stride: u32) -> Result<(), LayoutError> {
    if attributes.is_empty() {
        return Err(LayoutError::Empty);
    }
    if stride == 0 {
        return Err(LayoutError::ZeroStride);
    }

    for (i, attr) in attributes.iter().enumerate() {
        let name = attr.semantic.name();
        if !(1..=4).contains(&attr.components) {
            return Err(LayoutError::InvalidComponents { semantic: name, components: attr.components });
        }
        let end = attr.offset.checked_add(attr.components).unwrap_or(u32::MAX);
        if end > stride {
            return Err(LayoutError::ExceedsStride { semantic: name, end, stride });
        }

        for other in &attributes[..i] {
            if other.semantic == attr.semantic {
                return Err(LayoutError::DuplicateSemantic { semantic: name });
            }
            // half-open float ranges [offset, end)
            if attr.offset < other.end() && other.offset < end {
                return Err(LayoutError::Overlap { first: other.semantic.name(), second: name });
            }
        }
    }

    Ok(())
}

/// Builder for packed or explicitly-strided layouts.
#[derive(Debug, Default, Clone)]
pub struct VertexLayoutBuilder {
    attributes: Vec<VertexAttribute>,
    next_offset: u32,
    stride: Option<u32>,
}

impl VertexLayoutBuilder {
    /// Appends an attribute directly after the previous one.
    pub fn attribute(mut self, semantic: Semantic, components: u32) -> Self {
        let offset = self.next_offset;
        self.attributes.push(VertexAttribute::new(semantic, components, offset));
        self.next_offset = offset.saturating_add(components);
        self
    }

    /// Places an attribute at an explicit float offset.
    pub fn attribute_at(mut self, semantic: Semantic, components: u32, offset: u32) -> Self {
        self.attributes.push(VertexAttribute::new(semantic, components, offset));
        self.next_offset = self.next_offset.max(offset.saturating_add(components));
        self
    }

    /// Overrides the stride; defaults to the end of the furthest attribute.
    pub fn stride(mut self, stride: u32) -> Self {
        self.stride = Some(stride);
        self
    }

    pub fn build(self) -> Result<VertexLayout, LayoutError> {
        let stride = self.stride.unwrap_or(self.next_offset);
        VertexLayout::new(self.attributes, stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(semantic: Semantic, components: u32, offset: u32) -> VertexAttribute {
        VertexAttribute::new(semantic, components, offset)
    }

    // ── presets ───────────────────────────────────────────────────────────

    #[test]
    fn presets_pass_validation() {
        let p = VertexLayout::position_only();
        assert_eq!(VertexLayout::new(p.attributes().to_vec(), p.stride()), Ok(p));
        let pn = VertexLayout::position_normal();
        assert_eq!(VertexLayout::new(pn.attributes().to_vec(), pn.stride()), Ok(pn));
    }

    #[test]
    fn attribute_at_reports_components_and_offset() {
        let layout = VertexLayout::position_normal();
        assert_eq!(layout.attribute_at("position"), Some((3, 0)));
        assert_eq!(layout.attribute_at("normal"), Some((3, 3)));
        assert_eq!(layout.attribute_at("texcoord"), None);
        assert_eq!(layout.attribute_at("bogus"), None);
    }

    #[test]
    fn byte_helpers_scale_by_float_size() {
        let layout = VertexLayout::position_normal();
        assert_eq!(layout.stride_bytes(), 24);
        assert_eq!(layout.offset_bytes(Semantic::Normal), Some(12));
        assert_eq!(layout.offset_bytes(Semantic::Color), None);
    }

    // ── builder ───────────────────────────────────────────────────────────

    #[test]
    fn builder_packs_in_order() {
        let layout = VertexLayout::builder()
            .attribute(Semantic::Position, 2)
            .attribute(Semantic::Color, 3)
            .build()
            .unwrap();
        assert_eq!(layout.stride(), 5);
        assert_eq!(layout.attribute_at("color"), Some((3, 2)));
    }

    #[test]
    fn builder_explicit_stride_leaves_padding() {
        let layout = VertexLayout::builder()
            .attribute(Semantic::Position, 3)
            .stride(4)
            .build()
            .unwrap();
        assert_eq!(layout.stride(), 4);
    }

    #[test]
    fn builder_explicit_offsets() {
        let layout = VertexLayout::builder()
            .attribute_at(Semantic::Normal, 3, 4)
            .attribute_at(Semantic::Position, 4, 0)
            .build()
            .unwrap();
        assert_eq!(layout.stride(), 7);
        assert_eq!(layout.attribute_at("position"), Some((4, 0)));
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn rejects_empty() {
        assert_eq!(VertexLayout::new(vec![], 3), Err(LayoutError::Empty));
    }

    #[test]
    fn rejects_zero_stride() {
        let err = VertexLayout::new(vec![attr(Semantic::Position, 3, 0)], 0);
        assert_eq!(err, Err(LayoutError::ZeroStride));
    }

    #[test]
    fn rejects_attribute_past_stride() {
        let err = VertexLayout::new(vec![attr(Semantic::Position, 3, 1)], 3);
        assert_eq!(
            err,
            Err(LayoutError::ExceedsStride { semantic: "position", end: 4, stride: 3 })
        );
    }

    #[test]
    fn rejects_overlap() {
        let err = VertexLayout::new(
            vec![attr(Semantic::Position, 3, 0), attr(Semantic::Normal, 3, 2)],
            6,
        );
        assert_eq!(err, Err(LayoutError::Overlap { first: "position", second: "normal" }));
    }

    #[test]
    fn adjacent_attributes_do_not_overlap() {
        let layout = VertexLayout::new(
            vec![attr(Semantic::Normal, 3, 3), attr(Semantic::Position, 3, 0)],
            6,
        );
        assert!(layout.is_ok());
    }

    #[test]
    fn rejects_duplicate_semantic() {
        let err = VertexLayout::new(
            vec![attr(Semantic::Position, 3, 0), attr(Semantic::Position, 3, 3)],
            6,
        );
        assert_eq!(err, Err(LayoutError::DuplicateSemantic { semantic: "position" }));
    }

    #[test]
    fn rejects_component_counts_outside_one_to_four() {
        let zero = VertexLayout::new(vec![attr(Semantic::Color, 0, 0)], 4);
        assert_eq!(zero, Err(LayoutError::InvalidComponents { semantic: "color", components: 0 }));
        let five = VertexLayout::new(vec![attr(Semantic::Color, 5, 0)], 5);
        assert_eq!(five, Err(LayoutError::InvalidComponents { semantic: "color", components: 5 }));
    }

    #[test]
    fn huge_offset_does_not_overflow() {
        let err = VertexLayout::new(vec![attr(Semantic::Position, 3, u32::MAX)], 3);
        assert!(matches!(err, Err(LayoutError::ExceedsStride { .. })));
    }
}
