/// Caller-owned GPU handles passed to uploads.
///
/// This is intentionally small and stable. It replaces any process-wide
/// device state: whoever owns the device builds one of these per use.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self { device, queue }
    }
}
