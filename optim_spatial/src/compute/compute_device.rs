/// ComputeDevice and ComputeBuffer traits

use std::any::Any;
use crate::error::Result;

/// Buffer usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Vertex positions
    Vertex,
    /// Triangle indices
    Index,
    /// Small read-only parameters (planes)
    Uniform,
    /// Read/write storage (kernel output)
    Storage,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Buffer usage
    pub usage: BufferUsage,
}

/// Device buffer. Device memory is released when the buffer is dropped.
pub trait ComputeBuffer: Send + Sync {
    fn desc(&self) -> &BufferDesc;

    /// Upload `data` at byte `offset`.
    fn write(&self, offset: u64, data: &[u8]) -> Result<()>;

    /// Download `dst.len()` bytes starting at byte `offset`.
    fn read(&self, offset: u64, dst: &mut [u8]) -> Result<()>;

    /// Lets a backend recover its concrete buffer type at dispatch time.
    fn as_any(&self) -> &dyn Any;
}

/// Buffer bindings and constants of the frustum/triangle kernel.
///
/// Layouts:
/// - `vertices`: tightly packed `[f32; 3]` positions
/// - `indices`: `u32` triangle list
/// - `planes`: `Plane` (normal.xyz, distance), 16 bytes each
/// - `results`: one `u32` per triangle, 1 = intersects, 0 = rejected
pub struct FrustumKernelArgs<'a> {
    pub vertices: &'a dyn ComputeBuffer,
    pub indices: &'a dyn ComputeBuffer,
    pub planes: &'a dyn ComputeBuffer,
    pub results: &'a dyn ComputeBuffer,
    pub plane_count: u32,
    pub index_count: u32,
}

/// Offload target for the intersection engine.
pub trait ComputeDevice: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Invocations per thread group of the frustum kernel
    fn thread_group_size(&self) -> u32;

    /// Allocate a device buffer
    fn create_buffer(&self, desc: BufferDesc) -> Result<Box<dyn ComputeBuffer>>;

    /// Run the frustum kernel over `group_count` thread groups and block until done.
    ///
    /// Invocation `i` handles triangle `i`; invocations past
    /// `index_count / 3` do nothing.
    fn dispatch_frustum_kernel(&self, args: &FrustumKernelArgs<'_>, group_count: u32) -> Result<()>;
}
