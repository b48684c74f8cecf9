//! Compute device abstraction
//!
//! The offloaded intersection strategy talks to a `ComputeDevice`: it allocates
//! device buffers, uploads the mesh and plane data, dispatches the frustum kernel
//! and downloads the per-triangle results. Buffers are released when dropped.
//!
//! `HostComputeDevice` is the software backend: host-memory buffers and a
//! thread-group dispatch on a rayon pool.

mod compute_device;
mod host_device;

pub use compute_device::{
    ComputeDevice, ComputeBuffer, BufferDesc, BufferUsage, FrustumKernelArgs,
};
pub use host_device::{HostComputeDevice, HostDeviceConfig};

// Mock compute device for tests (failure injection)
#[cfg(test)]
pub mod mock_compute_device;
