/// HostComputeDevice - software implementation of the ComputeDevice trait
///
/// Buffers live in host memory (word-aligned so typed views are free). The frustum
/// kernel runs one rayon task per thread group; each invocation evaluates the shared
/// triangle predicate and writes its own result slot.

use std::any::Any;
use std::sync::{Arc, RwLock};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use glam::Vec3;
use rayon::prelude::*;
use crate::error::{Error, Result};
use crate::{engine_bail, engine_err};
use crate::intersection::triangle_intersects;
use crate::math::Plane;
use super::compute_device::{BufferDesc, ComputeBuffer, ComputeDevice, FrustumKernelArgs};

/// Host device settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDeviceConfig {
    /// Invocations per thread group
    pub thread_group_size: u32,
    /// Maximum total bytes of live buffers (None = unlimited)
    pub memory_budget: Option<u64>,
    /// Worker threads of the dispatch pool (None = available parallelism)
    pub worker_count: Option<usize>,
}

impl Default for HostDeviceConfig {
    fn default() -> Self {
        Self {
            thread_group_size: 64,
            memory_budget: None,
            worker_count: None,
        }
    }
}

/// Allocation bookkeeping shared between the device and its buffers.
#[derive(Debug, Default)]
struct Allocations {
    live_buffers: AtomicUsize,
    live_bytes: AtomicU64,
}

/// Host memory buffer
pub struct HostBuffer {
    desc: BufferDesc,
    words: RwLock<Vec<u32>>,
    allocations: Arc<Allocations>,
}

impl HostBuffer {
    fn check_range(&self, offset: u64, len: usize) -> Result<()> {
        let end = offset.checked_add(len as u64);
        match end {
            Some(end) if end <= self.desc.size => Ok(()),
            _ => Err(engine_err!("optim::HostComputeDevice", BackendError,
                "Access of {} bytes at offset {} exceeds {:?} buffer of {} bytes",
                len, offset, self.desc.usage, self.desc.size)),
        }
    }
}

impl ComputeBuffer for HostBuffer {
    fn desc(&self) -> &BufferDesc {
        &self.desc
    }

    fn write(&self, offset: u64, data: &[u8]) -> Result<()> {
        self.check_range(offset, data.len())?;
        let mut words = self.words.write()
            .map_err(poisoned)?;
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(words.as_mut_slice());
        let start = offset as usize;
        bytes[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn read(&self, offset: u64, dst: &mut [u8]) -> Result<()> {
        self.check_range(offset, dst.len())?;
        let words = self.words.read()
            .map_err(poisoned)?;
        let bytes: &[u8] = bytemuck::cast_slice(words.as_slice());
        let start = offset as usize;
        dst.copy_from_slice(&bytes[start..start + dst.len()]);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for HostBuffer {
    fn drop(&mut self) {
        self.allocations.live_buffers.fetch_sub(1, Ordering::SeqCst);
        self.allocations.live_bytes.fetch_sub(self.desc.size, Ordering::SeqCst);
    }
}

/// Software compute device
pub struct HostComputeDevice {
    config: HostDeviceConfig,
    pool: rayon::ThreadPool,
    allocations: Arc<Allocations>,
}

impl HostComputeDevice {
    /// Create a device.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when `thread_group_size` is 0, `BackendError` when the
    /// worker pool cannot be created.
    pub fn new(config: HostDeviceConfig) -> Result<Self> {
        if config.thread_group_size == 0 {
            engine_bail!("optim::HostComputeDevice", InvalidConfiguration,
                "thread_group_size must be >= 1");
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_count.unwrap_or(0))
            .thread_name(|i| format!("optim-host-compute-{}", i))
            .build()
            .map_err(|e| engine_err!("optim::HostComputeDevice", BackendError,
                "Failed to create dispatch pool: {}", e))?;

        crate::engine_debug!("optim::HostComputeDevice",
            "Created host compute device ({} workers, group size {})",
            pool.current_num_threads(), config.thread_group_size);

        Ok(Self {
            config,
            pool,
            allocations: Arc::new(Allocations::default()),
        })
    }

    pub fn config(&self) -> &HostDeviceConfig {
        &self.config
    }

    /// Number of buffers currently alive
    pub fn live_buffer_count(&self) -> usize {
        self.allocations.live_buffers.load(Ordering::SeqCst)
    }

    /// Total bytes of buffers currently alive
    pub fn live_bytes(&self) -> u64 {
        self.allocations.live_bytes.load(Ordering::SeqCst)
    }

    fn host_buffer<'a>(buffer: &'a dyn ComputeBuffer, name: &str) -> Result<&'a HostBuffer> {
        buffer.as_any()
            .downcast_ref::<HostBuffer>()
            .ok_or_else(|| engine_err!("optim::HostComputeDevice", BackendError,
                "{} buffer was not created by a HostComputeDevice", name))
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::BackendError("Buffer lock poisoned".to_string())
}

impl ComputeDevice for HostComputeDevice {
    fn name(&self) -> &str {
        "host"
    }

    fn thread_group_size(&self) -> u32 {
        self.config.thread_group_size
    }

    fn create_buffer(&self, desc: BufferDesc) -> Result<Box<dyn ComputeBuffer>> {
        if desc.size == 0 {
            engine_bail!("optim::HostComputeDevice", BackendError,
                "Cannot create an empty {:?} buffer", desc.usage);
        }

        if let Some(budget) = self.config.memory_budget {
            let live = self.allocations.live_bytes.load(Ordering::SeqCst);
            if live.saturating_add(desc.size) > budget {
                crate::engine_error!("optim::HostComputeDevice",
                    "Allocation of {} bytes exceeds budget ({} of {} bytes in use)",
                    desc.size, live, budget);
                return Err(Error::OutOfMemory);
            }
        }

        let word_count = desc.size.div_ceil(4) as usize;
        self.allocations.live_buffers.fetch_add(1, Ordering::SeqCst);
        self.allocations.live_bytes.fetch_add(desc.size, Ordering::SeqCst);

        Ok(Box::new(HostBuffer {
            desc,
            words: RwLock::new(vec![0u32; word_count]),
            allocations: Arc::clone(&self.allocations),
        }))
    }

    fn dispatch_frustum_kernel(&self, args: &FrustumKernelArgs<'_>, group_count: u32) -> Result<()> {
        let vertex_buffer = Self::host_buffer(args.vertices, "Vertex")?;
        let index_buffer = Self::host_buffer(args.indices, "Index")?;
        let plane_buffer = Self::host_buffer(args.planes, "Plane")?;
        let result_buffer = Self::host_buffer(args.results, "Result")?;

        // An input aliasing the result buffer would deadlock on its lock
        for (input, name) in [(vertex_buffer, "Vertex"), (index_buffer, "Index"), (plane_buffer, "Plane")] {
            if std::ptr::eq(input, result_buffer) {
                engine_bail!("optim::HostComputeDevice", BackendError,
                    "{} buffer is also bound as the result buffer", name);
            }
        }

        let vertex_words = vertex_buffer.words.read().map_err(poisoned)?;
        let index_words = index_buffer.words.read().map_err(poisoned)?;
        let plane_words = plane_buffer.words.read().map_err(poisoned)?;
        let mut result_words = result_buffer.words.write().map_err(poisoned)?;

        let vertex_count = args.vertices.desc().size as usize / std::mem::size_of::<Vec3>();
        let vertices: &[Vec3] = bytemuck::cast_slice(&vertex_words[..vertex_count * 3]);

        let index_count = args.index_count as usize;
        let plane_word_count = args.plane_count as usize * 4;
        if index_count > index_words.len() || plane_word_count > plane_words.len() {
            engine_bail!("optim::HostComputeDevice", BackendError,
                "Kernel constants exceed bound buffers ({} indices, {} planes)",
                args.index_count, args.plane_count);
        }
        let indices = &index_words[..index_count];
        let planes: &[Plane] = bytemuck::cast_slice(&plane_words[..plane_word_count]);

        let triangle_count = index_count / 3;
        if triangle_count > result_words.len() {
            engine_bail!("optim::HostComputeDevice", BackendError,
                "Result buffer holds {} slots, kernel needs {}", result_words.len(), triangle_count);
        }

        let group_size = self.config.thread_group_size as usize;
        let invocations = (group_count as usize * group_size).min(triangle_count);

        let slots = &mut result_words[..invocations];

        self.pool.install(|| {
            slots
                .par_chunks_mut(group_size)
                .enumerate()
                .try_for_each(|(group, group_slots)| {
                    for (local, slot) in group_slots.iter_mut().enumerate() {
                        let base = (group * group_size + local) * 3;
                        let fetch = |k: usize| {
                            vertices.get(indices[base + k] as usize).copied().ok_or_else(|| {
                                Error::BackendError(format!(
                                    "Index {} at position {} outside vertex buffer ({} vertices)",
                                    indices[base + k], base + k, vertices.len()))
                            })
                        };
                        *slot = triangle_intersects(fetch(0)?, fetch(1)?, fetch(2)?, planes) as u32;
                    }
                    Ok::<(), Error>(())
                })
        })
    }
}

#[cfg(test)]
#[path = "host_device_tests.rs"]
mod tests;
