/// Offloaded strategy
///
/// One synchronous round trip per call: upload vertices, indices and planes, dispatch
/// the frustum kernel, download one `u32` per triangle. Device buffers are owned by
/// this call and released when it returns, on success and on every error path.

use std::sync::Arc;
use std::time::Instant;
use glam::Vec3;
use crate::compute::{BufferDesc, BufferUsage, ComputeBuffer, ComputeDevice, FrustumKernelArgs};
use crate::error::{Error, Result};
use crate::math::Plane;
use crate::{engine_debug, engine_err};
use super::mesh::TriangleMesh;
use super::strategy::IntersectionStrategy;
use super::types::{IntersectionOptions, IntersectionResult};

pub struct OffloadedStrategy {
    device: Arc<dyn ComputeDevice>,
}

impl OffloadedStrategy {
    pub fn new(device: Arc<dyn ComputeDevice>) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &Arc<dyn ComputeDevice> {
        &self.device
    }

    fn upload(&self, usage: BufferUsage, bytes: &[u8]) -> Result<Box<dyn ComputeBuffer>> {
        let buffer = self.device.create_buffer(BufferDesc {
            size: bytes.len() as u64,
            usage,
        })?;
        buffer.write(0, bytes)?;
        Ok(buffer)
    }

    fn run(&self, mesh: &TriangleMesh, planes: &[Plane]) -> Result<Vec<bool>> {
        let triangle_count = mesh.triangle_count();

        let vertex_buffer = self.upload(BufferUsage::Vertex, bytemuck::cast_slice(&mesh.vertices))?;
        let index_buffer = self.upload(BufferUsage::Index, bytemuck::cast_slice(&mesh.indices))?;
        // Zero-size buffers are not allowed; an empty plane set binds one unused plane
        let unused = [Plane::new(Vec3::ZERO, 0.0)];
        let plane_data: &[Plane] = if planes.is_empty() { &unused } else { planes };
        let plane_buffer = self.upload(BufferUsage::Uniform, bytemuck::cast_slice(plane_data))?;
        let result_buffer = self.device.create_buffer(BufferDesc {
            size: (triangle_count * std::mem::size_of::<u32>()) as u64,
            usage: BufferUsage::Storage,
        })?;

        let group_size = self.device.thread_group_size().max(1) as usize;
        let group_count = u32::try_from(triangle_count.div_ceil(group_size))
            .map_err(|_| engine_err!("optim::OffloadedStrategy", InvalidInput,
                "{} triangles exceed the dispatch range", triangle_count))?;
        let index_count = u32::try_from(mesh.indices.len())
            .map_err(|_| engine_err!("optim::OffloadedStrategy", InvalidInput,
                "{} indices exceed the dispatch range", mesh.indices.len()))?;

        let args = FrustumKernelArgs {
            vertices: vertex_buffer.as_ref(),
            indices: index_buffer.as_ref(),
            planes: plane_buffer.as_ref(),
            results: result_buffer.as_ref(),
            plane_count: planes.len() as u32,
            index_count,
        };
        self.device.dispatch_frustum_kernel(&args, group_count)?;

        let mut flags = vec![0u32; triangle_count];
        result_buffer.read(0, bytemuck::cast_slice_mut(&mut flags))?;

        engine_debug!("optim::OffloadedStrategy",
            "Dispatched {} groups of {} on '{}' for {} triangles",
            group_count, group_size, self.device.name(), triangle_count);

        Ok(flags.into_iter().map(|flag| flag != 0).collect())
    }
}

impl IntersectionStrategy for OffloadedStrategy {
    fn name(&self) -> &str {
        "offloaded"
    }

    fn intersect(
        &self,
        mesh: &TriangleMesh,
        planes: &[Plane],
        options: &IntersectionOptions,
    ) -> Result<IntersectionResult> {
        let started = Instant::now();
        mesh.validate()?;

        if mesh.triangle_count() == 0 {
            return Ok(IntersectionResult::finish(Vec::new(), options, started));
        }

        let intersections = self.run(mesh, planes).map_err(|e| match e {
            Error::InvalidInput(_) => e,
            other => engine_err!("optim::OffloadedStrategy", OffloadFailure,
                "Device '{}' failed: {}", self.device.name(), other),
        })?;

        Ok(IntersectionResult::finish(intersections, options, started))
    }
}
