/// Triangle mesh input of the intersection engine.

use glam::Vec3;
use crate::engine_bail;
use crate::error::Result;

/// Indexed triangle list. Triangle `t` uses `indices[3t..3t+3]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of triangles (`indices.len() / 3`)
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Corner positions of triangle `triangle`.
    ///
    /// Panics when the triangle or one of its indices is out of range; call
    /// `validate()` first.
    #[inline]
    pub fn triangle(&self, triangle: usize) -> (Vec3, Vec3, Vec3) {
        let base = triangle * 3;
        (
            self.vertices[self.indices[base] as usize],
            self.vertices[self.indices[base + 1] as usize],
            self.vertices[self.indices[base + 2] as usize],
        )
    }

    /// Check the index list forms whole triangles referencing existing vertices.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when `indices.len()` is not a multiple of 3 or an index is
    /// `>= vertices.len()`.
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            engine_bail!("optim::TriangleMesh", InvalidInput,
                "Index count {} is not a multiple of 3", self.indices.len());
        }

        if let Some((position, index)) = self.indices.iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= self.vertices.len())
        {
            engine_bail!("optim::TriangleMesh", InvalidInput,
                "Index {} at position {} out of range ({} vertices)",
                index, position, self.vertices.len());
        }

        Ok(())
    }
}
