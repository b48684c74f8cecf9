/// ScenePartitioner - splits the scene bounds into cells and tracks which cell a
/// moving position (typically the camera) is in.
///
/// Grid methods cut the root bounds into `resolution.x * resolution.y * resolution.z`
/// equal boxes (Grid2D uses a single layer on Y). Voronoi methods assign a position to
/// the seed with the smallest weighted squared distance (Voronoi2D ignores Y).

use glam::{UVec3, Vec3};
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::math::AABB;
use crate::{engine_bail, engine_debug};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionMethod {
    #[default]
    Grid2D,
    Grid3D,
    Voronoi2D,
    Voronoi3D,
}

impl PartitionMethod {
    pub fn is_grid(self) -> bool {
        matches!(self, PartitionMethod::Grid2D | PartitionMethod::Grid3D)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiSeed {
    pub position: Vec3,
    /// Larger weights claim more space
    pub weight: f32,
}

impl VoronoiSeed {
    pub fn new(position: Vec3, weight: f32) -> Self {
        Self { position, weight }
    }
}

/// Emitted by `track_position` when the tracked cell changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub previous: Option<u32>,
    pub current: Option<u32>,
}

const MIN_SQUARED_WEIGHT: f32 = 1e-4;

pub struct ScenePartitioner {
    method: PartitionMethod,
    grid_resolution: UVec3,
    seeds: Vec<VoronoiSeed>,
    margin: f32,
    root_bounds: AABB,
    cells: FxHashMap<u32, AABB>,
    current_cell: Option<u32>,
    last_position: Option<Vec3>,
}

impl ScenePartitioner {
    /// Create a partitioner over a unit box at the origin; call `recalculate` with the
    /// scene bounds.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when a used resolution component is 0.
    pub fn new(method: PartitionMethod, grid_resolution: UVec3) -> Result<Self> {
        Self::validate_resolution(method, grid_resolution)?;

        let mut partitioner = Self {
            method,
            grid_resolution,
            seeds: Vec::new(),
            margin: 0.0,
            root_bounds: AABB::from_center_size(Vec3::ZERO, Vec3::ONE),
            cells: FxHashMap::default(),
            current_cell: None,
            last_position: None,
        };
        partitioner.build_cells();
        Ok(partitioner)
    }

    fn validate_resolution(method: PartitionMethod, grid_resolution: UVec3) -> Result<()> {
        let resolution = Self::effective_resolution(method, grid_resolution);
        if resolution.min_element() == 0 {
            engine_bail!("optim::ScenePartitioner", InvalidConfiguration,
                "Grid resolution {} has a zero component", resolution);
        }
        // Cell indices are u32
        let cell_count = resolution.x.checked_mul(resolution.y)
            .and_then(|count| count.checked_mul(resolution.z));
        if cell_count.is_none() {
            engine_bail!("optim::ScenePartitioner", InvalidConfiguration,
                "Grid resolution {} exceeds {} cells", resolution, u32::MAX);
        }
        Ok(())
    }

    fn effective_resolution(method: PartitionMethod, grid_resolution: UVec3) -> UVec3 {
        match method {
            PartitionMethod::Grid2D => UVec3::new(grid_resolution.x, 1, grid_resolution.z),
            _ => grid_resolution,
        }
    }

    pub fn method(&self) -> PartitionMethod {
        self.method
    }

    /// Switch method and rebuild the cells.
    pub fn set_method(&mut self, method: PartitionMethod) -> Result<()> {
        Self::validate_resolution(method, self.grid_resolution)?;
        self.method = method;
        self.build_cells();
        Ok(())
    }

    pub fn grid_resolution(&self) -> UVec3 {
        self.grid_resolution
    }

    pub fn set_grid_resolution(&mut self, grid_resolution: UVec3) -> Result<()> {
        Self::validate_resolution(self.method, grid_resolution)?;
        self.grid_resolution = grid_resolution;
        self.build_cells();
        Ok(())
    }

    pub fn seeds(&self) -> &[VoronoiSeed] {
        &self.seeds
    }

    pub fn add_seed(&mut self, seed: VoronoiSeed) {
        self.seeds.push(seed);
        self.build_cells();
    }

    pub fn clear_seeds(&mut self) {
        self.seeds.clear();
        self.build_cells();
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Margin added to the scene bounds by the next `recalculate`
    pub fn set_margin(&mut self, margin: f32) {
        self.margin = margin;
    }

    pub fn root_bounds(&self) -> &AABB {
        &self.root_bounds
    }

    /// Grid: one box per cell. Voronoi: a zero-size box at each seed.
    pub fn cells(&self) -> &FxHashMap<u32, AABB> {
        &self.cells
    }

    pub fn current_cell(&self) -> Option<u32> {
        self.current_cell
    }

    /// Rebuild root bounds from the scene's object bounds, then the cells.
    ///
    /// No bounds gives a unit box at the origin.
    pub fn recalculate<'a, I>(&mut self, bounds: I)
    where
        I: IntoIterator<Item = &'a AABB>,
    {
        self.root_bounds = match AABB::union_all(bounds) {
            Some(union) => union.expanded(self.margin),
            None => AABB::from_center_size(Vec3::ZERO, Vec3::ONE),
        };
        self.build_cells();

        engine_debug!("optim::ScenePartitioner",
            "{:?} partition: {} cells over {:?}",
            self.method, self.cells.len(), self.root_bounds);
    }

    fn cell_size(&self, resolution: UVec3) -> Vec3 {
        self.root_bounds.size() / resolution.as_vec3()
    }

    fn build_cells(&mut self) {
        self.cells.clear();

        if self.method.is_grid() {
            let resolution = Self::effective_resolution(self.method, self.grid_resolution);
            let cell_size = self.cell_size(resolution);
            let mut index = 0u32;
            for x in 0..resolution.x {
                for y in 0..resolution.y {
                    for z in 0..resolution.z {
                        let min = self.root_bounds.min + UVec3::new(x, y, z).as_vec3() * cell_size;
                        self.cells.insert(index, AABB::from_center_size(min + cell_size * 0.5, cell_size));
                        index += 1;
                    }
                }
            }
        } else {
            for (i, seed) in self.seeds.iter().enumerate() {
                self.cells.insert(i as u32, AABB::from_point(seed.position));
            }
        }
    }

    /// Cell containing `position`.
    ///
    /// Grid positions outside the root bounds clamp to the nearest border cell.
    /// Voronoi without seeds returns None.
    pub fn cell_index(&self, position: Vec3) -> Option<u32> {
        match self.method {
            PartitionMethod::Grid2D | PartitionMethod::Grid3D => Some(self.grid_cell_index(position)),
            PartitionMethod::Voronoi2D => self.voronoi_cell_index(position, false),
            PartitionMethod::Voronoi3D => self.voronoi_cell_index(position, true),
        }
    }

    fn grid_cell_index(&self, position: Vec3) -> u32 {
        let resolution = Self::effective_resolution(self.method, self.grid_resolution);
        let cell_size = self.cell_size(resolution);
        let offset = position - self.root_bounds.min;

        let axis = |offset: f32, size: f32, count: u32| -> u32 {
            if size > 0.0 {
                ((offset / size).floor() as i64).clamp(0, count as i64 - 1) as u32
            } else {
                0
            }
        };
        let x = axis(offset.x, cell_size.x, resolution.x);
        let y = axis(offset.y, cell_size.y, resolution.y);
        let z = axis(offset.z, cell_size.z, resolution.z);

        x * resolution.y * resolution.z + y * resolution.z + z
    }

    fn voronoi_cell_index(&self, position: Vec3, use_y: bool) -> Option<u32> {
        let mut best = None;
        let mut best_distance = f32::MAX;

        for (i, seed) in self.seeds.iter().enumerate() {
            let mut seed_position = seed.position;
            if !use_y {
                seed_position.y = position.y;
            }
            let distance = position.distance_squared(seed_position)
                / (seed.weight * seed.weight).max(MIN_SQUARED_WEIGHT);
            if best.is_none() || distance < best_distance {
                best_distance = distance;
                best = Some(i as u32);
            }
        }
        best
    }

    /// Update the tracked cell from a new position.
    ///
    /// Returns the change when the cell differs from the previous call. A position
    /// equal to the last one is skipped.
    pub fn track_position(&mut self, position: Vec3) -> Option<CellChange> {
        if self.last_position == Some(position) {
            return None;
        }
        self.last_position = Some(position);

        let current = self.cell_index(position);
        if current == self.current_cell {
            return None;
        }

        let change = CellChange { previous: self.current_cell, current };
        self.current_cell = current;
        Some(change)
    }
}

#[cfg(test)]
#[path = "scene_partitioner_tests.rs"]
mod tests;
