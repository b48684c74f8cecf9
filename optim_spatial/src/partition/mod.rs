//! Scene space partitioning (grid and weighted Voronoi cells).

mod scene_partitioner;

pub use scene_partitioner::{CellChange, PartitionMethod, ScenePartitioner, VoronoiSeed};
