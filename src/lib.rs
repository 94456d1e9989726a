//! blocky_mesher - engine independent blocky voxel meshing
//!
//! This crate converts dense, padded 3-D voxel buffers into renderable
//! triangle-mesh arrays. Voxel values index models in a baked library; the
//! mesher batches their geometry per material, removes faces hidden by
//! neighbors, and can bake per-vertex ambient occlusion into vertex colors.
//!
//! # Features
//!
//! - **Culled-face meshing**: per-model cube faces decimated against
//!   neighbors via transparency classes and side-pattern occlusion
//! - **Baked ambient occlusion**: corner-counter vertex shading on cube
//!   faces
//! - **Multi-material batching**: one output surface per material slot,
//!   plus an optional pooled collision surface
//! - **Side-aware materials**: an optional second library substitutes the
//!   material of individual faces from per-side data channels
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use blocky_mesher::{
//!     BakedLibrary, BakedModel, BlockyLibrary, BlockyMesher, Channel,
//!     MeshInput, MeshOutput, VoxelBuffer,
//! };
//! use glam::UVec3;
//!
//! let mut baked = BakedLibrary::default();
//! baked.models.push(BakedModel::default()); // air
//! baked.models.push(BakedModel::opaque_cube(0, [1.0; 4]));
//! baked.indexed_materials.push("stone".to_string());
//! baked.reset_side_patterns(1);
//!
//! let mesher = BlockyMesher::new();
//! mesher.set_library(Arc::new(BlockyLibrary::new(baked)));
//!
//! // 16³ of payload needs 18³ with the one-voxel neighbor padding.
//! let mut voxels = VoxelBuffer::new(UVec3::splat(18));
//! voxels.set_voxel(UVec3::new(4, 9, 4), Channel::Type, 1);
//!
//! let mut output = MeshOutput::new();
//! mesher
//!     .build(&MeshInput { voxels: &voxels, lod_index: 0, collision_hint: false }, &mut output)
//!     .unwrap();
//!
//! println!("{} surfaces", output.surfaces.len());
//! ```

pub mod buffer;
pub mod cube;
pub mod library;
pub mod mesher;
pub mod queue;

// Re-export commonly used items
pub use buffer::{Channel, ChannelCompression, ChannelDepth, VoxelBuffer, VoxelVolume};
pub use library::{
  BakedLibrary, BakedModel, BakedSideLibrary, BakedSideModel, BakedSurface, BlockyLibrary,
  SideLibrary, AIR_ID, EMPTY_SIDE_ID, MAX_MODELS,
};
pub use mesher::side::SideMaterialResolver;
pub use mesher::{
  Arrays, BlockyMesher, BuildError, CollisionSurface, MeshInput, MeshOutput, Parameters,
  PrimitiveType, Surface, PADDING,
};
pub use queue::{BuildCompletion, BuildQueue, BuildRequest};

// Shared builders for unit tests
#[cfg(test)]
pub(crate) mod test_utils;
