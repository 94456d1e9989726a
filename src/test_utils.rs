//! Shared builders for unit tests.

use std::sync::Arc;

use glam::UVec3;

use crate::buffer::{Channel, ChannelDepth, VoxelBuffer};
use crate::library::{
  BakedLibrary, BakedModel, BakedSideLibrary, BakedSideModel, BlockyLibrary, SideLibrary,
};
use crate::mesher::BlockyMesher;

/// Model id of the opaque test cube.
pub const STONE: u64 = 1;
/// Model id of the transparent test cube.
pub const GLASS: u64 = 2;

/// Test library: 0 = air, 1 = opaque white cube on material 0, 2 = a
/// transparent cube sharing material 0 with its own side pattern.
pub fn test_library() -> BakedLibrary {
  let mut baked = BakedLibrary::default();
  baked.models.push(BakedModel::default()); // air
  baked
    .models
    .push(BakedModel::opaque_cube(0, [1.0, 1.0, 1.0, 1.0]));

  let mut glass = BakedModel::opaque_cube(0, [0.6, 0.8, 1.0, 0.5]);
  glass.transparency_index = 1;
  glass.contributes_to_ao = false;
  glass.side_pattern_indices = [1; 6];
  baked.models.push(glass);

  baked.indexed_materials.push("stone".to_string());
  baked.reset_side_patterns(2);
  // A full square covers another full square of the same class.
  baked.set_side_pattern_occlusion(0, 0, true);
  baked.set_side_pattern_occlusion(1, 1, true);
  baked
}

pub fn test_mesher() -> BlockyMesher {
  let mesher = BlockyMesher::new();
  mesher.set_library(Arc::new(BlockyLibrary::new(test_library())));
  mesher
}

/// Side library with models 0..8; model 7 substitutes material slot 0.
pub fn test_side_library() -> BakedSideLibrary {
  BakedSideLibrary {
    models: (0..8).map(|_| BakedSideModel { material_id: 0 }).collect(),
    indexed_materials: vec!["moss".to_string()],
  }
}

pub fn test_mesher_with_sides() -> BlockyMesher {
  let mesher = test_mesher();
  mesher.set_side_library(Arc::new(SideLibrary::new(test_side_library())));
  mesher
}

/// Cubic padded buffer whose TYPE channel is 8-bit and dense (all air).
pub fn dense_buffer(size: u32) -> VoxelBuffer {
  let mut buffer = VoxelBuffer::new(UVec3::splat(size));
  buffer.set_channel_depth(Channel::Type, ChannelDepth::Bits8);
  // Write one air voxel so the channel materializes to dense storage.
  buffer.set_voxel(UVec3::ZERO, Channel::Type, 0);
  buffer
}

/// Padded buffer of explicit dimensions, TYPE dense and 8-bit.
pub fn dense_buffer_sized(sx: u32, sy: u32, sz: u32) -> VoxelBuffer {
  let mut buffer = VoxelBuffer::new(UVec3::new(sx, sy, sz));
  buffer.set_channel_depth(Channel::Type, ChannelDepth::Bits8);
  buffer.set_voxel(UVec3::ZERO, Channel::Type, 0);
  buffer
}

pub fn set_type(buffer: &mut VoxelBuffer, x: u32, y: u32, z: u32, id: u64) {
  buffer.set_voxel(UVec3::new(x, y, z), Channel::Type, id);
}
