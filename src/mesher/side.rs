//! Per-face material substitution from side channels.
//!
//! The side-aware mesher is the base mesher composed with a
//! [`SideMaterialResolver`]: for every visible cube face the resolver may
//! reassign the face to another material slot, while vertex geometry, UVs
//! and occlusion stay those of the block model. The base configuration uses
//! the zero-sized [`NoSideMaterials`] resolver, so the hot path monomorphizes
//! to a no-op instead of a virtual call.
//!
//! [`ChannelSideResolver`] is the concrete channel-backed resolver: each face
//! direction reads its side id from a dedicated buffer channel:
//!
//! ```text
//! Side  Direction  Channel
//! ────  ─────────  ───────
//!   0      -X      Data5
//!   1      +X      Data6
//!   2      -Y      Data7
//!   3      +Y      Sdf
//!   4      -Z      Indices
//!   5      +Z      Weights
//! ```
//!
//! The channels are symbolic slots; side data has no relation to their
//! nominal names.

use glam::UVec3;
use tracing::warn;

use super::BuildError;
use crate::buffer::{
  read_word, Channel, ChannelCompression, ChannelDepth, VoxelVolume,
};
use crate::cube::SIDE_COUNT;
use crate::library::{BakedSideLibrary, EMPTY_SIDE_ID};

/// Resolves the material slot of one face, already offset into the build's
/// combined material space. `None` keeps the surface's own material.
pub trait SideMaterialResolver {
  fn resolve(&self, side: usize, voxel_index: usize) -> Option<u32>;
}

/// Resolver of the base mesher: never overrides anything.
#[derive(Clone, Copy, Default)]
pub struct NoSideMaterials;

impl SideMaterialResolver for NoSideMaterials {
  #[inline(always)]
  fn resolve(&self, _side: usize, _voxel_index: usize) -> Option<u32> {
    None
  }
}

/// Channel each side reads its side id from.
pub(crate) const SIDE_CHANNELS: [Channel; SIDE_COUNT] = [
  Channel::Data5,
  Channel::Data6,
  Channel::Data7,
  Channel::Sdf,
  Channel::Indices,
  Channel::Weights,
];

/// One side channel captured for the duration of a build.
#[derive(Clone, Copy)]
enum ChannelRead<'a> {
  Uniform(u32),
  Raw { bytes: &'a [u8], depth: ChannelDepth },
}

impl ChannelRead<'_> {
  #[inline]
  fn get(&self, index: usize) -> u32 {
    match self {
      ChannelRead::Uniform(value) => *value,
      ChannelRead::Raw { bytes, depth } => read_word(bytes, index, *depth) as u32,
    }
  }
}

/// Side resolver backed by the six per-face buffer channels.
pub struct ChannelSideResolver<'a> {
  channels: [ChannelRead<'a>; SIDE_COUNT],
  side_library: &'a BakedSideLibrary,
  base_material_count: u32,
}

impl<'a> ChannelSideResolver<'a> {
  /// Capture the side channels of `voxels`. Each channel follows the same
  /// rules as the type channel: uniform reads one value up front, dense
  /// borrows the raw span, anything else fails the build.
  pub(crate) fn new<V: VoxelVolume>(
    voxels: &'a V,
    side_library: &'a BakedSideLibrary,
    base_material_count: u32,
  ) -> Result<Self, BuildError> {
    let mut channels = [ChannelRead::Uniform(0); SIDE_COUNT];
    for (side, slot) in channels.iter_mut().enumerate() {
      let channel = SIDE_CHANNELS[side];
      *slot = match voxels.channel_compression(channel) {
        ChannelCompression::Uniform => {
          ChannelRead::Uniform(voxels.voxel_at(UVec3::ZERO, channel) as u32)
        }
        ChannelCompression::None => {
          let depth = voxels.channel_depth(channel);
          if !matches!(depth, ChannelDepth::Bits8 | ChannelDepth::Bits16) {
            return Err(BuildError::UnsupportedDepth { channel, depth });
          }
          let bytes = voxels
            .channel_raw(channel)
            .ok_or(BuildError::MissingChannelData { channel })?;
          ChannelRead::Raw { bytes, depth }
        }
        compression => {
          return Err(BuildError::UnsupportedCompression {
            channel,
            compression,
          })
        }
      };
    }
    Ok(Self {
      channels,
      side_library,
      base_material_count,
    })
  }
}

impl SideMaterialResolver for ChannelSideResolver<'_> {
  #[inline]
  fn resolve(&self, side: usize, voxel_index: usize) -> Option<u32> {
    let side_id = self.channels[side].get(voxel_index);
    if side_id == EMPTY_SIDE_ID {
      return None;
    }
    if !self.side_library.has_model(side_id) {
      warn!(side_id, side, "side channel references an unknown side model");
      return None;
    }
    Some(self.base_material_count + self.side_library.models[side_id as usize].material_id)
  }
}

#[cfg(test)]
#[path = "side_test.rs"]
mod side_test;
