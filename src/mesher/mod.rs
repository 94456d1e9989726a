//! Blocky voxel mesher.
//!
//! Interprets the TYPE channel of a padded voxel buffer as indexes into a
//! [`BlockyLibrary`] and batches the models' baked geometry into one set of
//! mesh arrays per material. Faces hidden by their neighbors are culled, and
//! per-vertex ambient occlusion can be baked into vertex colors.
//!
//! The technique is culled faces, not greedy meshing: every voxel keeps its
//! own quads, which works with arbitrary per-model geometry and per-voxel
//! modulate colors at the cost of more vertices.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  voxels: padded buffer   - TYPE channel, 8/16-bit model ids     │
//! │  library: baked snapshot - per-side geometry + occlusion data   │
//! │  side library (optional) - per-face material substitution      │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ PHASE 1: Snapshot & Validation                                  │
//! │   Copy parameters under the read lock                           │
//! │   Reject missing library, undersized or compressed buffers     │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ PHASE 2: Interior Traversal (z, then x, then y)                 │
//! │   For each voxel: cull faces against neighbors, shade corners,  │
//! │   append per-material arrays + optional collision copy          │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ PHASE 3: Packaging                                              │
//! │   One Surface per non-empty material slot, triangles            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Concurrency
//!
//! A build is synchronous and single-threaded; many builds may run in
//! parallel on different buffers. Parameters and baked library data sit
//! behind read-write locks, and the working arrays live in a thread-local
//! cache that keeps its capacity across builds.

pub mod neighbors;
pub mod side;

mod emit;
mod occlusion;

use std::cell::RefCell;
use std::sync::Arc;

use glam::UVec3;
use parking_lot::RwLock;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

use crate::buffer::{Channel, ChannelCompression, ChannelDepth, VoxelVolume};
use crate::library::{BlockyLibrary, SideLibrary};
use emit::{emit_voxel, EmitParams, EmitState};
use neighbors::NeighborOffsets;
use side::{ChannelSideResolver, NoSideMaterials, SideMaterialResolver};

/// Width of the neighbor shell around the meshed region, in voxels.
pub const PADDING: u32 = 1;

/// Typed read of one model id word from a dense channel span.
pub(crate) trait ChannelWord: Copy {
  fn read(raw: &[u8], index: usize) -> u32;
}

impl ChannelWord for u8 {
  #[inline(always)]
  fn read(raw: &[u8], index: usize) -> u32 {
    raw[index] as u32
  }
}

impl ChannelWord for u16 {
  #[inline(always)]
  fn read(raw: &[u8], index: usize) -> u32 {
    let i = index * 2;
    u16::from_le_bytes([raw[i], raw[i + 1]]) as u32
  }
}

/// Parallel mesh arrays for one material slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arrays {
  pub positions: Vec<[f32; 3]>,
  pub normals: Vec<[f32; 3]>,
  pub uvs: Vec<[f32; 2]>,
  pub colors: Vec<[f32; 4]>,
  pub indices: Vec<u32>,
  /// Empty, or 4 floats per vertex.
  pub tangents: Vec<f32>,
}

impl Arrays {
  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.positions.clear();
    self.normals.clear();
    self.uvs.clear();
    self.colors.clear();
    self.indices.clear();
    self.tangents.clear();
  }

  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }
}

/// Output arrays of one material slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
  pub arrays: Arrays,
  pub material_index: u32,
}

/// Collision-only geometry pooled across all materials.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionSurface {
  pub positions: Vec<[f32; 3]>,
  pub indices: Vec<u32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrimitiveType {
  #[default]
  Triangles,
}

/// Result of one build.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshOutput {
  /// One surface per material slot that produced geometry.
  pub surfaces: SmallVec<[Surface; 4]>,
  /// Present when the build was asked for collision data, even if empty.
  pub collision_surface: Option<CollisionSurface>,
  pub primitive: PrimitiveType,
}

impl MeshOutput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn clear(&mut self) {
    self.surfaces.clear();
    self.collision_surface = None;
  }

  /// True when no material produced geometry.
  pub fn is_empty(&self) -> bool {
    self.surfaces.is_empty()
  }
}

/// Build input: a padded voxel volume plus flags.
pub struct MeshInput<'a, V: VoxelVolume> {
  pub voxels: &'a V,
  /// LOD is not supported; non-zero values log a warning and mesh at full
  /// resolution.
  pub lod_index: u32,
  /// Request the collision surface.
  pub collision_hint: bool,
}

/// Errors that abort a whole build. Per-voxel and per-face anomalies never
/// surface here; they are skipped or logged instead.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
  #[error("no blocky library assigned")]
  NullLibrary,
  #[error("buffer size {size:?} is below the padded minimum")]
  BufferTooSmall { size: [u32; 3] },
  #[error("unsupported compression {compression:?} on channel {channel:?}")]
  UnsupportedCompression {
    channel: Channel,
    compression: ChannelCompression,
  },
  #[error("channel {channel:?} reports dense storage but raw data is unavailable")]
  MissingChannelData { channel: Channel },
  #[error("unsupported depth {depth:?} on channel {channel:?}")]
  UnsupportedDepth {
    channel: Channel,
    depth: ChannelDepth,
  },
}

/// Mesher parameters, snapshotted at the start of every build.
#[derive(Clone)]
pub struct Parameters {
  pub library: Option<Arc<BlockyLibrary>>,
  /// Enables the side-aware material substitution path.
  pub side_library: Option<Arc<SideLibrary>>,
  pub bake_occlusion: bool,
  /// Shade of a fully occluded corner, in `[0, 1]`.
  pub occlusion_darkness: f32,
}

impl Default for Parameters {
  fn default() -> Self {
    Self {
      library: None,
      side_library: None,
      bake_occlusion: true,
      occlusion_darkness: 0.8,
    }
  }
}

/// Per-thread working arrays, cleared but never shrunk between builds.
#[derive(Default)]
struct MeshCache {
  arrays_per_material: Vec<Arrays>,
  index_offsets: Vec<u32>,
}

thread_local! {
  static TLS_CACHE: RefCell<MeshCache> = RefCell::new(MeshCache::default());
}

/// The blocky voxel mesher.
#[derive(Default)]
pub struct BlockyMesher {
  parameters: RwLock<Parameters>,
}

impl BlockyMesher {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set_library(&self, library: Arc<BlockyLibrary>) {
    self.parameters.write().library = Some(library);
  }

  pub fn library(&self) -> Option<Arc<BlockyLibrary>> {
    self.parameters.read().library.clone()
  }

  pub fn set_side_library(&self, library: Arc<SideLibrary>) {
    self.parameters.write().side_library = Some(library);
  }

  pub fn side_library(&self) -> Option<Arc<SideLibrary>> {
    self.parameters.read().side_library.clone()
  }

  pub fn set_occlusion_enabled(&self, enabled: bool) {
    self.parameters.write().bake_occlusion = enabled;
  }

  pub fn occlusion_enabled(&self) -> bool {
    self.parameters.read().bake_occlusion
  }

  pub fn set_occlusion_darkness(&self, darkness: f32) {
    self.parameters.write().occlusion_darkness = darkness.clamp(0.0, 1.0);
  }

  pub fn occlusion_darkness(&self) -> f32 {
    self.parameters.read().occlusion_darkness
  }

  /// Total material slots across the base and side libraries.
  pub fn material_count(&self) -> u32 {
    let params = self.parameters.read().clone();
    let base = params.library.map_or(0, |l| l.material_count());
    let side = params.side_library.map_or(0, |l| l.material_count());
    base + side
  }

  /// Material name for a combined slot index: `[0, base)` resolves in the
  /// base library, `[base, base + side)` in the side library.
  pub fn material_by_index(&self, index: u32) -> Option<String> {
    let params = self.parameters.read().clone();
    let library = params.library?;
    let base = library.material_count();
    if index < base {
      library.material_by_index(index)
    } else {
      params
        .side_library
        .and_then(|side| side.material_by_index(index - base))
    }
  }

  /// Bitmask of buffer channels a build will read.
  pub fn used_channels_mask(&self) -> u8 {
    let mut mask = Channel::Type.mask_bit();
    if self.parameters.read().side_library.is_some() {
      for channel in side::SIDE_CHANNELS {
        mask |= channel.mask_bit();
      }
    }
    mask
  }

  /// Mesh one padded voxel volume into `output`.
  ///
  /// `output` is cleared first; on error it stays empty. A uniform TYPE
  /// channel yields `Ok` with an empty mesh: all-air blocks and all-cube
  /// blocks both mesh to nothing in the interior.
  pub fn build<V: VoxelVolume>(
    &self,
    input: &MeshInput<'_, V>,
    output: &mut MeshOutput,
  ) -> Result<(), BuildError> {
    let params = self.parameters.read().clone();

    output.clear();

    let library = params.library.as_ref().ok_or(BuildError::NullLibrary)?;

    if input.lod_index != 0 {
      warn!(lod_index = input.lod_index, "blocky mesher does not support LOD");
    }

    let voxels = input.voxels;
    let size = voxels.size();
    if size.min_element() < 2 * PADDING {
      return Err(BuildError::BufferTooSmall {
        size: size.to_array(),
      });
    }

    // The buffer we receive must be dense for the TYPE channel, so the
    // traversal can walk raw words instead of going through the accessors.
    match voxels.channel_compression(Channel::Type) {
      ChannelCompression::Uniform => {
        // All voxels share one model. All-air has nothing to mesh, and a
        // uniform solid block has no visible interior faces either.
        // TODO Handle the edge case of a uniform block of non-cubic models.
        return Ok(());
      }
      ChannelCompression::None => {}
      compression => {
        return Err(BuildError::UnsupportedCompression {
          channel: Channel::Type,
          compression,
        });
      }
    }

    let raw = voxels
      .channel_raw(Channel::Type)
      .ok_or(BuildError::MissingChannelData {
        channel: Channel::Type,
      })?;
    let depth = voxels.channel_depth(Channel::Type);

    if input.collision_hint {
      output.collision_surface = Some(CollisionSurface::default());
    }

    let darkness = if params.bake_occlusion {
      // Stored divided by 3 so a saturated corner counter of 3 shades at
      // exactly the configured darkness.
      params.occlusion_darkness / 3.0
    } else {
      0.0
    };

    // Only baked data is made for multithreaded access; hold its read lock
    // for the whole pass.
    let baked = library.baked();
    let side_baked = params.side_library.as_ref().map(|side| side.baked());

    let base_material_count = baked.indexed_materials_count();
    let material_count = (base_material_count
      + side_baked
        .as_ref()
        .map_or(0, |side| side.indexed_materials_count())) as usize;

    let traversal: Result<(), BuildError> = TLS_CACHE.with(|cache| {
      let mut cache = cache.borrow_mut();
      let cache = &mut *cache;

      if cache.arrays_per_material.len() < material_count {
        cache
          .arrays_per_material
          .resize_with(material_count, Arrays::default);
      }
      for arrays in &mut cache.arrays_per_material {
        arrays.clear();
      }
      cache.index_offsets.clear();
      cache.index_offsets.resize(material_count, 0);

      let offsets = NeighborOffsets::new(size.y as usize, (size.x * size.y) as usize);
      let emit_params = EmitParams {
        library: &baked,
        offsets: &offsets,
        bake_occlusion: params.bake_occlusion,
        darkness,
      };
      let mut state = EmitState {
        arrays_per_material: &mut cache.arrays_per_material[..material_count],
        index_offsets: &mut cache.index_offsets,
        collision: output.collision_surface.as_mut(),
        collision_index_offset: 0,
      };

      match side_baked.as_ref() {
        Some(side) => {
          let resolver = ChannelSideResolver::new(voxels, side, base_material_count)?;
          dispatch_traversal(depth, raw, size, &emit_params, &mut state, &resolver)?;
        }
        None => {
          dispatch_traversal(depth, raw, size, &emit_params, &mut state, &NoSideMaterials)?;
        }
      }

      for (material_index, arrays) in cache.arrays_per_material[..material_count]
        .iter()
        .enumerate()
      {
        if !arrays.is_empty() {
          // Copy out of the cache so it keeps its capacity for the next
          // build on this thread.
          output.surfaces.push(Surface {
            arrays: arrays.clone(),
            material_index: material_index as u32,
          });
        }
      }

      Ok(())
    });
    if let Err(error) = traversal {
      output.clear();
      return Err(error);
    }

    debug!(
      surfaces = output.surfaces.len(),
      collision = input.collision_hint,
      "blocky mesh built"
    );

    Ok(())
  }
}

fn dispatch_traversal<R: SideMaterialResolver>(
  depth: ChannelDepth,
  raw: &[u8],
  size: UVec3,
  params: &EmitParams<'_>,
  state: &mut EmitState<'_>,
  resolver: &R,
) -> Result<(), BuildError> {
  match depth {
    ChannelDepth::Bits8 => {
      traverse_interior::<u8, R>(raw, size, params, state, resolver);
      Ok(())
    }
    ChannelDepth::Bits16 => {
      traverse_interior::<u16, R>(raw, size, params, state, resolver);
      Ok(())
    }
    depth => Err(BuildError::UnsupportedDepth {
      channel: Channel::Type,
      depth,
    }),
  }
}

/// Walk the interior of the padded buffer. The bounds are chosen so every
/// visited voxel can reach its full 26-neighborhood without a size check.
fn traverse_interior<T: ChannelWord, R: SideMaterialResolver>(
  raw: &[u8],
  size: UVec3,
  params: &EmitParams<'_>,
  state: &mut EmitState<'_>,
  resolver: &R,
) {
  let row = size.y as usize;
  let deck = (size.x * size.y) as usize;

  for z in PADDING..size.z - PADDING {
    for x in PADDING..size.x - PADDING {
      for y in PADDING..size.y - PADDING {
        let voxel_index = y as usize + x as usize * row + z as usize * deck;
        emit_voxel::<T, R>(state, params, raw, resolver, voxel_index, x, y, z);
      }
    }
  }
}
