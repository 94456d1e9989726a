//! Baked model libraries consumed by the mesher.
//!
//! A library is a read-only snapshot produced by an offline baking step:
//! per-model cube-face geometry flattened into per-side arrays, plus the
//! side-pattern occlusion matrix that drives face culling. The mesher never
//! mutates baked data; it takes the snapshot's read lock for the duration of
//! one build, while bakers replace the whole snapshot under the write lock.
//!
//! Two library kinds exist:
//!
//! - [`BlockyLibrary`]: models addressed by the TYPE channel. Provides
//!   geometry, colors, transparency and occlusion data.
//! - [`SideLibrary`]: models addressed by the per-face side channels.
//!   Provides only a material substitution, never geometry.

use parking_lot::{RwLock, RwLockReadGuard};

use crate::cube::{CORNER_POSITIONS, SIDE_CORNERS, SIDE_COUNT};

/// Reserved model id that never produces geometry.
pub const AIR_ID: u32 = 0;

/// Reserved side model id meaning "no side data on this face".
pub const EMPTY_SIDE_ID: u32 = 0;

/// Limit based on the largest addressable id in a 16-bit TYPE channel.
pub const MAX_MODELS: usize = 65536;

/// One baked surface of a model, bound to a single material slot.
///
/// Cube-face geometry is stored per side; `side_positions[side]` is either
/// empty or fully referenced by `side_indices[side]`. The flat
/// `positions`/`normals`/`uvs`/`tangents`/`indices` arrays hold the inner
/// (non-cube) geometry, which is never culled and never AO-shaded.
#[derive(Clone, Default)]
pub struct BakedSurface {
  pub material_id: u32,
  pub collision_enabled: bool,

  pub side_positions: [Vec<[f32; 3]>; SIDE_COUNT],
  pub side_uvs: [Vec<[f32; 2]>; SIDE_COUNT],
  /// Per side: empty, or 4 floats per vertex.
  pub side_tangents: [Vec<f32>; SIDE_COUNT],
  pub side_indices: [Vec<u32>; SIDE_COUNT],

  pub positions: Vec<[f32; 3]>,
  pub normals: Vec<[f32; 3]>,
  pub uvs: Vec<[f32; 2]>,
  pub tangents: Vec<f32>,
  pub indices: Vec<u32>,
}

impl BakedSurface {
  /// Canonical full-cube surface: one quad per side, built from the cube
  /// corner rings, with collision enabled.
  pub fn unit_cube(material_id: u32) -> Self {
    let mut surface = Self {
      material_id,
      collision_enabled: true,
      ..Self::default()
    };
    for side in 0..SIDE_COUNT {
      surface.side_positions[side] = SIDE_CORNERS[side]
        .iter()
        .map(|&corner| CORNER_POSITIONS[corner])
        .collect();
      surface.side_uvs[side] = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
      surface.side_indices[side] = vec![0, 1, 2, 0, 2, 3];
    }
    surface
  }
}

/// One baked model addressed by the TYPE channel.
#[derive(Clone)]
pub struct BakedModel {
  /// Produces no geometry at all.
  pub empty: bool,
  /// Opacity class; a neighbor with a strictly greater index never hides
  /// this model's faces.
  pub transparency_index: u8,
  /// Whether this model darkens neighboring corners when occlusion is baked.
  pub contributes_to_ao: bool,
  /// Modulate applied to every emitted vertex color.
  pub color: [f32; 4],
  /// Pattern id of each of the six faces.
  pub side_pattern_indices: [u32; SIDE_COUNT],
  /// Bit set ⇒ that side emits no surfaces.
  pub empty_sides_mask: u8,
  pub surfaces: Vec<BakedSurface>,
}

impl Default for BakedModel {
  fn default() -> Self {
    Self {
      empty: true,
      transparency_index: 0,
      contributes_to_ao: false,
      color: [1.0, 1.0, 1.0, 1.0],
      side_pattern_indices: [0; SIDE_COUNT],
      empty_sides_mask: 0,
      surfaces: Vec::new(),
    }
  }
}

impl BakedModel {
  /// Fully opaque cube with a single surface on the given material slot.
  pub fn opaque_cube(material_id: u32, color: [f32; 4]) -> Self {
    Self {
      empty: false,
      transparency_index: 0,
      contributes_to_ao: true,
      color,
      side_pattern_indices: [0; SIDE_COUNT],
      empty_sides_mask: 0,
      surfaces: vec![BakedSurface::unit_cube(material_id)],
    }
  }
}

/// Baked snapshot of a blocky model library.
#[derive(Default)]
pub struct BakedLibrary {
  pub models: Vec<BakedModel>,
  /// Material names by slot, assigned during baking. The slot count is the
  /// number of distinct materials referenced by any baked surface.
  pub indexed_materials: Vec<String>,

  side_pattern_count: usize,
  /// Row-major `occludes(a, b)` matrix; asymmetric by design.
  occlusion: Vec<bool>,
}

impl BakedLibrary {
  #[inline]
  pub fn has_model(&self, id: u32) -> bool {
    (id as usize) < self.models.len()
  }

  #[inline]
  pub fn indexed_materials_count(&self) -> u32 {
    self.indexed_materials.len() as u32
  }

  /// Number of distinct side patterns the occlusion matrix covers.
  #[inline]
  pub fn side_pattern_count(&self) -> usize {
    self.side_pattern_count
  }

  /// Resize the occlusion matrix for `count` patterns, keeping nothing.
  pub fn reset_side_patterns(&mut self, count: usize) {
    self.side_pattern_count = count;
    self.occlusion.clear();
    self.occlusion.resize(count * count, false);
  }

  /// Record that pattern `a` fully covers pattern `b`. Not symmetric.
  pub fn set_side_pattern_occlusion(&mut self, a: u32, b: u32, occludes: bool) {
    let (a, b) = (a as usize, b as usize);
    assert!(a < self.side_pattern_count && b < self.side_pattern_count);
    self.occlusion[a * self.side_pattern_count + b] = occludes;
  }

  /// Does pattern `a` fully cover (occlude) pattern `b`? Unknown patterns
  /// never occlude.
  #[inline]
  pub fn side_pattern_occlusion(&self, a: u32, b: u32) -> bool {
    let (a, b) = (a as usize, b as usize);
    if a >= self.side_pattern_count || b >= self.side_pattern_count {
      return false;
    }
    self.occlusion[a * self.side_pattern_count + b]
  }
}

/// Blocky model library: a baked snapshot behind a read-write lock.
#[derive(Default)]
pub struct BlockyLibrary {
  baked: RwLock<BakedLibrary>,
}

impl BlockyLibrary {
  pub fn new(baked: BakedLibrary) -> Self {
    Self {
      baked: RwLock::new(baked),
    }
  }

  /// Replace the baked snapshot. Takes the write lock, so it waits for any
  /// in-flight builds reading the old snapshot.
  pub fn bake(&self, baked: BakedLibrary) {
    *self.baked.write() = baked;
  }

  /// Read access for the duration of a meshing pass.
  pub fn baked(&self) -> RwLockReadGuard<'_, BakedLibrary> {
    self.baked.read()
  }

  pub fn material_count(&self) -> u32 {
    self.baked.read().indexed_materials_count()
  }

  pub fn material_by_index(&self, index: u32) -> Option<String> {
    self.baked.read().indexed_materials.get(index as usize).cloned()
  }
}

/// One baked side model: a material substitution for a single face.
#[derive(Clone, Copy, Default)]
pub struct BakedSideModel {
  /// Material slot within the side library's own indexed materials.
  pub material_id: u32,
}

/// Baked snapshot of a side model library.
#[derive(Default)]
pub struct BakedSideLibrary {
  pub models: Vec<BakedSideModel>,
  pub indexed_materials: Vec<String>,
}

impl BakedSideLibrary {
  #[inline]
  pub fn has_model(&self, id: u32) -> bool {
    (id as usize) < self.models.len()
  }

  #[inline]
  pub fn indexed_materials_count(&self) -> u32 {
    self.indexed_materials.len() as u32
  }
}

/// Side model library: a baked snapshot behind a read-write lock.
#[derive(Default)]
pub struct SideLibrary {
  baked: RwLock<BakedSideLibrary>,
}

impl SideLibrary {
  pub fn new(baked: BakedSideLibrary) -> Self {
    Self {
      baked: RwLock::new(baked),
    }
  }

  pub fn bake(&self, baked: BakedSideLibrary) {
    *self.baked.write() = baked;
  }

  pub fn baked(&self) -> RwLockReadGuard<'_, BakedSideLibrary> {
    self.baked.read()
  }

  pub fn material_count(&self) -> u32 {
    self.baked.read().indexed_materials_count()
  }

  pub fn material_by_index(&self, index: u32) -> Option<String> {
    self.baked.read().indexed_materials.get(index as usize).cloned()
  }
}

#[cfg(test)]
#[path = "library_test.rs"]
mod library_test;
