//! Per-voxel face and surface emission.
//!
//! One voxel contributes up to six culled cube faces plus any inner
//! geometry its model carries. Everything is appended to the per-material
//! working arrays in bulk; per-material index offsets keep the indices
//! consistent across voxels, and an optional collision surface receives a
//! parallel copy of collision-enabled geometry into a single shared pool.

use glam::Vec3A;

use super::neighbors::NeighborOffsets;
use super::occlusion::{face_visible, shade_corners, shaded_vertex_color};
use super::side::SideMaterialResolver;
use super::{Arrays, ChannelWord, CollisionSurface};
use crate::cube::{CORNER_COUNT, SIDE_COUNT, SIDE_NORMALS};
use crate::library::{BakedLibrary, BakedModel, BakedSurface, AIR_ID};

/// Read-only inputs shared by every emission in one build.
pub(crate) struct EmitParams<'a> {
  pub library: &'a BakedLibrary,
  pub offsets: &'a NeighborOffsets,
  pub bake_occlusion: bool,
  /// Configured occlusion darkness divided by 3, so a saturated corner
  /// shades at exactly the configured value.
  pub darkness: f32,
}

/// Mutable working state of one build.
pub(crate) struct EmitState<'a> {
  pub arrays_per_material: &'a mut [Arrays],
  pub index_offsets: &'a mut [u32],
  pub collision: Option<&'a mut CollisionSurface>,
  pub collision_index_offset: u32,
}

/// Emit everything one voxel produces.
#[allow(clippy::too_many_arguments)]
pub(crate) fn emit_voxel<T: ChannelWord, R: SideMaterialResolver>(
  state: &mut EmitState<'_>,
  params: &EmitParams<'_>,
  raw: &[u8],
  resolver: &R,
  voxel_index: usize,
  x: u32,
  y: u32,
  z: u32,
) {
  let voxel_id = T::read(raw, voxel_index);
  if voxel_id == AIR_ID || !params.library.has_model(voxel_id) {
    return;
  }
  let model = &params.library.models[voxel_id as usize];

  // Subtracting the padding, so output coordinates are local to the
  // unpadded block.
  let origin = Vec3A::new((x - 1) as f32, (y - 1) as f32, (z - 1) as f32);

  // Hybrid approach: cube faces get culled against neighbors, while a model
  // may still carry geometry that is not a cube.
  for side in 0..SIDE_COUNT {
    emit_side::<T, R>(state, params, raw, resolver, model, side, voxel_index, origin);
  }

  for surface in &model.surfaces {
    emit_inner(state, surface, model.color, origin);
  }
}

#[allow(clippy::too_many_arguments)]
fn emit_side<T: ChannelWord, R: SideMaterialResolver>(
  state: &mut EmitState<'_>,
  params: &EmitParams<'_>,
  raw: &[u8],
  resolver: &R,
  model: &BakedModel,
  side: usize,
  voxel_index: usize,
  origin: Vec3A,
) {
  if model.empty_sides_mask & (1 << side) != 0 {
    // This side is empty
    return;
  }

  let neighbor_id = T::read(raw, voxel_index.wrapping_add_signed(params.offsets.sides[side]));
  if !face_visible(params.library, model, neighbor_id, side) {
    return;
  }

  // The face is visible

  let mut shaded_corner = [0u8; CORNER_COUNT];
  if params.bake_occlusion {
    shade_corners::<T>(
      raw,
      params.library,
      params.offsets,
      side,
      voxel_index,
      &mut shaded_corner,
    );
  }

  let material_override = resolver.resolve(side, voxel_index);

  for surface in &model.surfaces {
    let material = material_override.unwrap_or(surface.material_id) as usize;
    emit_side_surface(
      state,
      params,
      surface,
      material,
      side,
      origin,
      model.color,
      &shaded_corner,
    );
  }
}

#[allow(clippy::too_many_arguments)]
fn emit_side_surface(
  state: &mut EmitState<'_>,
  params: &EmitParams<'_>,
  surface: &BakedSurface,
  material: usize,
  side: usize,
  origin: Vec3A,
  modulate: [f32; 4],
  shaded_corner: &[u8; CORNER_COUNT],
) {
  let side_positions = &surface.side_positions[side];
  let vertex_count = side_positions.len();
  let index_offset = state.index_offsets[material];
  let arrays = &mut state.arrays_per_material[material];

  // Append whole faces in one go, no per-vertex pushes.
  arrays.positions.extend(
    side_positions
      .iter()
      .map(|p| (Vec3A::from_array(*p) + origin).to_array()),
  );
  arrays.uvs.extend_from_slice(&surface.side_uvs[side]);

  let side_tangents = &surface.side_tangents[side];
  if !side_tangents.is_empty() {
    arrays.tangents.extend_from_slice(side_tangents);
  }

  let normal = SIDE_NORMALS[side];
  arrays
    .normals
    .extend(std::iter::repeat(normal).take(vertex_count));

  if params.bake_occlusion {
    arrays.colors.extend(side_positions.iter().map(|p| {
      shaded_vertex_color(side, shaded_corner, params.darkness, *p, modulate)
    }));
  } else {
    arrays
      .colors
      .extend(std::iter::repeat(modulate).take(vertex_count));
  }

  let side_indices = &surface.side_indices[side];
  arrays
    .indices
    .extend(side_indices.iter().map(|i| i + index_offset));

  if surface.collision_enabled {
    if let Some(collision) = state.collision.as_deref_mut() {
      collision.positions.extend(
        side_positions
          .iter()
          .map(|p| (Vec3A::from_array(*p) + origin).to_array()),
      );
      let collision_offset = state.collision_index_offset;
      collision
        .indices
        .extend(side_indices.iter().map(|i| i + collision_offset));
      state.collision_index_offset += vertex_count as u32;
    }
  }

  state.index_offsets[material] += vertex_count as u32;
}

/// Append a surface's inner (non-cube) geometry: never culled by neighbors
/// and never AO-shaded.
fn emit_inner(
  state: &mut EmitState<'_>,
  surface: &BakedSurface,
  modulate: [f32; 4],
  origin: Vec3A,
) {
  if surface.positions.is_empty() {
    return;
  }

  let material = surface.material_id as usize;
  let vertex_count = surface.positions.len();
  let index_offset = state.index_offsets[material];
  let arrays = &mut state.arrays_per_material[material];

  if !surface.tangents.is_empty() {
    arrays.tangents.extend_from_slice(&surface.tangents);
  }

  arrays.positions.extend(
    surface
      .positions
      .iter()
      .map(|p| (Vec3A::from_array(*p) + origin).to_array()),
  );
  arrays.normals.extend_from_slice(&surface.normals);
  arrays.uvs.extend_from_slice(&surface.uvs);
  arrays
    .colors
    .extend(std::iter::repeat(modulate).take(vertex_count));
  arrays
    .indices
    .extend(surface.indices.iter().map(|i| i + index_offset));

  if surface.collision_enabled {
    if let Some(collision) = state.collision.as_deref_mut() {
      collision.positions.extend(
        surface
          .positions
          .iter()
          .map(|p| (Vec3A::from_array(*p) + origin).to_array()),
      );
      let collision_offset = state.collision_index_offset;
      collision
        .indices
        .extend(surface.indices.iter().map(|i| i + collision_offset));
      state.collision_index_offset += vertex_count as u32;
    }
  }

  state.index_offsets[material] += vertex_count as u32;
}
