//! Face visibility and baked ambient occlusion.
//!
//! Visibility is resolved per face against the neighbor on the other side:
//! transparency classes give one-way visibility, side patterns give exact
//! cover tests through the library's asymmetric occlusion matrix.
//!
//! Corner shading follows the combinatory vertex-AO scheme from
//! <https://0fps.net/2013/07/03/ambient-occlusion-for-minecraft-like-worlds/>
//! (inverted): edge neighbors shade both corners they touch, a corner with
//! both flanking edges solid saturates to the maximum level.

use glam::Vec3A;

use super::neighbors::NeighborOffsets;
use super::ChannelWord;
use crate::cube::{CORNER_COUNT, CORNER_POSITIONS, EDGE_CORNERS, OPPOSITE_SIDES, SIDE_CORNERS, SIDE_EDGES};
use crate::library::{BakedLibrary, BakedModel};

/// Should this model's face on `side` be emitted, given the model found on
/// the neighboring voxel?
#[inline]
pub(crate) fn face_visible(
  library: &BakedLibrary,
  model: &BakedModel,
  neighbor_id: u32,
  side: usize,
) -> bool {
  if !library.has_model(neighbor_id) {
    // Unknown neighbor: assume it does not occlude.
    return true;
  }
  let neighbor = &library.models[neighbor_id as usize];
  if neighbor.empty || neighbor.transparency_index > model.transparency_index {
    return true;
  }
  let ai = model.side_pattern_indices[side];
  let bi = neighbor.side_pattern_indices[OPPOSITE_SIDES[side]];
  // Patterns are not the same, and B does not occlude A
  ai != bi && !library.side_pattern_occlusion(bi, ai)
}

/// Does the model with this id darken neighboring corners? Unknown ids are
/// treated as solid.
#[inline]
pub(crate) fn contributes_to_ao(library: &BakedLibrary, id: u32) -> bool {
  if library.has_model(id) {
    library.models[id as usize].contributes_to_ao
  } else {
    true
  }
}

/// Accumulate shading levels for the corners of one face.
///
/// First pass: each AO-contributing edge neighbor raises both corners the
/// edge touches. Second pass: a corner already at 2 (both flanking edges
/// solid) saturates to 3; otherwise the corner-diagonal neighbor may raise
/// it by one. Final levels lie in `{0, 1, 2, 3}`.
pub(crate) fn shade_corners<T: ChannelWord>(
  raw: &[u8],
  library: &BakedLibrary,
  offsets: &NeighborOffsets,
  side: usize,
  voxel_index: usize,
  shaded_corner: &mut [u8; CORNER_COUNT],
) {
  for &edge in &SIDE_EDGES[side] {
    let edge_neighbor_id = T::read(raw, voxel_index.wrapping_add_signed(offsets.edges[edge]));
    if contributes_to_ao(library, edge_neighbor_id) {
      shaded_corner[EDGE_CORNERS[edge][0]] += 1;
      shaded_corner[EDGE_CORNERS[edge][1]] += 1;
    }
  }
  for &corner in &SIDE_CORNERS[side] {
    if shaded_corner[corner] == 2 {
      shaded_corner[corner] = 3;
    } else {
      let corner_neighbor_id =
        T::read(raw, voxel_index.wrapping_add_signed(offsets.corners[corner]));
      if contributes_to_ao(library, corner_neighbor_id) {
        shaded_corner[corner] += 1;
      }
    }
  }
}

/// Color of one face vertex under baked occlusion.
///
/// Each shaded corner casts `darkness · level` falling off with the squared
/// distance to the vertex; the strongest cast wins. The result scales the
/// modulate's RGB and keeps its alpha.
#[inline]
pub(crate) fn shaded_vertex_color(
  side: usize,
  shaded_corner: &[u8; CORNER_COUNT],
  darkness: f32,
  vertex_pos: [f32; 3],
  modulate: [f32; 4],
) -> [f32; 4] {
  let vertex = Vec3A::from_array(vertex_pos);
  let mut shade = 0.0f32;
  for &corner in &SIDE_CORNERS[side] {
    let level = shaded_corner[corner];
    if level != 0 {
      let k = (1.0 - Vec3A::from_array(CORNER_POSITIONS[corner]).distance_squared(vertex)).max(0.0);
      let s = darkness * level as f32 * k;
      if s > shade {
        shade = s;
      }
    }
  }
  let gs = 1.0 - shade;
  [
    modulate[0] * gs,
    modulate[1] * gs,
    modulate[2] * gs,
    modulate[3],
  ]
}

#[cfg(test)]
#[path = "occlusion_test.rs"]
mod occlusion_test;
