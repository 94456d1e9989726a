//! Cube geometry tables shared by the blocky mesher.
//!
//! Everything here is a compile-time constant describing one unit cube:
//! which corners bound which edges, which edges and corners ring each side,
//! and where each corner sits in model-local space. The mesher walks these
//! tables on the hot path, so they are plain arrays indexed by the side,
//! edge and corner ids below.
//!
//! # Cube Topology
//!
//! ```text
//!       6──────7         Corners (binary ZYX):
//!      /│     /│           0=(0,0,0)  1=(1,0,0)  2=(0,1,0)  3=(1,1,0)
//!     4─┼────5 │           4=(0,0,1)  5=(1,0,1)  6=(0,1,1)  7=(1,1,1)
//!     │ 2────┼─3
//!     │/     │/          +Y
//!     0──────1            │  +Z
//!                         │ /
//!                         └───+X
//! ```
//!
//! # Side Layout
//!
//! Sides are ordered by the direction of their outward normal:
//!
//! ```text
//! Side  Normal   Corners (CCW from outside)
//! ────  ───────  ──────────────────────────
//!   0   (-1,0,0)  4, 6, 2, 0
//!   1   (+1,0,0)  1, 3, 7, 5
//!   2   (0,-1,0)  0, 1, 5, 4
//!   3   (0,+1,0)  2, 6, 7, 3
//!   4   (0,0,-1)  0, 2, 3, 1
//!   5   (0,0,+1)  5, 7, 6, 4
//! ```
//!
//! # Edge Layout
//!
//! 12 edges total (4 per axis), identified by the two perpendicular sides
//! they sit between:
//!
//! ```text
//! Edge  Axis  Corners    Between sides
//! ────  ────  ─────────  ─────────────
//!   0    X    [0, 1]     -Y, -Z
//!   1    X    [2, 3]     +Y, -Z
//!   2    X    [4, 5]     -Y, +Z
//!   3    X    [6, 7]     +Y, +Z
//!   4    Y    [0, 2]     -X, -Z
//!   5    Y    [1, 3]     +X, -Z
//!   6    Y    [4, 6]     -X, +Z
//!   7    Y    [5, 7]     +X, +Z
//!   8    Z    [0, 4]     -X, -Y
//!   9    Z    [1, 5]     +X, -Y
//!  10    Z    [2, 6]     -X, +Y
//!  11    Z    [3, 7]     +X, +Y
//! ```

/// Number of cube sides.
pub const SIDE_COUNT: usize = 6;

/// Number of cube edges.
pub const EDGE_COUNT: usize = 12;

/// Number of cube corners.
pub const CORNER_COUNT: usize = 8;

/// Side with outward normal -X.
pub const SIDE_NEGATIVE_X: usize = 0;
/// Side with outward normal +X.
pub const SIDE_POSITIVE_X: usize = 1;
/// Side with outward normal -Y.
pub const SIDE_NEGATIVE_Y: usize = 2;
/// Side with outward normal +Y.
pub const SIDE_POSITIVE_Y: usize = 3;
/// Side with outward normal -Z.
pub const SIDE_NEGATIVE_Z: usize = 4;
/// Side with outward normal +Z.
pub const SIDE_POSITIVE_Z: usize = 5;

/// Outward normal of each side.
pub const SIDE_NORMALS: [[f32; 3]; SIDE_COUNT] = [
  [-1.0, 0.0, 0.0],
  [1.0, 0.0, 0.0],
  [0.0, -1.0, 0.0],
  [0.0, 1.0, 0.0],
  [0.0, 0.0, -1.0],
  [0.0, 0.0, 1.0],
];

/// Maps each side to the side facing it (-X ↔ +X, etc).
pub const OPPOSITE_SIDES: [usize; SIDE_COUNT] = [
  SIDE_POSITIVE_X,
  SIDE_NEGATIVE_X,
  SIDE_POSITIVE_Y,
  SIDE_NEGATIVE_Y,
  SIDE_POSITIVE_Z,
  SIDE_NEGATIVE_Z,
];

/// Corner positions within the unit cube.
///
/// Corner index is the bit pattern `x | y << 1 | z << 2`, so the position is
/// just the three bits spelled out.
pub const CORNER_POSITIONS: [[f32; 3]; CORNER_COUNT] = [
  [0.0, 0.0, 0.0],
  [1.0, 0.0, 0.0],
  [0.0, 1.0, 0.0],
  [1.0, 1.0, 0.0],
  [0.0, 0.0, 1.0],
  [1.0, 0.0, 1.0],
  [0.0, 1.0, 1.0],
  [1.0, 1.0, 1.0],
];

/// Edge endpoint corner indices, 4 edges per axis (X, then Y, then Z).
pub const EDGE_CORNERS: [[usize; 2]; EDGE_COUNT] = [
  [0, 1], // Edge 0:  X axis at Y=0, Z=0
  [2, 3], // Edge 1:  X axis at Y=1, Z=0
  [4, 5], // Edge 2:  X axis at Y=0, Z=1
  [6, 7], // Edge 3:  X axis at Y=1, Z=1
  [0, 2], // Edge 4:  Y axis at X=0, Z=0
  [1, 3], // Edge 5:  Y axis at X=1, Z=0
  [4, 6], // Edge 6:  Y axis at X=0, Z=1
  [5, 7], // Edge 7:  Y axis at X=1, Z=1
  [0, 4], // Edge 8:  Z axis at X=0, Y=0
  [1, 5], // Edge 9:  Z axis at X=1, Y=0
  [2, 6], // Edge 10: Z axis at X=0, Y=1
  [3, 7], // Edge 11: Z axis at X=1, Y=1
];

/// The two sides each edge sits between.
///
/// An edge neighbor in the voxel grid is the voxel diagonal along these two
/// side directions, which is why the neighbor-offset table can derive edge
/// offsets by summing side offsets.
pub const EDGE_SIDES: [[usize; 2]; EDGE_COUNT] = [
  [SIDE_NEGATIVE_Y, SIDE_NEGATIVE_Z], // Edge 0
  [SIDE_POSITIVE_Y, SIDE_NEGATIVE_Z], // Edge 1
  [SIDE_NEGATIVE_Y, SIDE_POSITIVE_Z], // Edge 2
  [SIDE_POSITIVE_Y, SIDE_POSITIVE_Z], // Edge 3
  [SIDE_NEGATIVE_X, SIDE_NEGATIVE_Z], // Edge 4
  [SIDE_POSITIVE_X, SIDE_NEGATIVE_Z], // Edge 5
  [SIDE_NEGATIVE_X, SIDE_POSITIVE_Z], // Edge 6
  [SIDE_POSITIVE_X, SIDE_POSITIVE_Z], // Edge 7
  [SIDE_NEGATIVE_X, SIDE_NEGATIVE_Y], // Edge 8
  [SIDE_POSITIVE_X, SIDE_NEGATIVE_Y], // Edge 9
  [SIDE_NEGATIVE_X, SIDE_POSITIVE_Y], // Edge 10
  [SIDE_POSITIVE_X, SIDE_POSITIVE_Y], // Edge 11
];

/// The four edges ringing each side, in perimeter order.
pub const SIDE_EDGES: [[usize; 4]; SIDE_COUNT] = [
  [6, 10, 4, 8],  // -X
  [5, 11, 7, 9],  // +X
  [0, 9, 2, 8],   // -Y
  [10, 3, 11, 1], // +Y
  [4, 1, 5, 0],   // -Z
  [7, 3, 6, 2],   // +Z
];

/// The four corners of each side, counter-clockwise when viewed from
/// outside the cube. A full cube face can be built by walking this ring.
pub const SIDE_CORNERS: [[usize; 4]; SIDE_COUNT] = [
  [4, 6, 2, 0], // -X
  [1, 3, 7, 5], // +X
  [0, 1, 5, 4], // -Y
  [2, 6, 7, 3], // +Y
  [0, 2, 3, 1], // -Z
  [5, 7, 6, 4], // +Z
];

#[cfg(test)]
#[path = "cube_test.rs"]
mod cube_test;
