//! Benchmarks for the blocky mesher on chunk-sized buffers.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::UVec3;

use blocky_mesher::{
  BakedLibrary, BakedModel, BlockyLibrary, BlockyMesher, Channel, ChannelDepth, MeshInput,
  MeshOutput, VoxelBuffer,
};

/// Padded chunk size (32 voxels of payload + one voxel of padding per face).
const CHUNK: u32 = 34;

fn bench_library() -> BakedLibrary {
  let mut baked = BakedLibrary::default();
  baked.models.push(BakedModel::default()); // air
  baked
    .models
    .push(BakedModel::opaque_cube(0, [1.0, 1.0, 1.0, 1.0]));
  baked
    .models
    .push(BakedModel::opaque_cube(1, [0.5, 0.4, 0.3, 1.0]));
  baked.indexed_materials.push("grass".to_string());
  baked.indexed_materials.push("dirt".to_string());
  baked.reset_side_patterns(1);
  baked.set_side_pattern_occlusion(0, 0, true);
  baked
}

fn bench_mesher(bake_occlusion: bool) -> BlockyMesher {
  let mesher = BlockyMesher::new();
  mesher.set_library(Arc::new(BlockyLibrary::new(bench_library())));
  mesher.set_occlusion_enabled(bake_occlusion);
  mesher
}

fn empty_chunk() -> VoxelBuffer {
  let mut voxels = VoxelBuffer::new(UVec3::splat(CHUNK));
  voxels.set_channel_depth(Channel::Type, ChannelDepth::Bits8);
  voxels.set_voxel(UVec3::ZERO, Channel::Type, 0);
  voxels
}

/// Half-filled terrain slab: dirt below, one layer of grass on top.
fn terrain_chunk() -> VoxelBuffer {
  let mut voxels = empty_chunk();
  let surface_y = CHUNK / 2;
  for z in 1..CHUNK - 1 {
    for x in 1..CHUNK - 1 {
      for y in 1..surface_y {
        voxels.set_voxel(UVec3::new(x, y, z), Channel::Type, 2);
      }
      voxels.set_voxel(UVec3::new(x, surface_y, z), Channel::Type, 1);
    }
  }
  voxels
}

/// Worst case for culled faces: no two solid voxels touch.
fn checkerboard_chunk() -> VoxelBuffer {
  let mut voxels = empty_chunk();
  for z in 1..CHUNK - 1 {
    for x in 1..CHUNK - 1 {
      for y in 1..CHUNK - 1 {
        if (x + y + z) % 2 == 0 {
          voxels.set_voxel(UVec3::new(x, y, z), Channel::Type, 1);
        }
      }
    }
  }
  voxels
}

fn run_build(mesher: &BlockyMesher, voxels: &VoxelBuffer, output: &mut MeshOutput) {
  mesher
    .build(
      &MeshInput {
        voxels,
        lod_index: 0,
        collision_hint: false,
      },
      output,
    )
    .expect("bench build");
}

fn bench_terrain(c: &mut Criterion) {
  let voxels = terrain_chunk();
  let mut output = MeshOutput::new();

  let mesher = bench_mesher(false);
  c.bench_function("blocky_mesher::build (32³ terrain)", |b| {
    b.iter(|| {
      run_build(&mesher, black_box(&voxels), &mut output);
      black_box(&output);
    })
  });

  let mesher = bench_mesher(true);
  c.bench_function("blocky_mesher::build (32³ terrain, baked AO)", |b| {
    b.iter(|| {
      run_build(&mesher, black_box(&voxels), &mut output);
      black_box(&output);
    })
  });
}

fn bench_checkerboard(c: &mut Criterion) {
  let voxels = checkerboard_chunk();
  let mut output = MeshOutput::new();

  let mesher = bench_mesher(true);
  c.bench_function("blocky_mesher::build (32³ checkerboard, baked AO)", |b| {
    b.iter(|| {
      run_build(&mesher, black_box(&voxels), &mut output);
      black_box(&output);
    })
  });
}

criterion_group!(benches, bench_terrain, bench_checkerboard);
criterion_main!(benches);
