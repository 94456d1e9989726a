//! Build queue for parallel meshing operations.
//!
//! Following the stage pattern: Enqueue → Tick → Completions.
//!
//! Each build is synchronous on its worker; the queue fans pending requests
//! out over rayon. Per-thread working caches inside the mesher keep their
//! capacity across ticks.

use rayon::prelude::*;
use web_time::Instant;

use crate::buffer::VoxelBuffer;
use crate::mesher::{BlockyMesher, BuildError, MeshInput, MeshOutput};

/// Request to mesh one voxel buffer.
pub struct BuildRequest {
  /// Unique identifier for this request
  pub id: u64,
  /// Padded voxel data
  pub voxels: VoxelBuffer,
  /// Request the collision surface
  pub collision_hint: bool,
}

/// Completed build result.
pub struct BuildCompletion {
  /// Request ID this completion corresponds to
  pub id: u64,
  /// Mesh arrays; empty when the build failed
  pub output: MeshOutput,
  /// Whole-build outcome
  pub result: Result<(), BuildError>,
  /// Raw build time in microseconds
  pub build_time_us: u64,
}

/// Queue that processes build requests in parallel.
#[derive(Default)]
pub struct BuildQueue {
  /// Pending requests waiting to be processed
  pending: Vec<BuildRequest>,
  /// Completed results ready to be collected
  completed: Vec<BuildCompletion>,
  /// Next request ID
  next_id: u64,
}

impl BuildQueue {
  pub fn new() -> Self {
    Self::default()
  }

  /// Enqueue a build request, returning the assigned ID.
  pub fn enqueue(&mut self, voxels: VoxelBuffer, collision_hint: bool) -> u64 {
    let id = self.next_id;
    self.next_id += 1;

    self.pending.push(BuildRequest {
      id,
      voxels,
      collision_hint,
    });

    id
  }

  /// Process pending requests in parallel and move completions to output.
  /// Returns the number of builds processed this tick.
  pub fn tick(&mut self, mesher: &BlockyMesher) -> usize {
    if self.pending.is_empty() {
      return 0;
    }

    let requests = std::mem::take(&mut self.pending);
    let count = requests.len();

    let completions: Vec<BuildCompletion> = requests
      .into_par_iter()
      .map(|request| {
        let start = Instant::now();
        let input = MeshInput {
          voxels: &request.voxels,
          lod_index: 0,
          collision_hint: request.collision_hint,
        };
        let mut output = MeshOutput::new();
        let result = mesher.build(&input, &mut output);
        let build_time_us = start.elapsed().as_micros() as u64;
        BuildCompletion {
          id: request.id,
          output,
          result,
          build_time_us,
        }
      })
      .collect();

    self.completed.extend(completions);
    count
  }

  /// Take all completed builds.
  pub fn drain_completions(&mut self) -> Vec<BuildCompletion> {
    std::mem::take(&mut self.completed)
  }

  /// Number of pending requests.
  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }

  /// Number of completed results waiting to be drained.
  pub fn completed_count(&self) -> usize {
    self.completed.len()
  }

  /// True when no work remains.
  pub fn is_idle(&self) -> bool {
    self.pending.is_empty() && self.completed.is_empty()
  }
}

#[cfg(test)]
#[path = "queue_test.rs"]
mod queue_test;
