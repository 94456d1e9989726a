//! Voxel volume contract and a dense multi-channel buffer.
//!
//! The mesher reads voxels through the [`VoxelVolume`] trait so any container
//! with the right channel semantics can feed it. [`VoxelBuffer`] is the
//! reference container: eight independent channels, each either uniform
//! (one value for the whole block), dense (one word per voxel) or LZ4
//! compressed (cold storage; must be decompressed before meshing).
//!
//! # Memory Layout
//!
//! Dense channels are row-major with Y innermost:
//!
//! ```text
//! index(x, y, z) = y + x·Sy + z·Sx·Sy
//! ```
//!
//! A buffer handed to the mesher is padded by one voxel on every face, so the
//! interior traversal can address all 26 neighbors by adding precomputed
//! signed offsets to a linear index, without bounds checks.

use glam::UVec3;

/// Identifies one of the buffer's data channels.
///
/// `Type` holds blocky model ids. The remaining channels are generic data
/// slots; the side-aware mesher reads six of them as per-face side ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
  /// Blocky model ids.
  Type = 0,
  Sdf = 1,
  Color = 2,
  Indices = 3,
  Weights = 4,
  Data5 = 5,
  Data6 = 6,
  Data7 = 7,
}

impl Channel {
  /// Number of channels in a buffer.
  pub const COUNT: usize = 8;

  /// All channels, in index order.
  pub const ALL: [Channel; Channel::COUNT] = [
    Channel::Type,
    Channel::Sdf,
    Channel::Color,
    Channel::Indices,
    Channel::Weights,
    Channel::Data5,
    Channel::Data6,
    Channel::Data7,
  ];

  /// Bit for this channel in a used-channels mask.
  #[inline]
  pub const fn mask_bit(self) -> u8 {
    1 << (self as u8)
  }
}

/// Storage width of one channel word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelDepth {
  Bits8,
  Bits16,
  Bits32,
  Bits64,
}

impl ChannelDepth {
  /// Bytes per voxel at this depth.
  #[inline]
  pub const fn byte_count(self) -> usize {
    match self {
      ChannelDepth::Bits8 => 1,
      ChannelDepth::Bits16 => 2,
      ChannelDepth::Bits32 => 4,
      ChannelDepth::Bits64 => 8,
    }
  }

  /// Largest value a word of this depth can hold.
  #[inline]
  pub const fn max_value(self) -> u64 {
    match self {
      ChannelDepth::Bits8 => u8::MAX as u64,
      ChannelDepth::Bits16 => u16::MAX as u64,
      ChannelDepth::Bits32 => u32::MAX as u64,
      ChannelDepth::Bits64 => u64::MAX,
    }
  }
}

/// How a channel's data is currently stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelCompression {
  /// One word per voxel; raw span access is available.
  None,
  /// Every voxel holds the same value; no backing allocation.
  Uniform,
  /// LZ4 block; must be decompressed before dense access.
  Lz4,
}

/// Read access the mesher needs from a voxel container.
pub trait VoxelVolume {
  /// Block dimensions, padding included. All axes must be at least
  /// `2 * PADDING`.
  fn size(&self) -> UVec3;

  fn channel_compression(&self, channel: Channel) -> ChannelCompression;

  fn channel_depth(&self, channel: Channel) -> ChannelDepth;

  /// Raw dense bytes of a channel. Only succeeds when the channel's
  /// compression is [`ChannelCompression::None`].
  fn channel_raw(&self, channel: Channel) -> Option<&[u8]>;

  /// Single-voxel read; the mesher only uses it on uniform channels.
  fn voxel_at(&self, pos: UVec3, channel: Channel) -> u64;
}

enum ChannelStorage {
  Uniform(u64),
  Dense(Vec<u8>),
  Lz4(Vec<u8>),
}

struct ChannelState {
  storage: ChannelStorage,
  depth: ChannelDepth,
}

/// Dense multi-channel voxel block.
pub struct VoxelBuffer {
  size: UVec3,
  channels: [ChannelState; Channel::COUNT],
}

/// Default depths per channel. `Type` and `Sdf` default to 16-bit words,
/// the data channels to 8-bit.
const DEFAULT_DEPTHS: [ChannelDepth; Channel::COUNT] = [
  ChannelDepth::Bits16,
  ChannelDepth::Bits16,
  ChannelDepth::Bits8,
  ChannelDepth::Bits8,
  ChannelDepth::Bits8,
  ChannelDepth::Bits8,
  ChannelDepth::Bits8,
  ChannelDepth::Bits8,
];

#[inline]
pub(crate) fn read_word(bytes: &[u8], index: usize, depth: ChannelDepth) -> u64 {
  match depth {
    ChannelDepth::Bits8 => bytes[index] as u64,
    ChannelDepth::Bits16 => {
      let i = index * 2;
      u16::from_le_bytes([bytes[i], bytes[i + 1]]) as u64
    }
    ChannelDepth::Bits32 => {
      let i = index * 4;
      u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]) as u64
    }
    ChannelDepth::Bits64 => {
      let i = index * 8;
      u64::from_le_bytes([
        bytes[i],
        bytes[i + 1],
        bytes[i + 2],
        bytes[i + 3],
        bytes[i + 4],
        bytes[i + 5],
        bytes[i + 6],
        bytes[i + 7],
      ])
    }
  }
}

#[inline]
fn write_word(bytes: &mut [u8], index: usize, depth: ChannelDepth, value: u64) {
  match depth {
    ChannelDepth::Bits8 => bytes[index] = value as u8,
    ChannelDepth::Bits16 => {
      let i = index * 2;
      bytes[i..i + 2].copy_from_slice(&(value as u16).to_le_bytes());
    }
    ChannelDepth::Bits32 => {
      let i = index * 4;
      bytes[i..i + 4].copy_from_slice(&(value as u32).to_le_bytes());
    }
    ChannelDepth::Bits64 => {
      let i = index * 8;
      bytes[i..i + 8].copy_from_slice(&value.to_le_bytes());
    }
  }
}

impl VoxelBuffer {
  /// Create a buffer of the given size with every channel uniform zero.
  pub fn new(size: UVec3) -> Self {
    let channels = std::array::from_fn(|i| ChannelState {
      storage: ChannelStorage::Uniform(0),
      depth: DEFAULT_DEPTHS[i],
    });
    Self { size, channels }
  }

  /// Voxels per channel.
  #[inline]
  pub fn volume(&self) -> usize {
    (self.size.x * self.size.y * self.size.z) as usize
  }

  /// Linear index of a voxel. Y is the innermost axis.
  #[inline]
  pub fn index(&self, pos: UVec3) -> usize {
    (pos.y + pos.x * self.size.y + pos.z * self.size.x * self.size.y) as usize
  }

  /// Change a channel's word width. Resets the channel to uniform zero.
  pub fn set_channel_depth(&mut self, channel: Channel, depth: ChannelDepth) {
    let state = &mut self.channels[channel as usize];
    state.depth = depth;
    state.storage = ChannelStorage::Uniform(0);
  }

  /// Collapse a channel to a single value for every voxel.
  pub fn fill(&mut self, channel: Channel, value: u64) {
    self.channels[channel as usize].storage = ChannelStorage::Uniform(value);
  }

  /// Write one voxel, materializing the channel to dense storage first if it
  /// was uniform. Writing to an LZ4-compressed channel is a programming
  /// error; decompress first.
  pub fn set_voxel(&mut self, pos: UVec3, channel: Channel, value: u64) {
    let volume = self.volume();
    let index = self.index(pos);
    let state = &mut self.channels[channel as usize];
    if let ChannelStorage::Uniform(uniform) = state.storage {
      let mut bytes = vec![0u8; volume * state.depth.byte_count()];
      if uniform != 0 {
        for i in 0..volume {
          write_word(&mut bytes, i, state.depth, uniform);
        }
      }
      state.storage = ChannelStorage::Dense(bytes);
    }
    match &mut state.storage {
      ChannelStorage::Dense(bytes) => write_word(bytes, index, state.depth, value),
      ChannelStorage::Lz4(_) => panic!("cannot write voxels into a compressed channel"),
      ChannelStorage::Uniform(_) => unreachable!(),
    }
  }

  /// Read one voxel from any storage except LZ4 (which reads as zero until
  /// decompressed).
  pub fn get_voxel(&self, pos: UVec3, channel: Channel) -> u64 {
    let index = self.index(pos);
    let state = &self.channels[channel as usize];
    match &state.storage {
      ChannelStorage::Uniform(value) => *value,
      ChannelStorage::Dense(bytes) => read_word(bytes, index, state.depth),
      ChannelStorage::Lz4(_) => 0,
    }
  }

  /// Compress a dense channel with LZ4. Uniform channels stay uniform (they
  /// are already as small as they can get).
  pub fn compress_channel(&mut self, channel: Channel) {
    let state = &mut self.channels[channel as usize];
    if let ChannelStorage::Dense(bytes) = &state.storage {
      let compressed = lz4_flex::compress_prepend_size(bytes);
      state.storage = ChannelStorage::Lz4(compressed);
    }
  }

  /// Restore dense storage for an LZ4-compressed channel.
  pub fn decompress_channel(
    &mut self,
    channel: Channel,
  ) -> Result<(), lz4_flex::block::DecompressError> {
    let state = &mut self.channels[channel as usize];
    if let ChannelStorage::Lz4(compressed) = &state.storage {
      let bytes = lz4_flex::decompress_size_prepended(compressed)?;
      state.storage = ChannelStorage::Dense(bytes);
    }
    Ok(())
  }
}

impl VoxelVolume for VoxelBuffer {
  #[inline]
  fn size(&self) -> UVec3 {
    self.size
  }

  #[inline]
  fn channel_compression(&self, channel: Channel) -> ChannelCompression {
    match self.channels[channel as usize].storage {
      ChannelStorage::Uniform(_) => ChannelCompression::Uniform,
      ChannelStorage::Dense(_) => ChannelCompression::None,
      ChannelStorage::Lz4(_) => ChannelCompression::Lz4,
    }
  }

  #[inline]
  fn channel_depth(&self, channel: Channel) -> ChannelDepth {
    self.channels[channel as usize].depth
  }

  #[inline]
  fn channel_raw(&self, channel: Channel) -> Option<&[u8]> {
    match &self.channels[channel as usize].storage {
      ChannelStorage::Dense(bytes) => Some(bytes),
      _ => None,
    }
  }

  #[inline]
  fn voxel_at(&self, pos: UVec3, channel: Channel) -> u64 {
    self.get_voxel(pos, channel)
  }
}

#[cfg(test)]
#[path = "buffer_test.rs"]
mod buffer_test;
