use glam::UVec3;

use super::*;

#[test]
fn test_new_buffer_is_uniform_zero() {
  let buffer = VoxelBuffer::new(UVec3::new(4, 4, 4));
  for channel in Channel::ALL {
    assert_eq!(
      buffer.channel_compression(channel),
      ChannelCompression::Uniform
    );
    assert_eq!(buffer.get_voxel(UVec3::new(2, 3, 1), channel), 0);
    assert!(buffer.channel_raw(channel).is_none());
  }
}

#[test]
fn test_fill_keeps_channel_uniform() {
  let mut buffer = VoxelBuffer::new(UVec3::new(3, 3, 3));
  buffer.fill(Channel::Type, 42);
  assert_eq!(
    buffer.channel_compression(Channel::Type),
    ChannelCompression::Uniform
  );
  assert_eq!(buffer.get_voxel(UVec3::new(0, 0, 0), Channel::Type), 42);
  assert_eq!(buffer.get_voxel(UVec3::new(2, 2, 2), Channel::Type), 42);
}

#[test]
fn test_set_voxel_materializes_uniform_channel() {
  let mut buffer = VoxelBuffer::new(UVec3::new(3, 3, 3));
  buffer.fill(Channel::Type, 7);
  buffer.set_voxel(UVec3::new(1, 1, 1), Channel::Type, 9);

  assert_eq!(
    buffer.channel_compression(Channel::Type),
    ChannelCompression::None
  );
  // The written voxel changed, the uniform value survived everywhere else.
  assert_eq!(buffer.get_voxel(UVec3::new(1, 1, 1), Channel::Type), 9);
  assert_eq!(buffer.get_voxel(UVec3::new(0, 0, 0), Channel::Type), 7);
  assert_eq!(buffer.get_voxel(UVec3::new(2, 2, 2), Channel::Type), 7);

  let raw = buffer.channel_raw(Channel::Type).expect("dense raw span");
  assert_eq!(
    raw.len(),
    buffer.volume() * ChannelDepth::Bits16.byte_count()
  );
}

#[test]
fn test_linear_index_is_y_innermost() {
  let buffer = VoxelBuffer::new(UVec3::new(4, 5, 6));
  assert_eq!(buffer.index(UVec3::new(0, 0, 0)), 0);
  assert_eq!(buffer.index(UVec3::new(0, 1, 0)), 1);
  assert_eq!(buffer.index(UVec3::new(1, 0, 0)), 5);
  assert_eq!(buffer.index(UVec3::new(0, 0, 1)), 20);
  assert_eq!(buffer.index(UVec3::new(3, 4, 5)), 4 + 3 * 5 + 5 * 20);
}

#[test]
fn test_channel_depths_round_trip_values() {
  let depths = [
    (ChannelDepth::Bits8, 0xABu64),
    (ChannelDepth::Bits16, 0xBEEF),
    (ChannelDepth::Bits32, 0xDEAD_BEEF),
    (ChannelDepth::Bits64, 0xDEAD_BEEF_CAFE_F00D),
  ];
  for (depth, value) in depths {
    let mut buffer = VoxelBuffer::new(UVec3::new(3, 3, 3));
    buffer.set_channel_depth(Channel::Data5, depth);
    buffer.set_voxel(UVec3::new(2, 1, 0), Channel::Data5, value);
    assert_eq!(
      buffer.get_voxel(UVec3::new(2, 1, 0), Channel::Data5),
      value,
      "value lost at depth {:?}",
      depth
    );
  }
}

#[test]
fn test_set_channel_depth_resets_to_uniform() {
  let mut buffer = VoxelBuffer::new(UVec3::new(3, 3, 3));
  buffer.set_voxel(UVec3::new(1, 1, 1), Channel::Type, 5);
  buffer.set_channel_depth(Channel::Type, ChannelDepth::Bits8);
  assert_eq!(
    buffer.channel_compression(Channel::Type),
    ChannelCompression::Uniform
  );
  assert_eq!(buffer.get_voxel(UVec3::new(1, 1, 1), Channel::Type), 0);
}

#[test]
fn test_lz4_compression_round_trip() {
  let mut buffer = VoxelBuffer::new(UVec3::new(4, 4, 4));
  for x in 0..4 {
    for z in 0..4 {
      buffer.set_voxel(UVec3::new(x, 1, z), Channel::Type, (x + z * 4) as u64);
    }
  }
  let before: Vec<u64> = (0..4)
    .flat_map(|x| (0..4).map(move |z| (x, z)))
    .map(|(x, z)| buffer.get_voxel(UVec3::new(x, 1, z), Channel::Type))
    .collect();

  buffer.compress_channel(Channel::Type);
  assert_eq!(
    buffer.channel_compression(Channel::Type),
    ChannelCompression::Lz4
  );
  assert!(buffer.channel_raw(Channel::Type).is_none());

  buffer.decompress_channel(Channel::Type).expect("decompress");
  assert_eq!(
    buffer.channel_compression(Channel::Type),
    ChannelCompression::None
  );
  let after: Vec<u64> = (0..4)
    .flat_map(|x| (0..4).map(move |z| (x, z)))
    .map(|(x, z)| buffer.get_voxel(UVec3::new(x, 1, z), Channel::Type))
    .collect();
  assert_eq!(before, after);
}

#[test]
fn test_compress_leaves_uniform_channels_alone() {
  let mut buffer = VoxelBuffer::new(UVec3::new(3, 3, 3));
  buffer.fill(Channel::Sdf, 11);
  buffer.compress_channel(Channel::Sdf);
  assert_eq!(
    buffer.channel_compression(Channel::Sdf),
    ChannelCompression::Uniform
  );
  assert_eq!(buffer.get_voxel(UVec3::new(1, 1, 1), Channel::Sdf), 11);
}

#[test]
fn test_channel_mask_bits_are_distinct() {
  let mut seen = 0u8;
  for channel in Channel::ALL {
    let bit = channel.mask_bit();
    assert_eq!(seen & bit, 0, "channel {:?} reuses a mask bit", channel);
    seen |= bit;
  }
  assert_eq!(seen, 0xFF);
}
