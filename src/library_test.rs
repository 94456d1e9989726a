use super::*;

#[test]
fn test_unit_cube_surface_shape() {
  let surface = BakedSurface::unit_cube(0);
  for side in 0..SIDE_COUNT {
    assert_eq!(surface.side_positions[side].len(), 4);
    assert_eq!(surface.side_uvs[side].len(), 4);
    assert_eq!(surface.side_indices[side].len(), 6);
    assert!(surface.side_tangents[side].is_empty());

    // Every index references one of the four vertices.
    for &i in &surface.side_indices[side] {
      assert!((i as usize) < surface.side_positions[side].len());
    }
  }
  assert!(surface.positions.is_empty(), "a plain cube has no inner geometry");
  assert!(surface.collision_enabled);
}

#[test]
fn test_unit_cube_side_positions_lie_on_their_plane() {
  let surface = BakedSurface::unit_cube(0);
  for side in 0..SIDE_COUNT {
    let axis = side / 2;
    let value = (side % 2) as f32;
    for p in &surface.side_positions[side] {
      assert_eq!(p[axis], value, "side {} vertex off its plane", side);
    }
  }
}

#[test]
fn test_occlusion_matrix_is_asymmetric() {
  let mut baked = BakedLibrary::default();
  baked.reset_side_patterns(3);
  baked.set_side_pattern_occlusion(1, 2, true);

  assert!(baked.side_pattern_occlusion(1, 2));
  assert!(!baked.side_pattern_occlusion(2, 1), "occlusion must not be mirrored");
  assert!(!baked.side_pattern_occlusion(0, 0));
}

#[test]
fn test_occlusion_out_of_range_patterns_never_occlude() {
  let mut baked = BakedLibrary::default();
  baked.reset_side_patterns(2);
  baked.set_side_pattern_occlusion(0, 1, true);

  assert!(!baked.side_pattern_occlusion(5, 1));
  assert!(!baked.side_pattern_occlusion(0, 5));
}

#[test]
fn test_has_model_bounds() {
  let mut baked = BakedLibrary::default();
  baked.models.push(BakedModel::default());
  baked.models.push(BakedModel::opaque_cube(0, [1.0; 4]));

  assert!(baked.has_model(0));
  assert!(baked.has_model(1));
  assert!(!baked.has_model(2));
}

#[test]
fn test_library_material_lookup() {
  let mut baked = BakedLibrary::default();
  baked.indexed_materials = vec!["stone".to_string(), "grass".to_string()];
  let library = BlockyLibrary::new(baked);

  assert_eq!(library.material_count(), 2);
  assert_eq!(library.material_by_index(0).as_deref(), Some("stone"));
  assert_eq!(library.material_by_index(1).as_deref(), Some("grass"));
  assert_eq!(library.material_by_index(2), None);
}

#[test]
fn test_bake_replaces_snapshot() {
  let library = BlockyLibrary::default();
  assert_eq!(library.baked().models.len(), 0);

  let mut baked = BakedLibrary::default();
  baked.models.push(BakedModel::default());
  baked.indexed_materials.push("dirt".to_string());
  library.bake(baked);

  assert_eq!(library.baked().models.len(), 1);
  assert_eq!(library.material_by_index(0).as_deref(), Some("dirt"));
}

#[test]
fn test_side_library_lookup() {
  let baked = BakedSideLibrary {
    models: vec![
      BakedSideModel::default(),
      BakedSideModel { material_id: 0 },
    ],
    indexed_materials: vec!["moss".to_string()],
  };
  let library = SideLibrary::new(baked);

  assert_eq!(library.material_count(), 1);
  assert_eq!(library.material_by_index(0).as_deref(), Some("moss"));
  assert!(library.baked().has_model(1));
  assert!(!library.baked().has_model(2));
}
