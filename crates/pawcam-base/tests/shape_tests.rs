use pawcam_base::{Layout, Shape};

#[test]
fn test_planar_dims_order() {
    let shape = Shape::planar(1, 3, 32, 64);
    assert_eq!(shape.dims(), [1, 3, 32, 64]);
    assert_eq!(shape.layout, Layout::Planar);
    assert_eq!(shape.spatial(), 2048);
    assert_eq!(shape.len(), 6144);
}

#[test]
fn test_interleaved_dims_order() {
    let shape = Shape::interleaved(1, 224, 224, 3);
    assert_eq!(shape.dims(), [1, 224, 224, 3]);
    assert_eq!(shape.channels, 3);
    assert_eq!(shape.height, 224);
}

#[test]
fn test_layouts_compare_unequal() {
    // same element count, different memory order
    assert_ne!(Shape::planar(1, 3, 8, 8), Shape::interleaved(1, 8, 8, 3));
}

#[test]
fn test_shape_display() {
    assert_eq!(Shape::planar(1, 3, 32, 32).to_string(), "[1, 3, 32, 32] (NCHW)");
    assert_eq!(
        Shape::interleaved(1, 32, 32, 3).to_string(),
        "[1, 32, 32, 3] (NHWC)"
    );
}
