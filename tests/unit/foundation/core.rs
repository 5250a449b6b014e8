use super::*;

#[test]
fn layout_size_sanitizes_garbage() {
    let s = LayoutSize::new(f64::NAN, -4.0);
    assert_eq!(s, LayoutSize::default());
    assert!(s.is_empty());
    assert_eq!(LayoutSize::new(f64::INFINITY, 3.0).width, 0.0);
}

#[test]
fn pixel_ratio_is_capped_at_max() {
    let g = SurfaceGeometry::new(LayoutSize::new(800.0, 600.0), 3.0, 2.0);
    assert_eq!(g.pixel_ratio, 2.0);
    assert_eq!(g.backing_width, 1600);
    assert_eq!(g.backing_height, 1200);
}

#[test]
fn backing_size_floors_fractional_pixels() {
    let g = SurfaceGeometry::new(LayoutSize::new(100.5, 33.3), 1.5, 2.0);
    assert_eq!(g.backing_width, 150);
    assert_eq!(g.backing_height, 49);
}

#[test]
fn invalid_pixel_ratio_falls_back_to_one() {
    for dpr in [0.0, -1.0, f64::NAN] {
        let g = SurfaceGeometry::new(LayoutSize::new(10.0, 10.0), dpr, 2.0);
        assert_eq!(g.pixel_ratio, 1.0);
        assert_eq!(g.backing_width, 10);
    }
}

#[test]
fn golden_ordering() {
    assert!(Rgb8::new(200, 150, 30).is_golden());
    assert!(!Rgb8::new(150, 200, 30).is_golden());
    assert!(!Rgb8::new(200, 150, 130).is_golden());
}
