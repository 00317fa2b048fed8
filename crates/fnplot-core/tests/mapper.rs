// File: crates/fnplot-core/tests/mapper.rs
// Purpose: Coordinate mapping between data space and logical device pixels.

use fnplot_core::{CoordinateMapper, DevicePoint, Point, ScaleTransform, SurfaceSize, Viewport};

#[test]
fn corners_map_to_surface_corners() {
    let v = Viewport::new(-10.0, 10.0, -5.0, 5.0).unwrap();
    let m = CoordinateMapper::new(&v, SurfaceSize::new(200.0, 100.0));
    assert_eq!(m.to_device(Point::new(-10.0, 5.0)), DevicePoint::new(0.0, 0.0));
    assert_eq!(m.to_device(Point::new(10.0, -5.0)), DevicePoint::new(200.0, 100.0));
    assert_eq!(m.to_device(Point::new(0.0, 0.0)), DevicePoint::new(100.0, 50.0));
}

#[test]
fn y_grows_downwards_on_device() {
    let m = CoordinateMapper::new(&Viewport::default(), SurfaceSize::default());
    assert!(m.to_device_y(1.0) < m.to_device_y(0.0));
    assert!(m.to_device_x(1.0) > m.to_device_x(0.0));
}

#[test]
fn round_trips_within_tolerance() {
    let v = Viewport::new(-3.7, 12.1, 0.25, 80.0).unwrap();
    let m = CoordinateMapper::new(&v, SurfaceSize::new(1024.0, 640.0));
    for &(x, y) in &[(-3.7, 0.25), (0.0, 1.0), (5.5, 42.0), (12.1, 80.0), (100.0, -50.0)] {
        assert!((m.to_data_x(m.to_device_x(x)) - x).abs() < 1e-9);
        assert!((m.to_data_y(m.to_device_y(y)) - y).abs() < 1e-9);
    }
}

#[test]
fn device_round_trips_within_tolerance() {
    let v = Viewport::new(-3.7, 12.1, 0.25, 80.0).unwrap();
    let m = CoordinateMapper::new(&v, SurfaceSize::new(1024.0, 640.0));
    for &px in &[0.0, 1.5, 333.0, 512.0, 1024.0, -40.0] {
        assert!((m.to_device_x(m.to_data_x(px)) - px).abs() < 1e-9);
    }
    for &py in &[0.0, 0.5, 320.0, 640.0, 700.0] {
        assert!((m.to_device_y(m.to_data_y(py)) - py).abs() < 1e-9);
    }
    let p = DevicePoint::new(100.0, 200.0);
    let q = m.to_device(m.to_data(p));
    assert!((q.x - p.x).abs() < 1e-3 && (q.y - p.y).abs() < 1e-3);
}

#[test]
fn pixel_ratio_does_not_change_logical_mapping() {
    let v = Viewport::default();
    let a = CoordinateMapper::new(&v, SurfaceSize::new(400.0, 300.0));
    let b = CoordinateMapper::new(&v, SurfaceSize::with_pixel_ratio(400.0, 300.0, 2.0));
    assert_eq!(a.to_device_x(3.0), b.to_device_x(3.0));
    assert_eq!(a.scale_y(), b.scale_y());
}
