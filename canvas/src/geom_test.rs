#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn percent_from_normalized_scales_by_hundred() {
    let p = PercentPos::from_normalized(0.25, 0.8);
    assert_eq!(p, PercentPos::new(25.0, 80.0));
}

#[test]
fn percent_to_pixels_uses_box_size() {
    let p = PercentPos::new(50.0, 25.0).to_pixels(Size::new(800.0, 400.0));
    assert_eq!(p, Point::new(400.0, 100.0));
}

#[test]
fn percent_outside_box_maps_outside_pixels() {
    let p = PercentPos::new(-20.0, 120.0).to_pixels(Size::new(100.0, 100.0));
    assert_eq!(p, Point::new(-20.0, 120.0));
}

#[test]
fn zero_size_is_not_drawable() {
    assert!(!Size::default().is_drawable());
    assert!(!Size::new(10.0, 0.0).is_drawable());
    assert!(Size::new(1.0, 1.0).is_drawable());
}
