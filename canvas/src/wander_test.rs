#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::LOBSTER_COUNT;
use crate::rng::{ScriptedRandom, SeededRandom};

fn canvas() -> Size {
    Size::new(1000.0, 600.0)
}

#[test]
fn school_starts_inside_water_band() {
    let school = spawn_school(LOBSTER_COUNT);
    assert_eq!(school.len(), LOBSTER_COUNT);
    for l in &school {
        assert!((WANDER_X_MIN..=WANDER_X_MAX).contains(&l.x));
        assert!((WANDER_Y_MIN..=WANDER_Y_MAX).contains(&l.y));
        assert_eq!(l.change_dir_timer, 0.0);
    }
    assert!((school[1].x - 0.27).abs() < 1e-12);
    assert!((school[2].y - 0.60).abs() < 1e-12);
    assert!((school[6].x - 0.15).abs() < 1e-12);
}

#[test]
fn first_update_resamples_heading() {
    // timer sample 0.5 -> 4000ms; angle sample 0.5 -> 0 rad.
    let mut rng = ScriptedRandom::new(&[0.5, 0.5]);
    let mut l = Lobster::spawn(0);
    l.update(16.0, canvas(), &mut rng);
    assert!((l.change_dir_timer - 4000.0).abs() < 1e-9);
    assert!((l.target_vx - 1.0).abs() < 1e-12);
    assert!(l.target_vy.abs() < 1e-12);
    assert_eq!(l.dir, 1.0);
}

#[test]
fn heading_west_faces_left() {
    // angle sample 0.0 -> -PI -> cos = -1.
    let mut rng = ScriptedRandom::new(&[0.0, 0.0]);
    let mut l = Lobster::spawn(0);
    l.update(16.0, canvas(), &mut rng);
    assert_eq!(l.dir, -1.0);
    assert!((l.change_dir_timer - 2000.0).abs() < 1e-9);
}

#[test]
fn vertical_target_is_damped() {
    // angle sample 0.75 -> PI/2 -> sin = 1, damped to 0.3.
    let mut rng = ScriptedRandom::new(&[0.0, 0.75]);
    let mut l = Lobster::spawn(0);
    l.update(0.0, canvas(), &mut rng);
    assert!((l.target_vy - 0.3).abs() < 1e-12);
}

#[test]
fn velocity_eases_by_fixed_factor_regardless_of_dt() {
    let mut rng = ScriptedRandom::new(&[0.5, 0.5]);
    let mut short = Lobster::spawn(0);
    let mut long = Lobster::spawn(0);
    short.update(1.0, canvas(), &mut rng);
    let mut rng = ScriptedRandom::new(&[0.5, 0.5]);
    long.update(30.0, canvas(), &mut rng);
    assert!((short.vx - 0.04).abs() < 1e-12);
    assert!((long.vx - 0.04).abs() < 1e-12);
}

#[test]
fn timer_counts_down_without_resampling() {
    let mut rng = ScriptedRandom::new(&[0.5, 0.5]);
    let mut l = Lobster::spawn(0);
    l.update(16.0, canvas(), &mut rng);
    let target = (l.target_vx, l.target_vy);
    l.update(100.0, canvas(), &mut ScriptedRandom::constant(0.0));
    assert!((l.change_dir_timer - 3900.0).abs() < 1e-9);
    assert_eq!((l.target_vx, l.target_vy), target);
}

#[test]
fn position_integrates_velocity_in_canvas_widths() {
    let mut l = Lobster::spawn(0);
    l.vx = 1.0;
    l.target_vx = 1.0;
    l.change_dir_timer = 10_000.0;
    let x0 = l.x;
    l.update(1000.0, canvas(), &mut ScriptedRandom::constant(0.5));
    // One second at speed 0.035 widths/s.
    assert!((l.x - (x0 + 0.035)).abs() < 1e-9);
}

#[test]
fn vertical_motion_scales_by_width_over_height() {
    let mut l = Lobster::spawn(0);
    l.vy = 0.3;
    l.target_vy = 0.3;
    l.change_dir_timer = 10_000.0;
    let y0 = l.y;
    l.update(1000.0, canvas(), &mut ScriptedRandom::constant(0.5));
    let expected = y0 + 0.3 * 0.035 * 1000.0 / 600.0;
    assert!((l.y - expected).abs() < 1e-9);
}

#[test]
fn clamps_to_water_band() {
    let mut l = Lobster::spawn(0);
    l.x = 0.94;
    l.y = 0.84;
    l.vx = 50.0;
    l.vy = 50.0;
    l.target_vx = 50.0;
    l.target_vy = 50.0;
    l.change_dir_timer = 10_000.0;
    l.update(32.0, canvas(), &mut ScriptedRandom::constant(0.5));
    assert_eq!(l.x, WANDER_X_MAX);
    assert_eq!(l.y, WANDER_Y_MAX);

    l.vx = -50.0;
    l.vy = -50.0;
    l.target_vx = -50.0;
    l.target_vy = -50.0;
    for _ in 0..20 {
        l.update(32.0, canvas(), &mut ScriptedRandom::constant(0.5));
    }
    assert_eq!(l.x, WANDER_X_MIN);
    assert_eq!(l.y, WANDER_Y_MIN);
}

#[test]
fn zero_sized_canvas_does_not_produce_nan() {
    let mut l = Lobster::spawn(3);
    l.update(16.0, Size::default(), &mut ScriptedRandom::constant(0.3));
    assert!(l.x.is_finite());
    assert!(l.y.is_finite());
}

#[test]
fn long_random_walk_never_leaves_band() {
    let mut rng = SeededRandom::from_seed(42);
    let mut school = spawn_school(LOBSTER_COUNT);
    for _ in 0..5_000 {
        for l in &mut school {
            l.update(32.0, canvas(), &mut rng);
            assert!((WANDER_X_MIN..=WANDER_X_MAX).contains(&l.x));
            assert!((WANDER_Y_MIN..=WANDER_Y_MAX).contains(&l.y));
        }
    }
}
