use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn forked_streams_are_reproducible_and_independent() {
    let mut parent_a = Rng64::new(55);
    let mut parent_b = Rng64::new(55);
    let mut child_a = parent_a.fork();
    let mut child_b = parent_b.fork();
    let mut sibling = parent_a.fork();
    let first = child_a.next_u64();
    assert_eq!(first, child_b.next_u64());
    assert_ne!(first, sibling.next_u64());
    assert_eq!(parent_a.next_u64(), {
        parent_b.fork();
        parent_b.next_u64()
    });
}

#[test]
fn rng_unit_interval_and_ranges() {
    let mut rng = Rng64::new(7);
    for _ in 0..10_000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
        let r = rng.range(4.0, 9.0);
        assert!((4.0..9.0).contains(&r));
        let s = rng.signed(0.5);
        assert!((-0.5..0.5).contains(&s));
    }
}

#[test]
fn mixed_seeds_diverge() {
    let a = Rng64::new(mix_seed(1, 10)).next_u64();
    let b = Rng64::new(mix_seed(1, 11)).next_u64();
    assert_ne!(a, b);
}

#[test]
fn clamp01_handles_nan_and_extremes() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(-3.0), 0.0);
    assert_eq!(clamp01(7.0), 1.0);
    assert_eq!(clamp01(0.25), 0.25);
}

#[test]
fn wrap_coord_stays_inside_margin() {
    assert!((wrap_coord(105.0, 100.0, 2.0) - 1.0).abs() < 1e-9);
    assert!((wrap_coord(-3.0, 100.0, 2.0) - 101.0).abs() < 1e-9);
    assert_eq!(wrap_coord(50.0, 100.0, 2.0), 50.0);
    for v in [-1000.0, -2.0, 0.0, 101.9, 5000.5] {
        let w = wrap_coord(v, 100.0, 2.0);
        assert!((-2.0..102.0).contains(&w), "{v} -> {w}");
    }
}

#[test]
fn fnv_is_order_sensitive() {
    let mut a = Fnv1a64::new_default();
    a.write_u8(1);
    a.write_u32(2);
    let mut b = Fnv1a64::new_default();
    b.write_u32(2);
    b.write_u8(1);
    assert_ne!(a.finish(), b.finish());
}
