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
fn noise_is_bit_identical_for_identical_input() {
    for i in 0..200 {
        let x = f64::from(i) * 0.173 - 11.0;
        assert_eq!(
            pseudo_noise_1d(x).to_bits(),
            pseudo_noise_1d(x).to_bits(),
            "x={x}"
        );
    }
}

#[test]
fn noise_stays_in_unit_range() {
    for i in 0..2_000 {
        let x = f64::from(i) * 0.0371 - 25.0;
        let v = pseudo_noise_1d(x);
        assert!((0.0..=1.0).contains(&v), "x={x} v={v}");
    }
}

#[test]
fn noise_is_centred_on_lattice_points() {
    for cell in -4..4 {
        assert_eq!(pseudo_noise_1d(f64::from(cell)), 0.5);
    }
}

#[test]
fn noise_is_continuous() {
    let eps = 1e-6;
    for i in 0..500 {
        let x = f64::from(i) * 0.049 + 0.001;
        let d = (pseudo_noise_1d(x + eps) - pseudo_noise_1d(x)).abs();
        assert!(d < 1e-4, "jump of {d} at x={x}");
    }
}

#[test]
fn noise_varies_between_lattice_points() {
    let samples: Vec<f64> = (0..16).map(|i| pseudo_noise_1d(f64::from(i) + 0.5)).collect();
    assert!(samples.iter().any(|&v| (v - 0.5).abs() > 1e-3));
}

#[test]
fn non_finite_input_is_silent() {
    assert_eq!(pseudo_noise_1d(f64::NAN), 0.0);
    assert_eq!(pseudo_noise_1d(f64::INFINITY), 0.0);
}
