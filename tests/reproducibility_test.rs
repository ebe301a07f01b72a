// tests/reproducibility_test.rs
use fast_mc::mc::estimators::{estimate_antithetic, estimate_control_variate, estimate_plain};
use fast_mc::mc::sampler::{sample_terminal_prices, sample_terminal_prices_antithetic};
use fast_mc::models::gbm::ModelParameters;
use fast_mc::rng::RandomStream;

#[test]
fn test_reseeded_stream_reproduces_results_bit_for_bit() {
    let params = ModelParameters::default();

    let run = |seed: u64| {
        let mut stream = RandomStream::new(seed);
        let plain = estimate_plain(&mut stream, &params, 10_000, 0.05).expect("Valid inputs");
        let cv = estimate_control_variate(&mut stream, &params, 10_000, 0.05).expect("Valid inputs");
        let av = estimate_antithetic(&mut stream, &params, 5_000, 0.05).expect("Valid inputs");
        (plain, cv, av)
    };

    let (p1, c1, a1) = run(42);
    let (p2, c2, a2) = run(42);

    assert_eq!(p1.price.to_bits(), p2.price.to_bits());
    assert_eq!(p1.stderr.to_bits(), p2.stderr.to_bits());
    assert_eq!(c1, c2);
    assert_eq!(a1, a2);
}

#[test]
fn test_sequential_estimators_use_disjoint_draws() {
    let params = ModelParameters::default();
    let mut shared = RandomStream::new(5);
    let first = estimate_plain(&mut shared, &params, 1_000, 0.05).expect("Valid inputs");
    let second = estimate_plain(&mut shared, &params, 1_000, 0.05).expect("Valid inputs");
    assert_ne!(first.price, second.price);

    // The second call matches a fresh stream that skipped the first 1000 draws
    let mut skipped = RandomStream::new(5);
    skipped.draw(1_000).expect("Valid draw count");
    let replay = estimate_plain(&mut skipped, &params, 1_000, 0.05).expect("Valid inputs");
    assert_eq!(second, replay);
}

#[test]
fn test_antithetic_sample_reuses_plain_draws() {
    // The antithetic original half is exactly a plain sample from the same position
    let mut a = RandomStream::new(77);
    let mut b = RandomStream::new(77);
    let plain = sample_terminal_prices(&mut a, 50.0, 0.25, 0.05, 0.3, 256).expect("Valid inputs");
    let pairs =
        sample_terminal_prices_antithetic(&mut b, 50.0, 0.25, 0.05, 0.3, 256).expect("Valid inputs");

    assert_eq!(plain, pairs.original);
    assert_eq!(a.consumed(), b.consumed());
}
