// demos/demo.rs
use fast_mc::analytics::bs_analytic;
use fast_mc::math_utils::Timer;
use fast_mc::mc::estimators::{
    estimate_antithetic, estimate_control_variate, estimate_plain, EstimationResult,
};
use fast_mc::models::gbm::ModelParameters;
use fast_mc::rng::RandomStream;
use fast_mc::McResult;

fn print_result(name: &str, result: &EstimationResult, analytic: f64, elapsed_ms: f64) {
    println!(
        "{:<18} {:>9.4} {:>9.5} [{:>8.4}, {:>8.4}] {:>10.5} {:>9.1}",
        name,
        result.price,
        result.stderr,
        result.ci_low,
        result.ci_high,
        (result.price - analytic).abs(),
        elapsed_ms
    );
}

fn run() -> McResult<()> {
    let params = ModelParameters::default();
    let n = 200_000;
    let epsilon = 0.05;
    let analytic = bs_analytic::bs_call_price(&params)?;

    println!("European call: S0={} K={} T={} r={} sigma={}", params.s0, params.k, params.t, params.r, params.sigma);
    println!("Analytic Black-Scholes price: {:.6}\n", analytic);
    println!(
        "{:<18} {:>9} {:>9} {:>20} {:>10} {:>9}",
        "Estimator", "Price", "Stderr", "95% CI", "Abs Err", "ms"
    );

    // One stream, fixed order: plain, control variate, antithetic
    let mut stream = RandomStream::new(42);
    let mut timer = Timer::new();

    timer.start();
    let plain = estimate_plain(&mut stream, &params, n, epsilon)?;
    print_result("Plain", &plain, analytic, timer.elapsed_ms());

    timer.start();
    let cv = estimate_control_variate(&mut stream, &params, n, epsilon)?;
    print_result("Control Variate", &cv, analytic, timer.elapsed_ms());

    timer.start();
    let av = estimate_antithetic(&mut stream, &params, n / 2, epsilon)?;
    print_result("Antithetic", &av, analytic, timer.elapsed_ms());

    println!();
    if let Some(rho_squared) = cv.rho_squared() {
        println!("Control variate rho^2: {:.4}", rho_squared);
    }
    if let Some(reduction) = av.possible_reduction() {
        println!("Antithetic Cov(Y1,Y2)/(2n): {:.3e}", reduction);
    }
    println!(
        "Variance reduction factor (plain/cv): {:.2}",
        (plain.stderr / cv.stderr).powi(2)
    );
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
