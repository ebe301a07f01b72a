// demos/strike_sweep.rs
use fast_mc::mc::sampler::sample_terminal_prices;
use fast_mc::mc::sweep::{sweep_control_variate_correlation, uniform_strikes};
use fast_mc::models::gbm::ModelParameters;
use fast_mc::rng::RandomStream;
use fast_mc::McResult;

fn run() -> McResult<()> {
    let params = ModelParameters::default();
    let mut stream = RandomStream::new(2023);

    // One large sample, reused for every strike
    let sample = sample_terminal_prices(&mut stream, params.s0, params.t, params.r, params.sigma, 1_000_000)?;
    let strikes = uniform_strikes(0.0, 2.0 * params.s0, 21)?;
    let sweep = sweep_control_variate_correlation(&sample, params.r, params.t, &strikes)?;

    println!("{:>8} {:>10} {:>10}", "Strike", "rho", "rho^2");
    for point in &sweep {
        println!("{:>8.2} {:>10.6} {:>10.6}", point.strike, point.rho, point.rho_squared);
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
