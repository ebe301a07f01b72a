// scripts/benchmark.rs
use fast_mc::analytics::bs_analytic::bs_call_price;
use fast_mc::math_utils::Timer;
use fast_mc::mc::estimators::{
    estimate_antithetic, estimate_control_variate, estimate_plain, EstimationResult,
};
use fast_mc::mc::mc_engine::{EstimatorKind, McConfig};
use fast_mc::models::gbm::ModelParameters;
use fast_mc::rng::RandomStream;
use fast_mc::McResult;
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    paths: usize,
    time_ms: f64,
    throughput_paths_per_sec: f64,
    value: f64,
    stderr: f64,
    analytic_value: f64,
    variance_reduction: Option<f64>,
}

/// Overrides from FAST_MC_* environment variables, falling back to defaults
fn config_from_env() -> McConfig {
    let defaults = McConfig::default();
    McConfig {
        seed: env_or("FAST_MC_SEED", defaults.seed),
        epsilon: env_or("FAST_MC_EPSILON", defaults.epsilon),
        ..defaults
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

const DEFAULT_PATH_COUNTS: [usize; 3] = [10_000, 100_000, 1_000_000];

fn path_counts() -> Vec<usize> {
    match env::var("FAST_MC_PATHS") {
        Ok(raw) => parse_path_counts(&raw),
        Err(_) => DEFAULT_PATH_COUNTS.to_vec(),
    }
}

/// Comma-separated path counts; unparsable entries are skipped with a warning
/// and an empty result falls back to the defaults
fn parse_path_counts(raw: &str) -> Vec<usize> {
    let mut counts = Vec::new();
    for entry in raw.split(',').map(str::trim) {
        match entry.parse::<usize>() {
            Ok(paths) => counts.push(paths),
            Err(e) => warn!(entry, error = %e, "ignoring invalid FAST_MC_PATHS entry"),
        }
    }
    if counts.is_empty() {
        warn!(raw, "FAST_MC_PATHS has no valid entries, using defaults");
        return DEFAULT_PATH_COUNTS.to_vec();
    }
    counts
}

fn run_benchmarks(params: &ModelParameters, base: &McConfig) -> McResult<Vec<BenchmarkResult>> {
    let analytic_value = bs_call_price(params)?;
    let mut results = Vec::new();

    for paths in path_counts() {
        info!(paths, "running estimator comparison");
        let cfg = McConfig {
            paths,
            ..base.clone()
        };
        cfg.validate()?;

        // same draw order as compare_estimators: plain, control variate, antithetic
        let mut stream = RandomStream::new(cfg.seed);
        let mut timed: Vec<(EstimatorKind, EstimationResult, f64)> = Vec::with_capacity(3);
        for kind in [
            EstimatorKind::Plain,
            EstimatorKind::ControlVariate,
            EstimatorKind::Antithetic,
        ] {
            let mut timer = Timer::new();
            timer.start();
            let result = match kind {
                EstimatorKind::Plain => estimate_plain(&mut stream, params, paths, cfg.epsilon)?,
                EstimatorKind::ControlVariate => {
                    estimate_control_variate(&mut stream, params, paths, cfg.epsilon)?
                }
                EstimatorKind::Antithetic => {
                    estimate_antithetic(&mut stream, params, paths / 2, cfg.epsilon)?
                }
            };
            timed.push((kind, result, timer.elapsed_ms()));
        }

        let plain_stderr = timed[0].1.stderr;
        for (kind, result, time_ms) in timed {
            results.push(BenchmarkResult {
                name: format!("{} ({}k paths)", kind, paths / 1000),
                paths,
                time_ms,
                throughput_paths_per_sec: paths as f64 / (time_ms / 1000.0),
                value: result.price,
                stderr: result.stderr,
                analytic_value,
                variance_reduction: match kind {
                    EstimatorKind::Plain => None,
                    _ if result.stderr > 0.0 => Some((plain_stderr / result.stderr).powi(2)),
                    _ => None,
                },
            });
        }
    }

    Ok(results)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("fast-mc Estimator Benchmark");
    println!("===========================\n");

    let system_info = SystemInfo::gather();
    info!(
        os = %system_info.os,
        cpu_cores = system_info.cpu_cores,
        rayon_threads = system_info.rayon_threads,
        date = %chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        "system information"
    );

    let params = ModelParameters::default();
    let cfg = config_from_env();
    info!(seed = cfg.seed, epsilon = cfg.epsilon, ?params, "benchmark configuration");

    let results = match run_benchmarks(&params, &cfg) {
        Ok(results) => results,
        Err(e) => {
            error!(error = %e, "benchmark failed");
            std::process::exit(1);
        }
    };

    println!("\n{:=<96}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<96}", "");
    println!(
        "{:<32} {:>9} {:>10} {:>14} {:>9} {:>9} {:>9} {:>9}",
        "Benchmark", "Paths", "Time (ms)", "Throughput", "Value", "Stderr", "Analytic", "VRF"
    );
    println!("{:-<96}", "");

    for result in &results {
        println!(
            "{:<32} {:>9} {:>10.2} {:>14.0} {:>9.4} {:>9.5} {:>9.4} {:>9}",
            result.name,
            result.paths,
            result.time_ms,
            result.throughput_paths_per_sec,
            result.value,
            result.stderr,
            result.analytic_value,
            result
                .variance_reduction
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "-".to_string())
        );
    }

    println!("{:=<96}", "");
    println!("\nTo reproduce: FAST_MC_SEED={} cargo run --bin benchmark --release", cfg.seed);
}
