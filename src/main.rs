// src/main.rs

use env_logger::Env;
use log::{error, info};
use qsieve::bigint::BigInt;
use qsieve::config::SieveConfig;
use qsieve::prepass;
use qsieve::siqs;
use std::time::Instant;

fn main() {
    let env = Env::default()
        .filter_or("MY_LOG_LEVEL", "info")
        .write_style_or("MY_LOG_STYLE", "always");
    env_logger::Builder::from_env(env).init();

    let mut args = std::env::args().skip(1);
    let Some(n_str) = args.next() else {
        eprintln!("usage: qsieve <N>");
        std::process::exit(1);
    };

    let n = match n_str.parse::<BigInt>() {
        Ok(n) => n,
        Err(e) => {
            error!("failed to parse N: {e}");
            std::process::exit(1);
        }
    };

    if n.is_negative() || n.is_zero() || n.is_one() {
        error!("N must be a positive composite integer greater than 1");
        std::process::exit(1);
    }

    let config = SieveConfig::load().unwrap_or_else(|e| {
        error!("failed to load configuration, falling back to defaults: {e}");
        SieveConfig::default()
    });

    let start = Instant::now();

    let number = prepass::strip_small_factors(&n, config.prepass_trial_division_bound, config.prepass_pollard_rho_iterations);
    if number.is_fully_factored() {
        let elapsed_ms = start.elapsed().as_millis();
        info!("factored entirely by the pre-pass in {elapsed_ms}ms");
        print_factors(&number.factors);
        return;
    }

    let cofactor = number.cofactor.clone();
    match siqs::factor(&cofactor, &config) {
        Some((p, q)) => {
            let elapsed_ms = start.elapsed().as_millis();
            info!("factors verified in {elapsed_ms}ms");
            println!("factor1: {p}");
            println!("factor2: {q}");
            print_factors(&number.factors);
        }
        None => {
            let elapsed_ms = start.elapsed().as_millis();
            error!("failed to factor {n} after {elapsed_ms}ms");
            std::process::exit(1);
        }
    }
}

fn print_factors(factors: &std::collections::BTreeMap<BigInt, u32>) {
    for (p, exp) in factors {
        println!("prepass factor: {p}^{exp}");
    }
}
