use propmodel::math::GRAVITY;
use propmodel::prop::{GeometryKey, OperatingPoint, PerformanceResult};
use propmodel::{ModelConfig, PropellerModel};
use std::env;

const DEFAULT_DATABASE: &str = "data/propeller_ct_cp_sample.json";
const CRUISE_VELOCITY: f64 = 20.0;
const CRUISE_RPM: f64 = 8000.0;

fn parse_geometry(arg: &str) -> Option<(f64, f64)> {
    let (d, p) = arg.split_once(|c: char| c == 'x' || c == 'X')?;
    Some((d.trim().parse().ok()?, p.trim().parse().ok()?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();

    let (database, geometry_args) = match args.first() {
        Some(first) if parse_geometry(first).is_none() => (first.clone(), &args[1..]),
        _ => (DEFAULT_DATABASE.to_string(), &args[..]),
    };

    let mut queries = Vec::new();
    for arg in geometry_args {
        match parse_geometry(arg) {
            Some(q) => queries.push(q),
            None => eprintln!("Ignoring malformed geometry '{}', expected DxP in mm", arg),
        }
    }
    if queries.is_empty() {
        queries = vec![
            (330.0, 254.0),
            (356.0, 229.0),
            (406.0, 203.0),
            (559.0, 254.0),
            (229.0, 102.0),
            (254.0, 80.0),
        ];
    }

    let model = PropellerModel::from_config(ModelConfig::default().with_database(&database))?;

    println!("Propeller Performance Model");
    println!("Database: {} ({} records)", database, model.store().len());

    for (d, p) in queries {
        let perf = match model.get_performance(d, p) {
            Ok(perf) => perf,
            Err(e) => {
                eprintln!("{}x{} mm: {}", d, p, e);
                continue;
            }
        };

        println!();
        println!("{} mm:", GeometryKey::from_dimensions(d, p));
        println!("  Method:   {}", perf.method().as_str());
        println!("  Accuracy: {:?}", perf.accuracy());

        if perf.is_fallback() {
            println!("  Efficiency = {:.1}% (fixed)", 100.0 * model.compute_efficiency(&perf, 0.0));
            continue;
        }

        let point = OperatingPoint::from_airspeed(CRUISE_VELOCITY, CRUISE_RPM, d / 1000.0);
        let j = point.advance_ratio;
        println!("  Source:   {}", perf.source_key().unwrap_or("-"));
        println!("  J = {:.3}{}", j, if perf.is_extrapolating(j) { " (extrapolated)" } else { "" });
        if let Some(thrust) = model.compute_thrust(&perf, &point) {
            println!("  Thrust = {:.1} N ({:.2} kg)", thrust, thrust / GRAVITY);
        }
        if let Some(power) = model.compute_power(&perf, &point) {
            println!("  Power = {:.1} W", power);
        }
        println!("  Efficiency = {:.1}%", 100.0 * model.compute_efficiency(&perf, j));

        if let PerformanceResult::Scaled(scaled) = &perf {
            println!("  P/D error: {:.1}%", 100.0 * scaled.pd_relative_error);
            println!(
                "  Scale: CT x{:.4}, CP x{:.4} (Re {:.0} -> {:.0}, {:?})",
                scaled.scale_factor,
                scaled.scaling.cp_factor,
                scaled.scaling.re_base,
                scaled.scaling.re_target,
                scaled.scaling.regime
            );
        }
    }

    let stats = model.get_statistics();
    println!();
    println!("Statistics ({} queries)", stats.total_queries);
    println!("  Exact match:     {:.1}%", stats.exact_match_pct);
    println!("  Scaled match:    {:.1}%", stats.scaled_match_pct);
    println!("  Simple fallback: {:.1}%", stats.simple_fallback_pct);

    Ok(())
}
