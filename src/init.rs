//! Startup: turning command line arguments into a [SimConfig] and print settings.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};

use crate::config::{self, SimConfig};
use crate::print;

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Startup {
    /// Run the simulation with this configuration
    Run(SimConfig),
    /// Only show the help text
    Help,
}

/// ### Reads arguments from `cargo run`
///
/// Arguments are `key::value` pairs, applied left to right:
///
/// `cars::N` &rarr; Number of cars
/// `floors::N` &rarr; Highest floor
/// `period_ms::N` &rarr; Milliseconds between rounds
/// `pipe::PATH` &rarr; Request pipe, `-` reads stdin
/// `config::FILE` &rarr; Load a JSON config file. Arguments after it override it.
/// `print_view::(true/false)` &rarr; Prints the bank after every round
/// `print_json::(true/false)` &rarr; Prints the bank as JSON after every round
/// `print_err::(true/false)` &rarr; Prints error messages
/// `print_warn::(true/false)` &rarr; Prints warning messages
/// `print_ok::(true/false)` &rarr; Prints OK messages
/// `print_info::(true/false)` &rarr; Prints informational messages
/// `debug` &rarr; Disables all prints except error messages
/// `help` &rarr; Displays all possible arguments without starting the program
///
/// If no arguments are provided, the defaults from [crate::config] are used
/// and all prints except JSON are enabled.
pub fn parse_args() -> anyhow::Result<SimConfig> {
    let args: Vec<String> = env::args().skip(1).collect();

    match parse_arg_list(&args)? {
        Startup::Run(config) => Ok(config),
        Startup::Help => {
            print_help();
            std::process::exit(0);
        }
    }
}

/// Applies `args` on top of the default configuration. Print flags are set as a side effect.
pub fn parse_arg_list(args: &[String]) -> anyhow::Result<Startup> {
    let mut sim = SimConfig::default();

    for arg in args {
        let lower = arg.to_lowercase();
        if lower == "help" {
            return Ok(Startup::Help);
        }
        if lower == "debug" || lower == "debug::" {
            // Debug modus: kun error-meldingar
            config::set_flag(&config::PRINT_VIEW_ON, false);
            config::set_flag(&config::PRINT_JSON_ON, false);
            config::set_flag(&config::PRINT_WARN_ON, false);
            config::set_flag(&config::PRINT_OK_ON, false);
            config::set_flag(&config::PRINT_INFO_ON, false);
            continue;
        }

        let Some((key, value)) = arg.split_once("::") else {
            print::warn(format!("Ignoring unknown argument '{}', try 'help'", arg));
            continue;
        };

        match key.to_lowercase().as_str() {
            "cars" => sim.elevator_count = parse_number(key, value)?,
            "floors" => sim.max_floor = parse_number(key, value)?,
            "period_ms" => sim.round_period_ms = parse_number(key, value)?,
            "pipe" => sim.request_pipe = PathBuf::from(value),
            "config" => sim = SimConfig::from_file(value.as_ref())?,
            "print_view" => config::set_flag(&config::PRINT_VIEW_ON, is_true(value)),
            "print_json" => config::set_flag(&config::PRINT_JSON_ON, is_true(value)),
            "print_err" => config::set_flag(&config::PRINT_ERR_ON, is_true(value)),
            "print_warn" => config::set_flag(&config::PRINT_WARN_ON, is_true(value)),
            "print_ok" => config::set_flag(&config::PRINT_OK_ON, is_true(value)),
            "print_info" => config::set_flag(&config::PRINT_INFO_ON, is_true(value)),
            _ => print::warn(format!("Ignoring unknown argument '{}', try 'help'", arg)),
        }
    }

    sim.validate()?;
    Ok(Startup::Run(sim))
}

fn parse_number<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if value.is_empty() {
        bail!("Missing value for '{}::'", key);
    }
    value
        .parse::<T>()
        .with_context(|| format!("Invalid value '{}' for '{}::'", value, key))
}

fn is_true(value: &str) -> bool {
    value.to_lowercase() == "true"
}

fn print_help() {
    println!("Available arguments:");
    println!("  cars::N                 number of cars (default {})", config::DEFAULT_ELEVATOR_COUNT);
    println!("  floors::N               highest floor (default {})", config::DEFAULT_MAX_FLOOR);
    println!("  period_ms::N            time between rounds (default {} ms)", config::DEFAULT_ROUND_PERIOD.as_millis());
    println!("  pipe::PATH              request pipe, '-' for stdin (default {})", config::DEFAULT_REQUEST_PIPE);
    println!("  config::FILE            JSON config file, later arguments override it");
    println!("  print_view::true/false");
    println!("  print_json::true/false");
    println!("  print_err::true/false");
    println!("  print_warn::true/false");
    println!("  print_ok::true/false");
    println!("  print_info::true/false");
    println!("  debug                   only error messages are shown");
    println!();
    println!("Requests are lines of the form 'floor,up|down,target', e.g. '5,up,7'.");
}
