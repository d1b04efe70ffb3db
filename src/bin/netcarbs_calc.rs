//! One-shot net carb calculation
//!
//! Usage: `netcarbs_calc <total> <fiber> <polyols>` (grams). Prints the breakdown as JSON.

use std::process::ExitCode;

use netcarbs::NetCarbsInput;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: netcarbs_calc <total> <fiber> <polyols>";

fn parse_args(args: &[String]) -> Result<NetCarbsInput, String> {
    if args.len() != 3 {
        return Err(format!("expected 3 arguments, got {}", args.len()));
    }

    let mut values = [0.0_f64; 3];
    for (slot, (name, raw)) in values
        .iter_mut()
        .zip(["total", "fiber", "polyols"].iter().zip(args))
    {
        *slot = raw
            .parse()
            .map_err(|e| format!("invalid {} '{}': {}", name, raw, e))?;
    }

    Ok(NetCarbsInput::new(values[0], values[1], values[2]))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let input = match parse_args(&args) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let breakdown = input.breakdown();
    tracing::debug!(?input, net = breakdown.net_carbs, "calculated");

    match serde_json::to_string_pretty(&breakdown) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("failed to serialize result: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let input = parse_args(&args(&["30", "5", "10"])).unwrap();
        assert_eq!(input, NetCarbsInput::new(30.0, 5.0, 10.0));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["30", "5"])).is_err());
        let err = parse_args(&args(&["30", "x", "10"])).unwrap_err();
        assert!(err.contains("fiber"));
    }
}
