use clap::{Arg, Command};
use std::process;

use colored::*;
use portsweep::{
    config::ScanConfig,
    error::ScanError,
    output::{OutputConfig, OutputManager},
    scanner::engine::ScanEngine,
};

fn build_cli() -> Command {
    Command::new("portsweep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Concurrent TCP port-range scanner with JSON output")
        .arg(
            Arg::new("ip")
                .long("ip")
                .value_name("HOST")
                .help("IP address or hostname of the host to scan")
                .required(true),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .value_name("PORT")
                .help("First port of the range (1-65535)")
                .value_parser(clap::value_parser!(u16).range(1..))
                .required(true),
        )
        .arg(
            Arg::new("end")
                .long("end")
                .value_name("PORT")
                .help("Last port of the range (1-65535, >= start)")
                .value_parser(clap::value_parser!(u16).range(1..))
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output file path for the JSON report")
                .required(true),
        )
        .arg(
            Arg::new("workers")
                .long("workers")
                .value_name("N")
                .help("Size of the concurrent worker pool")
                .value_parser(clap::value_parser!(usize))
                .default_value("250"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("MS")
                .help("Per-connection timeout in milliseconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("300"),
        )
}

async fn run() -> anyhow::Result<()> {
    let matches = build_cli().get_matches();

    let target = matches.get_one::<String>("ip").unwrap().clone();
    let start = *matches.get_one::<u16>("start").unwrap();
    let end = *matches.get_one::<u16>("end").unwrap();
    let output_path = matches.get_one::<String>("output").unwrap().clone();
    let workers = *matches.get_one::<usize>("workers").unwrap();
    let timeout = *matches.get_one::<u64>("timeout").unwrap();

    let config = ScanConfig::new(target)
        .with_port_range(start, end)
        .with_workers(workers)
        .with_timeout(timeout);

    let engine = ScanEngine::new(config)?;
    let report = engine.scan().await?;

    for port in report.open_ports() {
        println!("{} {}/tcp", "OPEN".bright_green().bold(), port);
    }
    println!(
        "Scanned {} ports on {} in {:.2}s",
        report.total_ports(),
        report.target,
        report.duration.as_secs_f64()
    );

    let manager = OutputManager::new(OutputConfig::new(output_path.clone()));
    manager.write_results(&report)?;

    println!("Results written to {}", output_path.bright_cyan());

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("{} {}", "[!]".bright_red(), e);
        // Range and pool-size errors are only caught after argument parsing,
        // so clap has not printed usage for them yet.
        if matches!(e.downcast_ref::<ScanError>(), Some(ScanError::ConfigError(_))) {
            eprintln!("{}", build_cli().render_usage());
        }
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Startup validation happens entirely inside the argument matcher, so a
    // rejected invocation can never reach the scan engine.

    #[test]
    fn test_missing_required_args_rejected() {
        for args in [
            vec!["portsweep"],
            vec!["portsweep", "--ip", "127.0.0.1"],
            vec!["portsweep", "--ip", "127.0.0.1", "--start", "1", "--end", "10"],
            vec!["portsweep", "--start", "1", "--end", "10", "-o", "out.json"],
        ] {
            assert!(build_cli().try_get_matches_from(args).is_err());
        }
    }

    #[test]
    fn test_unknown_option_rejected() {
        let args = vec![
            "portsweep", "--ip", "127.0.0.1", "--start", "1", "--end", "10", "-o", "out.json",
            "--bogus",
        ];
        assert!(build_cli().try_get_matches_from(args).is_err());
    }

    #[test]
    fn test_port_zero_rejected() {
        let args = vec![
            "portsweep", "--ip", "127.0.0.1", "--start", "0", "--end", "10", "-o", "out.json",
        ];
        assert!(build_cli().try_get_matches_from(args).is_err());
    }

    #[test]
    fn test_port_above_u16_rejected() {
        let args = vec![
            "portsweep", "--ip", "127.0.0.1", "--start", "1", "--end", "65536", "-o", "out.json",
        ];
        assert!(build_cli().try_get_matches_from(args).is_err());
    }

    #[test]
    fn test_help_short_circuits() {
        let err = build_cli()
            .try_get_matches_from(vec!["portsweep", "--help"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_usage_text_names_required_options() {
        let usage = build_cli().render_usage().to_string();
        for flag in ["--ip", "--start", "--end", "--output"] {
            assert!(usage.contains(flag), "usage missing {}", flag);
        }
    }

    #[test]
    fn test_full_invocation_parses_with_defaults() {
        let matches = build_cli()
            .try_get_matches_from(vec![
                "portsweep", "--ip", "192.168.0.1", "--start", "20", "--end", "1000", "-o",
                "output.json",
            ])
            .unwrap();

        assert_eq!(matches.get_one::<String>("ip").unwrap(), "192.168.0.1");
        assert_eq!(*matches.get_one::<u16>("start").unwrap(), 20);
        assert_eq!(*matches.get_one::<u16>("end").unwrap(), 1000);
        assert_eq!(*matches.get_one::<usize>("workers").unwrap(), 250);
        assert_eq!(*matches.get_one::<u64>("timeout").unwrap(), 300);
    }
}
