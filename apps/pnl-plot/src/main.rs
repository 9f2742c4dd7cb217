use chrono::Utc;
use clap::{Parser, Subcommand};
use pnl_domain::value_objects::metrics_row::MetricsRow;
use pnl_infrastructure::metrics_csv::{parse_timestamp, DEFAULT_METRICS_PATH};
use pnl_plot::{logging, PlotOpts};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "pnl-plot")]
#[command(about = "Plot profit/loss metrics from a CSV file in the terminal.", version)]
struct Cli {
    /// Metrics CSV path.
    #[arg(long, global = true, env = "PNL_PLOT_INPUT", default_value = DEFAULT_METRICS_PATH)]
    input: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append one metrics row (header is written when the file is empty).
    Append {
        #[arg(long, allow_negative_numbers = true)]
        total: f64,

        #[arg(long, allow_negative_numbers = true)]
        unrealized_profit: f64,

        #[arg(long, allow_negative_numbers = true)]
        unrealized_loss: f64,

        /// RFC3339 or YYYY-MM-DD; defaults to now.
        #[arg(long)]
        timestamp: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let logs = Arc::new(parking_lot::Mutex::new(logging::CapturedLogs::new()));
    if let Err(err) = init_tracing(logs.clone()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
    if let Err(err) = init_metrics() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Some(Command::Append {
            total,
            unrealized_profit,
            unrealized_loss,
            timestamp,
        }) => append(
            &cli.input,
            total,
            unrealized_profit,
            unrealized_loss,
            timestamp,
        ),
        None => pnl_plot::run(PlotOpts {
            input: cli.input,
            logs: logs.clone(),
        }),
    };

    logging::replay_to_stderr(&logs);
    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn append(
    input: &std::path::Path,
    total: f64,
    unrealized_profit: f64,
    unrealized_loss: f64,
    timestamp: Option<String>,
) -> Result<(), String> {
    let timestamp = match timestamp {
        Some(raw) => parse_timestamp(&raw)?,
        None => Utc::now(),
    };
    pnl_plot::append_row(
        input,
        &MetricsRow {
            timestamp,
            total_profit_loss: total,
            unrealized_profit,
            unrealized_loss,
        },
    )
}

fn init_tracing(logs: Arc<parking_lot::Mutex<logging::CapturedLogs>>) -> Result<(), String> {
    let filter = std::env::var("PNL_PLOT_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(filter)
        .map_err(|err| format!("invalid log filter: {err}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(logging::CaptureWriter::new(logs))
        .init();

    Ok(())
}

#[cfg(feature = "prometheus")]
fn init_metrics() -> Result<(), String> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let Some(raw) = std::env::var("PNL_PLOT_METRICS_ADDR").ok() else {
        return Ok(());
    };
    if raw.trim().is_empty() {
        return Ok(());
    }

    let addr: std::net::SocketAddr = raw
        .parse()
        .map_err(|err| format!("invalid PNL_PLOT_METRICS_ADDR (expected host:port): {err}"))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|err| format!("failed to install prometheus exporter: {err}"))?;

    tracing::info!(metrics_addr = %addr, "prometheus metrics exporter enabled");
    Ok(())
}

#[cfg(not(feature = "prometheus"))]
fn init_metrics() -> Result<(), String> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{init_metrics, Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn defaults_to_metrics_csv_in_working_directory() {
        let cli = Cli::try_parse_from(["pnl-plot"]).expect("parse");
        if std::env::var_os("PNL_PLOT_INPUT").is_none() {
            assert_eq!(cli.input, PathBuf::from("metrics.csv"));
        }
        assert!(cli.command.is_none());
    }

    #[test]
    fn append_accepts_negative_values() {
        let cli = Cli::try_parse_from([
            "pnl-plot",
            "append",
            "--input",
            "out/m.csv",
            "--total",
            "-12.5",
            "--unrealized-profit",
            "3",
            "--unrealized-loss",
            "-1",
        ])
        .expect("parse");
        assert_eq!(cli.input, PathBuf::from("out/m.csv"));
        match cli.command {
            Some(Command::Append {
                total,
                unrealized_loss,
                timestamp,
                ..
            }) => {
                assert_eq!(total, -12.5);
                assert_eq!(unrealized_loss, -1.0);
                assert!(timestamp.is_none());
            }
            None => panic!("expected append"),
        }
    }

    // Nothing else in this test binary reads PNL_PLOT_METRICS_ADDR.
    #[test]
    fn init_metrics_is_a_no_op_without_an_address() {
        std::env::remove_var("PNL_PLOT_METRICS_ADDR");
        assert_eq!(init_metrics(), Ok(()));

        std::env::set_var("PNL_PLOT_METRICS_ADDR", "   ");
        assert_eq!(init_metrics(), Ok(()));

        #[cfg(feature = "prometheus")]
        {
            std::env::set_var("PNL_PLOT_METRICS_ADDR", "not-an-address");
            let err = init_metrics().expect_err("invalid address must fail");
            assert!(err.contains("PNL_PLOT_METRICS_ADDR"), "{err}");
        }
        std::env::remove_var("PNL_PLOT_METRICS_ADDR");
    }
}
