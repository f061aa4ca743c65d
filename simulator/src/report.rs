//! Delimited-text and JSON reporting
//!
//! Read-only views over a reduced [`RunStats`]: each writer formats one
//! of the per-experiment report files. Rows are `;`-delimited and every
//! file opens with a comment line tying it back to the experiment name
//! and the configuration hash.
//!
//! Writers target `io::Write` so the CLI decides about files, stdout
//! and naming.

use crate::params::ModelParameters;
use crate::stats::RunStats;
use std::io::{self, Write};

const DELIMITER: char = ';';

fn write_header(
    out: &mut impl Write,
    stats: &RunStats,
    params: &ModelParameters,
) -> io::Result<()> {
    writeln!(
        out,
        "# experiment {} | config {}",
        stats.exp_name,
        params.config_hash()
    )
}

/// Raw per-run matrices, one row per metric and run
pub fn print_all_stats(
    stats: &RunStats,
    params: &ModelParameters,
    out: &mut impl Write,
) -> io::Result<()> {
    write_header(out, stats, params)?;
    for metric in stats.metrics() {
        for run in 0..stats.runs() {
            write!(out, "{}{DELIMITER}{run}", metric.name())?;
            for value in metric.matrix.row(run) {
                write!(out, "{DELIMITER}{value}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Reduced vectors, one row per step with all four reductions per metric
pub fn print_summary_stats(
    stats: &RunStats,
    params: &ModelParameters,
    out: &mut impl Write,
) -> io::Result<()> {
    write_header(out, stats, params)?;

    write!(out, "step")?;
    for metric in stats.metrics() {
        let name = metric.name();
        write!(
            out,
            "{DELIMITER}avg_{name}{DELIMITER}std_{name}{DELIMITER}min_{name}{DELIMITER}max_{name}"
        )?;
    }
    writeln!(out)?;

    for step in 0..stats.steps() {
        write!(out, "{step}")?;
        for metric in stats.metrics() {
            write!(
                out,
                "{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
                metric.stats.avg[step],
                metric.stats.std[step],
                metric.stats.min[step],
                metric.stats.max[step]
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Per-run averages over the final quartile of steps, one row per run
pub fn print_all_stats_last_quartile(
    stats: &RunStats,
    params: &ModelParameters,
    out: &mut impl Write,
) -> io::Result<()> {
    write_header(out, stats, params)?;

    write!(out, "run")?;
    for metric in stats.metrics() {
        write!(out, "{DELIMITER}{}", metric.name())?;
    }
    writeln!(out)?;

    let per_metric: Vec<Vec<f64>> = stats
        .metrics()
        .iter()
        .map(|metric| metric.last_quartile_per_run())
        .collect();
    for run in 0..stats.runs() {
        write!(out, "{run}")?;
        for column in &per_metric {
            write!(out, "{DELIMITER}{}", column[run])?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Reduction of the last-quartile averages, one row per metric
pub fn print_summary_stats_last_quartile(
    stats: &RunStats,
    params: &ModelParameters,
    out: &mut impl Write,
) -> io::Result<()> {
    write_header(out, stats, params)?;
    writeln!(out, "metric{DELIMITER}avg{DELIMITER}std{DELIMITER}min{DELIMITER}max")?;
    for metric in stats.metrics() {
        let reduced = metric.last_quartile_stats();
        writeln!(
            out,
            "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            metric.name(),
            reduced.avg,
            reduced.std,
            reduced.min,
            reduced.max
        )?;
    }
    Ok(())
}

/// Mean time series only, one row per step
pub fn print_time_series_stats(
    stats: &RunStats,
    params: &ModelParameters,
    out: &mut impl Write,
) -> io::Result<()> {
    write_header(out, stats, params)?;

    write!(out, "step")?;
    for metric in stats.metrics() {
        write!(out, "{DELIMITER}avg_{}", metric.name())?;
    }
    writeln!(out)?;

    for step in 0..stats.steps() {
        write!(out, "{step}")?;
        for metric in stats.metrics() {
            write!(out, "{DELIMITER}{}", metric.stats.avg[step])?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Full statistics object as JSON, matrices included
pub fn write_json_stats(stats: &RunStats, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, stats)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduced_stats() -> (RunStats, ModelParameters) {
        let mut stats = RunStats::new(2, 4);
        stats.exp_name = "unit".to_string();
        for metric in [
            &mut stats.k_i,
            &mut stats.k_t,
            &mut stats.k_u,
            &mut stats.net_wealth,
            &mut stats.strategy_changes,
        ] {
            metric.set_run(0, &[1.0, 2.0, 3.0, 4.0]);
            metric.set_run(1, &[3.0, 4.0, 5.0, 6.0]);
        }
        stats.calc_all_stats();

        let mut params = ModelParameters {
            nr_agents: 10,
            k_i: 4,
            k_t: 3,
            k_u: 3,
            r_t: 2.0,
            r_ut: 0.5,
            tv: 10.0,
            max_steps: 4,
            runs_mc: 2,
            ..ModelParameters::default()
        };
        params.derive_r_u();
        (stats, params)
    }

    fn render<F>(writer: F) -> String
    where
        F: Fn(&RunStats, &ModelParameters, &mut Vec<u8>) -> io::Result<()>,
    {
        let (stats, params) = reduced_stats();
        let mut buffer = Vec::new();
        writer(&stats, &params, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_summary_rows_per_step() {
        let text = render(print_summary_stats);
        let lines: Vec<&str> = text.lines().collect();
        // header comment + column header + one row per step
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("# experiment unit | config "));
        assert!(lines[1].starts_with("step;avg_k_I;std_k_I;min_k_I;max_k_I"));
        assert!(lines[2].starts_with("0;2;1;1;3"));
    }

    #[test]
    fn test_all_stats_rows_per_metric_and_run() {
        let text = render(print_all_stats);
        assert!(text.contains("k_I;0;1;2;3;4"));
        assert!(text.contains("strategyChanges;1;3;4;5;6"));
    }

    #[test]
    fn test_last_quartile_summary() {
        let text = render(print_summary_stats_last_quartile);
        // quartile of 4 steps is the last step: per-run 4 and 6
        assert!(text.contains("netWealth;5;1;4;6"));
    }

    #[test]
    fn test_json_contains_matrices() {
        let (stats, _) = reduced_stats();
        let mut buffer = Vec::new();
        write_json_stats(&stats, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["exp_name"], "unit");
        assert!(value["k_i"]["matrix"]["data"].is_array());
    }
}
