//! Cross-run statistical reduction
//!
//! [`RunStats`] collects one `(runsMC × maxSteps)` matrix per metric as
//! the Controller finishes runs, then [`RunStats::calc_all_stats`]
//! reduces every step column across runs into mean / population
//! standard deviation / min / max vectors. After reduction the whole
//! structure is read-only reporting input.

use serde::Serialize;

/// Dense `(runs × steps)` matrix, row per Monte Carlo run
#[derive(Debug, Clone, Serialize)]
pub struct RunMatrix {
    runs: usize,
    steps: usize,
    data: Vec<f64>,
}

impl RunMatrix {
    pub fn new(runs: usize, steps: usize) -> Self {
        Self {
            runs,
            steps,
            data: vec![0.0; runs * steps],
        }
    }

    /// Store one run's series; `series.len()` must equal `steps`
    pub fn set_row(&mut self, run: usize, series: &[f64]) {
        assert_eq!(series.len(), self.steps, "series length must match steps");
        self.data[run * self.steps..(run + 1) * self.steps].copy_from_slice(series);
    }

    pub fn row(&self, run: usize) -> &[f64] {
        &self.data[run * self.steps..(run + 1) * self.steps]
    }

    /// Step column across all runs
    pub fn column(&self, step: usize) -> Vec<f64> {
        (0..self.runs).map(|run| self.row(run)[step]).collect()
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn steps(&self) -> usize {
        self.steps
    }
}

/// Per-step reduction across runs
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeriesStats {
    pub avg: Vec<f64>,
    pub std: Vec<f64>,
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

/// Reduction of a per-run scalar (the last-quartile averages)
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScalarStats {
    pub avg: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// One tracked metric: its raw matrix plus the reduced vectors
#[derive(Debug, Clone, Serialize)]
pub struct MetricSeries {
    name: &'static str,
    pub matrix: RunMatrix,
    pub stats: SeriesStats,
}

impl MetricSeries {
    fn new(name: &'static str, runs: usize, steps: usize) -> Self {
        Self {
            name,
            matrix: RunMatrix::new(runs, steps),
            stats: SeriesStats::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Store one run's series into the matrix
    pub fn set_run(&mut self, run: usize, series: &[f64]) {
        self.matrix.set_row(run, series);
    }

    fn reduce(&mut self) {
        let steps = self.matrix.steps();
        self.stats = SeriesStats {
            avg: Vec::with_capacity(steps),
            std: Vec::with_capacity(steps),
            min: Vec::with_capacity(steps),
            max: Vec::with_capacity(steps),
        };
        for step in 0..steps {
            let column = self.matrix.column(step);
            self.stats.avg.push(mean(&column));
            self.stats.std.push(population_std(&column));
            self.stats.min.push(fold_min(&column));
            self.stats.max.push(fold_max(&column));
        }
    }

    /// Per-run mean over the final quartile of steps
    ///
    /// The quartile covers the last `steps / 4` steps, at least one.
    pub fn last_quartile_per_run(&self) -> Vec<f64> {
        let steps = self.matrix.steps();
        let tail = (steps / 4).max(1);
        (0..self.matrix.runs())
            .map(|run| mean(&self.matrix.row(run)[steps - tail..]))
            .collect()
    }

    /// Reduction of the per-run last-quartile averages
    pub fn last_quartile_stats(&self) -> ScalarStats {
        let per_run = self.last_quartile_per_run();
        ScalarStats {
            avg: mean(&per_run),
            std: population_std(&per_run),
            min: fold_min(&per_run),
            max: fold_max(&per_run),
        }
    }
}

/// All metrics of one experiment
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub exp_name: String,
    pub k_i: MetricSeries,
    pub k_t: MetricSeries,
    pub k_u: MetricSeries,
    pub net_wealth: MetricSeries,
    pub strategy_changes: MetricSeries,
}

impl RunStats {
    pub fn new(runs_mc: usize, max_steps: usize) -> Self {
        Self {
            exp_name: String::new(),
            k_i: MetricSeries::new("k_I", runs_mc, max_steps),
            k_t: MetricSeries::new("k_T", runs_mc, max_steps),
            k_u: MetricSeries::new("k_U", runs_mc, max_steps),
            net_wealth: MetricSeries::new("netWealth", runs_mc, max_steps),
            strategy_changes: MetricSeries::new("strategyChanges", runs_mc, max_steps),
        }
    }

    pub fn runs(&self) -> usize {
        self.k_i.matrix.runs()
    }

    pub fn steps(&self) -> usize {
        self.k_i.matrix.steps()
    }

    /// All metrics in reporting order
    pub fn metrics(&self) -> [&MetricSeries; 5] {
        [
            &self.k_i,
            &self.k_t,
            &self.k_u,
            &self.net_wealth,
            &self.strategy_changes,
        ]
    }

    /// Reduce every metric; call once, after every run row is in place
    pub fn calc_all_stats(&mut self) {
        self.k_i.reduce();
        self.k_t.reduce();
        self.k_u.reduce();
        self.net_wealth.reduce();
        self.strategy_changes.reduce();
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by n, not n − 1)
fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn fold_min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn fold_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
