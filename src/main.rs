//! `lanekit-report`: compares every kernel against the strict-order reference and ndarray.
//!
//! Inputs are seeded uniform values in `[-1, 1]`, sized like the benchmarks. Each
//! comparison is logged as a structured `tracing` event; nothing is asserted.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ndarray::{Array1, Array2, LinalgScalar};
use rand::{distr::uniform::SampleUniform, rngs::StdRng};
use tracing::info;

use lanekit::{
    reference::{
        l2_distance, max_abs_diff, naive_dot, naive_matmul, naive_matvec, naive_sum, seeded_rng,
        uniform_vec,
    },
    Element, BACKEND,
};

const SUM_LEN: usize = 10_000;
const DOT_LEN: usize = 512;
const MATVEC_SHAPE: (usize, usize) = (32, 64);
/// `(m, n, k)`
const MATMUL_SHAPES: [(usize, usize, usize); 4] = [(48, 48, 48), (96, 96, 96), (144, 144, 144), (144, 48, 96)];

#[derive(Parser, Debug)]
#[command(name = "lanekit-report")]
#[command(version)]
#[command(about = "Report how far the optimized kernels drift from naive and ndarray results", long_about = None)]
struct Cli {
    /// Seed of the input generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Kernel to report on
    #[arg(long, value_enum, default_value_t = Kernel::All)]
    kernel: Kernel,

    /// Element type
    #[arg(long, value_enum, default_value_t = Precision::F64)]
    precision: Precision,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Kernel {
    Sum,
    Dot,
    Matvec,
    Matmul,
    All,
}

impl Kernel {
    fn includes(self, other: Kernel) -> bool {
        self == Kernel::All || self == other
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Precision {
    F32,
    F64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    info!(backend = BACKEND, seed = cli.seed, precision = ?cli.precision, "lanekit report");

    let result = match cli.precision {
        Precision::F32 => report::<f32>(&cli),
        Precision::F64 => report::<f64>(&cli),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn report<T>(cli: &Cli) -> anyhow::Result<()>
where
    T: Element + SampleUniform + LinalgScalar,
{
    let mut rng = seeded_rng(cli.seed);

    if cli.kernel.includes(Kernel::Sum) {
        report_sum::<T>(&mut rng);
    }
    if cli.kernel.includes(Kernel::Dot) {
        report_dot::<T>(&mut rng);
    }
    if cli.kernel.includes(Kernel::Matvec) {
        report_matvec::<T>(&mut rng).context("matvec report failed")?;
    }
    if cli.kernel.includes(Kernel::Matmul) {
        for &(m, n, k) in &MATMUL_SHAPES {
            report_matmul::<T>(&mut rng, m, n, k)
                .with_context(|| format!("matmul report failed for {m}x{n}x{k}"))?;
        }
    }

    Ok(())
}

fn report_sum<T: Element + SampleUniform + LinalgScalar>(rng: &mut StdRng) {
    let values: Vec<T> = uniform_vec(SUM_LEN, rng);

    let optimized = lanekit::sum(&values);
    let naive = naive_sum(&values);
    let baseline = Array1::from_vec(values).sum();

    info!(
        kernel = "sum",
        n = SUM_LEN,
        %optimized,
        diff_naive = %(optimized - naive),
        diff_ndarray = %(optimized - baseline),
    );
}

fn report_dot<T: Element + SampleUniform + LinalgScalar>(rng: &mut StdRng) {
    let a: Vec<T> = uniform_vec(DOT_LEN, rng);
    let b: Vec<T> = uniform_vec(DOT_LEN, rng);

    let optimized = lanekit::dot(&a, &b);
    let naive = naive_dot(&a, &b);
    let baseline = Array1::from_vec(a).dot(&Array1::from_vec(b));

    info!(
        kernel = "dot",
        n = DOT_LEN,
        %optimized,
        diff_naive = %(optimized - naive),
        diff_ndarray = %(optimized - baseline),
    );
}

fn report_matvec<T: Element + SampleUniform + LinalgScalar>(rng: &mut StdRng) -> anyhow::Result<()> {
    let (rows, cols) = MATVEC_SHAPE;
    let matrix: Vec<T> = uniform_vec(rows * cols, rng);
    let vector: Vec<T> = uniform_vec(cols, rng);

    let mut optimized = vec![T::zero(); rows];
    let mut naive = vec![T::zero(); rows];
    lanekit::matvec(&matrix, rows, cols, &vector, &mut optimized);
    naive_matvec(&matrix, rows, cols, &vector, &mut naive);

    let baseline = Array2::from_shape_vec((rows, cols), matrix)?.dot(&Array1::from_vec(vector));
    let baseline = baseline.to_vec();

    info!(
        kernel = "matvec",
        rows,
        cols,
        l2_naive = %l2_distance(&optimized, &naive),
        l2_ndarray = %l2_distance(&optimized, &baseline),
    );
    Ok(())
}

fn report_matmul<T: Element + SampleUniform + LinalgScalar>(
    rng: &mut StdRng,
    m: usize,
    n: usize,
    k: usize,
) -> anyhow::Result<()> {
    let a: Vec<T> = uniform_vec(m * k, rng);
    let b: Vec<T> = uniform_vec(k * n, rng);

    let mut optimized = vec![T::zero(); m * n];
    let mut naive = vec![T::zero(); m * n];
    lanekit::matmul(&a, &b, &mut optimized, m, n, k);
    naive_matmul(&a, &b, &mut naive, m, n, k);

    let a = Array2::from_shape_vec((m, k), a)?;
    let b = Array2::from_shape_vec((k, n), b)?;
    let baseline = a.dot(&b).iter().copied().collect::<Vec<T>>();

    info!(
        kernel = "matmul",
        m,
        n,
        k,
        max_diff_naive = %max_abs_diff(&optimized, &naive),
        max_diff_ndarray = %max_abs_diff(&optimized, &baseline),
    );
    Ok(())
}
