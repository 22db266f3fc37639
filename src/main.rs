//! ivp-fit CLI

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use ivp_fit::analysis::RefinementStudy;
use ivp_fit::fitting::{Sampling, Underdetermined};
use ivp_fit::models::Problem;
use ivp_fit::output::export::{export_report, export_tables_csv, CsvConfig, CsvMetadata};
use ivp_fit::output::table::{
    checkpoint_tables, convergence_table, derivative_table, fitting_tables, least_squares_tables,
    refinement_table, trajectory_table, Table, TableLabels,
};
use ivp_fit::output::visualization::{plot_report_errors, plot_report_fits, plot_report_trajectories};
use ivp_fit::pipeline::{run, PipelineReport, RunConfiguration};
use ivp_fit::solver::{Solver, StepMethod};

#[derive(Parser)]
#[command(name = "ivp-fit")]
#[command(about = "Explicit IVP integrators with polynomial fitting of the trajectories")]
#[command(version)]
struct Cli {
    /// Method whose trajectory is fitted (euler, heun, rk22, rk3, rk4)
    #[arg(default_value = "rk4")]
    method: String,

    /// Problem from the catalog (trig, trig-damped, linear-system)
    #[arg(long, default_value = "trig")]
    problem: String,

    /// Methods compared, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    compare: Vec<String>,

    /// Interpolation degree p
    #[arg(long, default_value = "3")]
    degree: usize,

    /// Least-squares regression degree
    #[arg(long, default_value = "2")]
    ls_degree: usize,

    /// Methods regressed by least squares, comma separated
    #[arg(long, value_delimiter = ',', default_value = "heun,rk4")]
    ls_methods: Vec<String>,

    /// Refinement level m: integrate with h/2^m and study levels 0..=m
    #[arg(long, default_value = "0")]
    refine: u32,

    /// Samples fed to the interpolating fitters (prefix, uniform)
    #[arg(long, default_value = "prefix")]
    sampling: String,

    /// Vandermonde policy when n < p+1 (reject, minimum-norm)
    #[arg(long, default_value = "reject")]
    underdetermined: String,

    /// Directory receiving the CSV files (and figures)
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write PNG figures
    #[arg(long)]
    plots: bool,

    /// Print the finite-difference derivatives of the fitted trajectory
    #[arg(long)]
    derivatives: bool,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    // ====== Step 1: Resolve the configuration ======
    let method: StepMethod = cli.method.parse()?;
    let problem: Problem = cli.problem.parse()?;
    let sampling: Sampling = cli.sampling.parse()?;
    let underdetermined: Underdetermined = cli.underdetermined.parse()?;
    let compared = parse_methods(&cli.compare)?;
    let ls_methods = parse_methods(&cli.ls_methods)?;

    let mut config = RunConfiguration::new(method)
        .with_degree(cli.degree)
        .with_sampling(sampling)
        .with_least_squares(cli.ls_degree, ls_methods)
        .with_underdetermined(underdetermined);
    if !compared.is_empty() {
        config = config.with_methods(compared);
    }

    // ====== Step 2: Run ======
    let spec = problem.build(cli.refine)?;
    info!("{} with h={} ({} steps)", problem, spec.step_size(), spec.num_steps());
    let report = run(&spec, &config)?;

    let labels = TableLabels::new(problem.independent_name(), problem.component_names());
    print_report(&report, &labels, cli.derivatives);

    // ====== Step 3: Refinement study ======
    let mut refinement_tables = Vec::new();
    if cli.refine > 0 {
        let base = problem.build(0)?;
        for component in 0..base.dimension() {
            let exact = problem.exact_solution(component);
            let exact_ref = exact.as_ref().map(|f| f as &dyn Fn(f64) -> f64);
            let study = RefinementStudy::run(&base, method, cli.refine, component, exact_ref)?;

            let table = refinement_table(&study, &labels);
            println!("{}", table);
            refinement_tables.push(table);
            if let Some(table) = convergence_table(&study) {
                println!("{}", table);
                refinement_tables.push(table);
            }
        }
    }

    // ====== Step 4: Export ======
    let mut metadata = CsvMetadata::from_problem(&spec, method.name());
    metadata.degree = Some(cli.degree);
    metadata.add_custom("Refinement".to_string(), cli.refine.to_string());
    let csv_config = CsvConfig::default().with_metadata(metadata);

    let written = export_report(&report, &labels, &cli.output_dir, Some(&csv_config))
        .map_err(|e| anyhow!("CSV export failed: {}", e))?;
    for path in &written {
        println!("Wrote {}", path.display());
    }

    if !refinement_tables.is_empty() {
        let path = cli.output_dir.join("refinement.csv");
        export_tables_csv(&refinement_tables, &path, Some(&csv_config))
            .map_err(|e| anyhow!("CSV export failed: {}", e))?;
        println!("Wrote {}", path.display());
    }

    // ====== Step 5: Figures ======
    if cli.plots {
        write_plots(&report, &labels, &cli.output_dir)?;
    }

    Ok(())
}

fn parse_methods(names: &[String]) -> Result<Vec<StepMethod>> {
    names
        .iter()
        .filter(|n| !n.trim().is_empty())
        .map(|n| n.parse::<StepMethod>().map_err(Into::into))
        .collect()
}

fn print_report(report: &PipelineReport, labels: &TableLabels, derivatives: bool) {
    let compared = report.compared();

    match &report.errors {
        Some(errors) => {
            for table in checkpoint_tables(errors, &compared, labels) {
                println!("{}", table);
            }
        }
        None => println!("{}", trajectory_table(&compared, labels)),
    }

    for fit in &report.fits {
        let name = labels.component(fit.component);
        println!(
            "Degree {} fit of {} ({}, {} samples)",
            report.config.degree,
            name,
            report.config.fit_method.label(),
            fit.samples.len()
        );
        println!("Vandermonde ({}): {}", fit.vandermonde.kind, fit.vandermonde.coefficients);
        println!("Lagrange: {}", fit.lagrange.coefficients);
        if fit.lagrange.was_clamped() {
            println!("Lagrange degree limited to {}", fit.lagrange.degree);
        }
        println!();
        print_tables(&fitting_tables(fit, labels));

        for (method, ls) in &fit.least_squares {
            println!("Least squares ({}): {}", method.label(), ls.coefficients);
            println!("SSE = {:.6}, MSE = {:.6}", ls.sse, ls.mse);
            println!();
            print_tables(&least_squares_tables(ls, method.label()));
        }

        if derivatives {
            if let Some(rows) = report.derivatives.get(fit.component) {
                println!("{}", derivative_table(rows, labels, fit.component));
            }
        }
    }
}

fn print_tables(tables: &[Table]) {
    for table in tables {
        println!("{}", table);
    }
}

fn write_plots(report: &PipelineReport, labels: &TableLabels, directory: &std::path::Path) -> Result<()> {
    std::fs::create_dir_all(directory).with_context(|| format!("creating {}", directory.display()))?;

    for component in 0..report.problem.dimension() {
        let name = labels.component(component);
        let path = |stem: &str| -> Result<String> {
            let path = directory.join(format!("{}_{}.png", stem, name));
            path.to_str()
                .map(str::to_string)
                .ok_or_else(|| anyhow!("non UTF-8 output path {}", path.display()))
        };

        let trajectories = path("trajectories")?;
        plot_report_trajectories(report, component, labels, &trajectories)
            .map_err(|e| anyhow!("plot failed: {}", e))?;
        println!("Wrote {}", trajectories);

        if report.errors.is_some() {
            let errors = path("errors")?;
            plot_report_errors(report, component, labels, &errors).map_err(|e| anyhow!("plot failed: {}", e))?;
            println!("Wrote {}", errors);
        }

        let fits = path("fit")?;
        plot_report_fits(report, component, labels, &fits).map_err(|e| anyhow!("plot failed: {}", e))?;
        println!("Wrote {}", fits);
    }

    Ok(())
}
