use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use settlegraph::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Settlement-graph simplification runner")]
struct Cmd {
    /// Optional run label; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Simplify one balanced ledger and print a JSON report
    Simplify {
        /// Comma-separated balances, e.g. `2,-3,5,-9,5`
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        equities: Vec<i64>,
        #[arg(long, value_enum, default_value_t = Algo::Partitional)]
        algo: Algo,
        #[arg(long, value_enum, default_value_t = Strategy::Race)]
        strategy: Strategy,
        /// Write the report here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Profile every simplifier on one random ledger
    Demo {
        #[arg(long, default_value_t = 16)]
        len: usize,
        /// Defaults to a fresh random seed, which is logged
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = -10, allow_hyphen_values = true)]
        min_weight: i64,
        #[arg(long, default_value_t = 20, allow_hyphen_values = true)]
        max_weight: i64,
        #[arg(long, default_value_t = 0.3)]
        load: f64,
        /// Skip the exponential bisection simplifier
        #[arg(long)]
        skip_bisection: bool,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Algo {
    Partitional,
    Greedy,
    Bisection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Strategy {
    Race,
    Ascending,
    Descending,
}

impl From<Strategy> for SearchStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Race => SearchStrategy::Race,
            Strategy::Ascending => SearchStrategy::AscendingOnly,
            Strategy::Descending => SearchStrategy::DescendingOnly,
        }
    }
}

/// One simplifier run on one ledger.
#[derive(Debug, Serialize)]
struct SimplifyReport {
    simplifier: String,
    input: Vec<i64>,
    output: Vec<i64>,
    group_count: usize,
    groups: Vec<Vec<i64>>,
    elapsed_ms: f64,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Simplify {
            equities,
            algo,
            strategy,
            out,
        } => simplify_cmd(&equities, algo, strategy, out.as_deref(), cmd.tag),
        Action::Demo {
            len,
            seed,
            min_weight,
            max_weight,
            load,
            skip_bisection,
            out,
        } => {
            let params = EquityGraphParams {
                len,
                min_weight,
                max_weight,
                arc_load_factor: load,
            };
            demo(params, seed, skip_bisection, out.as_deref(), cmd.tag)
        }
        Action::Report => report(cmd.tag),
    }
}

fn simplifier_for(algo: Algo, strategy: Strategy) -> Box<dyn Simplifier> {
    match algo {
        Algo::Partitional => Box::new(PartitionalSimplifier::new(SearchCfg {
            strategy: strategy.into(),
            ..SearchCfg::default()
        })),
        Algo::Greedy => Box::new(GreedySimplifier),
        Algo::Bisection => Box::new(BisectionSimplifier),
    }
}

fn profile(label: &str, simplifier: &dyn Simplifier, input: &[i64]) -> Result<SimplifyReport> {
    let started = Instant::now();
    let output = simplifier
        .simplify(input)
        .with_context(|| format!("{label} failed"))?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1e3;
    let groups: Vec<Vec<i64>> = zero_sum_runs(&output)
        .into_iter()
        .map(|run| run.to_vec())
        .collect();
    let group_count = count_groups(&output)?;
    tracing::info!(simplifier = label, group_count, elapsed_ms, "profiled");
    Ok(SimplifyReport {
        simplifier: label.to_string(),
        input: input.to_vec(),
        output,
        group_count,
        groups,
        elapsed_ms,
    })
}

fn simplify_cmd(
    equities: &[i64],
    algo: Algo,
    strategy: Strategy,
    out: Option<&Path>,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(len = equities.len(), ?algo, ?strategy, tag = ?tag, "simplify");
    let simplifier = simplifier_for(algo, strategy);
    let report = profile(simplifier.name(), simplifier.as_ref(), equities)?;
    let params = json!({
        "algo": algo,
        "strategy": strategy,
        "equities": equities,
    });
    emit(&report, out, params, tag)
}

fn demo(
    params: EquityGraphParams,
    seed: Option<u64>,
    skip_bisection: bool,
    out: Option<&Path>,
    tag: Option<String>,
) -> Result<()> {
    let mut gen = match seed {
        Some(seed) => EquityGraphGenerator::new(params, seed)?,
        None => EquityGraphGenerator::from_entropy(params)?,
    };
    let sample = gen.generate_next()?;
    let input = &sample.equities;
    tracing::info!(
        seed = gen.seed(),
        len = params.len,
        easy_groups = count_groups(input)?,
        ?input,
        "demo ledger"
    );

    let mut runs: Vec<(&str, Box<dyn Simplifier>)> = vec![
        ("greedy", simplifier_for(Algo::Greedy, Strategy::Race)),
        (
            "partitional-race",
            simplifier_for(Algo::Partitional, Strategy::Race),
        ),
        (
            "partitional-ascending",
            simplifier_for(Algo::Partitional, Strategy::Ascending),
        ),
        (
            "partitional-descending",
            simplifier_for(Algo::Partitional, Strategy::Descending),
        ),
    ];
    if !skip_bisection {
        runs.push(("bisection", simplifier_for(Algo::Bisection, Strategy::Race)));
    }
    let reports = runs
        .iter()
        .map(|(label, s)| profile(label, s.as_ref(), input))
        .collect::<Result<Vec<_>>>()?;

    let run_params = json!({
        "seed": gen.seed(),
        "index": sample.replay.index,
        "len": params.len,
        "min_weight": params.min_weight,
        "max_weight": params.max_weight,
        "load": params.arc_load_factor,
        "skip_bisection": skip_bisection,
    });
    emit(&reports, out, run_params, tag)
}

fn emit<T: Serialize>(
    value: &T,
    out: Option<&Path>,
    params: serde_json::Value,
    tag: Option<String>,
) -> Result<()> {
    let Some(out) = out else {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let mut payload = provenance::Payload::new(params);
    payload.tag = tag;
    let sidecar = provenance::write_sidecar(out, payload)?;
    tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote report");
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": settlegraph::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
