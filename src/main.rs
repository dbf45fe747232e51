mod color;
mod config;
mod eval;
mod model;
mod output;
mod source;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use config::{Config, OutputFormat};
use eval::EvalContext;
use model::{Color, Expr};

#[derive(Parser)]
#[command(name = "primer")]
#[command(about = "Color warmth and mixing lookups plus a tiny sum-expression evaluator")]
struct Cli {
    /// Config file (default: ./primer.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format, overriding the config file
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Report progress on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a color as warm, neutral or cold
    Warmth {
        /// Color name (case-insensitive)
        color: Color,
    },

    /// Mix two colors
    Mix { first: Color, second: Color },

    /// List every pair that mixes
    Table,

    /// Evaluate expression documents (.json or .toml)
    Eval {
        /// Files or directories to evaluate
        paths: Vec<PathBuf>,

        /// Inline JSON expression, e.g. '{"num": 1}'
        #[arg(long = "expr")]
        inline: Vec<String>,

        /// Print each evaluation step before the result
        #[arg(long)]
        trace: bool,

        /// Do not print evaluation steps, even if the config enables them
        #[arg(long, conflicts_with = "trace")]
        no_trace: bool,

        /// Print the expression as an outline before the result
        #[arg(long)]
        tree: bool,
    },

    /// Run the built-in samples
    Demo,
}

struct Session {
    config: Config,
    format: OutputFormat,
    verbose: bool,
}

impl Session {
    fn log(&self, message: impl AsRef<str>) {
        if self.verbose {
            eprintln!("{}", message.as_ref());
        }
    }

    fn eval_context(&self) -> EvalContext {
        EvalContext::new().with_max_depth(self.config.max_depth)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    let (config, config_path) = Config::resolve(cli.config.as_ref(), &cwd)?;

    let session = Session {
        format: cli.format.unwrap_or(config.format),
        config,
        verbose: cli.verbose,
    };
    if let Some(path) = config_path {
        session.log(format!("Using config {}", path.display()));
    }

    match cli.command {
        Commands::Warmth { color } => run_warmth(&session, color),
        Commands::Mix { first, second } => run_mix(&session, first, second),
        Commands::Table => run_table(&session),
        Commands::Eval {
            paths,
            inline,
            trace,
            no_trace,
            tree,
        } => {
            let trace = !no_trace && (trace || session.config.trace);
            run_eval(&session, &paths, &inline, trace, tree)
        }
        Commands::Demo => run_demo(&session),
    }
}

fn run_warmth(session: &Session, color: Color) -> Result<()> {
    let report = output::WarmthReport {
        color,
        warmth: color::warmth(color),
    };
    println!("{}", output::render_warmth(&report, session.format));
    Ok(())
}

fn run_mix(session: &Session, first: Color, second: Color) -> Result<()> {
    let result = color::mix(first, second)?;
    let report = output::MixReport {
        left: first,
        right: second,
        result,
    };
    println!("{}", output::render_mix(&report, session.format));
    Ok(())
}

fn run_table(session: &Session) -> Result<()> {
    println!(
        "{}",
        output::render_table(color::mixing_table(), session.format)
    );
    Ok(())
}

fn run_eval(
    session: &Session,
    paths: &[PathBuf],
    inline: &[String],
    trace: bool,
    tree: bool,
) -> Result<()> {
    let mut exprs: Vec<(String, Expr)> = Vec::new();

    for (i, text) in inline.iter().enumerate() {
        let expr = source::parse_expr_json(text, session.config.max_depth)
            .with_context(|| format!("Invalid inline expression #{}", i + 1))?;
        exprs.push(("inline".to_string(), expr));
    }

    let files = source::collect_expr_files(paths)?;
    session.log(format!("Found {} expression file(s)", files.len()));
    for file in &files {
        let expr = source::load_expr_file(file, session.config.max_depth)?;
        exprs.push((file.display().to_string(), expr));
    }

    if exprs.is_empty() {
        bail!("Nothing to evaluate: pass expression files, directories or --expr");
    }

    let labelled = exprs.len() > 1;
    // A lone inline expression reports as one JSON object, anything else as an array
    let json_object = paths.is_empty() && exprs.len() == 1;
    let mut reports = Vec::new();

    for (origin, expr) in exprs {
        session.log(format!(
            "Evaluating {} ({} nodes, depth {})...",
            origin,
            expr.node_count(),
            expr.depth()
        ));

        let mut ctx = session.eval_context();
        let (value, events) = eval::eval_traced(&expr, &mut ctx)
            .with_context(|| format!("Failed to evaluate {}", origin))?;

        let report = output::EvalReport {
            source: origin,
            expr: expr.to_string(),
            value,
            trace: if trace { Some(events) } else { None },
            tree: if tree { Some(output::expr_tree(&expr)) } else { None },
        };

        if session.format == OutputFormat::Json {
            reports.push(report);
            continue;
        }

        let body = output::render_eval(&report, session.format);
        if labelled {
            println!("{}:", report.source);
            println!("{}", output::indent(&body, 2));
        } else {
            println!("{}", body);
        }
    }

    if session.format == OutputFormat::Json {
        let json = if json_object {
            serde_json::to_string_pretty(&reports[0])
        } else {
            serde_json::to_string_pretty(&reports)
        }
        .context("Failed to serialize results")?;
        println!("{}", json);
    }

    Ok(())
}

fn run_demo(session: &Session) -> Result<()> {
    session.log("Running samples...");

    run_warmth(session, Color::Orange)?;
    run_mix(session, Color::Blue, Color::Yellow)?;

    let simple = Expr::sum(Expr::num(1), Expr::num(2));
    println!("{}", eval::eval(&simple)?);

    let nested = Expr::sum(Expr::sum(Expr::num(1), Expr::num(2)), Expr::num(4));
    let (value, events) = eval::eval_traced(&nested, &mut session.eval_context())?;
    for event in &events {
        println!("{}", event);
    }
    println!("{}", value);

    Ok(())
}
