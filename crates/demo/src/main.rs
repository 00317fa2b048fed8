// File: crates/demo/src/main.rs
// Summary: fnplot CLI; plots expressions to PNG/SVG, prints sampled points and manages saved functions.

mod evaluator;
mod store;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fnplot_core::{
    theme, Chart, ChartOptions, Color, CurveRequest, FunctionStore, NewFunction, PanDirection, RenderOptions, SurfaceSize,
};
use fnplot_render_skia::SkiaRenderer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::evaluator::ExprEvaluator;
use crate::store::CsvStore;

#[derive(Parser)]
#[command(name = "fnplot", author, version, about = "Plot single-variable functions", long_about = None)]
struct Cli {
    /// CSV file holding saved functions
    #[arg(long, global = true, default_value = "saved_functions.csv")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample expressions and render them to a PNG or SVG file
    Plot(PlotArgs),
    /// Print the sampled points of one expression
    Table {
        expression: String,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Save an expression with its plotting range
    Save {
        expression: String,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// List saved functions, newest first
    List,
    /// Delete a saved function
    Delete { id: u64 },
    /// List the built-in color themes
    Themes,
}

#[derive(Args, Clone, Copy)]
struct RangeArgs {
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    start: f64,
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    end: f64,
    #[arg(long, default_value_t = 0.1)]
    step: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum PanArg {
    Left,
    Right,
    Up,
    Down,
}

impl From<PanArg> for PanDirection {
    fn from(p: PanArg) -> Self {
        match p {
            PanArg::Left => PanDirection::Left,
            PanArg::Right => PanDirection::Right,
            PanArg::Up => PanDirection::Up,
            PanArg::Down => PanDirection::Down,
        }
    }
}

#[derive(Args)]
struct PlotArgs {
    /// Expressions in `x`, e.g. `sin(x)` or `x^2 - 3`
    expressions: Vec<String>,
    #[command(flatten)]
    range: RangeArgs,
    /// Also plot these saved functions (by id) with their stored ranges
    #[arg(long = "saved")]
    saved: Vec<u64>,
    /// Curve colors (#rgb, #rrggbb or #rrggbbaa); theme palette otherwise
    #[arg(long = "color")]
    colors: Vec<Color>,
    /// Zoom factor applied after plotting; below 1 zooms in
    #[arg(long)]
    zoom: Option<f64>,
    /// Pan steps applied in order
    #[arg(long, value_enum)]
    pan: Vec<PanArg>,
    /// Fraction of the visible extent moved per pan step
    #[arg(long, default_value_t = 0.1)]
    pan_fraction: f64,
    /// Frame every sampled point
    #[arg(long)]
    fit: bool,
    /// Rescale Y to the points visible in the X window
    #[arg(long)]
    fit_y: bool,
    #[arg(long, default_value_t = fnplot_core::types::WIDTH)]
    width: f32,
    #[arg(long, default_value_t = fnplot_core::types::HEIGHT)]
    height: f32,
    /// Device pixel ratio
    #[arg(long, default_value_t = 1.0)]
    dpr: f32,
    #[arg(long, default_value = "dark")]
    theme: String,
    /// LTTB-decimate continuous runs above this many points
    #[arg(long)]
    max_points: Option<usize>,
    #[arg(long)]
    no_legend: bool,
    /// Sample each curve on its own worker thread
    #[arg(long)]
    parallel: bool,
    /// Output file; `.svg` writes SVG, anything else PNG
    #[arg(short, long, default_value = "target/out/fnplot.png")]
    out: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fnplot=info,fnplot_core=info,fnplot_render_skia=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Plot(args) => plot(&cli.store, args),
        Commands::Table { expression, range } => table(&expression, range),
        Commands::Save { expression, range } => {
            let mut store = CsvStore::open(&cli.store).context("opening function store")?;
            let saved = store.create(NewFunction::new(expression, range.start, range.end, range.step))?;
            println!("saved #{}: {}", saved.id, saved.expression);
            Ok(())
        }
        Commands::List => {
            let store = CsvStore::open(&cli.store).context("opening function store")?;
            for f in store.list()? {
                println!(
                    "{:>4}  {:<30} [{}, {}] step {}  {}",
                    f.id,
                    f.expression,
                    f.range_start,
                    f.range_end,
                    f.step,
                    f.created_at.format("%Y-%m-%d %H:%M:%S")
                );
            }
            Ok(())
        }
        Commands::Delete { id } => {
            let mut store = CsvStore::open(&cli.store).context("opening function store")?;
            store.delete(id)?;
            println!("deleted #{id}");
            Ok(())
        }
        Commands::Themes => {
            for t in theme::presets() {
                println!("{:<18} background {}", t.name, t.background);
            }
            Ok(())
        }
    }
}

fn plot(store_path: &Path, args: PlotArgs) -> Result<()> {
    let theme = theme::find(&args.theme);
    if !theme.name.eq_ignore_ascii_case(&args.theme) {
        warn!(requested = %args.theme, "unknown theme, using {}", theme.name);
    }
    let render = RenderOptions {
        theme,
        show_legend: !args.no_legend,
        max_points_per_run: args.max_points,
        ..RenderOptions::default()
    };
    let chart = Chart::with_options(ExprEvaluator::new()?, ChartOptions { render, ..ChartOptions::default() });

    let mut requests = Vec::new();
    for expr in &args.expressions {
        requests.push((expr.clone(), args.range.start, args.range.end, args.range.step));
    }
    if !args.saved.is_empty() {
        let store = CsvStore::open(store_path).context("opening function store")?;
        for id in &args.saved {
            let f = store.get(*id)?;
            requests.push((f.expression.clone(), f.range_start, f.range_end, f.step));
        }
    }
    if requests.is_empty() {
        warn!("no expressions given; rendering the empty chart");
    }

    let requests: Vec<CurveRequest> = requests
        .into_iter()
        .enumerate()
        .map(|(i, (expr, start, end, step))| {
            let color = args.colors.get(i).copied().unwrap_or_else(|| theme.curve_color(i));
            CurveRequest::new(expr, start, end, step, color)
        })
        .collect();

    let mut failed = 0usize;
    if args.parallel {
        let mut pending = Vec::new();
        for req in requests {
            let expr = req.expression.clone();
            match chart.spawn_curve(req) {
                Ok(p) => pending.push((expr, p)),
                Err(e) => {
                    failed += 1;
                    eprintln!("skipping `{expr}`: {e}");
                }
            }
        }
        for (expr, p) in pending {
            if let Err(e) = p.join() {
                failed += 1;
                eprintln!("skipping `{expr}`: {e}");
            }
        }
    } else {
        for req in requests {
            let expr = req.expression.clone();
            if let Err(e) = chart.add_curve(req) {
                failed += 1;
                eprintln!("skipping `{expr}`: {e}");
            }
        }
    }

    if args.fit {
        chart.fit_view();
    }
    if let Some(factor) = args.zoom {
        chart.zoom(factor);
    }
    for step in &args.pan {
        chart.pan((*step).into(), args.pan_fraction);
    }
    if args.fit_y {
        chart.fit_y_visible();
    }

    let surface = SurfaceSize::with_pixel_ratio(args.width, args.height, args.dpr);
    let frame = chart.render(surface);
    write_frame(&frame, &args.out)?;
    let v = chart.viewport();
    info!(
        curves = chart.curves().len(),
        failed,
        x_min = v.x_min(),
        x_max = v.x_max(),
        y_min = v.y_min(),
        y_max = v.y_max(),
        "wrote {}",
        args.out.display()
    );
    println!("Wrote {}", args.out.display());
    Ok(())
}

fn write_frame(frame: &fnplot_core::Frame, out: &Path) -> Result<()> {
    let is_svg = out.extension().is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(out, frame.to_svg()).with_context(|| format!("writing {}", out.display()))?;
    } else {
        SkiaRenderer::new().render_to_png(frame, out)?;
    }
    Ok(())
}

fn table(expression: &str, range: RangeArgs) -> Result<()> {
    let evaluator = ExprEvaluator::new()?;
    let domain = fnplot_core::Domain::new(range.start, range.end, range.step)?;
    let points = fnplot_core::sample(&evaluator, expression, &domain)?;
    if points.is_empty() {
        bail!("`{expression}` has no finite values in [{}, {}]", range.start, range.end);
    }
    println!("f(x) = {expression}");
    println!("{:>14}  {:>14}", "X", "Y");
    for p in &points {
        if p.after_gap {
            println!("{:>14}  {:>14}", "...", "...");
        }
        println!("{:>14.4}  {:>14.4}", p.x, p.y);
    }
    Ok(())
}
