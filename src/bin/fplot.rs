use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fplot::{
    ConsoleCommand, EventOutcome, FunctionBackend, InputEvent, PlotConfig, PlotSession,
    PngPresenter, ScreenSize, ZoomDirection,
};

#[derive(Parser, Debug)]
#[command(name = "fplot", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame of f(x) as a PNG.
    Frame(FrameArgs),
    /// Compile and smoke-test an expression; exits non-zero if it would be rejected.
    Check(CheckArgs),
    /// Drive a session from stdin or a script, one command per line.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Session config JSON. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compiler backend.
    #[arg(long, value_enum)]
    backend: Option<BackendChoice>,

    /// Frame width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Frame height in pixels.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Function body in terms of x. Defaults to the built-in x*x.
    #[arg(long = "fn")]
    function: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Zoom steps at the screen centre; negative zooms out.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    zoom: i32,

    /// Pan by (dx, dy) screen pixels, applied after zooming.
    #[arg(long, num_args = 2, value_names = ["DX", "DY"], allow_hyphen_values = true)]
    pan: Option<Vec<f64>>,

    #[command(flatten)]
    session: SessionArgs,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Function body in terms of x.
    expr: String,

    /// Evaluate at these points after a successful check.
    #[arg(long = "at", allow_hyphen_values = true)]
    at: Vec<f64>,

    #[command(flatten)]
    session: SessionArgs,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Read commands from this file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,

    /// PNG rewritten after every command.
    #[arg(long, conflicts_with = "sequence")]
    out: Option<PathBuf>,

    /// Directory receiving one numbered PNG per command.
    #[arg(long)]
    sequence: Option<PathBuf>,

    #[command(flatten)]
    session: SessionArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Bytecode,
    Closure,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Check(args) => cmd_check(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &SessionArgs) -> anyhow::Result<PlotConfig> {
    let mut cfg = match &args.config {
        Some(path) => PlotConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => PlotConfig::default(),
    };
    if let Some(b) = args.backend {
        cfg.backend = match b {
            BackendChoice::Bytecode => fplot::BackendKind::Bytecode,
            BackendChoice::Closure => fplot::BackendKind::Closure,
        };
    }
    if args.width.is_some() || args.height.is_some() {
        cfg.screen = ScreenSize::new(
            args.width.unwrap_or(cfg.screen.width),
            args.height.unwrap_or(cfg.screen.height),
        )?;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.session)?;
    if let Some(f) = args.function {
        cfg.initial_function = Some(f);
    }
    let mut session = PlotSession::new(&cfg).context("start session")?;

    let centre = cfg.screen.center();
    let mut events = vec![InputEvent::pointer_moved(centre.x, centre.y)];
    let direction = if args.zoom >= 0 {
        ZoomDirection::In
    } else {
        ZoomDirection::Out
    };
    events.extend((0..args.zoom.unsigned_abs()).map(|_| InputEvent::Wheel(direction)));
    if let Some([dx, dy]) = args.pan.as_deref().and_then(|p| <[f64; 2]>::try_from(p).ok()) {
        events.extend(ConsoleCommand::Pan { dx, dy }.into_events(centre.to_point()));
    }
    session.drain(events);

    let mut presenter = PngPresenter::file(&args.out);
    session
        .present(&mut presenter)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    let stats = session.last_stats();
    eprintln!(
        "wrote {} ({} samples, {} failed columns)",
        args.out.display(),
        stats.samples,
        stats.failed_columns
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.session)?;
    let mut backend = FunctionBackend::with_kind(cfg.backend, cfg.backend_opts())?;

    if let Err(e) = backend.try_redefine(&args.expr) {
        println!("{}: {e}", e.kind());
        anyhow::bail!("'{}' rejected", args.expr);
    }

    println!("ok: {} [{}]", backend.source(), backend.compiler_name());
    for x in args.at {
        match backend.evaluate(x) {
            Ok(y) => println!("f({x}) = {y}"),
            Err(e) => println!("f({x}): {e}"),
        }
    }
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.session)?;
    let mut session = PlotSession::new(&cfg).context("start session")?;

    let mut presenter = match (&args.out, &args.sequence) {
        (_, Some(dir)) => Some(PngPresenter::sequence(dir)),
        (Some(out), None) => Some(PngPresenter::file(out)),
        (None, None) => None,
    };

    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open script '{}'", path.display()))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.context("read command")?;
        let cmd = match fplot::parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("line {}: {e}", lineno + 1);
                continue;
            }
        };

        match &cmd {
            ConsoleCommand::Help => {
                println!("{}", fplot::HELP);
                continue;
            }
            ConsoleCommand::Status => {
                println!("{}", session.status());
                continue;
            }
            _ => {}
        }

        let events = cmd.into_events(session.pointer());
        for outcome in session.drain(events) {
            report(&outcome);
        }
        if let Some(p) = presenter.as_mut() {
            present(&mut session, p)?;
        }
        if session.is_quit() {
            break;
        }
    }
    Ok(())
}

fn present(session: &mut PlotSession, presenter: &mut PngPresenter) -> anyhow::Result<()> {
    let path = presenter.next_path();
    session
        .present(presenter)
        .with_context(|| format!("present frame to '{}'", path.display()))
}

fn report(outcome: &EventOutcome) {
    match outcome {
        EventOutcome::Redefined { revision } => println!("ok (revision {revision})"),
        EventOutcome::Rejected(e) => println!("{}: {e}", e.kind()),
        EventOutcome::Zoomed { scale, .. } => println!("scale {scale}"),
        EventOutcome::ViewReset => println!("view reset"),
        EventOutcome::Unchanged | EventOutcome::Panned(_) | EventOutcome::Quit => {}
    }
}
