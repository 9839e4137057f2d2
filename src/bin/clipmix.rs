use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "clipmix", version)]
struct Cli {
    /// Log mixer activity to stderr (repeat for more detail). Warnings always print.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a timeline and print one JSON line per tick.
    Eval(EvalArgs),
    /// Print every fade window the timeline declares.
    Fades(FadesArgs),
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First tick, in seconds.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last tick, in seconds. Defaults to the timeline's end.
    #[arg(long)]
    to: Option<f64>,

    /// Seconds between ticks.
    #[arg(long, default_value_t = 1.0 / 30.0)]
    step: f64,

    /// Evaluate tracks on the calling thread only.
    #[arg(long)]
    sequential: bool,

    /// Override the number of worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct FadesArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Eval(args) => cmd_eval(args),
        Command::Fades(args) => cmd_fades(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_timeline_json(path: &Path) -> anyhow::Result<clipmix::Timeline> {
    let f = File::open(path).with_context(|| format!("open timeline '{}'", path.display()))?;
    let r = BufReader::new(f);
    let timeline: clipmix::Timeline =
        serde_json::from_reader(r).with_context(|| "parse timeline JSON")?;
    Ok(timeline)
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let timeline = read_timeline_json(&args.in_path)?;
    timeline.validate()?;

    let to = args.to.unwrap_or_else(|| timeline.end_time());
    let opts = clipmix::SessionOpts {
        parallel: !args.sequential,
        threads: args.threads,
    };
    let mut session = clipmix::PlaybackSession::with_opts(timeline, opts)?;
    let ticks = session.sample_range(args.from, to, args.step)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for tick in &ticks {
        serde_json::to_writer(&mut out, tick).with_context(|| "write tick JSON")?;
        writeln!(out)?;
    }
    out.flush()?;

    session.teardown();
    tracing::debug!(ticks = ticks.len(), "done");
    Ok(())
}

fn cmd_fades(args: FadesArgs) -> anyhow::Result<()> {
    let timeline = read_timeline_json(&args.in_path)?;
    let session = clipmix::PlaybackSession::with_opts(
        timeline,
        clipmix::SessionOpts {
            parallel: false,
            threads: None,
        },
    )?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for fade in session.fades() {
        match fade {
            Ok(summary) => {
                serde_json::to_writer(&mut out, &summary).with_context(|| "write fade JSON")?;
                writeln!(out)?;
            }
            Err(e) => tracing::warn!(error = %e, "skipping unresolvable fade"),
        }
    }
    out.flush()?;
    Ok(())
}
