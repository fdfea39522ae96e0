// Copyright 2025. Render the test-pattern catalog to 16-bit PNG files.
//
// Usage:
//   render-targets [SIZE_CLASS] [--out-dir DIR] [--post-process clamp|dither] [--workers N]
//   render-targets --list

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use make_targets::{Pattern, PngSink, PostProcessMode, RenderConfig, Scheduler, TransferLuts};

/// Synthesize display test patterns at every configured size and density.
#[derive(Parser, Debug)]
#[command(name = "render-targets")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Render only this size class (tv, tvx2, proj)
    #[arg(value_name = "SIZE_CLASS")]
    size_class: Option<String>,

    /// Directory the PNG files are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Variant produced for continuous-tone patterns
    #[arg(short, long, value_enum, default_value = "clamp")]
    post_process: PostProcessArg,

    /// Worker threads (default: one per core)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=1024))]
    workers: Option<u32>,

    /// List size classes and patterns, then exit
    #[arg(long)]
    list: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PostProcessArg {
    /// Threshold at mid-gray, then blur (`_clamp`)
    Clamp,
    /// Seeded 1-bit stochastic dither (`_dith`)
    Dither,
}

impl From<PostProcessArg> for PostProcessMode {
    fn from(arg: PostProcessArg) -> Self {
        match arg {
            PostProcessArg::Clamp => PostProcessMode::Clamp,
            PostProcessArg::Dither => PostProcessMode::Dither,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal());
    Registry::default().with(filter).with(fmt_layer).init();
}

fn print_catalog(config: &RenderConfig) {
    println!("Size classes:");
    for class in &config.size_classes {
        println!(
            "  {:<6} {}x{}",
            class.name, class.size.width, class.size.height
        );
    }
    println!();
    println!("Densities: {:?}", config.densities);
    println!();
    println!("Patterns:");
    for p in Pattern::ALL {
        println!("  {:<24} {:?}", p.name(), p.family());
    }
}

fn main() {
    let args = Args::parse();
    let config = RenderConfig {
        post_process: args.post_process.into(),
        workers: args.workers.map(|n| n as usize),
        out_dir: args.out_dir,
        ..RenderConfig::default()
    };

    if args.list {
        print_catalog(&config);
        return;
    }

    init_tracing();

    let luts = TransferLuts::build();
    let result = PngSink::create(&config.out_dir).and_then(|sink| {
        Scheduler::new(&config, &luts, &sink).run(args.size_class.as_deref())
    });

    match result {
        Ok(summary) => {
            tracing::info!(
                files = summary.files,
                skipped = summary.skipped,
                dir = %config.out_dir.display(),
                "done"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "render failed");
            process::exit(1);
        }
    }
}
