use std::thread;

use clap::Parser;
use thread_namer::{os, profiler, set_thread_name};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Name one thread per NAME and show what each channel recorded.
#[derive(Debug, Parser)]
#[command(name = "thread-namer", version)]
struct Args {
    /// Report names to the profiler channel as tracing events
    #[arg(long)]
    tracing: bool,

    /// Thread names to apply
    #[arg(required = true)]
    names: Vec<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::Layer::default().with_ansi(true))
        .init();

    let args = Args::parse();

    if args.tracing {
        if let Err(err) = profiler::install(profiler::TracingProfiler) {
            tracing::warn!("profiler channel unavailable: {}", err);
        }
    }
    tracing::debug!("profiler channel available: {}", profiler::is_available());

    let handles: Vec<_> = args
        .names
        .into_iter()
        .map(|name| {
            thread::spawn(move || {
                set_thread_name(&name);
                (name, os::current(), profiler::current())
            })
        })
        .collect();

    for handle in handles {
        match handle.join() {
            Ok((requested, os_name, profiler_name)) => println!(
                "requested: {:?} os: {:?} profiler: {:?}",
                requested, os_name, profiler_name
            ),
            Err(_) => tracing::error!("naming thread panicked"),
        }
    }
}
