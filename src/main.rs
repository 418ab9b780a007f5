use anyhow::Context;
use clap::Parser;
use falloff_nodes::{falloffs, prelude::*};
use log::warn;

use std::io::{self, Write};

#[derive(Debug, Parser)]
#[command(name = "falloff-nodes")]
#[command(about = "Inspect the falloff node type declarations")]
struct Args {
    /// Node type identifier to print; lists every node type when omitted.
    node: Option<String>,

    /// Log filter, overridden by RUST_LOG.
    #[arg(long, env = "FALLOFF_NODES_LOG", default_value = "warn")]
    log_level: String,

    /// Accept node type identifiers and socket names outside of `[A-Za-z0-9_]`.
    #[arg(long)]
    no_validate: bool,
}

fn write_descriptor(out: &mut impl Write, descriptor: &NodeTypeDescriptor) -> io::Result<()> {
    writeln!(out, "{} ({})", descriptor.label(), descriptor.id())?;
    for (side, socket) in descriptor.declaration().sockets() {
        let arrow = match side {
            Side::Input => "->",
            Side::Output => "<-",
        };
        writeln!(out, "  {arrow} {socket}")?;
    }
    Ok(())
}

/// List every node type, or print the one named by `args.node`.
fn run(args: &Args, out: &mut impl Write) -> anyhow::Result<()> {
    let (registry, report) = falloffs::registry(RegistryConfig {
        validate_identifiers: !args.no_validate,
    });
    for err in &report.failed {
        warn!("{err}");
    }

    match &args.node {
        Some(id) => {
            let descriptor = registry
                .get(id)
                .with_context(|| format!("Cannot show node type `{id}`"))?;
            write_descriptor(out, descriptor)?;
        }
        None => {
            for descriptor in registry.iter() {
                write_descriptor(out, descriptor)?;
            }
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .parse_default_env()
        .init();

    run(&args, &mut io::stdout().lock())
}
