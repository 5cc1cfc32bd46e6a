//! SMP export command line host
//!
//! Loads a scene snapshot, runs the export pipeline, and writes the
//! resulting .xml document.

use anyhow::{Context, Result, bail};
use clap::{Arg, Command};

use smp_core::{Project, export};

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smp_core=info,smp_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let matches = Command::new("smp-cli")
        .about("Exports rigid body bone setups to bullet SMP .xml documents")
        .arg(
            Arg::new("snapshot")
                .value_name("SNAPSHOT")
                .help("Scene snapshot file (.ron)")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output document path, must end with .xml")
                .required(true),
        )
        .get_matches();

    let snapshot_path = matches
        .get_one::<String>("snapshot")
        .expect("snapshot is required");
    let output_path = matches
        .get_one::<String>("output")
        .expect("output is required");

    if !output_path.ends_with(".xml") {
        bail!("output filepath must end with .xml, cancelling export");
    }

    let project = Project::load(snapshot_path)
        .with_context(|| format!("failed to load scene snapshot '{snapshot_path}'"))?;

    let output = export(&project.scene).context("export failed")?;
    for diagnostic in &output.diagnostics {
        tracing::warn!("{diagnostic}");
    }

    std::fs::write(output_path, &output.document)
        .with_context(|| format!("failed to write '{output_path}'"))?;
    tracing::info!("wrote {output_path}");

    Ok(())
}
