use anyhow::{bail, Context, Result};
use chrono::Local;
use pdf_grid::Job;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Some(job_path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: {} <job.json>", env!("CARGO_PKG_NAME"));
    };

    let job = Job::load(&job_path)
        .with_context(|| format!("failed to load job {}", job_path.display()))?;
    info!(
        "{} v{}: {} group(s) from {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        job.groups.len(),
        job_path.display()
    );

    let generated_at = Local::now().naive_local();
    let report = job.run(generated_at);

    for document in &report.documents {
        for skipped in &document.skipped {
            warn!(group = %document.name, file = %skipped.name, "not included: {}", skipped.reason);
        }
    }
    job.write_outputs(&report.documents, generated_at)
        .with_context(|| format!("failed to write to {}", job.output_dir.display()))?;

    for failure in &report.failures {
        error!(group = %failure.group, "{}", failure.source);
    }
    info!("{}", report.summary());

    if report.nothing_produced() {
        bail!("no documents were produced");
    }
    Ok(())
}
