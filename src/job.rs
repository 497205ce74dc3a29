//! Batch jobs described in a JSON file: where the images come from, how to lay them
//! out, and where the documents go.

use crate::archive::{archive_filename, bundle_archive, unique_filenames};
use crate::config::LayoutConfig;
use crate::error::ConfigError;
use crate::group::{build_groups, BatchReport, BuildError, Group, GroupDocument, SkippedImage};
use crate::LayoutError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum JobError {
    #[error("unable to read job file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid job file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid layout: {0}")]
    Layout(#[from] ConfigError),

    #[error("group {0:?} names neither a directory nor any files")]
    EmptyGroup(String),
}

/// Where one group's images are read from. Images from `dir` come first, sorted by
/// name, followed by `files` in the order given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSource {
    pub name: String,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Documents (and the archive, if any) are written here
    pub output_dir: PathBuf,
    /// Also bundle every document into one ZIP
    #[serde(default)]
    pub archive: bool,
    #[serde(default)]
    pub layout: LayoutConfig,
    pub groups: Vec<GroupSource>,
}

impl Job {
    pub fn from_json(json: &str) -> Result<Job, JobError> {
        let job: Job = serde_json::from_str(json)?;
        job.layout.validate()?;
        if let Some(source) = job
            .groups
            .iter()
            .find(|g| g.dir.is_none() && g.files.is_empty())
        {
            return Err(JobError::EmptyGroup(source.name.clone()));
        }
        Ok(job)
    }

    /// Reads and checks a job file. Relative paths inside the job are resolved against
    /// the directory containing the file.
    pub fn load(path: &Path) -> Result<Job, JobError> {
        let json = std::fs::read_to_string(path).map_err(|source| JobError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut job = Job::from_json(&json)?;

        if let Some(base) = path.parent() {
            job.output_dir = base.join(&job.output_dir);
            for source in job.groups.iter_mut() {
                source.dir = source.dir.as_ref().map(|d| base.join(d));
                source.files = source.files.iter().map(|f| base.join(f)).collect();
            }
        }

        Ok(job)
    }

    /// Reads every group's images from disk, one result per group in job order. Files
    /// that could not be read are returned alongside their group; a directory that
    /// cannot be listed fails only its own group.
    pub fn load_groups(&self) -> Vec<Result<(Group, Vec<SkippedImage>), BuildError>> {
        self.groups.iter().map(load_group).collect()
    }

    /// Loads and builds every group. Groups that could not be loaded are reported as
    /// failures next to the ones that failed to build.
    pub fn run(&self, generated_at: NaiveDateTime) -> BatchReport {
        let mut groups = Vec::with_capacity(self.groups.len());
        let mut load_failures = Vec::new();

        for loaded in self.load_groups() {
            match loaded {
                Ok((group, unreadable)) => {
                    for skipped in unreadable {
                        warn!(group = %group.name, file = %skipped.name, "not included: {}", skipped.reason);
                    }
                    groups.push(group);
                }
                Err(e) => {
                    error!(group = %e.group, "{e}");
                    load_failures.push(e);
                }
            }
        }

        let mut report = build_groups(&groups, &self.layout, generated_at);
        load_failures.append(&mut report.failures);
        report.failures = load_failures;
        report
    }

    /// Writes every document into the output directory, and the archive when the job
    /// asks for one. Documents that would share a file name are numbered like archive
    /// entries so none overwrites another. Returns the paths written.
    pub fn write_outputs(
        &self,
        documents: &[GroupDocument],
        generated_at: NaiveDateTime,
    ) -> Result<Vec<PathBuf>, LayoutError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let names = unique_filenames(documents.iter().map(|d| d.filename.as_str()));
        let mut written = Vec::with_capacity(documents.len() + 1);
        for (name, document) in names.into_iter().zip(documents) {
            let path = self.output_dir.join(name);
            std::fs::write(&path, &document.bytes)?;
            info!(
                group = %document.name,
                pages = document.pages,
                images = document.placed,
                "wrote {}",
                path.display()
            );
            written.push(path);
        }

        if self.archive && !documents.is_empty() {
            let path = self.output_dir.join(archive_filename(generated_at));
            std::fs::write(&path, bundle_archive(documents)?)?;
            info!("wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}

fn load_group(source: &GroupSource) -> Result<(Group, Vec<SkippedImage>), BuildError> {
    let (mut group, mut unreadable) = match &source.dir {
        Some(dir) => Group::from_dir(&source.name, dir).map_err(|e| {
            BuildError::new(
                &source.name,
                LayoutError::ListImages {
                    dir: dir.clone(),
                    source: e,
                },
            )
        })?,
        None => (Group::new(&source.name), Vec::new()),
    };

    let (listed, listed_unreadable) = Group::from_paths(&source.name, source.files.as_slice());
    group.files.extend(listed.files);
    unreadable.extend(listed_unreadable);

    if group.files.is_empty() {
        warn!(group = %source.name, "group has no images");
    }

    Ok((group, unreadable))
}
