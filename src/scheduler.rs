//! Job scheduler: enumerates {size class × density × pattern} and drives
//! the jobs through a fixed pool of worker threads.
//!
//! The queue between the dispatcher and the workers is a zero-capacity
//! (rendezvous) channel, so the dispatcher blocks whenever every worker is
//! busy. Workers share only the read-only configuration, transfer tables
//! and sink. A fatal error is reported on a separate channel; the
//! dispatcher stops handing out jobs, closes the queue and joins every
//! worker before returning the first error.
//!
//! ```text
//!   Idle → Enumerating → Dispatching → Draining → Done
//! ```

use std::thread;

use crossbeam_channel::{bounded, select, Receiver, Sender};
use tracing::{debug, info, warn};

use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::pattern::PatternSpec;
use crate::render::{file_stem, render};
use crate::sink::ImageSink;
use crate::transfer::TransferLuts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Enumerating,
    Dispatching,
    Draining,
    Done,
}

/// One unit of work. Jobs are independent of one another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub size_class: String,
    pub spec: PatternSpec,
}

impl RenderJob {
    pub fn file_stem(&self, suffix: &str) -> String {
        file_stem(
            &self.size_class,
            self.spec.name(),
            self.spec.density.get(),
            suffix,
        )
    }
}

/// Counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Jobs enumerated.
    pub jobs: usize,
    /// Jobs that produced at least one file.
    pub written: usize,
    /// Jobs whose pattern was degenerate at that size and density.
    pub skipped: usize,
    /// Files written, post-processed variants included.
    pub files: usize,
}

#[derive(Debug, Default)]
struct WorkerStats {
    written: usize,
    skipped: usize,
    files: usize,
}

enum JobOutcome {
    Written { files: usize },
    Skipped,
}

pub struct Scheduler<'a, S: ImageSink> {
    config: &'a RenderConfig,
    luts: &'a TransferLuts,
    sink: &'a S,
    state: SchedulerState,
}

impl<'a, S: ImageSink> Scheduler<'a, S> {
    pub fn new(config: &'a RenderConfig, luts: &'a TransferLuts, sink: &'a S) -> Self {
        Self {
            config,
            luts,
            sink,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// The ordered job list, optionally restricted to one size class.
    pub fn enumerate(&self, filter: Option<&str>) -> Result<Vec<RenderJob>> {
        let classes: Vec<_> = self
            .config
            .size_classes
            .iter()
            .filter(|c| filter.map_or(true, |name| c.name == name))
            .collect();
        if let Some(name) = filter {
            if classes.is_empty() {
                return Err(Error::UnknownSizeClass(name.to_string()));
            }
        }
        let densities = self.config.densities()?;

        let mut jobs =
            Vec::with_capacity(classes.len() * densities.len() * self.config.patterns.len());
        for class in classes {
            for &density in &densities {
                for &pattern in &self.config.patterns {
                    jobs.push(RenderJob {
                        size_class: class.name.clone(),
                        spec: PatternSpec::new(pattern, class.size, density),
                    });
                }
            }
        }
        Ok(jobs)
    }

    /// Render every job and block until all workers have returned.
    pub fn run(&mut self, filter: Option<&str>) -> Result<RunSummary> {
        self.config.validate()?;

        enter(&mut self.state, SchedulerState::Enumerating);
        let jobs = match self.enumerate(filter) {
            Ok(jobs) => jobs,
            Err(e) => {
                enter(&mut self.state, SchedulerState::Done);
                return Err(e);
            }
        };
        let total = jobs.len();
        let workers = self.config.worker_count();
        info!(jobs = total, workers, "rendering");

        let (config, luts, sink) = (self.config, self.luts, self.sink);
        let state = &mut self.state;
        enter(state, SchedulerState::Dispatching);

        let (job_tx, job_rx) = bounded::<RenderJob>(0);
        // Each worker reports at most one error, so sends never block.
        let (err_tx, err_rx) = bounded::<Error>(workers);

        let (stats, first_err) = thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|id| {
                    let jobs = job_rx.clone();
                    let errors = err_tx.clone();
                    scope.spawn(move || worker(id, jobs, errors, config, luts, sink))
                })
                .collect();
            drop(job_rx);
            drop(err_tx);

            let mut first_err = None;
            for job in jobs {
                select! {
                    send(job_tx, job) -> res => {
                        if res.is_err() {
                            break;
                        }
                    }
                    recv(err_rx) -> err => {
                        first_err = err.ok();
                        break;
                    }
                }
            }

            enter(state, SchedulerState::Draining);
            drop(job_tx);

            let mut stats = WorkerStats::default();
            for handle in handles {
                match handle.join() {
                    Ok(s) => {
                        stats.written += s.written;
                        stats.skipped += s.skipped;
                        stats.files += s.files;
                    }
                    Err(_) => {
                        first_err.get_or_insert(Error::WorkerPanicked);
                    }
                }
            }
            (stats, first_err.or_else(|| err_rx.try_recv().ok()))
        });

        enter(state, SchedulerState::Done);
        if let Some(e) = first_err {
            return Err(e);
        }

        let summary = RunSummary {
            jobs: total,
            written: stats.written,
            skipped: stats.skipped,
            files: stats.files,
        };
        info!(
            jobs = summary.jobs,
            written = summary.written,
            skipped = summary.skipped,
            files = summary.files,
            "render finished"
        );
        Ok(summary)
    }
}

fn enter(state: &mut SchedulerState, next: SchedulerState) {
    debug!(from = ?*state, to = ?next, "scheduler state");
    *state = next;
}

fn worker<S: ImageSink>(
    id: usize,
    jobs: Receiver<RenderJob>,
    errors: Sender<Error>,
    config: &RenderConfig,
    luts: &TransferLuts,
    sink: &S,
) -> WorkerStats {
    debug!(worker = id, "worker started");
    let mut stats = WorkerStats::default();
    for job in jobs.iter() {
        match execute(&job, config, luts, sink) {
            Ok(JobOutcome::Written { files }) => {
                stats.written += 1;
                stats.files += files;
            }
            Ok(JobOutcome::Skipped) => stats.skipped += 1,
            Err(e) => {
                let _ = errors.send(e);
                break;
            }
        }
    }
    debug!(worker = id, "worker stopped");
    stats
}

/// Synthesis → colour conversion → optional post-process → persist.
fn execute<S: ImageSink>(
    job: &RenderJob,
    config: &RenderConfig,
    luts: &TransferLuts,
    sink: &S,
) -> Result<JobOutcome> {
    let Some(image) = render(&job.spec, luts, config.output_transfer) else {
        warn!(
            job = %job.file_stem(""),
            width = job.spec.size.width,
            height = job.spec.size.height,
            "degenerate pattern, nothing written"
        );
        return Ok(JobOutcome::Skipped);
    };

    let stem = job.file_stem("");
    sink.save(&image.encoded, &stem)?;
    info!(file = %stem, "wrote");
    let mut files = 1;

    if let Some(variant) = image.post_process(config.post_process) {
        let stem = job.file_stem(config.post_process.suffix());
        sink.save(&variant, &stem)?;
        info!(file = %stem, "wrote");
        files += 1;
    }
    Ok(JobOutcome::Written { files })
}
