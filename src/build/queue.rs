//! Shared work queue and worker pool.
//!
//! The parallel phase is a fixed pool of OS threads (one per processing
//! unit) draining an ordered task list through [`WorkQueue::claim_next`]. The
//! cursor is a single atomic fetch-and-increment, so no index is ever handed
//! to two workers. The first non-zero exit sets the failure flag and forces
//! the cursor past the end; tasks already claimed run to completion and only
//! contribute diagnostics.
//!
//! The only blocking operation inside a worker is the synchronous compiler
//! subprocess, which dominates wall-clock time and is the whole point of the
//! pool. There is no cancellation: a hung compiler stalls the build.

use crate::build::plan::CompileTask;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

pub struct WorkQueue {
    tasks: Vec<CompileTask>,
    next: AtomicUsize,
    failed: AtomicBool,
}

impl WorkQueue {
    pub fn new(tasks: Vec<CompileTask>) -> Self {
        Self {
            tasks,
            next: AtomicUsize::new(0),
            failed: AtomicBool::new(false),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Claim the next unclaimed task index, or `None` when the list is
    /// exhausted or a failure halted dispatch. The raw cursor is never
    /// exposed.
    pub fn claim_next(&self) -> Option<usize> {
        if self.failed.load(Ordering::SeqCst) {
            return None;
        }
        let idx = self.next.fetch_add(1, Ordering::SeqCst);
        if idx < self.tasks.len() {
            Some(idx)
        } else {
            None
        }
    }

    pub fn task(&self, idx: usize) -> &CompileTask {
        &self.tasks[idx]
    }

    /// Record a failure and stop further claims. In-flight tasks finish on
    /// their own.
    pub fn abort(&self) {
        self.failed.store(true, Ordering::SeqCst);
        self.next.store(self.tasks.len(), Ordering::SeqCst);
    }

    pub fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

/// Drain `tasks` across one worker per processing unit. Returns `true` when
/// every executed task exited zero. All workers are joined before the flag is
/// read.
pub fn run_parallel(tasks: Vec<CompileTask>) -> bool {
    let queue = WorkQueue::new(tasks);
    if queue.is_empty() {
        return true;
    }
    let workers = num_cpus::get().max(1).min(queue.len());

    let pb = ProgressBar::new(queue.len() as u64);
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Compiling...");

    thread::scope(|s| {
        for _ in 0..workers {
            s.spawn(|| {
                while let Some(idx) = queue.claim_next() {
                    execute(queue.task(idx), &queue, &pb);
                }
            });
        }
    });

    pb.finish_and_clear();
    !queue.has_failed()
}

fn execute(task: &CompileTask, queue: &WorkQueue, pb: &ProgressBar) {
    pb.set_message(format!("Compiling {}", task.source.display()));

    match task.command().output() {
        Ok(output) => {
            let mut diag = String::from_utf8_lossy(&output.stdout).into_owned();
            diag.push_str(&String::from_utf8_lossy(&output.stderr));

            if !output.status.success() {
                queue.abort();
                pb.println(format!(
                    "{} Error compiling {}:\n{}",
                    "x".red(),
                    task.source.display(),
                    diag
                ));
            } else if !diag.is_empty() {
                pb.println(format!(
                    "{} Warning in {}:\n{}",
                    "!".yellow(),
                    task.source.display(),
                    diag
                ));
            }
        }
        Err(e) => {
            queue.abort();
            pb.println(format!(
                "{} Failed to execute '{}': {}",
                "x".red(),
                task.program,
                e
            ));
        }
    }

    pb.inc(1);
}
