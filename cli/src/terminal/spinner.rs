use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);
const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁",
];

/// Spinner shown while a discovery window is open. It counts down the
/// window and reports how many devices have answered so far.
pub struct DiscoverySpinner {
    spinner: ProgressBar,
    found: Arc<AtomicUsize>,
    worker: Option<thread::JoinHandle<()>>,
}

impl DiscoverySpinner {
    pub fn start(window: Duration) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
            pb.set_style(style.tick_strings(TICK_STRINGS));
        }
        pb.enable_steady_tick(TICK);

        let found: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
        let pb_clone = pb.clone();
        let found_clone = found.clone();
        let started: Instant = Instant::now();

        let worker = thread::spawn(move || {
            while !pb_clone.is_finished() {
                let left: Duration = window.saturating_sub(started.elapsed());
                let count: usize = found_clone.load(Ordering::Relaxed);
                pb_clone.set_message(format!(
                    "Waiting for replies ({}s left), {} devices so far...",
                    left.as_secs(),
                    count.to_string().green().bold()
                ));
                thread::sleep(TICK);
            }
        });

        Self {
            spinner: pb,
            found,
            worker: Some(worker),
        }
    }

    /// Callback handed to discovery, invoked with the running device count.
    pub fn reporter(&self) -> Arc<dyn Fn(usize) + Send + Sync> {
        let found = self.found.clone();
        Arc::new(move |count| found.store(count, Ordering::Relaxed))
    }

    pub fn finish(mut self) {
        self.spinner.finish_and_clear();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
