use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use seamline_core::pipeline::{BlendStage, ProgressReporter};

/// Progress reporter that drives one indicatif bar per pipeline stage.
#[derive(Default)]
pub struct ConsoleReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for ConsoleReporter {
    fn begin_stage(&self, stage: BlendStage, total_items: Option<usize>) {
        let bar = match total_items {
            Some(total) => {
                let pb = ProgressBar::new(total as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{msg:<18} [{bar:40}] {pos}/{len}")
                        .expect("valid progress template")
                        .progress_chars("=> "),
                );
                pb
            }
            None => ProgressBar::new_spinner(),
        };
        bar.set_message(stage.to_string());
        *self.bar.lock().expect("progress bar lock") = Some(bar);
    }

    fn advance(&self, items_done: usize) {
        if let Some(bar) = self.bar.lock().expect("progress bar lock").as_ref() {
            bar.set_position(items_done as u64);
        }
    }

    fn finish_stage(&self) {
        if let Some(bar) = self.bar.lock().expect("progress bar lock").take() {
            bar.finish_and_clear();
        }
    }
}
