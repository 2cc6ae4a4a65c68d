use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use pepscreen::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders workflow progress events on stderr with a single reusable bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0).with_style(Self::spinner_style());
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb) = pb.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb.reset();
                    pb.set_length(0);
                    pb.set_style(Self::spinner_style());
                    pb.set_message(name);
                    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                }
                Progress::PhaseFinish => {
                    pb.disable_steady_tick();
                    let phase = pb.message();
                    pb.finish_with_message(format!("✓ {}", phase));
                }
                Progress::TaskStart { total_steps } => {
                    pb.disable_steady_tick();
                    pb.set_length(total_steps);
                    pb.set_position(0);
                    pb.set_style(Self::bar_style());
                }
                Progress::TaskAdvance { steps } => pb.inc(steps),
                Progress::TaskFinish => {
                    let total = pb.length().unwrap_or(0);
                    if pb.position() < total {
                        pb.set_position(total);
                    }
                }
                Progress::Tally { label, count } => {
                    pb.println(format!("  {:<12} {}", label, count));
                }
                Progress::Message(msg) => pb.println(format!("  {}", msg)),
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<14} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_starts_finished_and_empty() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn phase_and_task_events_drive_the_bar() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Filtering" });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Filtering");
            assert!(!pb.is_finished());
        }

        callback(Progress::TaskStart { total_steps: 30 });
        callback(Progress::TaskAdvance { steps: 10 });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(30));
            assert_eq!(pb.position(), 10);
        }

        callback(Progress::TaskFinish);
        assert_eq!(handler.pb.lock().unwrap().position(), 30);

        callback(Progress::Tally {
            label: "accepted",
            count: 30,
        });
        callback(Progress::PhaseFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.message(), "✓ Filtering");
        }
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart { name: "Ranking" });
            callback(Progress::Message("ranking 12 candidates".to_string()));
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "✓ Ranking");
    }
}
