use std::sync::Mutex;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use subprobe_core::stage::{Stage, StageEvent};

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

static SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn with_spinner<R>(f: impl FnOnce(&mut Option<ProgressBar>) -> R) -> R {
    let mut guard = SPINNER.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut guard)
}

/// Replaces any running spinner with a fresh one showing `message`.
pub fn start(message: String) {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}") {
        pb.set_style(style.tick_strings(TICKS));
    }
    pb.set_message(message);
    pb.enable_steady_tick(TICK_INTERVAL);

    with_spinner(|slot| {
        if let Some(old) = slot.replace(pb) {
            old.finish_and_clear();
        }
    });
}

pub fn stop() {
    with_spinner(|slot| {
        if let Some(pb) = slot.take() {
            pb.finish_and_clear();
        }
    });
}

pub fn on_stage_event(event: StageEvent) {
    match event {
        StageEvent::Started(stage) => start(running_message(stage)),
        StageEvent::Finished(_) => stop(),
    }
}

fn running_message(stage: Stage) -> String {
    let tool: &str = match stage {
        Stage::Enumeration => "subfinder",
        Stage::Probing => "httpx",
    };
    format!("Running {} ({})...", tool.bold(), stage.label())
}

/// Log writer that keeps output above the spinner line while one is active.
pub struct SpinnerWriter;

impl std::io::Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let msg = msg.trim_end().to_string();
        with_spinner(|slot| match slot {
            Some(pb) => pb.suspend(|| println!("{msg}")),
            None => println!("{msg}"),
        });
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
