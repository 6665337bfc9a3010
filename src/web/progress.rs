use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// A single animated status line shown while the stack initializes.
///
/// Owns exactly one background render thread (indicatif's steady tick);
/// `finish` stops it, clears the line and prints the message once. Dropping
/// an unfinished spinner finishes it, so every exit path stops the render
/// thread exactly once.
pub struct Spinner {
    bar: ProgressBar,
    msg: String,
}

impl Spinner {
    pub fn start(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::with_template("{msg} {spinner}").unwrap());
        bar.set_message(msg.clone());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar, msg }
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
            println!("{}", self.msg);
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish();
    }
}
