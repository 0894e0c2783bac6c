//! Spinner shown while a CLI command waits on the generator service.
//! Becomes a no-op when the `progress` feature is disabled.

#[cfg(feature = "progress")]
use std::time::Duration;

pub struct Spinner {
    #[cfg(feature = "progress")]
    bar: indicatif::ProgressBar,
}

impl Spinner {
    #[cfg(feature = "progress")]
    pub fn start(message: &str) -> Self {
        let bar = indicatif::ProgressBar::new_spinner();
        if let Ok(style) = indicatif::ProgressStyle::default_spinner().template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    #[cfg(not(feature = "progress"))]
    pub fn start(_message: &str) -> Self {
        Self {}
    }

    /// Stop and leave `message` in place of the spinner
    #[cfg(feature = "progress")]
    pub fn finish(self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    #[cfg(not(feature = "progress"))]
    pub fn finish(self, message: &str) {
        eprintln!("{message}");
    }

    /// Stop and erase the spinner
    #[cfg(feature = "progress")]
    pub fn clear(self) {
        self.bar.finish_and_clear();
    }

    #[cfg(not(feature = "progress"))]
    pub fn clear(self) {}
}
