//! Console rendition of store notifications.

use fotogear_store::Notifier;

/// Prints successes to stdout and failures to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses success messages (errors are always printed).
    pub fn quiet() -> Self {
        ConsoleNotifier { quiet: true }
    }
}

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        if !self.quiet {
            println!("✓ {message}");
        }
    }

    fn error(&self, message: &str) {
        eprintln!("✗ {message}");
    }
}
