//! Console notices

use std::io::Write;
use tracing::{error, info};

use crate::host::Notifier;

/// [`Notifier`] that prints info to stdout and errors to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        info!(notice = message, "Notice");
        let _ = writeln!(std::io::stdout(), "{message}");
    }

    fn error(&self, message: &str) {
        error!(notice = message, "Error notice");
        let _ = writeln!(std::io::stderr(), "{message}");
    }
}
