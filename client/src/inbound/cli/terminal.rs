//! Terminal implementations of the notice and confirmation ports.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::domain::ports::{DeleteConfirmation, Notifier};
use crate::domain::{Notice, NoticeLevel};

/// Prints each notice once to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        if let Err(error) = writeln!(io::stderr().lock(), "{}", notice_line(&notice)) {
            warn!(%error, notice = %notice, "could not print notice");
        }
    }
}

fn notice_line(notice: &Notice) -> String {
    let tag = match notice.level() {
        NoticeLevel::Success => "ok",
        NoticeLevel::Failure => "error",
    };
    format!("[{tag}] {notice}")
}

/// Asks on stderr and reads the answer from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirmation;

impl DeleteConfirmation for StdinConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stderr = io::stderr().lock();
        if write!(stderr, "{prompt} [y/N] ")
            .and_then(|()| stderr.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(error) => {
                warn!(%error, "could not read confirmation");
                false
            }
        }
    }
}

/// Only `y` or `yes`, in any case, confirms.
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
