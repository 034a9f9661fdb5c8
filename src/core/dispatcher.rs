//! Delivery boundary. The core only depends on the `Notifier` contract;
//! what actually happens to a message (print, file, mail relay) is the
//! implementation's business.

use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, RESET};
use chrono::Local;
use std::fs;
use std::path::PathBuf;

pub trait Notifier {
    /// Deliver one rendered message. Best-effort per call; the caller
    /// decides whether a failure is fatal.
    fn send(&mut self, recipient: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// Prints messages to the terminal. Used by `notify --dry-run` and handy in
/// demos.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn send(&mut self, recipient: &str, subject: &str, body: &str) -> AppResult<()> {
        println!("{}To:      {}{}", CYAN, RESET, recipient);
        println!("{}Subject: {}{}", CYAN, RESET, subject);
        println!("{}", body);
        Ok(())
    }
}

/// Writes each message as one file into an outbox directory, where an
/// external mail relay (or a human) can pick it up.
pub struct OutboxNotifier {
    dir: PathBuf,
    seq: u32,
}

impl OutboxNotifier {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir, seq: 0 }
    }

    fn next_path(&mut self, recipient: &str) -> PathBuf {
        self.seq += 1;
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        self.dir
            .join(format!("{}_{:03}_{}.txt", stamp, self.seq, recipient))
    }
}

impl Notifier for OutboxNotifier {
    fn send(&mut self, recipient: &str, subject: &str, body: &str) -> AppResult<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::Dispatch(recipient.to_string(), e.to_string()))?;

        let path = self.next_path(recipient);
        let content = format!("To: {}\nSubject: {}\n\n{}", recipient, subject, body);

        fs::write(&path, content)
            .map_err(|e| AppError::Dispatch(recipient.to_string(), e.to_string()))?;

        Ok(())
    }
}
