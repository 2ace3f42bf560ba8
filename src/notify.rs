use std::process::{Command, Stdio};

pub const LOW_QUOTA_TITLE: &str = "WE Usage";
pub const LOW_QUOTA_MESSAGE: &str = "Usage is below 10GB";

/// Best-effort desktop alert sink
pub trait Notifier {
    fn notify(&self, title: &str, message: &str);
}

/// Shells out to `notify-send`; a missing binary is logged and ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifySend;

impl Notifier for NotifySend {
    fn notify(&self, title: &str, message: &str) {
        let status = Command::new("notify-send")
            .arg(title)
            .arg(message)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(s) if !s.success() => log::debug!("notify-send exited with {s}"),
            Err(e) => log::debug!("notify-send unavailable: {e}"),
            _ => {}
        }
    }
}
