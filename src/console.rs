//! Console seam for the interview loops
//!
//! All assistant output and user input goes through this trait so the
//! unbounded stage loops can run against scripted input in tests.

use crate::error::InterviewError;
use std::io::{BufRead, Write};

pub trait Console: Send {
    /// Print an assistant-facing line to the user
    fn say(&mut self, text: &str) -> crate::Result<()>;

    /// Read one line of user input, without the trailing newline
    fn read_line(&mut self) -> crate::Result<String>;
}

/// Production console backed by stdin/stdout
pub struct StdConsole;

impl Console for StdConsole {
    fn say(&mut self, text: &str) -> crate::Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", text)?;
        handle.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> crate::Result<String> {
        let mut line = String::new();
        let read = std::io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(InterviewError::IoError(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stdin closed during interview",
            )));
        }
        // Strip the newline but nothing else; confirmation matching
        // depends on the untouched reply text.
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

/// Scripted console for development & testing.
/// Replays canned user replies and records everything said to the user.
pub struct ScriptedConsole {
    replies: std::collections::VecDeque<String>,
    said: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: replies.into_iter().map(String::from).collect(),
            said: Vec::new(),
        }
    }

    /// Everything printed to the user, in order
    pub fn said(&self) -> &[String] {
        &self.said
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, text: &str) -> crate::Result<()> {
        self.said.push(text.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> crate::Result<String> {
        self.replies.pop_front().ok_or_else(|| {
            InterviewError::IoError(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "scripted console ran out of replies",
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_console_replays_in_order() {
        let mut console = ScriptedConsole::new(vec!["first", "second"]);
        assert_eq!(console.read_line().unwrap(), "first");
        assert_eq!(console.read_line().unwrap(), "second");
        assert!(console.read_line().is_err());
    }

    #[test]
    fn test_scripted_console_records_output() {
        let mut console = ScriptedConsole::new(vec![]);
        console.say("ChatITR: hello").unwrap();
        assert_eq!(console.said(), ["ChatITR: hello"]);
    }
}
