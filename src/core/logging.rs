//! Optional append-only chat log.
//!
//! When `--log <file>` is given, every exchange that reaches the transcript is
//! also appended to the file in plain text. Without a path the log is inert.

use std::fs::OpenOptions;
use std::io::Write;

use crate::core::transcript::Turn;

pub struct ChatLog {
    file_path: Option<String>,
}

impl ChatLog {
    /// Validates write access up front so a bad path fails at startup rather
    /// than on the first exchange.
    pub fn new(file_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = &file_path {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.flush()?;
        }
        Ok(ChatLog { file_path })
    }

    pub fn is_active(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn record(&self, turn: &Turn) -> Result<(), Box<dyn std::error::Error>> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}: {}", turn.role.as_str(), turn.content)?;
        writeln!(file)?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn inactive_log_writes_nothing() {
        let log = ChatLog::new(None).unwrap();
        assert!(!log.is_active());
        log.record(&Turn::user("hello")).unwrap();
    }

    #[test]
    fn turns_are_appended_with_role_prefixes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.log");
        let log = ChatLog::new(Some(path.to_string_lossy().into_owned())).unwrap();

        log.record(&Turn::user("best seed for kharif?")).unwrap();
        log.record(&Turn::assistant("Try a short-duration variety.")).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("user: best seed for kharif?"));
        assert!(contents.contains("assistant: Try a short-duration variety."));
    }

    #[test]
    fn unwritable_path_fails_at_construction() {
        let result = ChatLog::new(Some("/nonexistent-dir/chat.log".to_string()));
        assert!(result.is_err());
    }
}
