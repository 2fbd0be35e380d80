use crate::domain::ports::{LineSink, LineSource};
use crate::utils::error::{AnagramError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory words, handy for embedding and tests.
#[derive(Debug, Clone)]
pub struct MemoryLineSource {
    name: String,
    lines: Arc<Vec<String>>,
    fail_at_end: bool,
}

impl MemoryLineSource {
    pub fn new<I, T>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            lines: Arc::new(lines.into_iter().map(Into::into).collect()),
            fail_at_end: false,
        }
    }

    /// Yields `lines`, then a read error instead of ending.
    pub fn failing_after<I, T>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            fail_at_end: true,
            ..Self::new(name, lines)
        }
    }
}

pub struct MemoryLines {
    name: String,
    lines: Arc<Vec<String>>,
    next: usize,
    fail_at_end: bool,
}

impl Iterator for MemoryLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(line) = self.lines.get(self.next) {
            self.next += 1;
            return Some(Ok(line.clone()));
        }

        if self.fail_at_end {
            self.fail_at_end = false;
            return Some(Err(AnagramError::source_unreadable(
                &self.name,
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "source truncated"),
            )));
        }
        None
    }
}

impl LineSource for MemoryLineSource {
    type Lines = MemoryLines;

    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Result<MemoryLines> {
        Ok(MemoryLines {
            name: self.name.clone(),
            lines: Arc::clone(&self.lines),
            next: 0,
            fail_at_end: self.fail_at_end,
        })
    }
}

/// Collects written lines; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryLineSink {
    name: String,
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLineSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn lines(&self) -> Vec<String> {
        self.lines.lock().await.clone()
    }
}

impl LineSink for MemoryLineSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write_lines(&self, lines: Vec<String>) -> Result<()> {
        let mut stored = self.lines.lock().await;
        *stored = lines;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_open_is_a_fresh_pass() {
        let source = MemoryLineSource::new("words", ["act", "cat"]);
        let first: Vec<String> = source.open().unwrap().map(|l| l.unwrap()).collect();
        let second: Vec<String> = source.open().unwrap().map(|l| l.unwrap()).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["act", "cat"]);
    }

    #[test]
    fn test_sink_discards_previous_lines() {
        let sink = MemoryLineSink::new("result");
        tokio_test::block_on(async {
            tokio_test::assert_ok!(
                sink.write_lines(vec!["a b".to_string(), "c d".to_string()])
                    .await
            );
            tokio_test::assert_ok!(sink.write_lines(vec!["e f".to_string()]).await);

            assert_eq!(sink.lines().await, vec!["e f"]);
        });
    }
}
