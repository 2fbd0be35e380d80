use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub destination: String,
    pub sources_read: usize,
    pub words_read: usize,
    pub classes: usize,
    pub lines_written: usize,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting anagram grouping");
        self.monitor.log_stats("Start");

        // Extract: 各來源分組後合併
        let extracted = self.pipeline.extract().await?;
        tracing::info!(
            "📖 Read {} sources into {} classes ({} words)",
            extracted.sources_read,
            extracted.grouping.len(),
            extracted.grouping.word_count()
        );
        self.monitor.log_stats("Extract");

        let sources_read = extracted.sources_read;

        // Transform: 過濾單字類別並組成輸出行
        let reduced = self.pipeline.transform(extracted).await?;
        tracing::info!(
            "🔤 Found {} anagram lines among {} classes",
            reduced.lines.len(),
            reduced.classes_seen
        );
        self.monitor.log_stats("Transform");

        let words_read = reduced.words_seen;
        let classes = reduced.classes_seen;
        let lines_written = reduced.lines.len();

        // Load
        let destination = self.pipeline.load(reduced).await?;
        tracing::info!("💾 Result written to: {}", destination);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(RunSummary {
            destination,
            sources_read,
            words_read,
            classes,
            lines_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExtractResult, Grouping, ReduceResult};
    use crate::utils::error::AnagramError;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubPipeline {
        fail_extract: bool,
        loaded: AtomicBool,
    }

    #[async_trait::async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<ExtractResult> {
            if self.fail_extract {
                return Err(AnagramError::source_unreadable(
                    "stub",
                    std::io::Error::from(std::io::ErrorKind::NotFound),
                ));
            }
            Ok(ExtractResult {
                grouping: Grouping::new(),
                sources_read: 1,
            })
        }

        async fn transform(&self, _data: ExtractResult) -> Result<ReduceResult> {
            Ok(ReduceResult {
                lines: vec!["act cat".to_string()],
                classes_seen: 3,
                words_seen: 4,
            })
        }

        async fn load(&self, _result: ReduceResult) -> Result<String> {
            self.loaded.store(true, Ordering::SeqCst);
            Ok("stub-result".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_reports_summary() {
        let engine = EtlEngine::new(StubPipeline {
            fail_extract: false,
            loaded: AtomicBool::new(false),
        });

        let summary = engine.run().await.unwrap();
        assert_eq!(
            summary,
            RunSummary {
                destination: "stub-result".to_string(),
                sources_read: 1,
                words_read: 4,
                classes: 3,
                lines_written: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_extract_failure_skips_load() {
        let engine = EtlEngine::new_with_monitoring(
            StubPipeline {
                fail_extract: true,
                loaded: AtomicBool::new(false),
            },
            true,
        );

        assert!(engine.run().await.is_err());
        assert!(!engine.pipeline().loaded.load(Ordering::SeqCst));
    }
}
