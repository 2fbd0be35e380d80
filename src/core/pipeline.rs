use crate::adapters::file::{FileLineSink, FileLineSource};
use crate::core::{
    grouper::group_source, merger::merge, reducer::reduce_with_stats, ConfigProvider,
    ExtractResult, Grouping, LineSink, LineSource, Pipeline, ReduceResult,
};
use crate::utils::error::{AnagramError, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Groups every source on its own blocking worker, merges the results in
/// source order, reduces them to lines and writes those to the sink.
///
/// Failure is fail-fast: the first source that cannot be read aborts the
/// workers still queued and its error is returned. Workers already reading
/// run to the end, but their groupings are discarded.
pub struct AnagramPipeline<S: LineSource, K: LineSink, C: ConfigProvider> {
    sources: Vec<S>,
    sink: K,
    config: C,
}

impl<S: LineSource, K: LineSink, C: ConfigProvider> AnagramPipeline<S, K, C> {
    pub fn new(sources: Vec<S>, sink: K, config: C) -> Self {
        Self {
            sources,
            sink,
            config,
        }
    }

    pub fn sources(&self) -> &[S] {
        &self.sources
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }
}

/// Files named by `config`: one [`FileLineSource`] per source path and a [`FileLineSink`] for the result.
pub fn file_pipeline<C: ConfigProvider>(
    config: C,
) -> AnagramPipeline<FileLineSource, FileLineSink, C> {
    let sources = config
        .sources()
        .iter()
        .map(FileLineSource::new)
        .collect();
    let sink = FileLineSink::new(config.result_path(), config.overwrite_policy());
    AnagramPipeline::new(sources, sink, config)
}

#[async_trait::async_trait]
impl<S, K, C> Pipeline for AnagramPipeline<S, K, C>
where
    S: LineSource + Clone + 'static,
    K: LineSink,
    C: ConfigProvider,
{
    async fn extract(&self) -> Result<ExtractResult> {
        let limit = self.config.concurrent_sources().max(1);
        let semaphore = Arc::new(Semaphore::new(limit));
        let mut workers = JoinSet::new();

        tracing::debug!(
            "Grouping {} sources with up to {} workers",
            self.sources.len(),
            limit
        );

        for (index, source) in self.sources.iter().cloned().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            workers.spawn(async move {
                let _permit =
                    semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| AnagramError::WorkerFailed {
                            message: e.to_string(),
                        })?;

                let name = source.name().to_string();
                let grouping = tokio::task::spawn_blocking(move || group_source(&source))
                    .await
                    .map_err(|e| AnagramError::WorkerFailed {
                        message: format!("{}: {}", name, e),
                    })??;
                Ok::<_, AnagramError>((index, grouping))
            });
        }

        // 依來源順序合併，而非完成順序，輸出才會穩定
        let mut slots: Vec<Option<Grouping>> = (0..self.sources.len()).map(|_| None).collect();
        while let Some(joined) = workers.join_next().await {
            let (index, grouping) = match joined {
                Ok(Ok(done)) => done,
                Ok(Err(e)) => {
                    tracing::warn!("⚠️ Aborting remaining sources: {}", e);
                    workers.abort_all();
                    return Err(e);
                }
                Err(e) => {
                    workers.abort_all();
                    return Err(AnagramError::WorkerFailed {
                        message: e.to_string(),
                    });
                }
            };
            tracing::debug!(
                "Source #{} done: {} classes",
                index,
                grouping.len()
            );
            slots[index] = Some(grouping);
        }

        let sources_read = slots.iter().flatten().count();
        Ok(ExtractResult {
            grouping: merge(slots.into_iter().flatten()),
            sources_read,
        })
    }

    async fn transform(&self, data: ExtractResult) -> Result<ReduceResult> {
        Ok(reduce_with_stats(&data.grouping))
    }

    async fn load(&self, result: ReduceResult) -> Result<String> {
        tracing::debug!(
            "Writing {} lines to {}",
            result.lines.len(),
            self.sink.name()
        );
        self.sink.write_lines(result.lines).await?;
        Ok(self.sink.name().to_string())
    }
}
