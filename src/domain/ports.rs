use crate::domain::model::{ExtractResult, ReduceResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A finite, lazily read sequence of words, one per line.
pub trait LineSource: Send + Sync {
    type Lines: Iterator<Item = Result<String>> + Send;

    fn name(&self) -> &str;

    /// Starts a fresh pass over the source. The returned iterator is consumed once.
    fn open(&self) -> Result<Self::Lines>;
}

pub trait LineSink: Send + Sync {
    fn name(&self) -> &str;

    /// Replaces the sink's content with `lines`, each terminated by a newline.
    fn write_lines(
        &self,
        lines: Vec<String>,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Discard whatever the destination held.
    #[default]
    Replace,
    /// Fail when the destination already exists.
    Refuse,
}

pub trait ConfigProvider: Send + Sync {
    fn sources(&self) -> &[String];
    fn result_path(&self) -> &str;
    fn concurrent_sources(&self) -> usize;
    fn overwrite_policy(&self) -> OverwritePolicy;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractResult>;
    async fn transform(&self, data: ExtractResult) -> Result<ReduceResult>;
    async fn load(&self, result: ReduceResult) -> Result<String>;
}
