pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{FileLineSink, FileLineSource, MemoryLineSink, MemoryLineSource};
pub use crate::config::{toml_config::TomlConfig, CliConfig};
pub use crate::core::{
    etl::{EtlEngine, RunSummary},
    grouper::{group_source, Grouper},
    key::canonical_key,
    merger::merge,
    pipeline::{file_pipeline, AnagramPipeline},
    reducer::reduce,
};
pub use crate::domain::model::{AnagramClass, CanonicalKey, Grouping};
pub use crate::domain::ports::{LineSink, LineSource, OverwritePolicy};
pub use crate::utils::error::{AnagramError, Result};
