pub mod etl;
pub mod grouper;
pub mod key;
pub mod merger;
pub mod pipeline;
pub mod reducer;

pub use crate::domain::model::{
    AnagramClass, CanonicalKey, ExtractResult, Grouping, ReduceResult,
};
pub use crate::domain::ports::{ConfigProvider, LineSink, LineSource, OverwritePolicy, Pipeline};
pub use crate::utils::error::Result;
