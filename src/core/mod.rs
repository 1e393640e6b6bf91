pub mod bulletin;
pub mod corpus;
pub mod document;
pub mod engine;
pub mod pipeline;
pub mod schedule;
pub mod scripture;
pub mod template;

pub use crate::domain::model::{Corpus, Schedule, TemplateData};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
