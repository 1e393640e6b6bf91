pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, settings::Settings};
pub use core::scripture::{resolve, Resolver, ScriptureError, SingleChapterSlicing};
pub use core::{engine::BulletinEngine, pipeline::BulletinPipeline};
pub use domain::model::{Book, Chapter, Corpus};
pub use utils::error::{LiturgistError, Result};
