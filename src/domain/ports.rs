use crate::config::columns::ColumnMap;
use crate::core::document::Converters;
use crate::core::schedule::ScheduleLayout;
use crate::core::scripture::Resolver;
use crate::domain::model::{Schedule, TemplateData};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn is_file(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn schedule_path(&self) -> &str;
    fn target_date(&self) -> NaiveDate;
    fn template_path(&self) -> Option<&str>;
    fn bible_json_path(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn print_json(&self) -> bool;
    fn schedule_layout(&self) -> &ScheduleLayout;
    fn column_map(&self) -> &ColumnMap;
    fn resolver(&self) -> Resolver;
    fn converters(&self) -> &Converters;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Schedule>;
    async fn transform(&self, schedule: Schedule) -> Result<TemplateData>;
    /// Returns the path of the written document, if one was produced.
    async fn load(&self, data: TemplateData) -> Result<Option<String>>;
}
