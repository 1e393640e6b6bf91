use crate::core::bulletin::process_schedule_data;
use crate::core::corpus::parse_corpus;
use crate::core::document::{build_document, OutputFormat};
use crate::core::schedule::parse_schedule;
use crate::core::template::render_template;
use crate::core::{ConfigProvider, Corpus, Pipeline, Schedule, Storage, TemplateData};
use crate::utils::error::{LiturgistError, Result};

/// Reads a schedule, selects one week, and renders it into a document.
pub struct BulletinPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> BulletinPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn load_corpus(&self) -> Result<Option<Corpus>> {
        let Some(path) = self.config.bible_json_path() else {
            return Ok(None);
        };

        if !self.storage.is_file(path).await {
            tracing::warn!("Bible JSON '{}' is not a file, scripture text will be skipped", path);
            return Ok(None);
        }

        let content = self.storage.read_file(path).await?;
        parse_corpus(&content).map(Some)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BulletinPipeline<S, C> {
    async fn extract(&self) -> Result<Schedule> {
        let path = self.config.schedule_path();
        tracing::debug!("Reading schedule from: {}", path);

        let content = self.storage.read_file(path).await?;
        parse_schedule(path, &content, self.config.schedule_layout())
    }

    async fn transform(&self, schedule: Schedule) -> Result<TemplateData> {
        let corpus = self.load_corpus().await?;

        process_schedule_data(
            &schedule,
            self.config.target_date(),
            self.config.column_map(),
            corpus.as_ref(),
            &self.config.resolver(),
        )
    }

    async fn load(&self, data: TemplateData) -> Result<Option<String>> {
        if self.config.print_json() {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }

        let Some(template_path) = self.config.template_path() else {
            return Ok(None);
        };

        if !self.storage.is_file(template_path).await {
            return Err(LiturgistError::TemplateNotFoundError {
                path: template_path.to_string(),
            });
        }

        let source = String::from_utf8(self.storage.read_file(template_path).await?).map_err(|e| {
            LiturgistError::ProcessingError {
                message: format!("Template {} is not valid UTF-8: {}", template_path, e),
            }
        })?;
        let rendered = render_template(&source, &data)?;

        let output_path = self.config.output_path();
        let format = OutputFormat::from_path(output_path);
        tracing::debug!("Writing {:?} document to {}", format, output_path);

        let document = build_document(&rendered, format, Some(template_path), self.config.converters()).await?;
        self.storage.write_file(output_path, &document).await?;

        Ok(Some(output_path.to_string()))
    }
}
