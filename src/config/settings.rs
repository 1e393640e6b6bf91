use crate::config::columns::ColumnMap;
use crate::config::toml_config::TomlConfig;
use crate::core::document::Converters;
use crate::core::schedule::ScheduleLayout;
use crate::core::scripture::{Resolver, SingleChapterSlicing};
use crate::core::ConfigProvider;
use crate::utils::error::{LiturgistError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;

pub const DEFAULT_OUTPUT_PATH: &str = "output/out.pdf";

/// Everything one bulletin run needs, after merging the config file and the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub schedule_path: String,
    pub date: NaiveDate,
    pub template_path: Option<String>,
    pub bible_json_path: Option<String>,
    pub output_path: String,
    pub print_json: bool,
    pub layout: ScheduleLayout,
    pub columns: ColumnMap,
    pub slicing: SingleChapterSlicing,
    pub converters: Converters,
}

impl Settings {
    pub fn new(schedule_path: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            schedule_path: schedule_path.into(),
            date,
            template_path: None,
            bible_json_path: None,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            print_json: false,
            layout: ScheduleLayout::default(),
            columns: ColumnMap::default(),
            slicing: SingleChapterSlicing::default(),
            converters: Converters::default(),
        }
    }

    /// Applies values from a config file on top of the defaults.
    pub fn with_file_config(mut self, file: &TomlConfig) -> Self {
        if let Some(header_row) = file.header_row() {
            self.layout.header_row = header_row;
        }
        if let Some(date_column) = file.date_column() {
            self.layout.date_column = date_column.to_string();
        }
        self.columns = self.columns.with_overrides(&file.columns);
        if let Some(slicing) = file.single_chapter_slicing() {
            self.slicing = slicing;
        }
        if let Some(path) = file.bible_json_path() {
            self.bible_json_path = Some(path.to_string());
        }
        if let Some(path) = file.template_path() {
            self.template_path = Some(path.to_string());
        }
        if let Some(path) = file.output_path() {
            self.output_path = path.to_string();
        }
        if let Some(pandoc) = file.pandoc() {
            self.converters.pandoc = pandoc.to_string();
        }
        if let Some(weasyprint) = file.weasyprint() {
            self.converters.weasyprint = weasyprint.to_string();
        }
        self
    }

    /// Builds settings from the command line, reading `--config` if given.
    /// Command line values win over the config file.
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &crate::config::CliConfig) -> Result<Self> {
        let date = match &cli.date {
            Some(value) => crate::core::schedule::parse_date(value)?,
            None => crate::core::schedule::next_sunday(),
        };

        let mut settings = Settings::new(cli.schedule.clone(), date);

        if let Some(path) = &cli.config {
            tracing::info!("Loading configuration from: {}", path);
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            settings = settings.with_file_config(&file);
        }

        if cli.template.is_some() {
            settings.template_path = cli.template.clone();
        }
        if cli.bible_json_path.is_some() {
            settings.bible_json_path = cli.bible_json_path.clone();
        }
        if let Some(output_path) = &cli.output_path {
            settings.output_path = output_path.clone();
        }
        settings.print_json = cli.print_json;

        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("schedule", &self.schedule_path)?;
        validation::validate_path("output", &self.output_path)?;
        if let Some(path) = &self.bible_json_path {
            validation::validate_file_extension("bible_json_path", path, &["json"])?;
        }

        if self.template_path.is_none() && !self.print_json {
            return Err(LiturgistError::ConfigError {
                message: "You must specify a template file or --print-json.".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn schedule_path(&self) -> &str {
        &self.schedule_path
    }

    fn target_date(&self) -> NaiveDate {
        self.date
    }

    fn template_path(&self) -> Option<&str> {
        self.template_path.as_deref()
    }

    fn bible_json_path(&self) -> Option<&str> {
        self.bible_json_path.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn print_json(&self) -> bool {
        self.print_json
    }

    fn schedule_layout(&self) -> &ScheduleLayout {
        &self.layout
    }

    fn column_map(&self) -> &ColumnMap {
        &self.columns
    }

    fn resolver(&self) -> Resolver {
        Resolver::new(self.slicing)
    }

    fn converters(&self) -> &Converters {
        &self.converters
    }
}
