use crate::config::columns::ColumnMapping;
use crate::core::scripture::SingleChapterSlicing;
use crate::utils::error::{LiturgistError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Optional `liturgist.toml` settings. Every section may be left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub schedule: Option<ScheduleConfig>,
    #[serde(default)]
    pub columns: Vec<ColumnMapping>,
    pub scripture: Option<ScriptureConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub header_row: Option<usize>,
    pub date_column: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptureConfig {
    pub bible_json_path: Option<String>,
    pub single_chapter_slicing: Option<SingleChapterSlicing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub template: Option<String>,
    pub pandoc: Option<String>,
    pub weasyprint: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LiturgistError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LiturgistError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BIBLE_JSON})
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(schedule) = &self.schedule {
            if let Some(date_column) = &schedule.date_column {
                crate::utils::validation::validate_non_empty_string("schedule.date_column", date_column)?;
            }
        }

        for (index, mapping) in self.columns.iter().enumerate() {
            crate::utils::validation::validate_non_empty_string(&format!("columns[{}].column", index), &mapping.column)?;
            crate::utils::validation::validate_non_empty_string(&format!("columns[{}].key", index), &mapping.key)?;
        }

        if let Some(output) = &self.output {
            if let Some(path) = &output.path {
                crate::utils::validation::validate_path("output.path", path)?;
            }
            for (field, program) in [("output.pandoc", &output.pandoc), ("output.weasyprint", &output.weasyprint)] {
                if let Some(program) = program {
                    crate::utils::validation::validate_non_empty_string(field, program)?;
                }
            }
        }

        Ok(())
    }

    pub fn header_row(&self) -> Option<usize> {
        self.schedule.as_ref().and_then(|s| s.header_row)
    }

    pub fn date_column(&self) -> Option<&str> {
        self.schedule.as_ref().and_then(|s| s.date_column.as_deref())
    }

    pub fn bible_json_path(&self) -> Option<&str> {
        self.scripture.as_ref().and_then(|s| s.bible_json_path.as_deref())
    }

    pub fn single_chapter_slicing(&self) -> Option<SingleChapterSlicing> {
        self.scripture.as_ref().and_then(|s| s.single_chapter_slicing)
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn template_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.template.as_deref())
    }

    pub fn pandoc(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.pandoc.as_deref())
    }

    pub fn weasyprint(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.weasyprint.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
