use crate::core::{ConfigProvider, EnrollmentPolicy};
use crate::utils::error::{EnrollError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub policy: EnrollmentPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub students_file: String,
    pub courses_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            students_file: "students.txt".to_string(),
            courses_file: "courses.txt".to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EnrollError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，缺少的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EnrollError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EnrollError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
        validation::validate_path("storage.students_file", &self.storage.students_file)?;
        validation::validate_path("storage.courses_file", &self.storage.courses_file)?;

        if self.storage.students_file == self.storage.courses_file {
            return Err(EnrollError::InvalidConfigValueError {
                field: "storage.courses_file".to_string(),
                value: self.storage.courses_file.clone(),
                reason: "Students and courses must be stored in different files".to_string(),
            });
        }

        validation::validate_positive_number("policy.capacity", self.policy.capacity, 1)?;
        validation::validate_range(
            "policy.minimum_participants",
            self.policy.minimum_participants,
            0,
            self.policy.capacity,
        )?;
        validation::validate_positive_number("policy.home_limit", self.policy.home_limit, 1)?;
        validation::validate_positive_number("policy.default_limit", self.policy.default_limit, 1)?;

        if self.policy.home_university.trim().is_empty() {
            return Err(EnrollError::MissingConfigError {
                field: "policy.home_university".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn students_file(&self) -> &str {
        &self.storage.students_file
    }

    fn courses_file(&self) -> &str {
        &self.storage.courses_file
    }

    fn policy(&self) -> &EnrollmentPolicy {
        &self.policy
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
