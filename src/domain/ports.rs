use crate::utils::error::Result;

/// Whole-file storage backend for the record files.
pub trait Storage {
    /// Raw file contents; `Ok(None)` when the file does not exist yet.
    fn read_file(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces the file, creating missing parent directories first.
    fn write_file(&self, name: &str, data: &str) -> Result<()>;
}

/// Settings the core needs, independent of where they came from.
pub trait ConfigProvider {
    fn data_dir(&self) -> &str;
    fn students_file(&self) -> &str;
    fn courses_file(&self) -> &str;
    fn policy(&self) -> &EnrollmentPolicy;
}

/// Capacity and per-university limits applied by the enrollment workflow.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EnrollmentPolicy {
    pub capacity: usize,
    pub minimum_participants: usize,
    pub home_university: String,
    pub home_limit: usize,
    pub default_limit: usize,
}

impl Default for EnrollmentPolicy {
    fn default() -> Self {
        Self {
            capacity: 10,
            minimum_participants: 3,
            home_university: "BU".to_string(),
            home_limit: 3,
            default_limit: 1,
        }
    }
}

impl EnrollmentPolicy {
    pub fn limit_for(&self, university: &str) -> usize {
        if university == self.home_university {
            self.home_limit
        } else {
            self.default_limit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_limits() {
        let policy = EnrollmentPolicy::default();
        assert_eq!(policy.limit_for("BU"), 3);
        assert_eq!(policy.limit_for("MIT"), 1);
        assert_eq!(policy.limit_for("bu"), 1);
        assert_eq!(policy.capacity, 10);
        assert_eq!(policy.minimum_participants, 3);
    }
}
