use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let full_path = self.base_path.join(name);
        match fs::read(&full_path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_file(&self, name: &str, data: &str) -> Result<()> {
        let full_path = self.base_path.join(name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        assert!(storage.read_file("students.txt").unwrap().is_none());
    }

    #[test]
    fn test_write_creates_data_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested").join("data"));

        storage.write_file("courses.txt", "line\n").unwrap();
        assert_eq!(
            storage.read_file("courses.txt").unwrap().as_deref(),
            Some(&b"line\n"[..])
        );
    }

    #[test]
    fn test_read_keeps_non_utf8_bytes() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("courses.txt"), b"Old\xffCourse|\n").unwrap();

        let storage = LocalStorage::new(temp_dir.path());
        let data = storage.read_file("courses.txt").unwrap().unwrap();
        assert_eq!(data, b"Old\xffCourse|\n".to_vec());
    }

    #[test]
    fn test_write_into_unusable_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("data");
        std::fs::write(&blocker, "not a directory").unwrap();

        let storage = LocalStorage::new(&blocker);
        assert!(storage.write_file("students.txt", "x\n").is_err());
    }
}
