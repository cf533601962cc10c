use crate::config::toml_config::AppConfig;
use crate::core::enrollment::RegistrationRequest;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "course-enrollment")]
#[command(about = "Course registration with flat-file records")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the data directory from the config file
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Run a single command instead of the interactive menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Register a student for a course
    Register {
        /// Course number as listed by the menu (1-based)
        #[arg(long)]
        course: usize,
        #[arg(long)]
        firstname: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        email: String,
        #[arg(long, allow_negative_numbers = true)]
        matriculation: i32,
        #[arg(long)]
        university: String,
    },
    /// Show lecturer and participants of a course
    Show { course: usize },
    /// List courses with free places
    Free,
    /// List the courses of every student
    Enrollments,
    /// List courses that will not take place
    Report,
}

impl Command {
    pub fn registration_request(&self) -> Option<RegistrationRequest> {
        match self {
            Command::Register {
                course,
                firstname,
                surname,
                email,
                matriculation,
                university,
            } => Some(RegistrationRequest {
                course: *course,
                firstname: firstname.clone(),
                surname: surname.clone(),
                email: email.clone(),
                matriculation_number: *matriculation,
                university: university.clone(),
            }),
            _ => None,
        }
    }
}

impl CliConfig {
    /// 載入設定檔 (若有) 並套用命令列覆蓋
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_register_command() {
        let cli = CliConfig::parse_from([
            "course-enrollment",
            "--data-dir",
            "/tmp/records",
            "register",
            "--course",
            "2",
            "--firstname",
            "Ann",
            "--surname",
            "Lee",
            "--email",
            "ann@x.com",
            "--matriculation",
            "1001",
            "--university",
            "BU",
        ]);

        let request = cli.command.as_ref().unwrap().registration_request().unwrap();
        assert_eq!(request.course, 2);
        assert_eq!(request.matriculation_number, 1001);

        let config = cli.resolve().unwrap();
        assert_eq!(config.storage.data_dir, "/tmp/records");
    }

    #[test]
    fn test_parse_negative_matriculation_number() {
        let cli = CliConfig::parse_from([
            "course-enrollment",
            "register",
            "--course",
            "1",
            "--firstname",
            "Ann",
            "--surname",
            "Lee",
            "--email",
            "ann@x.com",
            "--matriculation",
            "-7",
            "--university",
            "BU",
        ]);

        let request = cli.command.as_ref().unwrap().registration_request().unwrap();
        assert_eq!(request.matriculation_number, -7);
    }

    #[test]
    fn test_no_subcommand_means_interactive() {
        let cli = CliConfig::parse_from(["course-enrollment", "-v"]);
        assert!(cli.verbose);
        assert!(cli.command.is_none());
        assert_eq!(cli.resolve().unwrap(), AppConfig::default());
    }
}
