use crate::app::session::Session;
use crate::core::enrollment::RegistrationRequest;
use crate::domain::ports::Storage;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const MENU: &str = "\nMenu:\n\
1. Register for a course\n\
2. Output course details\n\
3. Output not fully booked courses\n\
4. Display enrolled courses for each student\n\
5. End program\n\
Enter choice: ";

const INVALID_NUMBER: &str = "Invalid input. Please enter a valid number.";

/// Line-oriented menu over a [`Session`]. Input and output are generic so the loop
/// can be driven from tests.
pub struct Console<'a, S: Storage, R: BufRead, W: Write> {
    session: &'a mut Session<S>,
    input: R,
    output: W,
}

impl<'a, S: Storage, R: BufRead, W: Write> Console<'a, S, R, W> {
    pub fn new(session: &'a mut Session<S>, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Runs until the user picks "End program" or input is exhausted.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "----:Welcome to The Bahria University (BU):---")?;
        writeln!(
            self.output,
            "At BU university, {} courses are offered: {}.",
            self.session.catalog.len(),
            self.course_names()
        )?;

        loop {
            write!(self.output, "{}", MENU)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return self.finish();
            };
            let Ok(choice) = line.trim().parse::<u32>() else {
                writeln!(self.output, "{}", INVALID_NUMBER)?;
                continue;
            };

            match choice {
                1 => self.register()?,
                2 => self.show_course()?,
                3 => write!(self.output, "{}", self.session.free_places())?,
                4 => write!(self.output, "{}", self.session.enrollments())?,
                5 => return self.finish(),
                _ => writeln!(self.output, "Invalid option!")?,
            }
        }
    }

    fn register(&mut self) -> io::Result<()> {
        let prompt = format!("Select course ({}): ", self.course_menu());
        let Some(course) = self.prompt_number_once::<usize>(&prompt)? else {
            return Ok(());
        };

        // Checked up front so the user is not asked for details in vain.
        let catalog = &self.session.catalog;
        let full = course
            .checked_sub(1)
            .and_then(|i| catalog.get_by_index(i).ok())
            .map(|c| catalog.is_full(c));
        match full {
            None => {
                writeln!(self.output, "{}", INVALID_NUMBER)?;
                return Ok(());
            }
            Some(true) => {
                writeln!(self.output, "Course is fully booked.")?;
                return Ok(());
            }
            Some(false) => {}
        }

        let Some(firstname) = self.prompt("First name: ")? else {
            return Ok(());
        };
        let Some(surname) = self.prompt("Last name: ")? else {
            return Ok(());
        };
        let Some(email) = self.prompt("Email: ")? else {
            return Ok(());
        };
        let Some(matriculation_number) = self.prompt_number::<i32>("Matriculation number: ")?
        else {
            return Ok(());
        };
        let home = self.session.service().policy().home_university.clone();
        let Some(university) =
            self.prompt(&format!("University (Enter '{}' if you're from {}): ", home, home))?
        else {
            return Ok(());
        };

        let request = RegistrationRequest {
            course,
            firstname,
            surname,
            email,
            matriculation_number,
            university,
        };

        match self.session.register(&request) {
            Ok(enrollment) => {
                writeln!(self.output, "Successfully registered for {}.", enrollment.course)?;
                if !enrollment.persisted {
                    writeln!(
                        self.output,
                        "Warning: the registration could not be saved to disk."
                    )?;
                }
            }
            Err(e) => writeln!(self.output, "Registration Error: {}", e)?,
        }
        Ok(())
    }

    fn show_course(&mut self) -> io::Result<()> {
        let prompt = format!("Enter course number (1-{}): ", self.session.catalog.len());
        let Some(selector) = self.prompt_number_once::<usize>(&prompt)? else {
            return Ok(());
        };
        match self.session.course_details(selector) {
            Some(details) => write!(self.output, "{}", details),
            None => writeln!(self.output, "{}", INVALID_NUMBER),
        }
    }

    fn finish(&mut self) -> io::Result<()> {
        write!(self.output, "\n{}", self.session.cancellation_report())?;
        writeln!(self.output, "\nProgram ended.")?;
        self.output.flush()
    }

    fn course_menu(&self) -> String {
        self.session
            .catalog
            .courses()
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}: {}", i + 1, c.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn course_names(&self) -> String {
        self.session
            .catalog
            .courses()
            .iter()
            .map(|c| format!("\"{}\"", c.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(self.read_line()?.map(|l| l.trim().to_string()))
    }

    /// Asks once; a non-number is reported and yields `None`.
    fn prompt_number_once<T: FromStr>(&mut self, text: &str) -> io::Result<Option<T>> {
        let Some(line) = self.prompt(text)? else {
            return Ok(None);
        };
        match line.parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(self.output, "{}", INVALID_NUMBER)?;
                Ok(None)
            }
        }
    }

    /// Re-prompts until a number is entered; `None` only at end of input.
    fn prompt_number<T: FromStr>(&mut self, text: &str) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            match line.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "{}", INVALID_NUMBER)?,
            }
        }
    }
}
