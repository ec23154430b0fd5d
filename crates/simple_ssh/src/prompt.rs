//! Line-based interactive prompts.
//!
//! Commands only see the [`Prompter`] trait, so the same flows run against a
//! terminal or a scripted input in tests.

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};

/// Question/answer capability the commands depend on.
pub trait Prompter {
    /// Free text. An empty answer yields `default` (or `""`).
    fn input(&mut self, message: &str, default: Option<&str>) -> Result<String>;

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    /// Pick one of `choices`; returns its index.
    fn select(&mut self, message: &str, choices: &[String], default: usize) -> Result<usize>;

    /// Several lines, ended by an empty line. An immediately empty answer
    /// keeps `current`.
    fn lines(&mut self, message: &str, current: &[String]) -> Result<Vec<String>>;

    /// Show a message without asking anything (validation errors, hints).
    fn notify(&mut self, message: &str) -> Result<()>;
}

/// [`Prompter`] over any reader/writer pair.
pub struct TerminalPrompter<R, W> {
    reader: R,
    writer: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn read_line(&mut self) -> Result<String> {
        self.writer.flush()?;
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read answer")?;
        if read == 0 {
            bail!("Input closed before the question was answered");
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn input(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        match default.filter(|d| !d.is_empty()) {
            Some(d) => write!(self.writer, "? {} ({}) ", message, d)?,
            None => write!(self.writer, "? {} ", message)?,
        }
        let answer = self.read_line()?;
        if answer.trim().is_empty() {
            return Ok(default.unwrap_or_default().to_string());
        }
        Ok(answer)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            write!(self.writer, "? {} ({}) ", message, hint)?;
            let answer = self.read_line()?;
            match answer.trim().to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.writer, "  Please answer y or n.")?,
            }
        }
    }

    fn select(&mut self, message: &str, choices: &[String], default: usize) -> Result<usize> {
        if choices.is_empty() {
            bail!("Nothing to choose from");
        }
        let default = default.min(choices.len() - 1);

        writeln!(self.writer, "? {}", message)?;
        for (index, choice) in choices.iter().enumerate() {
            let marker = if index == default { ">" } else { " " };
            writeln!(self.writer, " {} {}. {}", marker, index + 1, choice)?;
        }

        loop {
            write!(self.writer, "  Choice [1-{}] ({}) ", choices.len(), default + 1)?;
            let answer = self.read_line()?;
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(
                    self.writer,
                    "  Please enter a number between 1 and {}.",
                    choices.len()
                )?,
            }
        }
    }

    fn lines(&mut self, message: &str, current: &[String]) -> Result<Vec<String>> {
        writeln!(self.writer, "? {} (one per line, empty line to finish)", message)?;
        if !current.is_empty() {
            writeln!(self.writer, "  Current (press Enter to keep):")?;
            for line in current {
                writeln!(self.writer, "    {}", line)?;
            }
        }

        let mut collected = Vec::new();
        loop {
            write!(self.writer, "  > ")?;
            let line = self.read_line()?;
            if line.trim().is_empty() {
                break;
            }
            collected.push(line);
        }

        if collected.is_empty() {
            return Ok(current.to_vec());
        }
        Ok(collected)
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "  {}", message)?;
        Ok(())
    }
}
