use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::schema::solution::SolutionRecord;

/// JSON destination: a file, or stdout when no path is given.
#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    /// Writes `value` as pretty JSON to `output_path`, or to stdout if it is `None`.
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    /// Opens the destination, creating or truncating the file.
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::create(path),
            None => Ok(Output::Stdout {
                writer: io::stdout().lock(),
            }),
        }
    }

    fn create(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// Human-readable destination for error messages.
    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    /// Writes `value` as pretty JSON followed by a newline, then flushes.
    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Reads and parses a JSON file.
///
/// `file_kind` names the file in error messages, such as `"configuration"`.
pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Reads a solution written by `intercept evolve`.
pub fn read_solution_file<P>(path: P) -> anyhow::Result<SolutionRecord>
where
    P: AsRef<Path>,
{
    read_json_file("solution", path)
}

#[cfg(test)]
mod tests {
    use std::env;

    use intercept_training::config::EvolutionConfig;

    use super::*;

    #[test]
    fn test_write_then_read_config_file() {
        let path = env::temp_dir().join(format!("intercept-util-{}.json", std::process::id()));
        let mut config = EvolutionConfig::default();
        config.genetic.population_size = 12;

        Output::save_json(&config, Some(path.clone())).unwrap();
        let read: EvolutionConfig = read_json_file("config", &path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(read.genetic.population_size, 12);
    }

    #[test]
    fn test_missing_file_names_kind_and_path() {
        let err = read_json_file::<EvolutionConfig, _>("config", "/nonexistent/config.json")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file"), "{message}");
        assert!(message.contains("/nonexistent/config.json"), "{message}");
    }
}
