use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use tenten_neural::{Network, codec};
use tenten_training::{TrainingConfig, control::OUTPUT_COUNT, features::FEATURE_COUNT};

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
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to finish output to {}", self.display_path()))?;
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

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads a training configuration from a JSON file.
///
/// Missing fields take their default values.
pub fn read_training_config<P>(path: P) -> anyhow::Result<TrainingConfig>
where
    P: AsRef<Path>,
{
    read_json_file("training config", path)
}

/// Full layer layout of a game-playing network with the given hidden layers.
pub fn network_layout(hidden_layers: &[usize]) -> Vec<usize> {
    let mut layout = Vec::with_capacity(hidden_layers.len() + 2);
    layout.push(FEATURE_COUNT);
    layout.extend_from_slice(hidden_layers);
    layout.push(OUTPUT_COUNT);
    layout
}

/// Reads a network saved by the trainer.
pub fn read_network_file<P>(path: P, hidden_layers: &[usize]) -> anyhow::Result<Network>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read network file: {}", path.display()))?;
    let network = codec::decode(&text, &network_layout(hidden_layers))
        .with_context(|| format!("Failed to parse network file: {}", path.display()))?;
    Ok(network)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_network_layout() {
        assert_eq!(network_layout(&[8, 4]), [175, 8, 4, 3]);
    }

    #[test]
    fn test_read_network_file() {
        use rand::SeedableRng as _;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.neural");
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let network = Network::new(&network_layout(&[5]), &mut rng);
        fs::write(&path, codec::encode(&network)).unwrap();

        let loaded = read_network_file(&path, &[5]).unwrap();
        assert_eq!(codec::encode(&loaded), codec::encode(&network));

        let err = read_network_file(&path, &[6]).unwrap_err();
        assert!(err.to_string().contains("Failed to parse network file"));
        assert!(read_network_file(dir.path().join("missing"), &[5]).is_err());
    }

    #[test]
    fn test_read_training_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "population": 8, "hidden_layers": [16] }"#).unwrap();

        let config = read_training_config(&path).unwrap();
        assert_eq!(config.population, 8);
        assert_eq!(config.hidden_layers, [16]);

        fs::write(&path, "{ not json").unwrap();
        let err = read_training_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse training config JSON file"));
    }
}
