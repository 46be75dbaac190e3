use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use randjson_core::{Formatting, GenerateConfig};

use crate::CliError;

#[derive(Parser, Debug)]
#[command(name = "randjson", version, about = "Generate a random nested JSON document")]
pub struct Cli {
    /// Destination file for the generated document.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
    /// TOML file with generation settings; flags override its values.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Number of values in the document (root excluded).
    #[arg(short = 'c', long = "count")]
    pub count: Option<u64>,
    /// Maximum length of object keys.
    #[arg(short = 'k', long)]
    pub max_key_length: Option<usize>,
    /// Maximum length of string values.
    #[arg(short = 's', long)]
    pub max_string_length: Option<usize>,
    /// Characters used in string values.
    #[arg(long, value_name = "CHARS")]
    pub chars: Option<String>,
    /// Exclusive upper bound for numeric values.
    #[arg(short = 'n', long)]
    pub max_number: Option<f64>,
    /// Output layout.
    #[arg(short = 'f', long, value_enum)]
    pub formatting: Option<FormattingArg>,
    /// Seed for the random source.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write a JSON run report to this path.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
    /// Append JSON logs to this file instead of stderr.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
    /// Hide the progress bar.
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormattingArg {
    Compact,
    Indented,
}

impl From<FormattingArg> for Formatting {
    fn from(value: FormattingArg) -> Self {
        match value {
            FormattingArg::Compact => Formatting::Compact,
            FormattingArg::Indented => Formatting::Indented,
        }
    }
}

impl Cli {
    /// Resolve the generation settings: defaults, then the config file, then flags.
    pub fn generate_config(&self) -> Result<GenerateConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents)?
            }
            None => GenerateConfig::default(),
        };

        if let Some(count) = self.count {
            config.data_count = count;
        }
        if let Some(max_key_length) = self.max_key_length {
            config.max_key_length = max_key_length;
        }
        if let Some(max_string_length) = self.max_string_length {
            config.max_string_length = max_string_length;
        }
        if let Some(chars) = &self.chars {
            config.string_alphabet = chars.clone();
        }
        if let Some(max_number) = self.max_number {
            config.max_number = max_number;
        }
        if let Some(formatting) = self.formatting {
            config.formatting = formatting.into();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.validate()?;
        Ok(config)
    }
}
