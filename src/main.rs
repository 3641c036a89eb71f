use std::error::Error;
use std::path::PathBuf;

use biasx::{
    load_samples, parse_delimiter, render_summary, AnalysisConfig, BiasTest, Report,
    SolverOptions, SpecimenConfig, TorqueMode, DEFAULT_MATERIAL_NAME, DEFAULT_THICKNESS,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Shear characterisation of a fabric from bias extension test data.
#[derive(Debug, Parser)]
#[command(name = "biasx", version, about)]
struct Cli {
    /// Delimited test data: a header row, then displacement (mm) and force (N) columns.
    input: Option<PathBuf>,

    /// JSON configuration file; command-line flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Specimen width in mm.
    #[arg(short = 'W', long)]
    width: Option<f64>,

    /// Specimen length in mm.
    #[arg(short = 'L', long)]
    length: Option<f64>,

    /// Specimen thickness in mm.
    #[arg(short = 'T', long)]
    thickness: Option<f64>,

    /// Material label.
    #[arg(short, long)]
    name: Option<String>,

    /// Column separator.
    #[arg(short, long, conflicts_with = "whitespace")]
    delimiter: Option<char>,

    /// Split columns on runs of whitespace.
    #[arg(long)]
    whitespace: bool,

    /// Torque formula: "recursive" or "closed-form".
    #[arg(short, long)]
    mode: Option<TorqueMode>,

    /// Fail when the shear angle decreases between samples.
    #[arg(long)]
    strict_monotonic: bool,

    /// Print the full report as JSON instead of the text summary.
    #[arg(long)]
    json: bool,

    /// Log stage progress.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Merge the optional configuration file with the command-line flags.
    fn resolve(&self) -> Result<AnalysisConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)?,
            None => AnalysisConfig {
                specimen: SpecimenConfig {
                    width: self.width.ok_or("--width is required without --config")?,
                    length: self.length.ok_or("--length is required without --config")?,
                    thickness: DEFAULT_THICKNESS,
                    name: DEFAULT_MATERIAL_NAME.to_string(),
                },
                input: None,
                delimiter: Some(','),
                mode: TorqueMode::default(),
                require_monotonic: false,
            },
        };

        if let Some(width) = self.width {
            config.specimen.width = width;
        }
        if let Some(length) = self.length {
            config.specimen.length = length;
        }
        if let Some(thickness) = self.thickness {
            config.specimen.thickness = thickness;
        }
        if let Some(name) = &self.name {
            config.specimen.name = name.clone();
        }
        if self.input.is_some() {
            config.input = self.input.clone();
        }
        if self.whitespace {
            config.delimiter = None;
        } else if self.delimiter.is_some() {
            config.delimiter = self.delimiter;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        config.require_monotonic |= self.strict_monotonic;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so that --json output stays machine readable.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.resolve()?;
    let input = config
        .input
        .clone()
        .ok_or("no input file given (positional argument or \"input\" in the configuration)")?;

    // Geometry first: a bad specimen is a configuration error regardless of the data.
    let specimen = config.specimen.to_specimen()?;
    let samples = load_samples(&input, parse_delimiter(config.delimiter)?)?;

    let options: SolverOptions = config.solver_options();
    info!(material = specimen.name(), mode = %options.mode, "running bias extension analysis");

    let mut test = BiasTest::new(specimen, samples)?;
    test.evaluate(&options)?;

    if cli.json {
        println!("{}", Report::build(&mut test)?.to_json()?);
    } else {
        println!("{}", render_summary(&test));
    }

    Ok(())
}
