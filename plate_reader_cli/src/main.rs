//! plate-reader CLI: measure per-well absorbance of a photographed plate.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use plate_reader::prelude::*;
use plate_reader::{check_image_path, save_gray, save_rgb, TableFormat};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PitchArg {
    /// Floating-point pitch.
    Exact,
    /// Floor-divided integer pitch.
    Integer,
}

impl From<PitchArg> for PitchRounding {
    fn from(value: PitchArg) -> Self {
        match value {
            PitchArg::Exact => PitchRounding::Exact,
            PitchArg::Integer => PitchRounding::Integer,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "plate-reader")]
#[command(about = "Measure per-well absorbance of a multi-well plate from a photograph")]
#[command(version)]
struct Cli {
    /// Photograph of the plate, cropped to the wells area.
    image: PathBuf,

    /// YAML or JSON scan configuration. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of plate rows.
    #[arg(long)]
    rows: Option<i32>,

    /// Number of plate columns.
    #[arg(long)]
    cols: Option<i32>,

    /// Horizontal grid offset in pixels; positive moves the grid left.
    #[arg(long, allow_hyphen_values = true)]
    offset_x: Option<i32>,

    /// Vertical grid offset in pixels; positive moves the grid up.
    #[arg(long, allow_hyphen_values = true)]
    offset_y: Option<i32>,

    /// Fraction of the half-pitch sampled around each well, in (0, 1].
    #[arg(long)]
    scale: Option<f64>,

    /// How the grid pitch is rounded.
    #[arg(long, value_enum)]
    pitch: Option<PitchArg>,

    /// Output table (.csv, .json, .yaml).
    #[arg(long, default_value = "Intensities.csv")]
    table: PathBuf,

    /// Output image with one circle drawn per well.
    #[arg(long, default_value = "Placa_ELISA_Invertida.png")]
    annotated: PathBuf,

    /// Skip the annotated image.
    #[arg(long)]
    no_annotation: bool,

    /// Also save the inverted grayscale image.
    #[arg(long)]
    inverted: Option<PathBuf>,

    /// Evaluate wells in parallel.
    #[arg(long)]
    parallel: bool,

    /// Log filter, e.g. "info" or "info, plate_reader=trace".
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn scan_config(&self) -> anyhow::Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::from_file(path)?,
            None => ScanConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.layout.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.layout.cols = cols;
        }
        if let Some(x) = self.offset_x {
            config.offset.x = x;
        }
        if let Some(y) = self.offset_y {
            config.offset.y = y;
        }
        if let Some(scale) = self.scale {
            config.scale_factor = scale;
        }
        if let Some(pitch) = self.pitch {
            config.pitch = pitch.into();
        }
        if self.no_annotation {
            config.annotation.enabled = false;
        }
        if self.parallel {
            config.parallel = true;
        }

        Ok(config)
    }

    /// Output files of this run. Fails if any of them has an unusable
    /// extension, so a bad path is reported before the image is scanned.
    fn outputs(&self, config: &ScanConfig) -> anyhow::Result<Outputs<'_>> {
        TableFormat::from_path(&self.table)?;

        let annotated = config
            .annotation
            .enabled
            .then_some(self.annotated.as_path());
        let inverted = self.inverted.as_deref();
        for path in annotated.into_iter().chain(inverted) {
            check_image_path(path)?;
        }

        Ok(Outputs {
            table: &self.table,
            annotated,
            inverted,
        })
    }
}

struct Outputs<'a> {
    table: &'a Path,
    annotated: Option<&'a Path>,
    inverted: Option<&'a Path>,
}

impl<'a> Outputs<'a> {
    /// Writes every output. If one fails, the files already written by this
    /// call are removed again.
    fn write(&self, result: &ScanResult) -> anyhow::Result<()> {
        let mut written = Vec::new();
        let outcome = self.write_each(result, &mut written);

        if outcome.is_err() {
            for path in written {
                if let Err(err) = std::fs::remove_file(path) {
                    warn!("Failed to remove partial output {}: {err}", path.display());
                }
            }
        }

        outcome
    }

    fn write_each(&self, result: &ScanResult, written: &mut Vec<&'a Path>) -> anyhow::Result<()> {
        write_table(&result.absorbance, self.table)?;
        written.push(self.table);

        if let (Some(path), Some(annotated)) = (self.annotated, &result.annotated) {
            save_rgb(annotated, path)?;
            written.push(path);
            info!("Annotated image saved to {}", path.display());
        }

        if let Some(path) = self.inverted {
            save_gray(&result.inverted.to_image(), path)?;
            written.push(path);
            info!("Inverted image saved to {}", path.display());
        }

        Ok(())
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.scan_config()?;
    let outputs = cli.outputs(&config)?;
    debug!(
        "Effective configuration:\n{}",
        common::serde_io::serialize(&config, common::file_format::SerdeFormat::Yaml)?
    );

    let scanner = PlateScanner::new(config)?;
    let image = load_image(&cli.image)?;
    info!(
        "Loaded {} ({}x{})",
        cli.image.display(),
        image.width(),
        image.height()
    );

    // Nothing is written unless every well was measured.
    let result = scanner
        .scan(&image)
        .with_context(|| format!("Scan of '{}' failed", cli.image.display()))?;

    outputs.write(&result)?;
    println!("File '{}' successfully generated.", cli.table.display());

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = common::log_setup::setup_logging(&cli.log_level, "plate_reader")?;

    run(&cli)
}
