use anyhow::{anyhow, bail, ensure, Context};
use config::{Config, File};
use log::{info, LevelFilter};
use rhodo::{
    timed, BoundingBox, Layer, LayerRenderer, PathLens, PatternConfig,
    RenderConfig, RhodoPattern,
};
use serde::{Deserialize, Serialize};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
    str::FromStr,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for generating rhombic dodecahedron infill layers.
#[derive(Debug, StructOpt)]
#[structopt(name = "rhodo")]
struct Opt {
    /// Path to a config file that defines the pattern (and optionally how it
    /// gets rendered). Supported formats: JSON, TOML. If omitted, the default
    /// config is used.
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// If given, the generated layers will be saved to this directory. The
    /// exact files that appear in the directory are defined by the output
    /// formats. See `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output each layer in. Supported formats:
    ///
    /// cfg - The full config object used for generation, in TOML format.
    ///   Written once, not per layer
    ///
    /// json - JSON representation of each layer, including its phase state
    ///
    /// svg - 2D rendering of each layer
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// Height of the first layer to generate, in the same units as the config
    /// spacing
    #[structopt(long, default_value = "0.0")]
    z: f64,

    /// Distance between consecutive layers
    #[structopt(long, default_value = "0.2")]
    layer_height: f64,

    /// Number of layers to generate, starting at `--z`
    #[structopt(long, default_value = "1")]
    layers: usize,

    /// Region to fill, as `xmin,ymin,xmax,ymax`
    #[structopt(long, default_value = "0,0,100,100")]
    bounds: BoundsArg,

    /// The lens used to determine the color of each path. Overrides the
    /// config file. Only relevant for rendered output formats, such as SVG.
    #[structopt(long)]
    lens: Option<PathLens>,

    /// The logging level to use during generation. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the full config in a human-readable file
    Cfg,
    /// Export each layer in a serialized JSON format, which can be
    /// deserialized later to recover the layer
    Json,
    /// Render each layer as a 2D SVG
    Svg,
    /* If you change this, make sure to update the help text for
     * `--output-formats`! */
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Cfg => "toml",
            Self::Json => "json",
            Self::Svg => "svg",
        }
    }
}

/// Everything that can be loaded from a config file. Both sections are
/// optional, and missing fields fall back to their defaults.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct CliConfig {
    pattern: PatternConfig,
    render: RenderConfig,
}

/// A bounding box parsed from the command line
#[derive(Copy, Clone, Debug, PartialEq)]
struct BoundsArg(BoundingBox);

impl FromStr for BoundsArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|value| {
                value.trim().parse::<f64>().with_context(|| {
                    format!("invalid coordinate {:?} in bounds", value)
                })
            })
            .collect::<anyhow::Result<Vec<f64>>>()?;
        match values.as_slice() {
            &[xmin, ymin, xmax, ymax] => {
                ensure!(
                    values.iter().all(|value| value.is_finite()),
                    "bounds must be finite, got {:?}",
                    s
                );
                Ok(Self(BoundingBox::from_extents(xmin, ymin, xmax, ymax)))
            }
            _ => bail!(
                "expected bounds as xmin,ymin,xmax,ymax, got {} values",
                values.len()
            ),
        }
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<CliConfig> {
    // Load config
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Write some generated output to a file, creating or replacing it
fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("error opening output file {:?}", path))?;
    file.write_all(bytes)
        .with_context(|| format!("error writing to file {:?}", path))
}

/// Generate an output form of one layer in the given format.
fn gen_layer_output(
    output_dir: &Path,
    output_format: OutputFormat,
    index: usize,
    layer: &Layer,
    renderer: &LayerRenderer,
) -> anyhow::Result<()> {
    let bytes = match output_format {
        // Config is written once for the whole run, see gen_config_output
        OutputFormat::Cfg => return Ok(()),
        OutputFormat::Json => {
            // Serialize the entire layer via JSON
            layer.to_json().into_bytes()
        }
        OutputFormat::Svg => {
            // Render the layer in 2D
            renderer.render_as_svg(layer).into_bytes()
        }
    };

    let output_file_path = output_dir
        .join(format!("layer_{}", index))
        .with_extension(output_format.file_ext());
    timed!(
        format!(
            "Writing {} output to {:?}",
            output_format, &output_file_path
        ),
        write_output(&output_file_path, &bytes)
    )
}

/// Write the effective config to the output dir, so the run can be
/// reproduced later
fn gen_config_output(
    output_dir: &Path,
    config: &CliConfig,
) -> anyhow::Result<()> {
    let output_file_path = output_dir
        .join("config")
        .with_extension(OutputFormat::Cfg.file_ext());
    let content = toml::to_string_pretty(config)
        // Panics only if config format isn't serializable (a bug)
        .expect("error serializing config");
    write_output(&output_file_path, content.as_bytes())?;
    info!("Wrote config to {:?}", &output_file_path);
    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    ensure!(
        opt.layer_height.is_finite() && opt.layer_height > 0.0,
        "layer height must be positive, got {}",
        opt.layer_height
    );
    ensure!(opt.layers > 0, "must generate at least one layer");

    let mut config = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => CliConfig::default(),
    };
    if let Some(lens) = opt.lens {
        config.render.path_lens = lens;
    }

    let pattern = RhodoPattern::new(config.pattern)?;
    let renderer = LayerRenderer::new(config.render)?;
    let BoundsArg(bounds) = opt.bounds;
    info!(
        "Generating {} layer(s) from height {} over {} with config {:#?}",
        opt.layers, opt.z, bounds, config.pattern
    );

    // If an output dir was specified, write out output format(s) there
    let output_dir = match &opt.output {
        Some(output_dir) => {
            if opt.output_formats.is_empty() {
                bail!(
                    "output dir was specified, but no output formats were \
                     given"
                )
            }
            fs::create_dir_all(output_dir)?;
            if opt.output_formats.contains(&OutputFormat::Cfg) {
                gen_config_output(output_dir, &config)?;
            }
            Some(output_dir)
        }
        None => None,
    };

    for index in 0..opt.layers {
        let height = opt.z + index as f64 * opt.layer_height;
        let layer = pattern
            .generate(height, bounds)
            .with_context(|| format!("error generating layer {}", index))?;
        if let Some(output_dir) = output_dir {
            for &output_format in &opt.output_formats {
                gen_layer_output(
                    output_dir,
                    output_format,
                    index,
                    &layer,
                    &renderer,
                )?;
            }
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
