//! Command-line interface for the stopsync reconciliation tool.
//!
//! The binary is thin plumbing: it parses arguments, loads the two input
//! datasets through `stopsync-data`, hands them to the `stopsync-core`
//! reconciler, and writes the corrected export plus the diagnostic reports.

#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use thiserror::Error;

use stopsync_core::{
    BoundingBoxRegion, ConfigError, DEFAULT_MAX_DISTANCE_M, DEFAULT_PREFIX, Reconciler,
    RegistryIndex, RunConfig, RunReport,
};
use stopsync_data::{
    OsmDocument, ParseError, RegistryFormat, WriteError, load_registry_stops, reports,
};

/// Run the CLI with the current process arguments.
///
/// # Errors
/// Returns [`CliError`] on argument, configuration, parse or write
/// failures; the caller turns any of these into a non-zero exit code.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let report = execute(&cli)?;
    if cli.stats {
        println!("{}", report.stats);
    }
    println!("Saved {} with updated tags.", cli.output);
    Ok(())
}

/// Execute a parsed invocation end to end and return the run report.
///
/// # Errors
/// Returns [`CliError`] when an input is unreadable, the configuration is
/// invalid, an input fails to parse, or an output fails to write.
pub fn execute(cli: &Cli) -> Result<RunReport, CliError> {
    require_file(&cli.input_osm)?;
    require_file(&cli.input_registry)?;

    let config = RunConfig::new(
        Box::new(BoundingBoxRegion::helsinki()),
        cli.max_distance,
        DEFAULT_PREFIX,
    )?;

    let mut document = OsmDocument::from_path(&cli.input_osm)?;
    let mut stops = document.map_stops()?;

    let format = cli
        .registry_format
        .map_or_else(|| RegistryFormat::from_path(&cli.input_registry), Into::into);
    let registry = load_registry_stops(&cli.input_registry, format)?;

    let reconciler = Reconciler::new(RegistryIndex::from_stops(registry), config);
    let report = reconciler.run(&mut stops);
    log::info!(
        "reconciled {} stops: {} matched, {} unmatched",
        report.stats.total,
        report.stats.matched,
        report.stats.unmatched
    );

    document.apply(&stops);
    document.write_to_path(&cli.output)?;
    reports::write_reports(&cli.reports_dir(), &report)?;
    Ok(report)
}

fn require_file(path: &Utf8Path) -> Result<(), CliError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::MissingInput {
            path: path.to_owned(),
        })
    }
}

/// Reconcile a JOSM stop export against the transit agency's registry.
#[derive(Debug, Parser)]
#[command(
    name = "stopsync",
    about = "Merge authoritative transit-registry stop data into a JOSM export",
    long_about = "Finds public transport stops in a JOSM export and corrects their \
                  tags from the transit agency's stop registry, using the 'ref' tag \
                  as the join key. In-region refs are prefixed, missing shelter and \
                  name tags are filled in, and every anomaly lands in a CSV report.",
    version
)]
pub struct Cli {
    /// Source editor export (.osm).
    pub input_osm: Utf8PathBuf,
    /// Registry stop data, CSV or GeoJSON.
    pub input_registry: Utf8PathBuf,
    /// Destination for the corrected export.
    pub output: Utf8PathBuf,
    /// Registry format; inferred from the file extension when omitted.
    #[arg(long, value_enum)]
    pub registry_format: Option<RegistryFormatArg>,
    /// Maximum accepted distance between matched records, in metres.
    #[arg(long, default_value_t = DEFAULT_MAX_DISTANCE_M)]
    pub max_distance: f64,
    /// Directory for the diagnostic CSV reports.
    ///
    /// Defaults to a `reports` directory next to the output file.
    #[arg(long)]
    pub reports_dir: Option<Utf8PathBuf>,
    /// Print verbose statistics after the run.
    #[arg(short = 's', long = "stats")]
    pub stats: bool,
}

impl Cli {
    fn reports_dir(&self) -> Utf8PathBuf {
        self.reports_dir.clone().unwrap_or_else(|| {
            self.output
                .parent()
                .map_or_else(|| Utf8PathBuf::from("reports"), |dir| dir.join("reports"))
        })
    }
}

/// Registry format as selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegistryFormatArg {
    /// Semicolon-delimited JORE CSV export.
    Csv,
    /// GeoJSON feature collection.
    Geojson,
}

impl From<RegistryFormatArg> for RegistryFormat {
    fn from(value: RegistryFormatArg) -> Self {
        match value {
            RegistryFormatArg::Csv => Self::Csv,
            RegistryFormatArg::Geojson => Self::GeoJson,
        }
    }
}

/// Errors emitted by the stopsync CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// A referenced input path is not a readable file.
    #[error("{path} is not a readable file")]
    MissingInput {
        /// Path as given on the command line.
        path: Utf8PathBuf,
    },
    /// The run configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// An input document failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// An output failed to write.
    #[error(transparent)]
    Write(#[from] WriteError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use rstest::rstest;

    #[test]
    fn parses_positional_arguments_and_defaults() {
        let cli = Cli::try_parse_from(["stopsync", "in.osm", "stops.csv", "out.osm"]).unwrap();
        assert_eq!(cli.input_osm, "in.osm");
        assert_eq!(cli.input_registry, "stops.csv");
        assert_eq!(cli.output, "out.osm");
        assert_eq!(cli.max_distance, DEFAULT_MAX_DISTANCE_M);
        assert_eq!(cli.registry_format, None);
        assert!(!cli.stats);
    }

    #[test]
    fn accepts_flags() {
        let cli = Cli::try_parse_from([
            "stopsync",
            "in.osm",
            "stops.geojson",
            "out.osm",
            "--registry-format",
            "geojson",
            "--max-distance",
            "250",
            "-s",
        ])
        .unwrap();
        assert_eq!(cli.registry_format, Some(RegistryFormatArg::Geojson));
        assert_eq!(cli.max_distance, 250.0);
        assert!(cli.stats);
    }

    #[rstest]
    #[case::no_positionals(&["stopsync"])]
    #[case::output_missing(&["stopsync", "in.osm", "stops.csv"])]
    #[case::registry_missing(&["stopsync", "in.osm"])]
    fn missing_positionals_fail_parsing(#[case] args: &[&str]) {
        let err = Cli::try_parse_from(args.iter().copied()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn reports_dir_defaults_next_to_output() {
        let cli =
            Cli::try_parse_from(["stopsync", "in.osm", "stops.csv", "/tmp/run/out.osm"]).unwrap();
        assert_eq!(cli.reports_dir(), Utf8PathBuf::from("/tmp/run/reports"));
    }
}
