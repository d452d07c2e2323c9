use crate::config::{AssetKind, CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "swfpipe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Batch SWF asset extraction and organization pipeline")]
#[command(
    long_about = "swfpipe drives an external SWF decompiler over a batch of legacy \
                       container files, then organizes the extracted images into a \
                       categorized layout and a JSON lookup table for a game engine."
)]
#[command(after_help = "EXAMPLES:\n  \
    swfpipe check\n  \
    swfpipe extract --test\n  \
    swfpipe extract --source static/assets --output extracted --parallel 4 --yes\n  \
    swfpipe extract --kinds image --start 2500 --limit 500 --yes\n  \
    swfpipe organize --extracted extracted --organized organized\n  \
    swfpipe lookup --extracted extracted --dest sprites/lookup\n  \
    swfpipe materialize --engine-root ../MobileProject/assets")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file path
    #[arg(short, long, global = true, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the external decompiler over a batch of container files
    Extract {
        /// Test mode: only process the first 10 files
        #[arg(long)]
        test: bool,

        /// Number of concurrent decompiler invocations
        #[arg(short, long)]
        parallel: Option<usize>,

        /// Start from file index (for resuming)
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Limit the number of files to process
        #[arg(long)]
        limit: Option<usize>,

        /// Source directory with container files
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Output directory for extracted assets
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Asset kinds to request (comma-separated: image,shape,sprite,button,frame)
        #[arg(short, long, help = "Asset kinds to export (e.g. image,shape)")]
        kinds: Option<String>,

        /// Per-file timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Path to the decompiler jar (overrides discovery)
        #[arg(long)]
        jar: Option<PathBuf>,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Organize extracted assets into a categorized layout plus a mapping document
    Organize {
        /// Extraction output root to consume
        #[arg(short, long)]
        extracted: Option<PathBuf>,

        /// Root of the categorized destination layout
        #[arg(short, long)]
        organized: Option<PathBuf>,

        /// Place full copies instead of symlink references
        #[arg(long)]
        copy: bool,
    },

    /// Build the flat name-keyed lookup directory and document
    Lookup {
        /// Extraction output root to consume
        #[arg(short, long)]
        extracted: Option<PathBuf>,

        /// Destination directory for the lookup references
        #[arg(short, long)]
        dest: Option<PathBuf>,

        /// Engine-visible path prefix recorded in lookup entries
        #[arg(long)]
        resource_prefix: Option<String>,
    },

    /// Copy organized assets into the engine project layout (resolving references)
    Materialize {
        /// Root of the categorized layout to copy from
        #[arg(short, long)]
        organized: Option<PathBuf>,

        /// Engine project root to copy into
        #[arg(short, long)]
        engine_root: Option<PathBuf>,
    },

    /// Verify the Java runtime and decompiler jar are available
    Check,

    /// Generate a sample configuration file
    GenerateConfig {
        /// Where to write the sample file
        #[arg(default_value = "swfpipe.toml")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides()?;
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> Result<CliOverrides> {
        let overrides = match &self.command {
            Command::Extract {
                parallel,
                source,
                output,
                kinds,
                timeout,
                jar,
                ..
            } => {
                let kind_set = match kinds {
                    Some(list) => Some(parse_kind_list(list).map_err(|msg| {
                        crate::error::PipelineError::Config { message: msg }
                    })?),
                    None => None,
                };

                CliOverrides::new()
                    .with_kinds(kind_set)
                    .with_parallelism(*parallel)
                    .with_timeout_secs(*timeout)
                    .with_source_dir(source.clone())
                    .with_output_dir(output.clone())
                    .with_jar_path(jar.clone())
            }
            Command::Organize {
                extracted,
                organized,
                copy,
            } => CliOverrides::new()
                .with_extracted_dir(extracted.clone())
                .with_organized_dir(organized.clone())
                .with_copy(copy.then_some(true)),
            Command::Lookup {
                extracted,
                dest,
                resource_prefix,
            } => CliOverrides::new()
                .with_extracted_dir(extracted.clone())
                .with_lookup_dir(dest.clone())
                .with_resource_prefix(resource_prefix.clone()),
            Command::Materialize {
                organized,
                engine_root,
            } => CliOverrides::new()
                .with_organized_dir(organized.clone())
                .with_engine_root(engine_root.clone()),
            Command::Check | Command::GenerateConfig { .. } => CliOverrides::new(),
        };

        Ok(overrides)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn parse_kind_list(s: &str) -> std::result::Result<Vec<AssetKind>, String> {
    let mut kinds = Vec::new();

    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let kind = AssetKind::parse(part).ok_or_else(|| {
            format!(
                "Unknown asset kind '{}'. Valid kinds: image, shape, sprite, button, frame",
                part
            )
        })?;

        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    if kinds.is_empty() {
        return Err("At least one asset kind must be specified".to_string());
    }

    Ok(kinds)
}
