use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One exportable content category of the external decompiler.
///
/// The export request uses the singular name (`-export image,shape,...`);
/// the decompiler writes results into plural sub-folders (`images/`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Shape,
    Sprite,
    Button,
    Frame,
}

impl AssetKind {
    pub const ALL: [AssetKind; 5] = [
        AssetKind::Image,
        AssetKind::Shape,
        AssetKind::Sprite,
        AssetKind::Button,
        AssetKind::Frame,
    ];

    pub fn export_name(&self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Shape => "shape",
            AssetKind::Sprite => "sprite",
            AssetKind::Button => "button",
            AssetKind::Frame => "frame",
        }
    }

    pub fn subdir_name(&self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::Shape => "shapes",
            AssetKind::Sprite => "sprites",
            AssetKind::Button => "buttons",
            AssetKind::Frame => "frames",
        }
    }

    pub fn parse(s: &str) -> Option<AssetKind> {
        match s.trim().to_lowercase().as_str() {
            "image" | "images" => Some(AssetKind::Image),
            "shape" | "shapes" => Some(AssetKind::Shape),
            "sprite" | "sprites" => Some(AssetKind::Sprite),
            "button" | "buttons" => Some(AssetKind::Button),
            "frame" | "frames" => Some(AssetKind::Frame),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub tool: ToolConfig,
    pub extract: ExtractConfig,
    pub organize: OrganizeConfig,
}

/// Location of the external decompiler and the runtime that hosts it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolConfig {
    /// Explicit path to the Java executable; when unset, candidates are probed.
    pub java_path: Option<PathBuf>,
    /// Explicit path to the decompiler jar; when unset, search_roots are scanned.
    pub jar_path: Option<PathBuf>,
    /// Directories scanned for the decompiler jar (including .app bundles).
    pub search_roots: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractConfig {
    /// Directory holding the legacy container files.
    pub source_dir: PathBuf,
    /// Root under which one subdirectory per input is written.
    pub output_dir: PathBuf,
    /// Asset kinds requested from the decompiler.
    pub kinds: Vec<AssetKind>,
    /// Concurrent decompiler invocations.
    pub parallelism: usize,
    /// Per-file timeout in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrganizeConfig {
    /// The extraction output root this stage consumes.
    pub extracted_dir: PathBuf,
    /// Root of the categorized destination layout.
    pub organized_dir: PathBuf,
    /// Destination of the flat lookup variant.
    pub lookup_dir: PathBuf,
    /// Place full copies instead of symlink references.
    pub copy: bool,
    /// Engine project root for the materialize operation.
    pub engine_root: PathBuf,
    /// Prefix recorded in flat-lookup entries as the engine-visible path.
    pub resource_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool: ToolConfig::default(),
            extract: ExtractConfig::default(),
            organize: OrganizeConfig::default(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            java_path: None,
            jar_path: None,
            search_roots: default_search_roots(),
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("assets"),
            output_dir: PathBuf::from("extracted"),
            kinds: AssetKind::ALL.to_vec(),
            // External-process bound, not CPU bound; more than 4 JVMs at once
            // mostly buys memory pressure.
            parallelism: num_cpus::get().clamp(1, 4),
            timeout_secs: 120,
        }
    }
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self {
            extracted_dir: PathBuf::from("extracted"),
            organized_dir: PathBuf::from("organized"),
            lookup_dir: PathBuf::from("lookup"),
            copy: false,
            engine_root: PathBuf::from("engine"),
            resource_prefix: "res://assets/sprites/lookup".to_string(),
        }
    }
}

fn default_search_roots() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::from("/Applications"), PathBuf::from("/usr/local/bin")];
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join("Downloads"));
        roots.push(home.join(".local/share"));
    }
    roots.push(PathBuf::from("tools"));
    roots
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PipelineError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PipelineError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| PipelineError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["swfpipe.toml", ".swfpipe.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref kinds) = cli_args.kinds {
            self.extract.kinds = kinds.clone();
        }

        if let Some(parallelism) = cli_args.parallelism {
            self.extract.parallelism = parallelism;
        }

        if let Some(timeout) = cli_args.timeout_secs {
            self.extract.timeout_secs = timeout;
        }

        if let Some(ref source) = cli_args.source_dir {
            self.extract.source_dir = source.clone();
        }

        if let Some(ref output) = cli_args.output_dir {
            self.extract.output_dir = output.clone();
            // Organization consumes what extraction produced unless told otherwise.
            if cli_args.extracted_dir.is_none() {
                self.organize.extracted_dir = output.clone();
            }
        }

        if let Some(ref extracted) = cli_args.extracted_dir {
            self.organize.extracted_dir = extracted.clone();
        }

        if let Some(ref organized) = cli_args.organized_dir {
            self.organize.organized_dir = organized.clone();
        }

        if let Some(ref lookup) = cli_args.lookup_dir {
            self.organize.lookup_dir = lookup.clone();
        }

        if let Some(copy) = cli_args.copy {
            self.organize.copy = copy;
        }

        if let Some(ref engine_root) = cli_args.engine_root {
            self.organize.engine_root = engine_root.clone();
        }

        if let Some(ref prefix) = cli_args.resource_prefix {
            self.organize.resource_prefix = prefix.clone();
        }

        if let Some(ref jar) = cli_args.jar_path {
            self.tool.jar_path = Some(jar.clone());
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| PipelineError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| PipelineError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.extract.kinds.is_empty() {
            return Err(PipelineError::Config {
                message: "At least one asset kind must be requested".to_string(),
            });
        }

        if self.extract.parallelism == 0 {
            return Err(PipelineError::Config {
                message: "Parallelism must be at least 1".to_string(),
            });
        }

        if self.extract.timeout_secs == 0 {
            return Err(PipelineError::Config {
                message: "Per-file timeout must be greater than 0".to_string(),
            });
        }

        if self.organize.resource_prefix.is_empty() {
            return Err(PipelineError::Config {
                message: "Resource prefix must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn file_timeout(&self) -> Duration {
        Duration::from_secs(self.extract.timeout_secs)
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub kinds: Option<Vec<AssetKind>>,
    pub parallelism: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub extracted_dir: Option<PathBuf>,
    pub organized_dir: Option<PathBuf>,
    pub lookup_dir: Option<PathBuf>,
    pub copy: Option<bool>,
    pub engine_root: Option<PathBuf>,
    pub resource_prefix: Option<String>,
    pub jar_path: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kinds(mut self, kinds: Option<Vec<AssetKind>>) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn with_parallelism(mut self, parallelism: Option<usize>) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_timeout_secs(mut self, timeout: Option<u64>) -> Self {
        self.timeout_secs = timeout;
        self
    }

    pub fn with_source_dir(mut self, source: Option<PathBuf>) -> Self {
        self.source_dir = source;
        self
    }

    pub fn with_output_dir(mut self, output: Option<PathBuf>) -> Self {
        self.output_dir = output;
        self
    }

    pub fn with_extracted_dir(mut self, extracted: Option<PathBuf>) -> Self {
        self.extracted_dir = extracted;
        self
    }

    pub fn with_organized_dir(mut self, organized: Option<PathBuf>) -> Self {
        self.organized_dir = organized;
        self
    }

    pub fn with_lookup_dir(mut self, lookup: Option<PathBuf>) -> Self {
        self.lookup_dir = lookup;
        self
    }

    pub fn with_copy(mut self, copy: Option<bool>) -> Self {
        self.copy = copy;
        self
    }

    pub fn with_engine_root(mut self, engine_root: Option<PathBuf>) -> Self {
        self.engine_root = engine_root;
        self
    }

    pub fn with_resource_prefix(mut self, prefix: Option<String>) -> Self {
        self.resource_prefix = prefix;
        self
    }

    pub fn with_jar_path(mut self, jar: Option<PathBuf>) -> Self {
        self.jar_path = jar;
        self
    }
}
