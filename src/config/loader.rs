//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use super::types::{absolutize, Config};
use super::ConfigError;

/// Project-level configuration file name
pub const PROJECT_CONFIG_FILE: &str = "ksy-manifest.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
}

/// Configuration together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the configuration was read from (`None` = built-in defaults)
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let (config, warnings, _keys) = read_file(path)?;
    Ok((config, warnings))
}

fn read_file(path: &Path) -> Result<(Config, Vec<ConfigWarning>, toml::Table), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| invalid(e.to_string()))?;
    let keys: toml::Table = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings, keys))
}

/// Read a config file and anchor the relative paths it sets to its directory
fn load_file(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let (mut config, warnings, keys) = read_file(path)?;
    let Some(dir) = path.parent() else {
        return Ok((config, warnings));
    };

    if keys.contains_key("library_root") {
        config.library_root = absolutize(dir, &config.library_root);
    }
    if keys.contains_key("output_dir") {
        config.output_dir = absolutize(dir, &config.output_dir);
    }
    if let Some(compiler) = keys.get("compiler").and_then(toml::Value::as_table) {
        if compiler.contains_key("script") {
            config.compiler.script = config
                .compiler
                .script
                .take()
                .map(|script| {
                    if script.as_os_str().is_empty() {
                        script
                    } else {
                        absolutize(dir, &script)
                    }
                });
        }
        if compiler.contains_key("program") && config.compiler.program.contains('/') {
            let program = absolutize(dir, Path::new(&config.compiler.program));
            config.compiler.program = program.to_string_lossy().into_owned();
        }
    }
    Ok((config, warnings))
}

/// Load from `KSY_CONFIG`, the project config, the user config, or defaults
///
/// A relative path set in a config file resolves against that file's
/// directory. Environment overrides are applied on top, and whatever is
/// still relative (defaults and `KSY_*` values) resolves against `cwd`.
pub fn load_or_default(cwd: &Path) -> Result<LoadedConfig, ConfigError> {
    load_with_env(cwd, |key| std::env::var(key).ok())
}

pub(crate) fn load_with_env<F>(cwd: &Path, env: F) -> Result<LoadedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let source = match env("KSY_CONFIG") {
        Some(explicit) => Some(absolutize(cwd, Path::new(&explicit))),
        None => existing(cwd.join(PROJECT_CONFIG_FILE))
            .or_else(|| user_config_path(&env).and_then(existing)),
    };

    let (config, warnings) = match &source {
        Some(path) => load_file(path)?,
        None => (Config::default(), Vec::new()),
    };

    let config = apply_env_overrides(config, &env)?.resolve_paths(cwd);

    Ok(LoadedConfig {
        config,
        source,
        warnings,
    })
}

/// Apply environment variable overrides (KSY_* prefix)
pub fn apply_env_overrides<F>(mut config: Config, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(root) = env("KSY_LIBRARY_ROOT") {
        config.library_root = PathBuf::from(root);
    }

    if let Some(output) = env("KSY_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(output);
    }

    if let Some(manifest) = env("KSY_MANIFEST") {
        config.manifest = PathBuf::from(manifest);
    }

    if let Some(program) = env("KSY_COMPILER") {
        config.compiler.program = program;
    }

    // An empty value disables the wrapper script
    if let Some(script) = env("KSY_COMPILER_SCRIPT") {
        config.compiler.script = Some(PathBuf::from(script));
    }

    // KSY_EXCLUDE_LICENSES (comma-separated)
    if let Some(licenses) = env("KSY_EXCLUDE_LICENSES") {
        config.exclude_licenses = licenses
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(jobs) = env("KSY_JOBS") {
        config.jobs = jobs.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            key: "KSY_JOBS".to_string(),
            value: jobs.clone(),
        })?;
    }

    Ok(config)
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}

fn user_config_path(env: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    env("XDG_CONFIG_HOME")
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("ksy-manifest").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}
