// Configuration module entry point
// Loads settings from file and environment, and builds the Sass bridge from them

mod types;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};

use crate::sass::{CommandEvaluator, ScriptBridge};

// Re-export public types
pub use types::{Config, LoggingConfig, OutputConfig, OutputConflict, RuntimeConfig, SassConfig};

/// Config file looked up when no path is given (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "sass_bridge";

/// Prefix for environment overrides, e.g. `SASS_BRIDGE_LOGGING__LEVEL=debug`
const ENV_PREFIX: &str = "SASS_BRIDGE";

/// Keys whose environment values are split on commas
const LIST_KEYS: [&str; 3] = ["sass.requires", "sass.load_paths", "sass.interpreter_args"];

impl Config {
    /// Load configuration from the default file path
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (extension optional)
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, environment())
    }

    fn load_with_env(config_path: &str, env: Environment) -> Result<Self, ConfigError> {
        with_defaults()?
            .add_source(File::with_name(config_path).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    /// Parse configuration from TOML text on top of the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        with_defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Evaluator running the configured interpreter
    pub fn evaluator(&self) -> CommandEvaluator {
        CommandEvaluator::new(self.sass.interpreter.as_str())
            .with_args(self.sass.interpreter_args.iter().map(String::as_str))
    }

    /// Bridge seeded with the configured requires and load paths
    pub fn build_bridge(&self) -> ScriptBridge<CommandEvaluator> {
        let bridge = ScriptBridge::new(self.evaluator());
        for require in &self.sass.requires {
            bridge.add_require(require.as_str());
        }
        for load_path in &self.sass.load_paths {
            bridge.add_load_path(load_path.as_str());
        }
        bridge
    }
}

/// `SASS_BRIDGE_*` overrides; list keys take comma separated values,
/// e.g. `SASS_BRIDGE_SASS__REQUIRES=bourbon,neat`
fn environment() -> Environment {
    LIST_KEYS.iter().fold(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(","),
        |env, key| env.with_list_parse_key(key),
    )
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("sass.interpreter", crate::sass::DEFAULT_INTERPRETER)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("output.extension", "css")?
        .set_default("output.strip_empty_lines", false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg.sass.interpreter, "ruby");
        assert!(cfg.sass.interpreter_args.is_empty());
        assert!(cfg.sass.requires.is_empty());
        assert!(cfg.sass.load_paths.is_empty());
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, "text");
        assert_eq!(cfg.logging.log_file, None);
        assert_eq!(cfg.output.extension, "css");
        assert_eq!(cfg.output.directory, None);
        assert!(!cfg.output.strip_empty_lines);
        assert_eq!(cfg.runtime.workers, None);
    }

    #[test]
    fn test_file_values() {
        let cfg = Config::from_toml_str(
            r#"
            [sass]
            interpreter = "jruby"
            interpreter_args = ["-E", "UTF-8"]
            requires = ["bourbon", "neat"]
            load_paths = ["styles/partials"]

            [logging]
            level = "debug"
            format = "json"

            [output]
            directory = "dist"
            strip_empty_lines = true

            [runtime]
            workers = 2
            "#,
        )
        .unwrap();
        assert_eq!(cfg.sass.interpreter, "jruby");
        assert_eq!(cfg.sass.interpreter_args, ["-E", "UTF-8"]);
        assert_eq!(cfg.sass.requires, ["bourbon", "neat"]);
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.output.directory.as_deref(), Some("dist"));
        assert!(cfg.output.strip_empty_lines);
        assert_eq!(cfg.runtime.workers, Some(2));
    }

    fn env_vars(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_env_overrides() {
        let env = env_vars(&[
            ("SASS_BRIDGE_SASS__REQUIRES", "bourbon"),
            ("SASS_BRIDGE_SASS__LOAD_PATHS", "styles/partials,vendor/styles"),
            ("SASS_BRIDGE_SASS__INTERPRETER_ARGS", "-E,UTF-8"),
            ("SASS_BRIDGE_RUNTIME__WORKERS", "3"),
            ("SASS_BRIDGE_LOGGING__LEVEL", "debug"),
            ("SASS_BRIDGE_OUTPUT__STRIP_EMPTY_LINES", "true"),
        ]);
        let cfg = Config::load_with_env("sass_bridge_no_such_config", env).unwrap();
        assert_eq!(cfg.sass.requires, ["bourbon"]);
        assert_eq!(cfg.sass.load_paths, ["styles/partials", "vendor/styles"]);
        assert_eq!(cfg.sass.interpreter_args, ["-E", "UTF-8"]);
        assert_eq!(cfg.runtime.workers, Some(3));
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.output.strip_empty_lines);
        assert_eq!(cfg.sass.interpreter, "ruby");
    }

    #[test]
    fn test_env_ignores_other_prefixes() {
        let env = env_vars(&[("OTHER_SASS__INTERPRETER", "jruby")]);
        let cfg = Config::load_with_env("sass_bridge_no_such_config", env).unwrap();
        assert_eq!(cfg.sass.interpreter, "ruby");
    }

    #[test]
    fn test_build_bridge() {
        let cfg = Config::from_toml_str(
            r#"
            [sass]
            requires = ["bourbon", " ", "bourbon"]
            load_paths = ["styles\\partials"]
            "#,
        )
        .unwrap();
        let bridge = cfg.build_bridge();
        assert_eq!(
            bridge.requires(),
            ["rubygems", "sass/plugin", "sass/engine", "bourbon"]
        );
        assert_eq!(bridge.load_paths(), ["styles\\partials"]);
        assert!(bridge
            .build_script("a{}")
            .contains("Sass::Importers::Filesystem.new('styles/partials')"));
    }

    #[test]
    fn test_evaluator_from_config() {
        let cfg = Config::from_toml_str("[sass]\ninterpreter_args = [\"-W0\"]").unwrap();
        let evaluator = cfg.evaluator();
        assert_eq!(evaluator.program(), "ruby");
        assert_eq!(evaluator.args(), ["-W0"]);
    }
}
