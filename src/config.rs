//! Generator configuration
//!
//! Settings come from an optional YAML file and from command-line flags.
//! Flags win field by field; [`GeneratorConfig::resolve`] fills in the
//! remaining defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::emit::{DEFAULT_RUNTIME_PACKAGE, Indent};
use crate::io::{GenError, GenResult};

/// Partially specified settings, as read from a config file or the CLI
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub vocab_name: Option<String>,
    pub vocab_package: Option<String>,
    pub vocab_dir: Option<PathBuf>,
    pub class_package: Option<String>,
    pub class_dir: Option<PathBuf>,
    /// Preferred language tag for labels and comments
    pub language: Option<String>,
    /// Spaces per indentation level; tabs when unset
    pub indent: Option<usize>,
    pub include_prefix: Option<String>,
    /// MIME type of the input files
    pub format: Option<String>,
    pub runtime_package: Option<String>,
}

/// Fully resolved settings for one generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub vocab_name: String,
    pub vocab_package: Option<String>,
    pub vocab_dir: PathBuf,
    pub class_package: Option<String>,
    pub class_dir: PathBuf,
    pub language: Option<String>,
    pub indent: Indent,
    pub include_prefix: Option<String>,
    pub format: Option<String>,
    pub runtime_package: String,
}

impl GeneratorConfig {
    /// Read settings from a YAML file
    pub fn from_yaml_file(path: &Path) -> GenResult<Self> {
        if !path.exists() {
            return Err(GenError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)
            .map_err(|e| GenError::Configuration(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Settings in `overrides` replace the ones in `self`
    pub fn merge(self, overrides: GeneratorConfig) -> GeneratorConfig {
        GeneratorConfig {
            vocab_name: overrides.vocab_name.or(self.vocab_name),
            vocab_package: overrides.vocab_package.or(self.vocab_package),
            vocab_dir: overrides.vocab_dir.or(self.vocab_dir),
            class_package: overrides.class_package.or(self.class_package),
            class_dir: overrides.class_dir.or(self.class_dir),
            language: overrides.language.or(self.language),
            indent: overrides.indent.or(self.indent),
            include_prefix: overrides.include_prefix.or(self.include_prefix),
            format: overrides.format.or(self.format),
            runtime_package: overrides.runtime_package.or(self.runtime_package),
        }
    }

    /// Apply defaults and validate
    ///
    /// The class directory and package default to the vocabulary ones; the
    /// vocabulary directory defaults to the current directory.
    pub fn resolve(self) -> GenResult<ResolvedConfig> {
        let vocab_name = match self.vocab_name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => {
                return Err(GenError::Configuration(
                    "Vocabulary name is required (use -v/--vocab-name)".to_string(),
                ));
            }
        };
        let indent = match self.indent {
            None => Indent::tab(),
            Some(0) => {
                return Err(GenError::Configuration(
                    "Indentation must be at least one space".to_string(),
                ));
            }
            Some(n) => Indent::spaces(n),
        };
        let vocab_dir = self.vocab_dir.unwrap_or_else(|| PathBuf::from("."));
        let class_dir = self.class_dir.unwrap_or_else(|| vocab_dir.clone());
        let class_package = self.class_package.or_else(|| self.vocab_package.clone());

        Ok(ResolvedConfig {
            vocab_name,
            vocab_package: self.vocab_package,
            vocab_dir,
            class_package,
            class_dir,
            language: self.language,
            indent,
            include_prefix: self.include_prefix,
            format: self.format,
            runtime_package: self
                .runtime_package
                .unwrap_or_else(|| DEFAULT_RUNTIME_PACKAGE.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn named(name: &str) -> GeneratorConfig {
        GeneratorConfig {
            vocab_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_follow_vocabulary_settings() {
        let mut config = named("People");
        config.vocab_package = Some("org.example".to_string());
        config.vocab_dir = Some(PathBuf::from("out"));
        let resolved = config.resolve().unwrap();

        assert_eq!(resolved.class_dir, PathBuf::from("out"));
        assert_eq!(resolved.class_package.as_deref(), Some("org.example"));
        assert_eq!(resolved.indent, Indent::tab());
        assert_eq!(resolved.runtime_package, DEFAULT_RUNTIME_PACKAGE);
    }

    #[test]
    fn vocab_dir_defaults_to_current_directory() {
        let resolved = named("People").resolve().unwrap();
        assert_eq!(resolved.vocab_dir, PathBuf::from("."));
        assert_eq!(resolved.class_dir, PathBuf::from("."));
    }

    #[test]
    fn missing_vocab_name_is_a_configuration_error() {
        let err = GeneratorConfig::default().resolve().unwrap_err();
        assert!(matches!(err, GenError::Configuration(_)));
        assert!(err.to_string().contains("Vocabulary name is required"));

        let err = named("  ").resolve().unwrap_err();
        assert!(matches!(err, GenError::Configuration(_)));
    }

    #[test]
    fn zero_indent_is_rejected() {
        let mut config = named("People");
        config.indent = Some(0);
        assert!(matches!(config.resolve(), Err(GenError::Configuration(_))));
    }

    #[test]
    fn cli_values_override_file_values() {
        let mut file = named("FromFile");
        file.vocab_package = Some("org.file".to_string());
        file.indent = Some(2);
        let mut cli = named("FromCli");
        cli.language = Some("en".to_string());

        let merged = file.merge(cli);
        assert_eq!(merged.vocab_name.as_deref(), Some("FromCli"));
        assert_eq!(merged.vocab_package.as_deref(), Some("org.file"));
        assert_eq!(merged.indent, Some(2));
        assert_eq!(merged.language.as_deref(), Some("en"));
    }

    #[test]
    fn reads_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ontogen.yaml");
        fs::write(
            &path,
            "vocab_name: People\nvocab_package: org.example\nindent: 4\nlanguage: cs\n",
        )
        .unwrap();

        let config = GeneratorConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.vocab_name.as_deref(), Some("People"));
        assert_eq!(config.indent, Some(4));
        assert_eq!(config.language.as_deref(), Some("cs"));
        assert_eq!(config.resolve().unwrap().indent, Indent::spaces(4));
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(
            GeneratorConfig::from_yaml_str("").unwrap(),
            GeneratorConfig::default()
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "vocab_nam: Typo\n").unwrap();
        let err = GeneratorConfig::from_yaml_file(&path).unwrap_err();
        assert!(matches!(err, GenError::Configuration(_)));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = GeneratorConfig::from_yaml_file(Path::new("/nonexistent/ontogen.yaml"))
            .unwrap_err();
        assert!(matches!(err, GenError::NotFound(_)));
    }
}
