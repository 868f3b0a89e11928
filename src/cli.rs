use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::GeneratorConfig;
use crate::generator::Target;

/// Generate source code from OWL/RDFS ontologies.
#[derive(Parser, Debug)]
#[command(name = "ontogen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate Java entity classes, the factory interface and the vocabulary class
    Java(GenerateArgs),
    /// Generate the JavaScript mapper registry
    Js {
        #[command(flatten)]
        args: GenerateArgs,

        /// Only emit classes whose IRI starts with this prefix
        #[arg(short = 'I', long)]
        include_prefix: Option<String>,
    },
}

/// Options shared by all targets
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// MIME type of the input files (detected from the extension when omitted)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Vocabulary name, used for the vocabulary, factory and mapper files
    #[arg(short, long)]
    pub vocab_name: Option<String>,

    /// Package of the vocabulary class
    #[arg(short = 'p', long)]
    pub vocab_package: Option<String>,

    /// Output directory for the vocabulary class [default: .]
    #[arg(short = 'o', long)]
    pub vocab_dir: Option<PathBuf>,

    /// Package of the entity classes [default: vocabulary package]
    #[arg(short = 'P', long)]
    pub class_package: Option<String>,

    /// Output directory for the entity classes [default: vocabulary directory]
    #[arg(short = 'O', long)]
    pub class_dir: Option<PathBuf>,

    /// Preferred language tag for labels and comments
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Spaces per indentation level [default: tab]
    #[arg(long)]
    pub indent: Option<usize>,

    /// YAML file with default settings; flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input ontology files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl GenerateArgs {
    /// Settings given on the command line
    pub fn overrides(&self) -> GeneratorConfig {
        GeneratorConfig {
            vocab_name: self.vocab_name.clone(),
            vocab_package: self.vocab_package.clone(),
            vocab_dir: self.vocab_dir.clone(),
            class_package: self.class_package.clone(),
            class_dir: self.class_dir.clone(),
            language: self.lang.clone(),
            indent: self.indent,
            include_prefix: None,
            format: self.format.clone(),
            runtime_package: None,
        }
    }
}

impl Cli {
    /// Help text of the invoked subcommand, with its full usage line
    pub fn subcommand_help(&self) -> String {
        let mut command = Self::command();
        command.build();
        command
            .find_subcommand_mut(self.command.name())
            .map(|sub| sub.render_help().to_string())
            .unwrap_or_default()
    }
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Java(_) => "java",
            Command::Js { .. } => "js",
        }
    }

    pub fn target(&self) -> Target {
        match self {
            Command::Java(_) => Target::Java,
            Command::Js { .. } => Target::Js,
        }
    }

    pub fn args(&self) -> &GenerateArgs {
        match self {
            Command::Java(args) | Command::Js { args, .. } => args,
        }
    }

    /// All command-line settings, including target-specific ones
    pub fn overrides(&self) -> GeneratorConfig {
        let mut config = self.args().overrides();
        if let Command::Js { include_prefix, .. } = self {
            config.include_prefix = include_prefix.clone();
        }
        config
    }
}
