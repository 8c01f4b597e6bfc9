use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use apidoc_core::config::{self, ApidocConfig, CONFIG_FILE_NAME, MarkupLanguage};
use apidoc_core::ir::{DefinitionOrigin, IrSchema, IrSpec, group_operations};
use apidoc_core::parse;
use apidoc_markup::extensions::{DynamicContentExtension, SchemaSnippetExtension};
use apidoc_markup::{Converter, ExtensionRegistry, Requirement};

#[derive(Parser)]
#[command(name = "apidoc", about = "Swagger 2.0 to AsciiDoc/Markdown documentation", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documentation from a Swagger spec
    Generate {
        /// Path to the Swagger spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Markup language, overriding the config file
        #[arg(long)]
        markup: Option<MarkupArg>,

        /// Print all documents to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Validate a Swagger spec
    Validate {
        /// Path to the Swagger spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the resolved model of a Swagger spec
    Inspect {
        /// Path to the Swagger spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new apidoc configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum MarkupArg {
    Asciidoc,
    Markdown,
}

impl From<MarkupArg> for MarkupLanguage {
    fn from(arg: MarkupArg) -> Self {
        match arg {
            MarkupArg::Asciidoc => MarkupLanguage::Asciidoc,
            MarkupArg::Markdown => MarkupLanguage::Markdown,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            markup,
            stdout,
        } => cmd_generate(input, output, markup, stdout),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apidoc", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<ApidocConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))?;
    if cfg.is_none() {
        log::debug!("no {CONFIG_FILE_NAME} found, using defaults");
    }
    Ok(cfg)
}

/// Bundled extensions enabled in the config. Both are optional, so a
/// missing snippet only logs a warning.
fn build_extensions(cfg: &ApidocConfig) -> ExtensionRegistry {
    let mut registry = ExtensionRegistry::new();
    if let Some(ref root) = cfg.extensions.dynamic_content {
        registry.register(
            DynamicContentExtension::new(root, cfg.document.markup),
            Requirement::Optional,
        );
    }
    if let Some(ref root) = cfg.extensions.schemas {
        registry.register(SchemaSnippetExtension::new(root), Requirement::Optional);
    }
    registry
}

fn converter(cfg: &ApidocConfig) -> Converter {
    Converter::new(cfg.document.clone())
        .with_naming(cfg.naming.clone())
        .with_extensions(build_extensions(cfg))
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    markup: Option<MarkupArg>,
    stdout: bool,
) -> Result<()> {
    let mut cfg = try_load_config()?.unwrap_or_default();
    if let Some(markup) = markup {
        cfg.document.markup = markup.into();
    }
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = output.unwrap_or_else(|| PathBuf::from(&cfg.output));

    let tree = converter(&cfg)
        .convert_path(&input)
        .with_context(|| format!("failed to generate documentation for {}", input.display()))?;

    if stdout {
        print!("{}", tree.as_string());
        return Ok(());
    }

    let written = tree
        .write_to(&output)
        .with_context(|| format!("failed to write documents to {}", output.display()))?;
    for path in &written {
        eprintln!("  wrote {}", path.display());
    }
    eprintln!("Generated {} documents in {}", written.len(), output.display());
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let parsed = parse::from_path(&input)?;

    eprintln!(
        "Valid Swagger {} spec: {}",
        parsed.swagger, parsed.info.title
    );
    eprintln!("  Version: {}", parsed.info.version);
    eprintln!("  Paths: {}", parsed.paths.len());
    eprintln!("  Definitions: {}", parsed.definitions.len());

    // Also validate that every reference resolves
    let cfg = try_load_config()?.unwrap_or_default();
    let ir = converter(&cfg).resolve(&parsed)?;
    eprintln!("  Operations: {}", ir.operations.len());
    eprintln!("  Resolved definitions: {}", ir.definitions.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let parsed = parse::from_path(&input)?;
    let ir = converter(&cfg).resolve(&parsed)?;

    let summary = build_inspect_summary(&ir, &cfg)?;

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &IrSpec, cfg: &ApidocConfig) -> Result<serde_json::Value> {
    let definitions: Vec<serde_json::Value> = ir
        .definitions
        .iter()
        .map(|d| {
            let origin = match d.origin {
                DefinitionOrigin::Declared => serde_json::json!("declared"),
                DefinitionOrigin::Synthesized { ref parent, depth } => {
                    serde_json::json!({ "parent": parent, "depth": depth })
                }
            };
            serde_json::json!({
                "name": d.name.original,
                "kind": match d.schema {
                    IrSchema::Object(_) => "object",
                    IrSchema::Enum(_) => "enum",
                    IrSchema::Alias(_) => "alias",
                },
                "origin": origin,
            })
        })
        .collect();

    let operations: Vec<serde_json::Value> = ir
        .operations
        .iter()
        .map(|op| {
            serde_json::json!({
                "name": op.name.original,
                "method": op.method.as_str(),
                "path": op.path,
                "tags": op.tags,
            })
        })
        .collect();

    let groups = group_operations(ir, cfg.document.group_by, cfg.document.operation_ordering)?;
    let groups: Vec<serde_json::Value> = groups
        .leaf_groups()
        .into_iter()
        .map(|g| {
            serde_json::json!({
                "name": g.name,
                "operations": g
                    .operation_indices
                    .iter()
                    .map(|&i| &ir.operations[i].name.original)
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    Ok(serde_json::json!({
        "info": {
            "title": ir.info.title,
            "version": ir.info.version,
        },
        "definitions": definitions,
        "operations": operations,
        "groups": groups,
        "security_schemes": ir.security_schemes.iter().map(|s| &s.name).collect::<Vec<_>>(),
    }))
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
