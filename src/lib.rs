//! Labelmap: category bookkeeping for annotation datasets.
//!
//! A dataset declares a fixed taxonomy of categories, some of which carry
//! sub-categories (a `cell` may be tagged `header=yes|no`). Training and
//! evaluation pipelines need a stable integer id for every category, even
//! after categories are filtered out or replaced by their sub-category
//! values, and a single consistent id space when several datasets are
//! combined. Labelmap provides exactly that bookkeeping.
//!
//! # Modules
//!
//! - [`taxonomy`]: Static taxonomy definitions and their JSON/YAML files
//! - [`registry`]: The mutable category view and the multi-dataset merge
//! - [`error`]: Error types for labelmap operations

pub mod error;
pub mod registry;
pub mod taxonomy;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

pub use error::LabelmapError;
pub use registry::{merge, CategoryQuery, CategoryRegistry, CategorySelection, CategoryView};
pub use taxonomy::{CategoryId, DatasetInfo, Taxonomy};

use taxonomy::TaxonomyFormat;

/// The labelmap CLI application.
#[derive(Parser)]
#[command(name = "labelmap")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the category ids of a taxonomy.
    Categories(CategoriesArgs),

    /// Print the sub-categories of selected categories.
    SubCategories(SubCategoriesArgs),

    /// Merge several taxonomies into one id space.
    Merge(MergeArgs),
}

/// Taxonomy file format as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Infer from the file extension.
    Auto,
    Json,
    Yaml,
}

impl FormatArg {
    fn to_format(self) -> Option<TaxonomyFormat> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Json => Some(TaxonomyFormat::Json),
            FormatArg::Yaml => Some(TaxonomyFormat::Yaml),
        }
    }
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    Text,
    Json,
}

/// Key of the printed category mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KeyArg {
    Id,
    Name,
}

/// Options shared by commands that build a single registry.
#[derive(clap::Args)]
struct ViewArgs {
    /// Taxonomy file (.json, .yaml or .yml).
    input: PathBuf,

    /// Taxonomy file format.
    #[arg(long, value_enum, default_value = "auto")]
    format: FormatArg,

    /// Replace a category by the values of one of its sub-categories (CATEGORY=SUB_CATEGORY).
    #[arg(long = "replace", value_name = "CATEGORY=SUB_CATEGORY", value_parser = parse_replacement)]
    replacements: Vec<(String, String)>,

    /// Keep only these categories (applied after --replace).
    #[arg(long = "filter", value_name = "NAME", value_delimiter = ',')]
    filter: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    output: OutputArg,
}

/// Arguments for the categories subcommand.
#[derive(clap::Args)]
struct CategoriesArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Show the categories as declared, ignoring --replace and --filter.
    #[arg(long)]
    init: bool,

    /// Show the filtered categories instead of all current ones.
    #[arg(long)]
    filtered: bool,

    /// Key the printed mapping by id or by name.
    #[arg(long, value_enum, default_value = "id")]
    by: KeyArg,
}

/// Arguments for the sub-categories subcommand.
#[derive(clap::Args)]
struct SubCategoriesArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Categories to look up (default: every filtered category).
    categories: Vec<String>,
}

/// Arguments for the merge subcommand.
#[derive(clap::Args)]
struct MergeArgs {
    /// Taxonomy files to merge.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Taxonomy file format.
    #[arg(long, value_enum, default_value = "auto")]
    format: FormatArg,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    output: OutputArg,

    /// Also write the merged taxonomy as JSON to this path.
    #[arg(long, value_name = "PATH")]
    write: Option<PathBuf>,
}

fn parse_replacement(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((cat, sub)) if !cat.is_empty() && !sub.is_empty() => {
            Ok((cat.to_string(), sub.to_string()))
        }
        _ => Err(format!("expected CATEGORY=SUB_CATEGORY, got '{raw}'")),
    }
}

/// Run the labelmap CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LabelmapError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Categories(args)) => run_categories(args),
        Some(Commands::SubCategories(args)) => run_sub_categories(args),
        Some(Commands::Merge(args)) => run_merge(args),
        None => {
            println!("labelmap {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Category bookkeeping for annotation datasets.");
            println!();
            println!("Run 'labelmap --help' for usage information.");
            Ok(())
        }
    }
}

/// Load a taxonomy and apply the requested substitution and filter.
fn build_registry(view: &ViewArgs) -> Result<CategoryRegistry, LabelmapError> {
    let taxonomy = taxonomy::read_taxonomy(&view.input, view.format.to_format())?;
    let mut registry = CategoryRegistry::from_taxonomy(&taxonomy)?;

    if !view.replacements.is_empty() {
        check_replacements(&registry, &view.replacements)?;
        registry.set_cat_to_sub_cat(view.replacements.iter().cloned());
    }
    if !view.filter.is_empty() {
        check_filter(&registry, &view.filter)?;
        registry.filter_categories(&view.filter);
    }
    Ok(registry)
}

/// Every `--replace` pair must name a declared sub-category of its category.
fn check_replacements(
    registry: &CategoryRegistry,
    replacements: &[(String, String)],
) -> Result<(), LabelmapError> {
    for (cat, sub) in replacements {
        let Some(subs) = registry.init_sub_categories().get(cat) else {
            return Err(LabelmapError::InvalidRequest(format!(
                "cannot replace '{cat}': it is not a category with sub-categories"
            )));
        };
        if !subs.contains_key(sub) {
            return Err(LabelmapError::InvalidRequest(format!(
                "cannot replace '{cat}' with '{sub}': no such sub-category"
            )));
        }
    }
    Ok(())
}

/// Every `--filter` name must exist after substitution.
fn check_filter(registry: &CategoryRegistry, filter: &[String]) -> Result<(), LabelmapError> {
    let current = registry.categories(CategorySelection::Current);
    match filter.iter().find(|name| !current.contains(*name)) {
        Some(name) => Err(LabelmapError::InvalidRequest(format!(
            "cannot filter on '{name}': not in categories, maybe has been replaced with sub category"
        ))),
        None => Ok(()),
    }
}

/// Execute the categories subcommand.
fn run_categories(args: CategoriesArgs) -> Result<(), LabelmapError> {
    let registry = build_registry(&args.view)?;

    let query = CategoryQuery {
        as_dict: true,
        name_as_key: args.by == KeyArg::Name,
        init: args.init,
        filtered: args.filtered,
    };
    let view = registry.get_categories(&query);

    match args.view.output {
        OutputArg::Json => print_json(&view),
        OutputArg::Text => {
            match &view {
                CategoryView::ById(map) => {
                    for (id, name) in map {
                        println!("{id}\t{name}");
                    }
                }
                CategoryView::ByName(map) => {
                    for (name, id) in map {
                        println!("{name}\t{id}");
                    }
                }
                CategoryView::List(list) => {
                    for name in list {
                        println!("{name}");
                    }
                }
            }
            Ok(())
        }
    }
}

/// Execute the sub-categories subcommand.
fn run_sub_categories(args: SubCategoriesArgs) -> Result<(), LabelmapError> {
    let registry = build_registry(&args.view)?;

    let sub_categories = if args.categories.is_empty() {
        registry.get_all_sub_categories()
    } else {
        registry.get_sub_categories(&args.categories)?
    };

    match args.view.output {
        OutputArg::Json => print_json(&sub_categories),
        OutputArg::Text => {
            for (cat, subs) in &sub_categories {
                println!("{cat}: {}", subs.join(", "));
            }
            Ok(())
        }
    }
}

/// Execute the merge subcommand.
fn run_merge(args: MergeArgs) -> Result<(), LabelmapError> {
    let mut registries = Vec::with_capacity(args.inputs.len());
    let mut names = Vec::new();
    for input in &args.inputs {
        let taxonomy = taxonomy::read_taxonomy(input, args.format.to_format())?;
        if !taxonomy.info.name.is_empty() {
            names.push(taxonomy.info.name.clone());
        }
        registries.push(CategoryRegistry::from_taxonomy(&taxonomy)?);
    }

    let merged = registry::merge(&registries)?;
    let taxonomy = merged.to_taxonomy(DatasetInfo::new(names.join("+")));

    if let Some(path) = &args.write {
        taxonomy::io_json::write_taxonomy_json(path, &taxonomy)?;
    }

    match args.output {
        OutputArg::Json => print_json(&taxonomy),
        OutputArg::Text => {
            println!(
                "Merged {} taxonomies into {} categories:",
                registries.len(),
                taxonomy.categories.len()
            );
            for (idx, cat) in taxonomy.categories.iter().enumerate() {
                match taxonomy.sub_categories.get(cat) {
                    Some(subs) if !subs.is_empty() => {
                        let keys: Vec<&str> = subs.keys().map(String::as_str).collect();
                        println!(
                            "  {}\t{} [{}]",
                            CategoryId::from_position(idx),
                            cat,
                            keys.join(", ")
                        );
                    }
                    _ => println!("  {}\t{}", CategoryId::from_position(idx), cat),
                }
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), LabelmapError> {
    let json = serde_json::to_string_pretty(value).map_err(LabelmapError::JsonOutput)?;
    println!("{json}");
    Ok(())
}
