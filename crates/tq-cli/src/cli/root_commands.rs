use std::path::PathBuf;

use clap::{Args, Subcommand};
use tq_query::SelectionSpec;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Build the metamodel from the API description document.
    Init(InitArgs),
    /// Inspect resource types in the metamodel.
    Resources {
        #[command(subcommand)]
        action: ResourceCommands,
    },
    /// Print the request parameters and URL a query would use.
    Params(ParamsArgs),
    /// Run a query and print the normalized table.
    Run(RunArgs),
    /// Run a query and print its column types and coordinate columns.
    Columns(RunArgs),
}

#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Read the description document from a file instead of `api.docs_url`.
    #[arg(long)]
    pub doc: Option<PathBuf>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum ResourceCommands {
    /// List resource types.
    List,
    /// Show includes, filters and attributes of one resource type.
    Show {
        /// Resource type name, e.g. `Stop`.
        name: String,
    },
}

/// Selection shared by `params`, `run` and `columns`.
#[derive(Clone, Debug, Args)]
pub struct QueryArgs {
    /// Primary resource type, e.g. `stop` or `RoutePattern`.
    pub resource: String,

    /// Include options (comma-separated or repeated).
    #[arg(short, long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Attributes: `name` or `<type-or-include>.name` (repeatable).
    #[arg(long = "field")]
    pub field: Vec<String>,

    /// Filters as `name=value[,value...]` (repeatable).
    #[arg(short = 'F', long)]
    pub filter: Vec<String>,
}

impl QueryArgs {
    pub fn selection_spec(&self) -> SelectionSpec {
        SelectionSpec {
            resource: self.resource.clone(),
            includes: self.include.clone(),
            attributes: self.field.clone(),
            filters: self.filter.clone(),
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct ParamsArgs {
    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Skip dictionary encoding of low-cardinality columns.
    #[arg(long)]
    pub no_compact: bool,

    /// Print the response body re-indented with sorted keys instead of a table.
    #[arg(long)]
    pub body: bool,
}
