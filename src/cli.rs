//! CLI domain: parse, route, output, and presentation only.
//! Hashing itself lives in the tree module; the route table only wires it up.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_file_json, format_file_text, format_tree_json, format_tree_text, FileReport,
};
pub use route::RunContext;
