//! # Types Subcommand
//!
//! Lists the type names available to structure definitions.

use anyhow::Result;
use clap::Args;

/// Arguments for the `argcheck types` subcommand.
#[derive(Args, Debug)]
pub struct TypesArgs {}

/// Names the `types` subcommand prints, one per line, sorted.
pub fn type_names() -> Result<Vec<String>> {
    let catalog = argcheck_types::builtin_catalog()?;
    Ok(catalog.names().into_iter().map(str::to_string).collect())
}

/// Execute the types subcommand.
pub fn run_types(_args: &TypesArgs) -> Result<u8> {
    for name in type_names()? {
        println!("{name}");
    }
    Ok(0)
}
