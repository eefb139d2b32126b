//! # Validate Subcommand
//!
//! Checks one document against one structure definition using the built-in
//! type catalog, then prints the normalized document as pretty JSON.
//!
//! The coercion policy comes from `ARGCHECK_*` environment variables unless
//! `--strict` is given, which turns every coercion switch on.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use argcheck_core::{CheckConfig, CheckResult, TypeCatalog, Value};
use argcheck_schema::Structure;

use crate::load_structured;

/// Arguments for the `argcheck validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Structure definition (JSON, or YAML with a .yaml/.yml extension).
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,

    /// Document to validate (JSON, or YAML with a .yaml/.yml extension).
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Enable every coercion switch, ignoring the environment.
    #[arg(long)]
    pub strict: bool,
}

/// Validate `document` against `schema` under a built-in catalog.
pub fn check_document(
    schema: &Structure,
    document: &Value,
    config: CheckConfig,
) -> CheckResult<Value> {
    let mut catalog = TypeCatalog::with_config(config);
    argcheck_types::install_builtins(&mut catalog)?;
    if config.eager_nested_type_check {
        schema.check_types(&catalog)?;
    }
    schema.normalize(&catalog, document)
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if the document is valid, 1 if it is not.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let config = if args.strict {
        CheckConfig::strict()
    } else {
        CheckConfig::from_env().context("invalid ARGCHECK_* configuration")?
    };

    let definition = load_structured(&args.schema)?;
    let schema = Structure::from_json(&definition)
        .with_context(|| format!("invalid structure definition in {}", args.schema.display()))?;
    let document = Value::from(load_structured(&args.document)?);

    tracing::info!(
        schema = %args.schema.display(),
        document = %args.document.display(),
        types = schema.referenced_types().len(),
        "validating document"
    );

    match check_document(&schema, &document, config) {
        Ok(normalized) => {
            println!("{}", serde_json::to_string_pretty(&normalized)?);
            Ok(0)
        }
        Err(e) => {
            tracing::warn!(document = %args.document.display(), error = %e, "document failed validation");
            println!("FAIL: {}: {e}", args.document.display());
            Ok(1)
        }
    }
}
