//! Validate a training content bundle without touching any store.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use nicu_training::content::load_bundle;

/// `content-check` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "content-check",
    about = "Validate a training content bundle and summarise its contents",
    version
)]
struct CliArgs {
    /// Path to the bundle JSON file.
    #[arg(value_name = "path")]
    bundle: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let bundle = load_bundle(&args.bundle)
        .wrap_err_with(|| format!("bundle {} is not valid", args.bundle.display()))?;

    let mut per_category: BTreeMap<&str, usize> = BTreeMap::new();
    for module in bundle.modules() {
        *per_category.entry(module.category.name()).or_default() += 1;
    }
    let required = bundle.modules().iter().filter(|m| m.required).count();

    println!("modules={}", bundle.modules().len());
    println!("required={required}");
    for (category, count) in per_category {
        println!("category.{category}={count}");
    }
    println!("certifications={}", bundle.certifications().len());
    Ok(())
}
