use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::assets::{AssetError, plan_pdf_bundle, write_bundle};

#[derive(Parser)]
#[command(name = "solstice")]
#[command(about = "Solstice Solar asset tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Package every PDF datasheet into one ZIP for static hosting
    PackageSpecs {
        /// Directory holding the datasheet PDFs
        #[arg(long, default_value = "attached_assets", env = "SOLSTICE_ASSETS_DIR")]
        assets_dir: PathBuf,
        /// Path of the ZIP archive to write
        #[arg(
            long,
            default_value = "dist/public/Technical_Specifications_Complete.zip"
        )]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::PackageSpecs { assets_dir, output } => package_specs(&assets_dir, &output),
    }
}

/// Builds the specification bundle on disk. An asset directory without
/// any PDFs is not an error for a build step, just a warning.
fn package_specs(assets_dir: &Path, output: &Path) -> anyhow::Result<()> {
    let entries = match plan_pdf_bundle(assets_dir) {
        Ok(entries) => entries,
        Err(AssetError::EmptyBundle) => {
            tracing::warn!(
                "No PDF files found in {}, skipping bundle",
                assets_dir.display()
            );
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to scan {}", assets_dir.display()));
        }
    };

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file =
        File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
    write_bundle(&entries, file).context("Failed to write archive")?;

    let size = fs::metadata(output)?.len();
    println!(
        "Created {} ({} files, {} bytes)",
        output.display(),
        entries.len(),
        size
    );
    Ok(())
}
