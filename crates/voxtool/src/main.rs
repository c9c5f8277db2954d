//! voxtool - convert MagicaVoxel models to textured OBJ meshes

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use voxmesh::io::obj::save_obj;
use voxmesh::io::vox::load_vox_from_file;
use voxmesh::{optimize, Atlas, ExportConfig};

#[derive(Parser)]
#[command(name = "voxtool")]
#[command(about = "Convert MagicaVoxel models to textured OBJ meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a .vox file to OBJ meshes plus texture atlases
    Convert {
        /// Input .vox file
        input: PathBuf,

        /// Output path stem; a trailing .obj extension is dropped
        output: PathBuf,

        /// Pixels per voxel edge in the atlas
        #[arg(long, default_value = "3")]
        texel_size: u32,

        /// Seam-guard pixels around each packed tile
        #[arg(long, default_value = "1")]
        padding: u32,

        /// Bake one atlas per sub-model instead of one shared atlas
        #[arg(long)]
        per_model_atlas: bool,

        /// Recenter geometry on the X and Z axes
        #[arg(long)]
        center: bool,

        /// Atlas canvas growth limit in pixels
        #[arg(long, default_value = "16384")]
        max_canvas: u32,
    },

    /// Print a summary of a .vox file
    Info {
        /// Input .vox file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            texel_size,
            padding,
            per_model_atlas,
            center,
            max_canvas,
        } => {
            let config = ExportConfig::default()
                .with_texel_size(texel_size)
                .with_padding(padding)
                .with_shared_atlas(!per_model_atlas)
                .with_center(center)
                .with_max_canvas(max_canvas);
            convert_command(&input, &output, &config)
        }
        Commands::Info { input } => info_command(&input),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_message(message);
    progress
}

fn convert_command(input: &Path, output: &Path, config: &ExportConfig) -> Result<()> {
    println!("Loading voxel file {}...", input.display());
    let set = load_vox_from_file(input)
        .with_context(|| format!("failed to load {}", input.display()))?;

    println!("Sub models: {}", set.models.len());
    println!("Materials: {}", set.materials.len());

    let progress = spinner("Optimizing mesh and textures...");
    let result = match optimize(&set, config) {
        Ok(result) => {
            progress.finish_with_message("✓ Optimization complete");
            result
        }
        Err(e) => {
            progress.finish_with_message("✗ Optimization failed");
            return Err(e).context("mesh optimization failed");
        }
    };

    let faces: usize = result.models.iter().map(Vec::len).sum();
    println!("Faces: {}", faces);
    for atlas in &result.atlases {
        println!("Atlas: {}x{}", atlas.width(), atlas.height());
    }

    // Drop a trailing .obj so "model.obj" and "model" produce the same set
    let stem = if output.extension().and_then(|e| e.to_str()) == Some("obj") {
        output.with_extension("")
    } else {
        output.to_path_buf()
    };

    println!("Saving models...");
    let written = save_obj(&stem, &result).context("failed to write obj files")?;
    for path in &written {
        println!("✓ Saved {}", path.display());
    }

    println!("Saving texture maps...");
    for (i, atlas) in result.atlases.iter().enumerate() {
        save_atlas(&stem, i, atlas)?;
    }

    println!("Conversion complete");
    Ok(())
}

fn save_atlas(stem: &Path, index: usize, atlas: &Atlas) -> Result<()> {
    let name = stem
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("atlas");

    for (suffix, image) in [
        ("A", atlas.albedo()),
        ("M", atlas.metal()),
        ("E", atlas.emissive()),
    ] {
        let path = stem.with_file_name(format!("{name}_{index:03}_{suffix}.png"));
        image
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("✓ Saved {}", path.display());
    }

    Ok(())
}

fn info_command(input: &Path) -> Result<()> {
    let set = load_vox_from_file(input)
        .with_context(|| format!("failed to load {}", input.display()))?;

    println!("File: {}", input.display());
    println!("Sub models: {}", set.models.len());
    println!("Materials: {}", set.materials.len());

    for (i, grid) in set.models.iter().enumerate() {
        println!(
            "  [{i}] {}x{}x{} ({} solid voxels)",
            grid.width(),
            grid.height(),
            grid.depth(),
            grid.solid_count()
        );
    }

    Ok(())
}
