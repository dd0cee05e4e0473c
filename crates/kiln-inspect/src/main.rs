use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kiln_engine::logging::{init_logging, LoggingConfig};
use kiln_engine::render::{MeshBinding, ShaderInterface};
use kiln_mesh::{assemble, load_path_with, ParseOptions, VertexLayout};

mod report;

/// Vertex layouts selectable from the command line.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LayoutChoice {
    /// position: 3, stride 3
    Position,
    /// position: 3, normal: 3, interleaved, stride 6
    PositionNormal,
}

impl LayoutChoice {
    fn layout(self) -> VertexLayout {
        match self {
            Self::Position => VertexLayout::position_only(),
            Self::PositionNormal => VertexLayout::position_normal(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "kiln-inspect",
    about = "Parse a Wavefront OBJ file and report the buffers a renderer would upload",
    version
)]
struct Args {
    /// OBJ file to load
    path: PathBuf,

    /// Vertex layout to assemble against
    #[arg(long, value_enum, default_value_t = LayoutChoice::Position)]
    layout: LayoutChoice,

    /// Read per-corner normal references (`v//n`, `v/t/n`) from faces
    #[arg(long)]
    face_normals: bool,

    /// Print the wgpu attribute table, one shader location per attribute
    #[arg(long)]
    bindings: bool,

    /// Debug logging for the kiln crates
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(if args.verbose { LoggingConfig::verbose() } else { LoggingConfig::default() });

    let options = ParseOptions { face_normals: args.face_normals };
    let raw = load_path_with(&args.path, options)
        .with_context(|| format!("failed to load {}", args.path.display()))?;

    let layout = args.layout.layout();
    let mesh = assemble(&raw, &layout)
        .with_context(|| format!("failed to assemble {} as {:?}", args.path.display(), args.layout))?;

    print!("{}", report::summary(&args.path, &raw, &mesh));

    if args.bindings {
        let shader = layout
            .attributes()
            .iter()
            .zip(0u32..)
            .fold(ShaderInterface::new(), |shader, (attr, location)| {
                shader.input(attr.semantic.name(), location)
            });
        let binding = MeshBinding::new(&layout, &shader)?;
        print!("{}", report::binding_table(&binding));
    }

    log::info!("{}: ok", args.path.display());
    Ok(())
}
