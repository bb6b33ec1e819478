//! roomcraft - design a room, render it, refine it

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use roomcraft::design::{self, ItemRef, SAVED_DESIGN_VERSION};
use roomcraft::{Catalog, Config, DesignSession, GeminiClient, Language, Perspective, SavedDesign};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// AI room designer
#[derive(Parser, Debug)]
#[command(name = "roomcraft", version, about = "Generate and refine AI room designs")]
struct Cli {
    /// Configuration file (default: ./roomcraft.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List rooms, colors, furniture and decor
    Catalog {
        /// Show recommended colors for this room
        #[arg(long)]
        room: Option<String>,
    },

    /// Print the prompt a design compiles to
    Prompt(SelectionArgs),

    /// Generate an image, optionally applying refinements in order
    Generate {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output JPEG file
        #[arg(short, long)]
        out: PathBuf,

        /// Refinement instruction (can be specified multiple times)
        #[arg(long)]
        refine: Vec<String>,

        /// Language of the refinement instructions
        #[arg(long)]
        language: Option<Language>,
    },

    /// Save the design as <Room-Name>-design.json
    Export {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Directory to write into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SelectionArgs {
    /// Load the design from a saved design file
    #[arg(long, conflicts_with_all = ["room", "color", "furniture", "decor", "perspective"])]
    design: Option<PathBuf>,

    /// Room id
    #[arg(long)]
    room: Option<String>,

    /// Wall color id
    #[arg(long)]
    color: Option<String>,

    /// Furniture id (can be specified multiple times)
    #[arg(long)]
    furniture: Vec<String>,

    /// Decor id (can be specified multiple times)
    #[arg(long)]
    decor: Vec<String>,

    /// Camera perspective: front, corner, window or closeup
    #[arg(long, default_value_t = Perspective::Front)]
    perspective: Perspective,
}

impl SelectionArgs {
    fn saved_design(&self) -> Result<SavedDesign> {
        if let Some(path) = &self.design {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return Ok(SavedDesign::from_json(&json)?);
        }

        let (Some(room), Some(color)) = (&self.room, &self.color) else {
            bail!("--room and --color are required unless --design is given");
        };

        let refs = |ids: &[String]| -> Vec<ItemRef> {
            ids.iter().map(|id| ItemRef { id: id.clone() }).collect()
        };

        Ok(SavedDesign {
            version: SAVED_DESIGN_VERSION,
            room_id: room.clone(),
            color_id: color.clone(),
            furniture: refs(&self.furniture),
            decor: refs(&self.decor),
            perspective: self.perspective,
        })
    }
}

fn print_catalog(catalog: &Catalog, room: Option<&str>) -> Result<()> {
    println!("Rooms:");
    for r in catalog.rooms() {
        println!("  {:<14} {}", r.id, r.name);
    }

    match room {
        Some(room_id) => {
            let room = catalog
                .room(room_id)
                .with_context(|| format!("Unknown room: {}", room_id))?;
            let (recommended, other) = catalog.partition_colors(room_id);
            println!("Recommended colors for {}:", room.name);
            for c in recommended {
                println!("  {:<14} {} {}", c.id, c.hex, c.name);
            }
            println!("Other colors:");
            for c in other {
                println!("  {:<14} {} {}", c.id, c.hex, c.name);
            }
        }
        None => {
            println!("Colors:");
            for c in catalog.colors() {
                println!("  {:<14} {} {}", c.id, c.hex, c.name);
            }
        }
    }

    println!("Furniture:");
    for f in catalog.furniture() {
        println!("  {:<14} {}", f.id, f.name);
    }
    println!("Decor:");
    for d in catalog.decor() {
        println!("  {:<14} {}", d.id, d.name);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomcraft=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let catalog = Arc::new(Catalog::builtin());
    let client = Arc::new(GeminiClient::new(config.gemini())?);
    let session = DesignSession::new(catalog.clone(), client).with_language(config.language);

    match cli.command {
        Command::Catalog { room } => print_catalog(&catalog, room.as_deref())?,

        Command::Prompt(selection) => {
            session.load_design(&selection.saved_design()?)?;
            let prompt = session
                .prompt_preview()
                .context("Design is missing a room or a color")?;
            println!("{}", prompt);
        }

        Command::Generate {
            selection,
            out,
            refine,
            language,
        } => {
            session.load_design(&selection.saved_design()?)?;
            if let Some(language) = language {
                session.set_language(language);
            }

            let mut image = session.generate().await?;
            for instruction in &refine {
                image = session.refine(instruction).await?;
            }

            std::fs::write(&out, image.bytes())
                .with_context(|| format!("Failed to write {}", out.display()))?;
            info!("Wrote {} ({} bytes)", out.display(), image.len());
            println!("{}", out.display());
        }

        Command::Export { selection, dir } => {
            session.load_design(&selection.saved_design()?)?;
            let path = design::write_design(&session.selection(), &dir)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
