use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "grimoire", about = "Monster lore lookup over embedded scrolls")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a scroll to the Grimoire (embeds and stores it)
    Add {
        /// Scroll content
        content: String,
    },
    /// Look up lore for a monster name
    Lookup {
        /// Monster name
        name: String,
    },
    /// Re-embed scrolls that are missing vectors
    Reindex,
    /// Show the number of stored scrolls
    Stats,
}
