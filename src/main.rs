use clap::Parser;
use grimoire::cli::commands::{Cli, Commands};
use grimoire::Grimoire;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = std::env::var("GRIMOIRE_DB").unwrap_or_else(|_| "./grimoire.db".into());

    let grimoire = match Grimoire::new(&db_path) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error initializing Grimoire: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(grimoire, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(grimoire: Grimoire, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Add { content } => {
            let scroll = grimoire.add_scroll(content).await?;
            println!("{}", serde_json::to_string_pretty(&scroll)?);
        }
        Commands::Lookup { name } => {
            println!("{}", grimoire.lookup(&name).await);
        }
        Commands::Reindex => {
            let count = grimoire.reindex().await?;
            println!("Reindexed {count} scrolls");
        }
        Commands::Stats => {
            let count = grimoire.scroll_count()?;
            println!("{count} scrolls stored");
        }
    }
    Ok(())
}
