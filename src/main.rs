//! Cooking Assistant - recipe catalog, kitchen tools and a chat agent over REST and MCP

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cooking_assistant::agent::CookingAgent;
use cooking_assistant::api::{self, AppState};
use cooking_assistant::config::Config;
use cooking_assistant::mcp::{self, CookingServer};
use cooking_assistant::store::RecipeStore;
use cooking_assistant::tools::{CookingTools, RecipeSearchParams, UnitConversionParams};

#[derive(Parser)]
#[command(name = "cooking-assistant")]
#[command(about = "Conversational cooking assistant with a recipe catalog, REST API and MCP tools")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (includes MCP at /mcp)
    Serve {
        /// Port to listen on (defaults to http_port from config)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Disable MCP endpoint
        #[arg(long)]
        no_mcp: bool,
    },

    /// Start the MCP server (stdio mode)
    Mcp,

    /// Start the MCP server (HTTP mode only, no REST API)
    McpHttp {
        /// Port to listen on (defaults to mcp_port from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Search recipes
    Search {
        /// Text matched against name, description and ingredients
        query: Option<String>,

        /// Cuisine (korean, italian, ...)
        #[arg(short, long)]
        cuisine: Option<String>,

        /// Difficulty (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<String>,

        /// Required dietary tag, repeatable
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Maximum total time in minutes
        #[arg(short, long)]
        max_time: Option<u32>,

        /// Ingredient the recipe must use
        #[arg(short, long)]
        ingredient: Option<String>,
    },

    /// Show a full recipe
    Show {
        /// Recipe ID, e.g. kimchi_fried_rice
        id: String,
    },

    /// Convert a cooking measurement
    Convert {
        amount: f64,
        from: String,
        to: String,
    },

    /// Ask the assistant a single question
    Chat {
        /// The message to send
        message: String,
    },

    /// Show catalog statistics
    Stats,

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("cooking_assistant={},tower_http=debug", log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    let config = Config::load_from(&config_path)?;

    match cli.command {
        Commands::Serve { port, no_mcp } => {
            let port = port.unwrap_or(config.http_port);
            let state = initialize_state(&config)?;

            tracing::info!("Starting HTTP server on port {}", port);

            let router = if no_mcp {
                api::create_router(state)
            } else {
                // Create combined router with both REST API and MCP
                api::create_router_with_mcp(state)
            };

            let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

            println!("Cooking assistant running at http://localhost:{}", port);
            println!("  UI:       http://localhost:{}/", port);
            println!("  API:      http://localhost:{}/api/...", port);
            println!("  API Docs: http://localhost:{}/api/docs", port);
            if !no_mcp {
                println!("  MCP:      http://localhost:{}/mcp", port);
            }
            println!("  Health:   http://localhost:{}/health", port);

            axum::serve(listener, router).await?;
        }

        Commands::Mcp => {
            let state = initialize_state(&config)?;

            tracing::info!("Starting MCP server (stdio mode)");

            // Run MCP server over stdio
            mcp::serve_stdio(CookingServer::new(state.tools)).await?;
        }

        Commands::McpHttp { port } => {
            let port = port.unwrap_or(config.mcp_port);
            let state = initialize_state(&config)?;

            tracing::info!("Starting MCP server (HTTP mode) on port {}", port);

            println!("MCP server running at http://localhost:{}/mcp", port);

            // Run MCP server over HTTP
            mcp::serve_http(CookingServer::new(state.tools), port).await?;
        }

        Commands::Search {
            query,
            cuisine,
            difficulty,
            tags,
            max_time,
            ingredient,
        } => {
            let state = initialize_state(&config)?;

            let params = RecipeSearchParams {
                query,
                cuisine,
                difficulty,
                dietary_tags: (!tags.is_empty()).then_some(tags),
                max_time_min: max_time,
                ingredient,
            };
            let output = state.tools.recipe_search(params)?;

            if output.recipes.is_empty() {
                println!("No recipes found");
            } else {
                println!("Found {} recipes:\n", output.found);
                for (i, recipe) in output.recipes.iter().enumerate() {
                    let tags: Vec<&str> = recipe.dietary_tags.iter().map(|t| t.as_str()).collect();
                    let tag_str = if tags.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", tags.join(", "))
                    };

                    println!(
                        "{}. {} ({}) - {}, {} min, {}{}",
                        i + 1,
                        recipe.name,
                        recipe.id,
                        recipe.cuisine,
                        recipe.total_time,
                        recipe.difficulty,
                        tag_str
                    );
                }
                if output.found > output.recipes.len() {
                    println!("\n...and {} more", output.found - output.recipes.len());
                }
            }
        }

        Commands::Show { id } => {
            let state = initialize_state(&config)?;
            let recipe = state
                .tools
                .store()
                .get(&id)
                .ok_or_else(|| anyhow::anyhow!("Recipe not found: {}", id))?;

            println!("{}", serde_json::to_string_pretty(recipe)?);
        }

        Commands::Convert { amount, from, to } => {
            let state = initialize_state(&config)?;
            let conversion = state.tools.unit_conversion(UnitConversionParams {
                amount,
                from_unit: from,
                to_unit: to,
            })?;

            println!(
                "{} {} = {} {}",
                conversion.original.amount,
                conversion.original.unit,
                conversion.converted.amount,
                conversion.converted.unit
            );
        }

        Commands::Chat { message } => {
            let state = initialize_state(&config)?;
            println!("{}", state.agent.chat(&message));
        }

        Commands::Stats => {
            let state = initialize_state(&config)?;
            let store = state.tools.store();

            println!("Cooking Assistant Catalog");
            println!("=========================");
            match &config.catalog_path {
                Some(path) => println!("Catalog: {}", path.display()),
                None => println!("Catalog: built-in"),
            }
            println!();
            println!("Recipes:      {}", store.len());
            println!("Cuisines:     {}", store.cuisine_count());
            println!("Techniques:   {}", store.techniques().len());
            println!("Ingredients:  {}", store.ingredients().len());
            println!("Substitutes:  {}", store.common_substitutes().len());
            println!("Timed foods:  {}", store.cooking_times().len());
        }

        Commands::Config { action } => match action {
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    anyhow::bail!(
                        "Config already exists at {}. Use --force to overwrite.",
                        config_path.display()
                    );
                }

                Config::default().save_to(&config_path)?;
                println!("✓ Config written to {}", config_path.display());
            }
        },
    }

    Ok(())
}

fn initialize_state(config: &Config) -> anyhow::Result<AppState> {
    let store = match &config.catalog_path {
        Some(path) => RecipeStore::load(path)?,
        None => RecipeStore::builtin()?,
    };
    tracing::info!(
        "Loaded {} recipes and {} techniques",
        store.len(),
        store.techniques().len()
    );

    let tools = Arc::new(CookingTools::new(Arc::new(store), config));
    let agent = Arc::new(CookingAgent::new(tools.clone(), config));

    Ok(AppState::new(tools, agent))
}
