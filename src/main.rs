use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use microwave::api;
use microwave::cli;
use microwave::models::ServerConfig;
use microwave::server;
use oven::{Dispatcher, ImageRsCodec};

#[derive(Parser)]
#[command(name = "microwave")]
#[command(about = "Microwave - cook uploaded images with intensity-driven transforms")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Transform a local image file
    Process {
        /// Input image (the extension selects the format)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Mode name (Normal, Defrosting, Grill, Popcorn)
        #[arg(short, long)]
        mode: String,

        /// Transform strength
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        intensity: String,
    },
    /// List the available modes
    Modes,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Microwave API",
        description = "Cook uploaded images with intensity-driven transforms",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_root,
        api::handle_process_image,
        api::handle_modes,
    ),
    components(schemas(
        api::ProcessImageForm,
        api::ErrorResponse,
        api::ModesResponse,
    )),
    tags(
        (name = "Processing", description = "Image transforms"),
        (name = "Service", description = "Service status")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    match args.command {
        Some(Commands::Process {
            input,
            output,
            mode,
            intensity,
        }) => run_process_command(&input, &output, &mode, &intensity),
        Some(Commands::Modes) => {
            for line in cli::mode_listing() {
                println!("{line}");
            }
            Ok(())
        }
        Some(Commands::Serve) | None => run_server().await,
    }
}

/// Transform a single file (no server needed)
fn run_process_command(
    input: &Path,
    output: &Path,
    mode: &str,
    intensity: &str,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "microwave=warn,oven=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let dispatcher = Dispatcher::new(ImageRsCodec::new());
    let summary = cli::process_file(&dispatcher, input, output, mode, intensity)?;

    println!(
        "{} ({}): {} bytes -> {} bytes, written to {}",
        summary.mode,
        summary.format,
        summary.input_bytes,
        summary.output_bytes,
        output.display()
    );

    Ok(())
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "microwave=debug,oven=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let bind_addr = config.bind_addr.clone();

    tracing::info!(
        max_upload_bytes = config.max_upload_bytes,
        "Server configured"
    );

    let state = server::create_app_state(config);

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Microwave server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
