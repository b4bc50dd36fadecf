mod commands;

use clap::{Parser, Subcommand};
use gobox::PipelineMode;

#[derive(Parser)]
#[command(name = "gobox", about = "Build Go commands into container images and run them like local tools")]
#[command(version)]
struct Cli {
    /// Go toolchain release to build with (golang image tag) [default: 1.22]
    #[arg(long, short = 'r', global = true, env = "GOBOX_TOOLCHAIN_VERSION")]
    release: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Dockerfile that builds a repository
    Dockerfile {
        /// Repository reference, e.g. github.com/user/tool
        reference: String,
    },
    /// Print a shell function that runs a built image as a local command
    Wrapper {
        /// Repository reference, e.g. github.com/user/tool
        reference: String,
    },
    /// Build a repository into an image
    Build {
        /// Repository reference, e.g. github.com/user/tool
        reference: String,
    },
    /// Build a repository, then print its shell function
    Get {
        /// Repository reference, e.g. github.com/user/tool
        reference: String,
    },
    /// Print a shell function that runs the Go toolchain image as `go`
    Tools,
}

impl From<Commands> for PipelineMode {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Dockerfile { reference } => PipelineMode::RenderDefinition { reference },
            Commands::Wrapper { reference } => PipelineMode::RenderWrapper { reference },
            Commands::Build { reference } => PipelineMode::Build { reference },
            Commands::Get { reference } => PipelineMode::BuildAndEmitWrapper { reference },
            Commands::Tools => PipelineMode::RenderToolsWrapper,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only rendered output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mode = PipelineMode::from(cli.command);

    commands::run(&mode, cli.release.as_deref()).await
}
