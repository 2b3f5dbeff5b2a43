use anyhow::Result;
use clap::{Parser, Subcommand};
use tinyrf_cli::commands::{self, simulate::Channel};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "tinyrf")]
#[command(about = "TinyRF - Pulse-width RF link timing, encoding and decoding", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Link configuration JSON file (defaults when omitted)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show timer settings and tolerance windows
    Timing {
        /// Frame size used for the burst duration
        #[arg(long, default_value = "1")]
        frame_size: usize,

        /// Output JSON file for the report
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Encode hex frames into a pulse trace
    Encode {
        /// Frames as hex strings, all the same size
        #[arg(required = true)]
        frames: Vec<String>,

        /// Output JSON trace file
        #[arg(short, long)]
        output: String,
    },

    /// Decode frames from an edge trace
    Decode {
        /// Input JSON trace file
        #[arg(short, long)]
        input: String,

        /// Frame size (taken from the trace when omitted)
        #[arg(long)]
        frame_size: Option<usize>,

        /// Output JSON file for decoded frames
        #[arg(short, long)]
        output: Option<String>,

        /// Show statistics only
        #[arg(long)]
        stats_only: bool,
    },

    /// Send a frame over a simulated noisy channel
    Simulate {
        /// Frame as a hex string
        frame: String,

        /// Interval jitter in percent of nominal
        #[arg(long, default_value = "30", value_parser = clap::value_parser!(u32).range(0..=100))]
        jitter: u32,

        /// Random edges injected before each burst
        #[arg(long, default_value = "20")]
        noise: usize,

        /// Number of bursts
        #[arg(long, default_value = "10")]
        bursts: usize,

        /// RNG seed
        #[arg(long, default_value = "1")]
        seed: u64,

        /// Output JSON file for the report
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = cli.config.as_deref();

    // Execute command
    match cli.command {
        Commands::Timing { frame_size, output } => {
            commands::timing::execute(config, frame_size, output.as_deref())
        }

        Commands::Encode { frames, output } => commands::encode::execute(config, &frames, &output),

        Commands::Decode {
            input,
            frame_size,
            output,
            stats_only,
        } => commands::decode::execute(config, &input, frame_size, output.as_deref(), stats_only),

        Commands::Simulate {
            frame,
            jitter,
            noise,
            bursts,
            seed,
            output,
        } => {
            let channel = Channel {
                jitter_percent: jitter,
                noise_edges: noise,
                bursts,
                seed,
            };
            commands::simulate::execute(config, &frame, channel, output.as_deref())
        }
    }
}
