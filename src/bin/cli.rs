//! cmdstream CLI
//!
//! Encode and decode command messages, or run a call end to end in memory.

use std::process::ExitCode;
use std::thread;

use clap::{Parser, Subcommand};
use cmdstream::stream::EchoHandler;
use cmdstream::{
    execute_command, serve_call, CallConfig, ChannelTransport, CmdStreamError, CommandRequest,
    CommandResponse, Message,
};
use tracing_subscriber::{fmt, EnvFilter};

/// cmdstream CLI
#[derive(Parser, Debug)]
#[command(name = "cmdstream-cli")]
#[command(about = "Command message codec and streaming call tool")]
#[command(version)]
struct Args {
    /// Maximum frame size in bytes
    #[arg(long, default_value = "4194304")]
    max_message_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a command request and print it as hex
    Encode {
        /// Action timeout in nanoseconds (0 = server default)
        #[arg(short, long, default_value = "0")]
        timeout_ns: i64,

        /// Command arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Decode a hex-encoded command request
    DecodeRequest {
        /// Encoded bytes as hex
        hex: String,
    },

    /// Decode a hex-encoded command response
    DecodeResponse {
        /// Encoded bytes as hex
        hex: String,
    },

    /// Run a call against an in-memory echo server
    Demo {
        /// Command arguments, echoed back one event each
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cmdstream=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = CallConfig::builder()
        .max_message_size(args.max_message_size)
        .build();

    match run(args.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: CallConfig) -> cmdstream::Result<()> {
    match command {
        Commands::Encode { timeout_ns, args } => {
            let request = CommandRequest {
                args,
                action_timeout: timeout_ns,
            };
            println!("{}", hex::encode(request.encode_to_vec()));
        }
        Commands::DecodeRequest { hex } => {
            let request = CommandRequest::decode(&parse_hex(&hex)?)?;
            println!("{}", request);
        }
        Commands::DecodeResponse { hex } => {
            let response: CommandResponse = CommandResponse::decode(&parse_hex(&hex)?)?;
            println!("{}", response);
        }
        Commands::Demo { args } => run_demo(CommandRequest::new(args), config)?,
    }
    Ok(())
}

fn run_demo(request: CommandRequest, config: CallConfig) -> cmdstream::Result<()> {
    let (client, server) = ChannelTransport::pair(config.channel_capacity);

    let server_config = config.clone();
    let server_thread = thread::spawn(move || serve_call(server, &EchoHandler, &server_config));

    for response in execute_command(client, &request, config)? {
        if let Some(event) = response?.event {
            println!("{}", event);
        }
    }

    let sent = server_thread
        .join()
        .map_err(|_| CmdStreamError::Transport("server thread panicked".to_string()))??;
    tracing::info!("Demo finished, {} events streamed", sent);
    Ok(())
}

fn parse_hex(input: &str) -> cmdstream::Result<Vec<u8>> {
    hex::decode(input.trim())
        .map_err(|e| CmdStreamError::InvalidInput(format!("bad hex: {}", e)))
}
