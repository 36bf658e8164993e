use anyhow::Context;
use clap::Parser;
use seasonal_chunker::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    let result = runtime.block_on(async {
        // Create cancellation token for coordinating graceful shutdown
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            // Without a handler there is nothing to wait for; let the command finish
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        let run = commands::run(command, cancellation_token.clone());
        tokio::pin!(run);

        // On CTRL+C stop starting new work, then let the command clean up
        tokio::select! {
            result = &mut run => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, finishing in-flight writes...");
                cancellation_token.cancel();
                run.await
            }
        }
    });

    match result {
        Ok(_summary) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            if error.is_input_error() {
                eprintln!("No window files were written.");
            }
            process::exit(1);
        }
    }
}

fn build_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Seasonal Chunker - weekly load profiles from household load data");
    println!("================================================================");
    println!();
    println!("Split a minute-resolution load export into season-filtered, midnight-aligned");
    println!("windows and write one '<minute> <P>+<Q>j' profile file per complete window.");
    println!();
    println!("USAGE:");
    println!("    seasonal_chunker <COMMAND> <SOURCE> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    extract     Write load_<n>.txt files for every retained window");
    println!("    inspect     Show which windows would be retained or rejected");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Winter weeks into ./loads (defaults):");
    println!("    seasonal_chunker extract loads_orig.txt");
    println!();
    println!("    # Summer days, overwriting a previous run:");
    println!("    seasonal_chunker extract loads_orig.txt -m jun,jul,aug -w 1440 --force");
    println!();
    println!("    # Machine-readable window report:");
    println!("    seasonal_chunker inspect loads_orig.txt --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    seasonal_chunker <COMMAND> --help");
}
