use clap::Parser;
use std::path::Path;
use std::process;
use swfpipe::{Cli, Command, OutputFormatter, OutputMode, Pipeline, PipelineError, UserFriendlyError};

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    let cli = Cli::parse();

    // Handle commands that need no pipeline instance first
    if let Command::GenerateConfig { path } = &cli.command {
        return handle_generate_config(path);
    }

    let pipeline = match Pipeline::from_cli(&cli) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    let result = match &cli.command {
        Command::Extract {
            test,
            start,
            limit,
            yes,
            ..
        } => pipeline
            .extract(*test, *start, *limit, *yes)
            .await
            .map(|_| ()),
        Command::Organize { .. } => pipeline.organize().map(|_| ()),
        Command::Lookup { .. } => pipeline.lookup().map(|_| ()),
        Command::Materialize { .. } => pipeline.materialize().map(|_| ()),
        Command::Check => pipeline.check(),
        Command::GenerateConfig { .. } => unreachable!("handled above"),
    };

    match result {
        Ok(()) => 0,
        Err(PipelineError::Cancelled) => {
            pipeline.output_formatter().info("Cancelled.");
            0
        }
        Err(e) => {
            pipeline.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &PipelineError) -> i32 {
    match error {
        PipelineError::Cancelled => 0,
        _ => 1,
    }
}

fn handle_generate_config(path: &Path) -> i32 {
    match Pipeline::generate_sample_config(path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", path.display());
            println!("\nTo use this configuration:");
            println!("  swfpipe extract --config {}", path.display());
            println!("\nEdit the file to customize paths for your project.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &PipelineError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
