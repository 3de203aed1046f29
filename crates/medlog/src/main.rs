mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::Context;
use medlog_core::{RecordQuery, RecordSort};

fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Commands::Version = cli.command {
        return commands::version::run();
    }

    let ctx = Context::new(cli.data_dir, &cli.user)?;
    match cli.command {
        Commands::Add { text } => commands::entries::add(&ctx, &text),
        Commands::List => commands::entries::list(&ctx),
        Commands::Edit { id, text } => commands::entries::edit(&ctx, id, &text),
        Commands::Delete { id } => commands::entries::delete(&ctx, id),
        Commands::Clear { structured: false } => commands::entries::clear(&ctx),
        Commands::Clear { structured: true } => commands::records::clear(&ctx),
        Commands::Grid {
            file,
            structured: false,
        } => commands::entries::grid(&ctx, &file),
        Commands::Grid {
            file,
            structured: true,
        } => commands::records::grid(&ctx, &file),
        Commands::Parse { append } => commands::parse::run(&ctx, append),
        Commands::Records {
            drug,
            before,
            after,
            sort,
            desc,
        } => commands::records::run(
            &ctx,
            &RecordQuery {
                drug_name: drug,
                before,
                after,
                sort: sort.map(RecordSort::from),
                descending: desc,
            },
        ),
        Commands::Stats => commands::stats::run(&ctx),
        Commands::Export { structured, out } => commands::export::run(&ctx, structured, out),
        Commands::Cleanup { days } => commands::cleanup::run(&ctx, days),
        Commands::Version => commands::version::run(),
    }
}
