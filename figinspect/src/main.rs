use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod user_config;

use commands::{
    analyze, find_name, find_text, render, report, spacing, tokens, tree, typography,
};
use config::Settings;
use user_config::UserConfig;

#[derive(Parser, Debug)]
#[command(
    name = "figinspect",
    version,
    about = "Inspect Figma design node trees: geometry, fills, typography and text",
    arg_required_else_help = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Figma personal access token
    #[arg(long, env = "FIGMA_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,
    /// API base URL
    #[arg(long, env = "FIGMA_API_BASE", value_name = "URL", global = true)]
    pub api_base: Option<String>,
    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,
    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every element with its type, geometry, text and fill
    Report(report::ReportArgs),
    /// Print the node outline: name, id and type
    Tree(tree::TreeArgs),
    /// Find TEXT nodes whose content contains any of the substrings
    FindText(find_text::FindTextArgs),
    /// Find nodes whose name contains any of the fragments (case-insensitive)
    FindName(find_name::FindNameArgs),
    /// Write the nested attribute analysis of a node as JSON
    Analyze(analyze::AnalyzeArgs),
    /// Dump text styles, including per-character overrides
    Typography(typography::TypographyArgs),
    /// List auto-layout containers with their gaps and padding
    Spacing(spacing::SpacingArgs),
    /// Print rendered image URLs for nodes
    Render(render::RenderArgs),
    /// Collect named SOLID colours and text styles as JSON
    Tokens(tokens::TokensArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);
    let user_cfg = UserConfig::load()?;
    let settings = Settings::resolve(&cli.global, &user_cfg)?;
    match cli.command {
        Command::Report(args) => report::run(&settings, args)?,
        Command::Tree(args) => tree::run(&settings, args)?,
        Command::FindText(args) => find_text::run(&settings, args)?,
        Command::FindName(args) => find_name::run(&settings, args)?,
        Command::Analyze(args) => analyze::run(&settings, args)?,
        Command::Typography(args) => typography::run(&settings, args)?,
        Command::Spacing(args) => spacing::run(&settings, args)?,
        Command::Render(args) => render::run(&settings, args)?,
        Command::Tokens(args) => tokens::run(&settings, args)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,figinspect={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
