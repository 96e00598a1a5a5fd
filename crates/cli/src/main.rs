mod config;
mod pipeline;
mod report;

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::{Overrides, ToolConfig};

#[derive(Parser)]
#[command(name = "bindcheck")]
#[command(
    about = "Cross-check TGUI.Net imports against the CTGUI headers and library exports",
    long_about = None
)]
struct Cli {
    /// TGUI.Net checkout; default locations are resolved below it.
    #[arg(long, env = "BINDCHECK_ROOT", default_value = ".")]
    root: PathBuf,
    /// Compiled CTGUI library (`libctgui.so` / `ctgui-0.8.dll`).
    #[arg(long, env = "BINDCHECK_LIBRARY")]
    library: Option<PathBuf>,
    /// CTGUI public header directory.
    #[arg(long, env = "BINDCHECK_INCLUDE")]
    include: Option<PathBuf>,
    /// C# binding sources.
    #[arg(long, env = "BINDCHECK_SOURCE")]
    source: Option<PathBuf>,
    /// Local CTGUI checkout; takes the library from its build tree and its headers.
    #[arg(long, env = "CTGUI_DIR")]
    ctgui_dir: Option<PathBuf>,
    /// Prefix shared by every exported function name.
    #[arg(long, default_value = "tgui")]
    prefix: String,
    /// Macro marking exported prototypes in the headers.
    #[arg(long, default_value = "CTGUI_API")]
    export_macro: String,
    /// Library name used in report headers.
    #[arg(long, default_value = "CTGUI")]
    library_name: String,
    /// Extra type equivalence, e.g. `IntPtr=tguiCanvas*`. Repeatable.
    #[arg(long = "equate", value_name = "MANAGED=NATIVE")]
    equate: Vec<String>,
    /// Print the verdict as JSON.
    #[arg(long)]
    json: bool,
    /// Show why each incompatible function failed and where it is declared.
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!("ignoring .env: {}", e);
        }
    }

    let cli = Cli::parse();
    let config = ToolConfig::resolve(Overrides {
        root: cli.root,
        library: cli.library,
        include: cli.include,
        source: cli.source,
        ctgui_dir: cli.ctgui_dir,
        prefix: cli.prefix,
        export_macro: cli.export_macro,
        library_name: cli.library_name,
        equate: cli.equate,
    })?;
    tracing::debug!(?config, "configuration resolved");

    let verdict = pipeline::run(&config)?;

    if cli.json {
        println!("{}", report::render_json(&verdict)?);
    } else {
        print!(
            "{}",
            report::render_text(&verdict, &config.library_name, cli.verbose)
        );
    }

    if !verdict.is_clean() {
        std::io::stdout().flush()?;
        std::process::exit(1);
    }
    Ok(())
}
