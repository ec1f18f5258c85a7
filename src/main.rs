use clap::{Parser, Subcommand};
use mdsite::config::Config;
use mdsite::site;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mdsite", about = "mdsite — render Markdown to HTML and build static sites")]
struct Cli {
    /// Log every step (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy static assets and generate every page of the site
    Build {
        /// Config file path (default: mdsite.config.json if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Markdown content directory
        #[arg(long)]
        content: Option<PathBuf>,

        /// Page template containing {{ Title }} and {{ Content }}
        #[arg(long)]
        template: Option<PathBuf>,

        /// Static asset directory
        #[arg(long = "static")]
        static_dir: Option<PathBuf>,

        /// Output directory
        #[arg(long)]
        dest: Option<PathBuf>,
    },

    /// Render one markdown file to an HTML fragment
    Render {
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the h1 title of a markdown file
    Title { input: PathBuf },
}

fn die(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn read_input(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| die(&format!("cannot read {}: {}", path.display(), e)))
}

fn init_logging(cli: &Cli) {
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Command::Build {
            config,
            content,
            template,
            static_dir,
            dest,
        } => {
            let loaded = match config {
                Some(ref path) => Config::load(path),
                None => Config::discover(),
            };
            let mut config = loaded.unwrap_or_else(|e| die(&e.to_string()));

            // CLI overrides
            if let Some(p) = content {
                config.content_dir = p;
            }
            if let Some(p) = template {
                config.template_path = p;
            }
            if let Some(p) = static_dir {
                config.static_dir = p;
            }
            if let Some(p) = dest {
                config.dest_dir = p;
            }

            let copied = site::copy_static(&config.static_dir, &config.dest_dir)
                .unwrap_or_else(|e| die(&e.to_string()));
            let pages = site::generate_pages_recursive(
                &config.content_dir,
                &config.template_path,
                &config.dest_dir,
            )
            .unwrap_or_else(|e| die(&e.to_string()));

            eprintln!(
                "built {} page(s) and {} static file(s) -> {}",
                pages,
                copied,
                config.dest_dir.display()
            );
        }
        Command::Render { input, output } => {
            let markdown = read_input(&input);
            let html = mdsite::markdown_to_html(&markdown)
                .unwrap_or_else(|e| die(&format!("{}: {}", input.display(), e)));
            if let Some(ref output_path) = output {
                fs::write(output_path, &html)
                    .unwrap_or_else(|e| die(&format!("cannot write {}: {}", output_path.display(), e)));
            } else {
                println!("{}", html);
            }
        }
        Command::Title { input } => {
            let markdown = read_input(&input);
            let title = mdsite::extract_title(&markdown)
                .unwrap_or_else(|e| die(&format!("{}: {}", input.display(), e)));
            println!("{}", title);
        }
    }
}
