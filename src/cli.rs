// src/cli.rs
use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{bail, Result, WrapErr};

use crate::{
    config::{consts::*, DocumentPaths, ImageOptions, SyncOptions},
    core::net::HttpFetcher,
    file::FsStore,
    product::{ProductInput, FIELDS},
    progress::Progress,
    sync::CatalogSync,
};

#[derive(Parser, Debug)]
#[command(name = "cli")]
#[command(about = "Append a product to the catalog page and keep its JSON-LD in sync")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory for debug.log
    #[arg(long, global = true, default_value = STORE_DIR)]
    pub log_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cache the image, then add the product to both documents.
    Add {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Parse and check a product without touching anything.
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Product JSON file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Product JSON given inline
    #[arg(long)]
    pub json: Option<String>,
}

impl InputArgs {
    fn text(&self) -> Result<String> {
        match (&self.file, &self.json) {
            (Some(path), _) => std::fs::read_to_string(path)
                .wrap_err_with(|| format!("reading {}", path.display())),
            (None, Some(json)) => Ok(json.clone()),
            (None, None) => bail!("give --file or --json"),
        }
    }
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Catalog page to update
    #[arg(long, default_value = INDEX_PATH)]
    pub index: PathBuf,

    /// Copy of the page served for not-found routes
    #[arg(long, default_value = MIRROR_PATH)]
    pub mirror: PathBuf,

    /// Skip writing the mirror copy
    #[arg(long)]
    pub no_mirror: bool,

    /// Where cached images go
    #[arg(long, default_value = IMAGES_DIR)]
    pub images_dir: PathBuf,

    /// Wider images are scaled down to this width
    #[arg(long, default_value_t = MAX_WIDTH)]
    pub max_width: u32,

    /// Image request timeout in seconds
    #[arg(long, default_value_t = FETCH_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl TargetArgs {
    pub fn to_options(&self) -> SyncOptions {
        SyncOptions {
            documents: DocumentPaths {
                primary: self.index.clone(),
                mirror: (!self.no_mirror).then(|| self.mirror.clone()),
            },
            image: ImageOptions {
                dir: self.images_dir.clone(),
                max_width: self.max_width,
                timeout: Duration::from_secs(self.timeout),
                ..ImageOptions::default()
            },
            ..SyncOptions::default()
        }
    }
}

struct CliProgress;
impl Progress for CliProgress {
    fn log(&mut self, msg: &str) { eprintln!("{msg}"); }
}

pub fn run(cli: Cli) -> Result<()> {
    let _guard = crate::log::init(&cli.log_dir).wrap_err("initializing logs")?;

    match cli.command {
        Command::Validate { input } => validate(&input),
        Command::Add { input, target } => add(&input, &target),
    }
}

fn validate(input: &InputArgs) -> Result<()> {
    let product = ProductInput::from_json(&input.text()?)?;
    for key in FIELDS {
        let value = product.get(key).trim();
        println!("{}: {}", title_case(key), if value.is_empty() { "--" } else { value });
    }
    let problems = product.problems();
    if !problems.is_empty() {
        bail!(problems.join(" | "));
    }
    println!("Valid");
    Ok(())
}

fn add(input: &InputArgs, target: &TargetArgs) -> Result<()> {
    if !target.index.exists() {
        bail!("{} not found", target.index.display());
    }
    let record = ProductInput::from_json(&input.text()?)?.validate()?;

    let sync = CatalogSync::new(HttpFetcher::new()?, FsStore, target.to_options());
    let report = sync.add_product(record, Some(&mut CliProgress))?;

    println!("Added product: {}", report.title);
    println!("  image:    {}", report.image_path);
    println!("  position: {}", report.position);
    for p in &report.files_written {
        println!("  wrote:    {}", p.display());
    }
    Ok(())
}

fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
        None => s!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_defaults_match_page_layout() {
        let cli = Cli::parse_from(["cli", "add", "--json", "{}"]);
        let Command::Add { target, .. } = cli.command else { panic!("expected add") };
        let opts = target.to_options();
        assert_eq!(opts.documents, DocumentPaths::default());
        assert_eq!(opts.image.max_width, 350);
    }

    #[test]
    fn no_mirror_drops_the_copy() {
        let cli = Cli::parse_from(["cli", "add", "--file", "p.json", "--no-mirror", "--index", "site/index.html"]);
        let Command::Add { target, .. } = cli.command else { panic!("expected add") };
        let opts = target.to_options();
        assert_eq!(opts.documents.mirror, None);
        assert_eq!(opts.documents.primary, PathBuf::from("site/index.html"));
    }

    #[test]
    fn file_and_json_are_exclusive() {
        assert!(Cli::try_parse_from(["cli", "validate", "--file", "a", "--json", "{}"]).is_err());
        assert!(Cli::try_parse_from(["cli", "validate"]).is_err());
    }

    #[test]
    fn title_case_keys() {
        assert_eq!(title_case("description"), "Description");
    }
}
