//! svg-reorder CLI
//!
//! Usage:
//!   svg-reorder [OPTIONS] [FILES]...
//!
//! Options:
//!   -s, --strategy <NAME>   start-end or centroid
//!   -p, --physical          Rescale to a physical unit
//!   -u, --unit <UNIT>       Physical unit to rescale to (in, mm, cm, pt, pc, Q, px)
//!   --precision <N>         Decimals kept in rewritten numbers
//!   -c, --config <FILE>     Configuration file (TOML format)
//!   -o, --out-dir <DIR>     Directory for reordered files
//!   -h, --help              Print help

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};

use svg_reorder::{reorder_batch, reorder_with_config, ReorderConfig, Strategy, Unit};

#[derive(Parser)]
#[command(name = "svg-reorder")]
#[command(about = "Reorder SVG paths to minimize plotter pen travel")]
struct Cli {
    /// Input files (reads stdin and writes stdout if none are given)
    files: Vec<PathBuf>,

    /// Ordering strategy: start-end or centroid
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Rescale coordinates and canvas size to a physical unit
    #[arg(short, long)]
    physical: bool,

    /// Physical unit to rescale to (defaults to the drawing's unit, or inches)
    #[arg(short, long)]
    unit: Option<Unit>,

    /// Maximum number of decimals in rewritten numbers
    #[arg(long)]
    precision: Option<usize>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write `<name>.reordered.svg` files here instead of next to each input
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

impl Cli {
    /// Configuration file settings with command-line overrides applied
    fn reorder_config(&self) -> ReorderConfig {
        let mut config = match &self.config {
            Some(path) => match ReorderConfig::from_file(path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error loading config '{}': {}", path.display(), e);
                    std::process::exit(1);
                }
            },
            None => ReorderConfig::default(),
        };

        if let Some(strategy) = self.strategy {
            config = config.with_strategy(strategy);
        }
        if self.physical {
            config = config.with_physical(true);
        }
        if let Some(unit) = self.unit {
            config.output = config.output.with_unit(unit);
        }
        if let Some(precision) = self.precision {
            config.output = config.output.with_precision(precision);
        }
        config
    }
}

fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir.join(format!("{}.reordered.svg", stem))
}

fn run_stdin(config: &ReorderConfig) -> bool {
    let mut source = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut source) {
        eprintln!("Error reading from stdin: {}", e);
        return false;
    }

    match reorder_with_config(&source, config) {
        Ok(svg) => match io::stdout().write_all(svg.as_bytes()) {
            Ok(()) => true,
            Err(e) => {
                eprintln!("Error writing to stdout: {}", e);
                false
            }
        },
        Err(e) => {
            eprintln!("{}", e.format(&source, "<stdin>"));
            false
        }
    }
}

fn run_files(files: &[PathBuf], out_dir: Option<&Path>, config: &ReorderConfig) -> bool {
    let mut ok = true;

    let mut inputs = Vec::new();
    for path in files {
        match fs::read_to_string(path) {
            Ok(content) => inputs.push((path, content)),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                ok = false;
            }
        }
    }

    if let Some(dir) = out_dir {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Error creating directory '{}': {}", dir.display(), e);
            return false;
        }
    }

    let sources: Vec<&str> = inputs.iter().map(|(_, content)| content.as_str()).collect();
    let results = reorder_batch(&sources, config);

    for ((path, source), result) in inputs.iter().zip(results) {
        let name = path.display().to_string();
        match result {
            Ok(svg) => {
                let target = output_path(path, out_dir);
                match fs::write(&target, svg) {
                    Ok(()) => log::info!("{} -> {}", name, target.display()),
                    Err(e) => {
                        eprintln!("Error writing file '{}': {}", target.display(), e);
                        ok = false;
                    }
                }
            }
            Err(e) => {
                eprintln!("{}", e.format(source, &name));
                ok = false;
            }
        }
    }
    ok
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // If no input file and stdin is a terminal (interactive), show help
    if cli.files.is_empty() && io::stdin().is_terminal() {
        let _ = Cli::command().print_help();
        return;
    }

    let config = cli.reorder_config();
    log::debug!("using {:?}", config);

    let ok = if cli.files.is_empty() {
        run_stdin(&config)
    } else {
        run_files(&cli.files, cli.out_dir.as_deref(), &config)
    };

    if !ok {
        std::process::exit(1);
    }
}
