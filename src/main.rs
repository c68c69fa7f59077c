use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use log::{info, LevelFilter};
use bindgen::config::Config;
use bindgen::pass::{DirFiler, Pass};
use bindgen::registry::FileStore;
use jtype::provider::ClassPool;

#[derive(Debug, Parser)]
#[command(about = "Generates binding classes for java types")]
struct Cli {
	/// Be verbose, given twice for even more output.
	#[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
	verbose: u8,

	/// The json file describing the classes.
	#[arg(long = "classes")]
	classes: PathBuf,

	/// A `.properties` file with `skipAttribute` and `fixRawType` entries.
	#[arg(long = "config")]
	config: Option<PathBuf>,

	/// The directory the generated sources are written to.
	#[arg(long = "out", default_value = "generated")]
	out: PathBuf,

	/// The file listing all types bindings were ever generated for. Defaults to `bindgen/BindKeyword.txt` in the
	/// output directory.
	#[arg(long = "registry")]
	registry: Option<PathBuf>,

	/// The fully qualified names of the types to generate bindings for.
	#[arg(required = true)]
	types: Vec<String>,
}

fn setup_logging(verbose: u8) -> Result<()> {
	let level = match verbose {
		0 => LevelFilter::Info,
		1 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};

	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
		})
		.level(level)
		.chain(std::io::stderr())
		.apply()
		.map_err(|e| anyhow!("failed to set up logging: {e}"))
}

fn main() -> Result<()> {
	let Cli { verbose, classes, config, out, registry, types } = Cli::parse();

	setup_logging(verbose)?;

	let file = File::open(&classes)
		.with_context(|| anyhow!("failed to open class pool {classes:?}"))?;
	let pool = ClassPool::read(BufReader::new(file))
		.with_context(|| anyhow!("failed to read class pool {classes:?}"))?;
	info!("read {} classes from {classes:?}", pool.len());

	let config = match config {
		Some(path) => Config::read(&path)?,
		None => Config::new(),
	};

	let registry = registry.unwrap_or_else(|| out.join("bindgen").join("BindKeyword.txt"));
	let store = FileStore::new(registry);
	let mut filer = DirFiler::new(out);

	let report = Pass::new(&pool, &config).run(&types, &mut filer, &store)?;
	info!("wrote {} classes to {:?}", report.written.len(), filer.root());

	if !report.failed.is_empty() {
		for (class, reason) in &report.failed {
			eprintln!("{class}: {reason}");
		}
		std::process::exit(1);
	}
	Ok(())
}
