use clap::Parser;
use sass_bridge::config::{self as settings, Config, OutputConfig, OutputConflict};
use sass_bridge::http::{folder_of_uri, strip_empty_lines};
use sass_bridge::logger::{self, CompileLogEntry, CompileStatus};
use sass_bridge::ScriptBridge;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Compile SCSS files to CSS through the Ruby Sass engine
#[derive(Debug, Parser)]
#[command(name = "sass_bridge", version)]
struct Cli {
    /// Config file path (extension optional)
    #[arg(short, long, default_value = settings::DEFAULT_CONFIG_PATH)]
    config: String,

    /// Extra Ruby require, loaded after the configured ones
    #[arg(short = 'r', long = "require")]
    requires: Vec<String>,

    /// Extra `@import` search path
    #[arg(short = 'I', long = "load-path")]
    load_paths: Vec<String>,

    /// SCSS files to compile
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Config::load_from(&cli.config)?;
    logger::init(&cfg.logging)?;

    // Worker threads from config, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.runtime.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    logger::log_startup(&cfg, cli.inputs.len());
    let total = cli.inputs.len();
    let failed = runtime.block_on(compile_all(cfg, cli));
    if failed > 0 {
        return Err(format!("{failed} of {total} files failed to compile").into());
    }
    Ok(())
}

/// Compile every input through one shared bridge, returning the failure count
async fn compile_all(cfg: Config, cli: Cli) -> usize {
    let bridge = Arc::new(cfg.build_bridge());
    for require in &cli.requires {
        bridge.add_require(require.as_str());
    }
    for load_path in &cli.load_paths {
        bridge.add_load_path(load_path.as_str());
    }
    // Imports next to each input resolve without extra configuration
    for input in &cli.inputs {
        bridge.add_load_path(folder_of_uri(&input.to_string_lossy()));
    }

    let output = Arc::new(cfg.output.clone());
    let targets = output.plan_outputs(&cli.inputs);
    let mut tasks = JoinSet::new();
    for (input, target) in cli.inputs.into_iter().zip(targets) {
        let bridge = Arc::clone(&bridge);
        let output = Arc::clone(&output);
        // Compilations block on the bridge, one at a time
        tasks.spawn_blocking(move || compile_file(&bridge, &output, &input, target));
    }

    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(entry) => {
                if entry.status == CompileStatus::Failed {
                    failed += 1;
                }
                logger::log_compile(&entry, &cfg.logging.format);
            }
            Err(e) => {
                failed += 1;
                logger::log_error(&format!("Compile task panicked: {e}"));
            }
        }
    }
    failed
}

fn compile_file(
    bridge: &ScriptBridge,
    output: &OutputConfig,
    input: &Path,
    target: Result<PathBuf, OutputConflict>,
) -> CompileLogEntry {
    let started = Instant::now();
    let entry = CompileLogEntry::new(input.display().to_string());
    let compiled = target
        .map_err(|conflict| conflict.to_string())
        .and_then(|out_path| compile_into(bridge, output, input, &out_path, entry.clone()));
    let mut entry = match compiled {
        Ok(entry) => entry,
        Err(message) => entry.failed(message),
    };
    entry.duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn compile_into(
    bridge: &ScriptBridge,
    output: &OutputConfig,
    input: &Path,
    out_path: &Path,
    mut entry: CompileLogEntry,
) -> Result<CompileLogEntry, String> {
    let source = fs::read_to_string(input).map_err(|e| format!("Cannot read input: {e}"))?;
    entry.input_bytes = source.len();

    let mut css = bridge
        .transform(source.as_str())
        .map_err(|e| e.message().to_string())?;
    if output.strip_empty_lines {
        css = strip_empty_lines(&css);
    }

    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| format!("Cannot create output directory: {e}"))?;
        }
    }
    fs::write(out_path, &css).map_err(|e| format!("Cannot write {}: {e}", out_path.display()))?;

    entry.output = Some(out_path.display().to_string());
    entry.output_bytes = css.len();
    Ok(entry)
}
