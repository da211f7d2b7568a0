//! shannon-codec: command-line front-end for the Shannon-Fano-Elias codec.
//!
//! Thin collaborator around the core: reads whole files, calls
//! `encode`/`decode`, and persists the artifact pairs under the
//! working-directory layout defined in `workdir`.

mod config;
mod input_gen;
mod workdir;

use config::{Config, Mode};
use shannon_codec_core::{decode, encode, RandomIdSource};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::error;
use workdir::{parse_encoded_name, stem_of, write_atomic, WorkDir};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("try: shannon-codec --help");
            return ExitCode::FAILURE;
        }
    };

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let work = WorkDir::create(&config.work_dir)?;

    match &config.mode {
        Mode::Encode(path) => run_encode(config, &work, path),
        Mode::Decode(path) => run_decode(&work, path),
        Mode::List => run_list(&work),
        Mode::GenSample(size) => run_gen_sample(config, &work, *size),
    }
}

fn run_encode(
    config: &Config,
    work: &WorkDir,
    input: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read(input)?;
    let file_name = file_name_of(input)?;

    let mut ids = RandomIdSource::seeded(config.seed);
    let output = encode(&source, &mut ids)?;

    let table_path = work.table_path(output.linking_id, stem_of(file_name));
    let encoded_path = work.encoded_path(output.linking_id, file_name);
    write_atomic(&table_path, &output.table)?;
    write_atomic(&encoded_path, &output.encoded)?;

    let ratio = if source.is_empty() {
        1.0
    } else {
        output.encoded.len() as f64 / source.len() as f64
    };
    println!("Encoded {} ({} bytes)", input.display(), source.len());
    println!("  table:   {}", table_path.display());
    println!("  encoded: {} ({} bytes, ratio {:.3})", encoded_path.display(), output.encoded.len(), ratio);

    Ok(())
}

fn run_decode(work: &WorkDir, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let encoded_name = file_name_of(input)?;
    let (linking_id, original_name) = parse_encoded_name(encoded_name).ok_or_else(|| {
        format!("encoded file name {encoded_name:?} does not match encoded_<id>_<name>")
    })?;

    let table_path = work.table_path(linking_id, stem_of(original_name));
    if !table_path.exists() {
        return Err(format!("table artifact not found: {}", table_path.display()).into());
    }

    let encoded = fs::read(input)?;
    let table = fs::read(&table_path)?;
    let decoded = decode(&encoded, &table)?;

    let decoded_path = work.decoded_path(original_name);
    write_atomic(&decoded_path, &decoded)?;

    println!("Decoded {} ({} bytes)", input.display(), decoded.len());
    println!("  output: {}", decoded_path.display());

    Ok(())
}

fn run_list(work: &WorkDir) -> Result<(), Box<dyn std::error::Error>> {
    println!("Raw files:");
    for path in work.list_files(&work.raw_dir())? {
        println!("  {}", path.display());
    }
    println!("Encoded files:");
    for path in work.list_files(&work.encoded_dir())? {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if parse_encoded_name(name).is_some() {
            println!("  {}", path.display());
        }
    }
    Ok(())
}

fn run_gen_sample(
    config: &Config,
    work: &WorkDir,
    size: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = input_gen::generate_sample_data(config.seed, size);
    let path = work.raw_dir().join(format!("sample_{}.bin", config.seed));
    write_atomic(&path, &data)?;
    println!("Generated {} ({} bytes)", path.display(), size);
    Ok(())
}

fn file_name_of(path: &Path) -> Result<&str, String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("path {} has no usable file name", path.display()))
}
