//! Configuration for the shannon-codec command-line tool.
//!
//! Hand-rolled argument parsing: a mode (encode/decode/list/gen-sample)
//! plus a few flags. The seed defaults to wall-clock time so repeated
//! runs pick fresh linking ids, and `--seed` pins everything down for
//! reproducible runs.

use std::path::PathBuf;

/// What the tool should do this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Encode a raw file into a table + encoded artifact pair
    Encode(PathBuf),

    /// Decode an encoded artifact back into the original bytes
    Decode(PathBuf),

    /// List candidate files in the working directory
    List,

    /// Generate a sample raw file of the given size
    GenSample(usize),
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Selected mode
    pub mode: Mode,

    /// Root of the working directory layout
    pub work_dir: PathBuf,

    /// Seed for linking ids and sample generation
    pub seed: u64,

    /// Whether to print the resolved configuration
    pub print_config: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut mode: Option<Mode> = None;
        let mut work_dir: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut print_config = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "encode" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("encode requires a file path".to_string());
                    }
                    mode = Some(Mode::Encode(PathBuf::from(&args[i])));
                }
                "decode" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("decode requires a file path".to_string());
                    }
                    mode = Some(Mode::Decode(PathBuf::from(&args[i])));
                }
                "--list" => {
                    mode = Some(Mode::List);
                }
                "--gen-sample" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--gen-sample requires a byte count".to_string());
                    }
                    let size = args[i].parse().map_err(|_| "invalid sample size")?;
                    mode = Some(Mode::GenSample(size));
                }
                "--work-dir" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--work-dir requires a path".to_string());
                    }
                    work_dir = Some(PathBuf::from(&args[i]));
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => {
                    return Err(format!("unknown argument: {other}"));
                }
            }
            i += 1;
        }

        let mode = mode.ok_or_else(|| {
            "no mode given: expected encode <PATH>, decode <PATH>, --list, or --gen-sample <BYTES>"
                .to_string()
        })?;

        // Explicit seed or wall-clock time
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_millis() as u64
        });

        Ok(Config {
            mode,
            work_dir: work_dir.unwrap_or_else(|| PathBuf::from("work")),
            seed,
            print_config,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Mode:     {:?}", self.mode);
        println!("Work dir: {}", self.work_dir.display());
        println!("Seed:     {}", self.seed);
        println!();
    }
}

fn print_help() {
    println!("shannon-codec: static Shannon-Fano-Elias file codec");
    println!();
    println!("USAGE:");
    println!("    shannon-codec <MODE> [OPTIONS]");
    println!();
    println!("MODES:");
    println!("    encode <PATH>           Encode a file into work/encoded + work/tables");
    println!("    decode <PATH>           Decode an encoded artifact into work/decoded");
    println!("    --list                  List raw and encoded files in the work dir");
    println!("    --gen-sample <BYTES>    Generate a sample file under work/raw");
    println!();
    println!("OPTIONS:");
    println!("    --work-dir <PATH>       Working directory root (default: work)");
    println!("    --seed <N>              Seed for linking ids and sample data");
    println!("    --print-config          Print resolved configuration");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    shannon-codec --gen-sample 65536");
    println!("    shannon-codec encode work/raw/sample.bin");
    println!("    shannon-codec decode work/encoded/encoded_00000000000000ab_sample.bin");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_encode_mode() {
        let config = Config::from_args(&args(&["encode", "input.bin", "--seed", "7"])).unwrap();
        assert_eq!(config.mode, Mode::Encode(PathBuf::from("input.bin")));
        assert_eq!(config.seed, 7);
        assert_eq!(config.work_dir, PathBuf::from("work"));
    }

    #[test]
    fn test_decode_mode_with_work_dir() {
        let config =
            Config::from_args(&args(&["decode", "x.bin", "--work-dir", "/tmp/w"])).unwrap();
        assert_eq!(config.mode, Mode::Decode(PathBuf::from("x.bin")));
        assert_eq!(config.work_dir, PathBuf::from("/tmp/w"));
    }

    #[test]
    fn test_gen_sample_mode() {
        let config = Config::from_args(&args(&["--gen-sample", "1024"])).unwrap();
        assert_eq!(config.mode, Mode::GenSample(1024));
    }

    #[test]
    fn test_missing_mode_is_error() {
        assert!(Config::from_args(&args(&["--seed", "1"])).is_err());
    }

    #[test]
    fn test_unknown_argument_is_error() {
        assert!(Config::from_args(&args(&["encode", "a", "--bogus"])).is_err());
    }
}
