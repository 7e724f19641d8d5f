use crate::utils::Result;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="trioseg",
          version=&**FULL_VERSION,
          about="Joint hidden-state segments across trios",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Collapse per-position states of one trio into segments")]
    Segments(SegmentsArgs),
    #[clap(about = "Merge segment tables of several trios into a joint table")]
    Merge(MergeArgs),
    #[clap(about = "Sum segment lengths per state in fixed-size windows")]
    Windows(WindowsArgs),
    #[clap(about = "Find long runs of windows with low ILS")]
    LowIls(LowIlsArgs),
    #[clap(about = "Concatenate tables sharing the same header")]
    Concat(ConcatArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("segments")))]
#[command(arg_required_else_help(true))]
pub struct SegmentsArgs {
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(help = "Per-position state table named sp1_sp2_sp3_outgroup_tag_chrom")]
    #[clap(value_name = "STATES")]
    #[arg(value_parser = check_file_exists)]
    pub input_path: PathBuf,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output segment table (stdout if omitted)")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_output_path)]
    pub output_path: Option<PathBuf>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "trio")]
    #[clap(value_name = "TRIO")]
    #[clap(help = "Analysis name, overrides the one parsed from the file name")]
    #[arg(value_parser = check_name_nonempty)]
    pub trio: Option<String>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "chrom")]
    #[clap(value_name = "CHROM")]
    #[clap(help = "Chromosome name, overrides the one parsed from the file name")]
    #[arg(value_parser = check_name_nonempty)]
    pub chrom: Option<String>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "coordinate-column")]
    #[clap(value_name = "COLUMN")]
    #[clap(help = "Column holding the reference species coordinate")]
    #[clap(default_value = "Homo_sapiens")]
    pub coordinate_column: String,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("merge")))]
#[command(arg_required_else_help(true))]
pub struct MergeArgs {
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(help = "Segment tables, one or more trios each")]
    #[clap(value_name = "SEGMENTS")]
    #[clap(num_args = 1..)]
    #[arg(value_parser = check_file_exists)]
    pub input_paths: Vec<PathBuf>,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output joint table (stdout if omitted)")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_output_path)]
    pub output_path: Option<PathBuf>,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("windows")))]
#[command(arg_required_else_help(true))]
pub struct WindowsArgs {
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(help = "Segment tables")]
    #[clap(value_name = "SEGMENTS")]
    #[clap(num_args = 1..)]
    #[arg(value_parser = check_file_exists)]
    pub input_paths: Vec<PathBuf>,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output window table (stdout if omitted)")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_output_path)]
    pub output_path: Option<PathBuf>,

    #[clap(short = 'w')]
    #[clap(long = "window-size")]
    #[clap(help = "Window size in bp")]
    #[clap(value_name = "SIZE")]
    #[clap(default_value = "100000")]
    #[arg(value_parser = positive_length)]
    pub window_size: u64,

    #[clap(short = 's')]
    #[clap(long = "chrom-sizes")]
    #[clap(help = "Chromosome lengths (chrom<TAB>length or FASTA .fai) to fill windows to the chromosome end")]
    #[clap(value_name = "SIZES")]
    #[arg(value_parser = check_file_exists)]
    pub chrom_sizes_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("low-ils")))]
#[command(arg_required_else_help(true))]
pub struct LowIlsArgs {
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(help = "Window table produced by the windows command")]
    #[clap(value_name = "WINDOWS")]
    #[arg(value_parser = check_file_exists)]
    pub input_path: PathBuf,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output region table (stdout if omitted)")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_output_path)]
    pub output_path: Option<PathBuf>,

    #[clap(long = "fraction")]
    #[clap(value_name = "FRAC")]
    #[clap(help = "Windows with an ILS proportion at most FRAC times the mean are low")]
    #[clap(default_value = "0.2")]
    #[arg(value_parser = ensure_unit_float)]
    pub fraction: f64,

    #[clap(long = "min-len")]
    #[clap(value_name = "LEN")]
    #[clap(help = "Report only low-ILS regions longer than LEN bp")]
    #[clap(default_value = "500000")]
    pub min_len: u64,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("concat")))]
#[command(arg_required_else_help(true))]
pub struct ConcatArgs {
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(help = "Tables to concatenate, all with the same header")]
    #[clap(value_name = "TABLES")]
    #[clap(num_args = 1..)]
    #[arg(value_parser = check_file_exists)]
    pub input_paths: Vec<PathBuf>,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output table (stdout if omitted)")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_output_path)]
    pub output_path: Option<PathBuf>,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_output_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn positive_length(s: &str) -> Result<u64> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid length", s))?;
    if value == 0 {
        Err("Length must be at least 1".into())
    } else {
        Ok(value)
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_name_nonempty(s: &str) -> Result<String> {
    if s.trim().is_empty() {
        Err("Name cannot be an empty string".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn ensure_unit_float(s: &str) -> Result<f64> {
    let value = s
        .parse::<f64>()
        .map_err(|e| format!("Could not parse float: {}", e))?;
    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "The value must be between 0.0 and 1.0, got: {}",
            value
        ))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_merge_command() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.tsv");
        let b = dir.path().join("b.tsv");
        std::fs::write(&a, "").unwrap();
        std::fs::write(&b, "").unwrap();

        let cli = Cli::try_parse_from([
            "trioseg",
            "-v",
            "merge",
            "-i",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "-t",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.verbosity, 1);
        match cli.command {
            Command::Merge(args) => {
                assert_eq!(args.input_paths, vec![a, b]);
                assert_eq!(args.num_threads, 4);
                assert!(args.output_path.is_none());
            }
            _ => panic!("expected merge subcommand"),
        }
    }

    #[test]
    fn parse_low_ils_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("windows.tsv");
        std::fs::write(&input, "").unwrap();

        let cli =
            Cli::try_parse_from(["trioseg", "low-ils", "-i", input.to_str().unwrap()]).unwrap();
        match cli.command {
            Command::LowIls(args) => {
                assert_eq!(args.fraction, 0.2);
                assert_eq!(args.min_len, 500_000);
            }
            _ => panic!("expected low-ils subcommand"),
        }
    }

    #[test]
    fn validators() {
        assert!(threads_in_range("0").is_err());
        assert_eq!(threads_in_range("8"), Ok(8));
        assert!(positive_length("0").is_err());
        assert!(ensure_unit_float("1.5").is_err());
        assert!(check_file_exists("/nonexistent/file.tsv").is_err());
        assert!(check_output_path("/nonexistent/dir/out.tsv").is_err());
        assert!(check_name_nonempty("  ").is_err());
    }
}
