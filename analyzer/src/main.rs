use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, Level};

use imginfo::{Error, HeaderInfo, LoadOptions};

#[derive(Parser)]
#[command(name = "imginfo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Displays header information of image files.")]
#[command(after_help = "Supports: TIFF, GIF, JPEG, BMP, PNG, PBM, PGM, PPM, TGA, JEDMICS, CALS")]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Image files or directories to inspect
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Skip reading EXIF blocks while scanning JPEG markers
    #[arg(long)]
    no_exif: bool,

    /// Maximum number of TIFF directory entries to examine
    #[arg(long, default_value_t = 256)]
    max_tags: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            max_directory_entries: self.max_tags,
            probe_exif: !self.no_exif,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.load_options();
    let mut found_any = false;
    for path in &cli.paths {
        match process_path(path, &options) {
            Ok(found) => found_any |= found,
            Err(e) => eprintln!("{}: {:#}", path.display(), e),
        }
    }

    if found_any {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Returns whether `path` named at least one existing file.
fn process_path(path: &Path, options: &LoadOptions) -> Result<bool> {
    if path.is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("cannot list {}", path.display()))? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        for file in &files {
            process_file(file, options);
        }
        println!("{} file(s) found", files.len());
        Ok(true)
    } else if path.is_file() {
        process_file(path, options);
        Ok(true)
    } else {
        println!("{} - file not found", path.display());
        Ok(false)
    }
}

fn process_file(path: &Path, options: &LoadOptions) {
    debug!(path = %path.display(), "processing");
    let result = fs::File::open(path)
        .map_err(Error::from)
        .and_then(|mut f| imginfo::load_with_options(&mut f, options));
    match result {
        Ok(info) => println!("{}", format_report(&path.display().to_string(), &info)),
        Err(Error::UnknownFormat) => println!("{} - unknown file type", path.display()),
        Err(e) => eprintln!("{} - {}", path.display(), e),
    }
}

fn format_report(name: &str, info: &HeaderInfo) -> String {
    let mut line = format!(
        "{}: Type={}, Compression={}, Size: {} x {}, {}-Bpp",
        name,
        info.format,
        info.compression,
        info.width(),
        info.height(),
        info.bits_per_pixel
    );
    if let Some(options) = info.options() {
        line.push_str(", ");
        line.push_str(&options);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_with_options() {
        let mut data = b"GIF89a\x0a\x00\x14\x00\x43".to_vec();
        data.resize(256, 0);
        let info = imginfo::load_from_buffer(&data).unwrap();
        assert_eq!(
            format_report("a.gif", &info),
            "a.gif: Type=GIF, Compression=LZW, Size: 10 x 20, 4-Bpp, Interlaced"
        );
    }

    #[test]
    fn test_report_without_options() {
        let mut data = vec![0u8; 256];
        data[2] = 2;
        data[12] = 64;
        data[14] = 32;
        data[16] = 24;
        let info = imginfo::load_from_buffer(&data).unwrap();
        assert_eq!(
            format_report("b.tga", &info),
            "b.tga: Type=Targa, Compression=None, Size: 64 x 32, 24-Bpp"
        );
    }

    #[test]
    fn test_cli_options() {
        let cli = Cli::parse_from(["imginfo", "--no-exif", "--max-tags", "16", "x.jpg"]);
        let options = cli.load_options();
        assert!(!options.probe_exif);
        assert_eq!(options.max_directory_entries, 16);
        assert_eq!(cli.paths, vec![PathBuf::from("x.jpg")]);
    }
}
