use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{info, Level};
use unyaz::scanner::StreamLocator;
use unyaz::{FileSink, ScanConfig};

#[derive(Parser, Debug)]
#[command(name = "unyaz")]
#[command(about = "Extract and decompress every Yaz0 stream embedded in a file")]
#[command(version)]
struct Args {
    /// Input file to scan
    input: PathBuf,

    /// Directory for extracted files (default: next to the input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Extension for extracted files
    #[arg(long, default_value = unyaz::scanner::DEFAULT_EXTENSION)]
    extension: String,

    /// Number of decoding threads (0 = auto, 1 = sequential)
    #[arg(short = 't', long, default_value = "1")]
    threads: usize,

    /// List streams without extracting them
    #[arg(long)]
    list: bool,

    /// Show debug output and statistics
    #[arg(short, long)]
    verbose: bool,
}

const EXIT_ERROR: u8 = 1;

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let input = std::fs::read(&args.input)?;
    info!("input file size: 0x{:X}", input.len());

    if args.list {
        return run_list_mode(&input);
    }

    let config = ScanConfig { num_threads: args.threads, ..Default::default() };

    let mut sink = FileSink::new(&args.input).with_extension(args.extension.as_str());
    if let Some(dir) = &args.output_dir {
        sink = sink.with_output_dir(dir);
    }

    let start = std::time::Instant::now();
    let stats = unyaz::extract(&input, &mut sink, config)?;
    let elapsed = start.elapsed();

    if args.verbose {
        eprintln!("Extraction complete:");
        eprintln!("  Input bytes:      {}", stats.input_bytes);
        eprintln!("  Streams:          {}", stats.streams_extracted);
        eprintln!("  Compressed bytes: {}", stats.compressed_bytes);
        eprintln!("  Output bytes:     {}", stats.bytes_written);
        eprintln!("  Time:             {:.2?}", elapsed);
        if let Some(rate) = throughput_mb_per_sec(stats.bytes_written, elapsed) {
            eprintln!("  Throughput:       {:.1} MB/s", rate);
        }
    }

    Ok(())
}

/// `None` when the run was too quick to time
fn throughput_mb_per_sec(bytes: u64, elapsed: Duration) -> Option<f64> {
    let secs = elapsed.as_secs_f64();
    (secs > 0.0).then(|| bytes as f64 / secs / 1_000_000.0)
}

fn run_list_mode(input: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    println!("offset\tuncompressed\tcompressed\talignment");

    for located in StreamLocator::new(input) {
        let extent = located?;
        println!(
            "0x{:x}\t{}\t{}\t{}",
            extent.offset,
            extent.uncompressed_size(),
            extent.end() - extent.offset,
            extent.header.alignment()
        );
    }

    Ok(())
}
