use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use memmap2::Mmap;
use normalize_path::NormalizePath;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use embedrip::{
    binary, manifest, scan, Candidate, Executable, FileTree, ScanConfig, DEFAULT_CHUNK_SIZE,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the target binary.
    binary: PathBuf,

    /// Chunk size in bytes for the section scan.
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: u64,

    /// Extract recovered files into the current directory.
    #[arg(short, long)]
    extract: bool,

    /// Write a candidate manifest to `<basename>.manifest`.
    #[arg(short, long)]
    manifest: bool,

    /// Write a sorted file tree to `<basename>.tree`.
    #[arg(short, long)]
    tree: bool,

    /// Emit scan diagnostics.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let mut args = Args::parse();
    init_tracing(args.verbose);

    // Chunk size must stay a multiple of two.
    args.chunk_size += args.chunk_size % 2;

    let file = File::open(&args.binary)
        .with_context(|| format!("failed to open {}", args.binary.display()))?;
    let mmap = unsafe { Mmap::map(&file)? };

    let exe = binary::detect(&mmap)?;
    println!("[+] Detected format: {}", exe.format_name());

    let section = exe.rodata()?;
    debug!(
        "section {:?}: VA range {:#x}-{:#x}, file offset {:#x}, file size {}, ptr {}",
        section.name,
        section.virtual_addr + section.base_addr,
        section.virtual_addr + section.virtual_size + section.base_addr,
        section.file_offset,
        section.file_size,
        section.ptr_size
    );

    let config = ScanConfig {
        chunk_size: args.chunk_size,
    };

    let start = Instant::now();
    let candidates = scan::find_candidates(&section, &config);
    let elapsed = start.elapsed();

    // Clamp the divisor; sub-millisecond scans are common on small
    // sections.
    let throughput = section.file_size / (elapsed.as_millis().max(1) as u64);
    println!(
        "[+] Candidate(s) found: {}. Took {:?} (~{} B/ms)",
        candidates.len(),
        elapsed,
        throughput
    );

    if args.extract {
        extract(&candidates)?;
    }
    if args.manifest {
        let path = output_name(&args.binary, "manifest");
        let mut writer = BufWriter::new(File::create(&path)?);
        manifest::write_manifest(&mut writer, &candidates)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    if args.tree {
        let mut tree = FileTree::new();
        for candidate in &candidates {
            for entry in candidate.entries().filter_map(|e| e.ok()) {
                tree.insert(&entry.name, entry.is_dir);
            }
        }
        let path = output_name(&args.binary, "tree");
        let mut writer = BufWriter::new(File::create(&path)?);
        tree.write_sorted(&mut writer)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "embedrip=debug" } else { "embedrip=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// `<basename>.<ext>` in the current directory.
fn output_name(binary: &Path, ext: &str) -> PathBuf {
    let base = binary
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    PathBuf::from(format!("{base}.{ext}"))
}

/// Writes every recovered file under its stored name.
///
/// Names are normalized lexically and must stay inside the current
/// directory; an escaping name aborts the extraction.
fn extract(candidates: &[Candidate<'_>]) -> Result<()> {
    let root = std::env::current_dir()?;

    for candidate in candidates {
        for entry in candidate.entries() {
            let entry = entry?;

            let path = root.join(&entry.name).normalize();
            if !path.starts_with(&root) {
                return Err(anyhow!("path traversal in entry name {:?}", entry.name));
            }

            if entry.is_dir {
                fs::create_dir_all(&path)?;
            } else {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, entry.read()?)?;
            }
        }
    }

    Ok(())
}
