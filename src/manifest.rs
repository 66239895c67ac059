//! Human-readable manifest of recovered candidates.

use std::io::Write;

use crate::candidate::Candidate;
use crate::error::Result;

/// Writes one block per candidate: a header line with virtual address and
/// file offset, a row per entry, and a totals line.
pub fn write_manifest<W: Write>(writer: &mut W, candidates: &[Candidate<'_>]) -> Result<()> {
    for candidate in candidates {
        writeln!(
            writer,
            "Candidate VA: {:#x} FO: {:#x}",
            candidate.addr,
            candidate.file_offset()
        )?;
        writeln!(
            writer,
            "{:>3} {:>9} {:<32} {:<11} {}",
            "", "Size", "Hash", "File offset", "Name"
        )?;

        let mut total_size: u64 = 0;
        let mut dirs: u64 = 0;

        for (i, entry) in candidate.entries().enumerate() {
            let entry = entry?;
            let offset = candidate.file_offset() + candidate.entry_size() * i as u64;
            writeln!(
                writer,
                "{:<3} {:>9} {:<32} {:<#11x} {}",
                i,
                entry.data.size,
                hex16(&entry.hash),
                offset,
                entry.name
            )?;

            total_size += entry.data.size;
            if entry.is_dir {
                dirs += 1;
            }
        }

        writeln!(
            writer,
            "[+] Total Size: {} (bytes) {} files {} folders",
            total_size,
            candidate.entry_count - dirs,
            dirs
        )?;
        writeln!(writer)?;
    }

    Ok(())
}

fn hex16(hash: &[u8; 16]) -> String {
    let mut out = String::with_capacity(32);
    for b in hash {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
