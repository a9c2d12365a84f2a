//! Reporting of resolved IR positions and FASTA export of the extracted
//! sequences.

use crate::ir::IrPair;
use crate::record::PlastidRecord;
use anyhow::{anyhow, Result};
use bio::alphabets::dna::revcomp;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Reported IR positions of one record, in the 1-based inclusive
/// coordinates GenBank prints. Unresolved sides stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrReport {
    pub ira_reported: bool,
    pub ira_start: Option<i64>,
    pub ira_end: Option<i64>,
    pub ira_len: Option<i64>,
    pub irb_reported: bool,
    pub irb_start: Option<i64>,
    pub irb_end: Option<i64>,
    pub irb_len: Option<i64>,
}

impl IrReport {
    pub fn from_pair(pair: &IrPair, record_len: i64) -> Self {
        let mut report = Self::default();
        if let Some(ira) = pair.ira {
            report.ira_reported = true;
            report.ira_start = Some(ira.start + 1);
            report.ira_end = Some(ira.end);
            report.ira_len = Some(ira.len_in(record_len));
        }
        if let Some(irb) = pair.irb {
            report.irb_reported = true;
            report.irb_start = Some(irb.start + 1);
            report.irb_end = Some(irb.end);
            report.irb_len = Some(irb.len_in(record_len));
        }
        report
    }
}

/// Write the extracted IR sequences to FASTA files in `out_dir`, one
/// file per repeat (`<acc>_IRa.fasta`, `<acc>_IRb_revComp.fasta`).
/// With `rev_comp_irb` set, IRb is written as its reverse complement,
/// per the orientation check.
pub fn write_irs_to_fasta(
    record: &PlastidRecord,
    pair: &IrPair,
    rev_comp_irb: bool,
    out_dir: &Path,
) -> Result<()> {
    let accession = record.accession().unwrap_or("record").replace(' ', "_");
    if let Some(ira) = &pair.ira {
        let bases = record
            .extract_region(ira)
            .ok_or_else(|| anyhow!("IRa coordinates {}..{} lie outside the sequence", ira.start, ira.end))?;
        let header = format!("{accession}_IRa");
        write_fasta(&out_dir.join(format!("{header}.fasta")), &header, &bases)?;
    }
    if let Some(irb) = &pair.irb {
        let mut bases = record
            .extract_region(irb)
            .ok_or_else(|| anyhow!("IRb coordinates {}..{} lie outside the sequence", irb.start, irb.end))?;
        if rev_comp_irb {
            bases = revcomp(&bases);
        }
        let header = format!("{accession}_IRb_revComp");
        write_fasta(&out_dir.join(format!("{header}.fasta")), &header, &bases)?;
    }
    Ok(())
}

fn write_fasta(path: &Path, header: &str, bases: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, ">{header}")?;
    for chunk in bases.chunks(80) {
        file.write_all(chunk)?;
        file.write_all(b"\n")?;
    }
    Ok(())
}
