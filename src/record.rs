//! A plastid genome record: a gb-io sequence plus the accessors the IR
//! resolver needs.

use crate::ir::IrRegion;
use anyhow::Result;
use gb_io::seq::{Feature, FeatureKind, Seq, Topology};

#[derive(Clone, Debug)]
pub struct PlastidRecord {
    seq: Seq,
}

impl PlastidRecord {
    pub fn new(seq: Seq) -> Self {
        Self { seq }
    }

    /// Build a record from raw parts. Mainly for callers that obtain
    /// annotations from sources other than GenBank flat files.
    pub fn from_parts(sequence: Vec<u8>, circular: bool, features: Vec<Feature>) -> Self {
        let seq = Seq {
            name: None,
            topology: if circular {
                Topology::Circular
            } else {
                Topology::Linear
            },
            date: None,
            len: Some(sequence.len()),
            molecule_type: None,
            division: String::new(),
            definition: None,
            accession: None,
            version: None,
            source: None,
            dblink: None,
            keywords: None,
            references: vec![],
            comments: vec![],
            seq: sequence,
            contig: None,
            features,
        };
        Self { seq }
    }

    pub fn from_genbank_file(filename: &str) -> Result<Vec<PlastidRecord>> {
        Ok(gb_io::reader::parse_file(filename)?
            .into_iter()
            .map(PlastidRecord::new)
            .collect())
    }

    pub fn seq(&self) -> &Seq {
        &self.seq
    }

    pub fn seq_mut(&mut self) -> &mut Seq {
        &mut self.seq
    }

    /// Version-less accession, falling back to the locus name.
    pub fn accession(&self) -> Option<&str> {
        self.seq
            .accession
            .as_deref()
            .or(self.seq.name.as_deref())
            .map(|acc| acc.split('.').next().unwrap_or(acc))
    }

    /// Record length: the parsed sequence when present, else the
    /// LOCUS-declared length (feature-only records).
    pub fn len(&self) -> usize {
        if self.seq.seq.is_empty() {
            self.seq.len.unwrap_or(0)
        } else {
            self.seq.seq.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_circular(&self) -> bool {
        self.seq.topology == Topology::Circular
    }

    pub fn features(&self) -> &[Feature] {
        &self.seq.features
    }

    pub fn features_of_kind(&self, kind: &str) -> Vec<&Feature> {
        let kind = FeatureKind::from(kind);
        self.seq
            .features
            .iter()
            .filter(|feature| feature.kind == kind)
            .collect()
    }

    /// Bases of a half-open range. A range with `end < start` wraps
    /// through the origin on circular records and is unavailable on
    /// linear ones.
    pub fn extract_range(&self, start: i64, end: i64) -> Option<Vec<u8>> {
        let len = self.seq.seq.len() as i64;
        if start < 0 || end < 0 || start > len || end > len {
            return None;
        }
        let (start, end) = (start as usize, end as usize);
        if start <= end {
            Some(self.seq.seq[start..end].to_vec())
        } else if self.is_circular() {
            Some(
                self.seq.seq[start..]
                    .iter()
                    .chain(self.seq.seq[..end].iter())
                    .copied()
                    .collect(),
            )
        } else {
            None
        }
    }

    /// Bases of an IR region, reverse-complemented when the region was
    /// annotated on the complement strand.
    pub fn extract_region(&self, region: &IrRegion) -> Option<Vec<u8>> {
        let bases = self.extract_range(region.start, region.end)?;
        if region.reverse {
            Some(bio::alphabets::dna::revcomp(&bases))
        } else {
            Some(bases)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gb_io::seq::Location;

    fn feature(kind: &str, start: i64, end: i64) -> Feature {
        Feature {
            kind: FeatureKind::from(kind),
            location: Location::simple_range(start, end),
            qualifiers: vec![],
        }
    }

    #[test]
    fn features_of_kind_filters() {
        let record = PlastidRecord::from_parts(
            b"ATGC".to_vec(),
            true,
            vec![
                feature("repeat_region", 0, 2),
                feature("misc_feature", 1, 3),
                feature("gene", 0, 4),
            ],
        );
        assert_eq!(record.features_of_kind("repeat_region").len(), 1);
        assert_eq!(record.features_of_kind("misc_feature").len(), 1);
        assert_eq!(record.features_of_kind("tRNA").len(), 0);
    }

    #[test]
    fn extract_range_wraps_only_on_circular_records() {
        let mut record = PlastidRecord::from_parts(b"ATGC".to_vec(), false, vec![]);
        assert_eq!(record.extract_range(1, 3), Some(b"TG".to_vec()));
        assert_eq!(record.extract_range(3, 1), None);
        assert_eq!(record.extract_range(0, 5), None);

        record.seq_mut().topology = Topology::Circular;
        assert_eq!(record.extract_range(3, 1), Some(b"CA".to_vec()));
    }

    #[test]
    fn extract_region_respects_strand() {
        let record = PlastidRecord::from_parts(b"AATTGGCC".to_vec(), false, vec![]);
        let forward = IrRegion::new(2, 6);
        assert_eq!(record.extract_region(&forward), Some(b"TTGG".to_vec()));
        let reverse = IrRegion {
            reverse: true,
            ..forward
        };
        assert_eq!(record.extract_region(&reverse), Some(b"CCAA".to_vec()));
    }

    #[test]
    fn declared_length_backs_feature_only_records() {
        let mut record = PlastidRecord::from_parts(vec![], true, vec![]);
        record.seq_mut().len = Some(154_478);
        assert_eq!(record.len(), 154_478);
    }

    #[test]
    fn accession_drops_the_version() {
        let mut record = PlastidRecord::from_parts(vec![], true, vec![]);
        record.seq_mut().accession = Some("NC_012345.1".to_string());
        assert_eq!(record.accession(), Some("NC_012345"));
    }
}
