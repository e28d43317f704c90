use super::{SizeTable, ZoneSize};
use crate::model::{
    probability::GroupKey,
    segment::{Segment, SegmentCoefficientTable, SegmentCoefficients},
    zone::{CoarseZoneId, ZoneAttributeTable},
    DisaggregationError,
};
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashMap;

/// value assigned to every fine zone of a group whose sizes sum to exactly zero, which
/// turns that group's distribution into a uniform one.
pub const DEFAULT_ZERO_SIZE_SUBSTITUTE: f64 = 0.001;

/// computes `size = sum(attribute_i * weight_i)` for every fine zone and segment.
#[derive(Clone, Debug)]
pub struct SizeTermModel {
    zero_size_substitute: f64,
}

impl Default for SizeTermModel {
    fn default() -> Self {
        SizeTermModel {
            zero_size_substitute: DEFAULT_ZERO_SIZE_SUBSTITUTE,
        }
    }
}

impl SizeTermModel {
    pub fn new(zero_size_substitute: f64) -> Result<SizeTermModel, DisaggregationError> {
        if !zero_size_substitute.is_finite() || zero_size_substitute <= 0.0 {
            return Err(DisaggregationError::BuildError(format!(
                "zero size substitute must be a positive number, found {zero_size_substitute}"
            )));
        }
        Ok(SizeTermModel {
            zero_size_substitute,
        })
    }

    /// computes sizes for every segment in the coefficient table, grouped by coarse zone,
    /// applying the zero-total substitution to degenerate groups.
    pub fn build(
        &self,
        zones: &ZoneAttributeTable,
        coefficients: &SegmentCoefficientTable,
    ) -> Result<SizeTable, DisaggregationError> {
        let per_segment = coefficients
            .iter()
            .collect_vec()
            .into_par_iter()
            .map(|(segment, c)| self.build_segment(zones, segment, c))
            .collect::<Result<Vec<_>, DisaggregationError>>()?;

        let mut table = SizeTable {
            segments: coefficients.segments().cloned().collect(),
            ..Default::default()
        };
        for (groups, degenerate) in per_segment.into_iter() {
            table.groups.extend(groups);
            table.degenerate_groups.extend(degenerate);
        }
        table.degenerate_groups.sort();
        if !table.degenerate_groups.is_empty() {
            log::info!(
                "{} of {} (segment, coarse zone) groups had zero total size and were made uniform",
                table.degenerate_groups.len(),
                table.n_groups()
            );
        }
        Ok(table)
    }

    fn build_segment(
        &self,
        zones: &ZoneAttributeTable,
        segment: &Segment,
        coefficients: &SegmentCoefficients,
    ) -> Result<(HashMap<GroupKey, Vec<ZoneSize>>, Vec<GroupKey>), DisaggregationError> {
        let sizes = zone_sizes(zones, segment, coefficients)?;

        let mut groups: HashMap<CoarseZoneId, Vec<ZoneSize>> = HashMap::new();
        for (zone, size) in zones.zones().iter().zip(sizes) {
            groups.entry(zone.coarse_zone).or_default().push(ZoneSize {
                fine_zone: zone.id,
                size,
            });
        }

        let mut degenerate = vec![];
        let result = groups
            .into_iter()
            .map(|(coarse_zone, mut members)| {
                let key = GroupKey::new(segment.clone(), coarse_zone);
                let total: f64 = members.iter().map(|m| m.size).sum();
                if total == 0.0 {
                    log::debug!(
                        "{key} has zero total size over {} fine zones, using uniform sizes",
                        members.len()
                    );
                    for member in members.iter_mut() {
                        member.size = self.zero_size_substitute;
                    }
                    degenerate.push(key.clone());
                }
                (key, members)
            })
            .collect();
        Ok((result, degenerate))
    }
}

/// weighted attribute sums for one segment, aligned with the zone table rows.
/// coefficient attributes absent from the zone table contribute nothing.
pub fn zone_sizes(
    zones: &ZoneAttributeTable,
    segment: &Segment,
    coefficients: &SegmentCoefficients,
) -> Result<Vec<f64>, DisaggregationError> {
    let mut weights = vec![0.0; zones.attribute_names().len()];
    for (name, weight) in coefficients.weights.iter() {
        match zones.attribute_index(name) {
            Some(idx) => weights[idx] += weight,
            None if *weight != 0.0 => {
                log::warn!(
                    "segment '{segment}' weights attribute '{name}' which is not in the zone table, treating it as zero"
                );
            }
            None => {}
        }
    }

    zones
        .zones()
        .iter()
        .map(|zone| {
            let size: f64 = zone
                .attributes
                .iter()
                .zip(weights.iter())
                .map(|(a, w)| a * w)
                .sum();
            if !size.is_finite() || size < 0.0 {
                return Err(DisaggregationError::InvalidSize {
                    segment: segment.clone(),
                    fine_zone: zone.id,
                    size,
                });
            }
            Ok(size)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{
        segment::SegmentCoefficientRecord,
        zone::{FineZone, FineZoneId},
    };

    fn zones() -> ZoneAttributeTable {
        let names = vec![String::from("TOTHH"), String::from("RETEMPN")];
        let rows = vec![
            FineZone::new(FineZoneId(1), CoarseZoneId(10), vec![5.0, 0.0]),
            FineZone::new(FineZoneId(2), CoarseZoneId(10), vec![5.0, 10.0]),
            FineZone::new(FineZoneId(3), CoarseZoneId(20), vec![2.0, 0.0]),
            FineZone::new(FineZoneId(4), CoarseZoneId(20), vec![1.0, 0.0]),
        ];
        ZoneAttributeTable::new(names, rows).expect("test invariant failed")
    }

    fn coefficients(rows: &[(&str, &str, &[(&str, f64)])]) -> SegmentCoefficientTable {
        let records = rows
            .iter()
            .map(|(p, s, w)| SegmentCoefficientRecord {
                purpose: p.to_string(),
                segment: s.to_string(),
                weights: w.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            })
            .collect_vec();
        SegmentCoefficientTable::try_from(&records[..]).expect("test invariant failed")
    }

    #[test]
    fn test_weighted_sum() {
        let c = coefficients(&[("shopping", "shopping", &[("TOTHH", 0.5), ("RETEMPN", 2.0)])]);
        let segment = Segment::from("shopping");
        let coef = c.get(&segment).expect("test invariant failed");
        let sizes = zone_sizes(&zones(), &segment, coef).expect("sizes should compute");
        assert_eq!(sizes, vec![2.5, 22.5, 1.0, 0.5]);
    }

    #[test]
    fn test_missing_attribute_contributes_zero() {
        let c = coefficients(&[("school", "high", &[("TOTHH", 1.0), ("HSENROLL", 3.0)])]);
        let segment = Segment::from("school_high");
        let coef = c.get(&segment).expect("test invariant failed");
        let sizes = zone_sizes(&zones(), &segment, coef).expect("sizes should compute");
        assert_eq!(sizes, vec![5.0, 5.0, 2.0, 1.0]);
    }

    #[test]
    fn test_zero_group_is_substituted() {
        let c = coefficients(&[("eatout", "eatout", &[("RETEMPN", 1.0)])]);
        let table = SizeTermModel::default()
            .build(&zones(), &c)
            .expect("sizes should build");
        let degenerate = GroupKey::new(Segment::from("eatout"), CoarseZoneId(20));
        let normal = GroupKey::new(Segment::from("eatout"), CoarseZoneId(10));
        assert_eq!(table.degenerate_groups, vec![degenerate.clone()]);
        assert!(table.is_degenerate(&degenerate));
        assert!(!table.is_degenerate(&normal));
        let sizes = table.get(&degenerate).expect("group should exist");
        assert!(sizes.iter().all(|s| s.size == DEFAULT_ZERO_SIZE_SUBSTITUTE));
        let sizes = table.get(&normal).expect("group should exist");
        assert_eq!(sizes.iter().map(|s| s.size).collect_vec(), vec![0.0, 10.0]);
    }

    #[test]
    fn test_negative_size_is_rejected() {
        let c = coefficients(&[("social", "social", &[("TOTHH", -1.0)])]);
        let result = SizeTermModel::default().build(&zones(), &c);
        assert!(matches!(
            result,
            Err(DisaggregationError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_substitute_must_be_positive() {
        assert!(SizeTermModel::new(0.0).is_err());
        assert!(SizeTermModel::new(f64::NAN).is_err());
        assert!(SizeTermModel::new(0.5).is_ok());
    }
}
