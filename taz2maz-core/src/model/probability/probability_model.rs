use super::{build_distribution, CumulativeDistribution, GroupKey};
use crate::model::{
    segment::{Segment, SegmentCoefficientTable},
    size_term::{SizeTable, SizeTermModel},
    zone::{CoarseZoneId, ZoneAttributeTable},
    DisaggregationError,
};
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// owns the cumulative distribution of every (segment, coarse zone) group. built once,
/// then only read while trips are sampled.
#[derive(Clone, Debug)]
pub struct ProbabilityModel {
    distributions: HashMap<GroupKey, CumulativeDistribution>,
    segments: HashSet<Segment>,
    degenerate_groups: Vec<GroupKey>,
}

impl ProbabilityModel {
    /// builds one distribution per group of the size table. groups are independent and
    /// are built in parallel.
    pub fn build(sizes: &SizeTable) -> Result<ProbabilityModel, DisaggregationError> {
        let start = std::time::Instant::now();
        let distributions = sizes
            .groups
            .par_iter()
            .map(|(key, members)| {
                let distribution = build_distribution(members).map_err(|e| {
                    DisaggregationError::BuildError(format!("while building {key}: {e}"))
                })?;
                Ok((key.clone(), distribution))
            })
            .collect::<Result<HashMap<_, _>, DisaggregationError>>()?;

        log::info!(
            "built {} fine zone distributions across {} segments in {:?}",
            distributions.len(),
            sizes.segments.len(),
            start.elapsed()
        );

        Ok(ProbabilityModel {
            distributions,
            segments: sizes.segments.iter().cloned().collect(),
            degenerate_groups: sizes.degenerate_groups.clone(),
        })
    }

    /// computes sizes from the zone and coefficient tables and builds the distributions.
    pub fn from_tables(
        zones: &ZoneAttributeTable,
        coefficients: &SegmentCoefficientTable,
        size_term_model: &SizeTermModel,
    ) -> Result<ProbabilityModel, DisaggregationError> {
        let sizes = size_term_model.build(zones, coefficients)?;
        ProbabilityModel::build(&sizes)
    }

    /// the distribution for a segment within a coarse zone. a missing group means the
    /// coarse zone has no fine zones or the segment is unknown.
    pub fn query(
        &self,
        segment: &Segment,
        coarse_zone: CoarseZoneId,
    ) -> Result<&CumulativeDistribution, DisaggregationError> {
        let key = GroupKey::new(segment.clone(), coarse_zone);
        match self.distributions.get(&key) {
            Some(d) => Ok(d),
            None => Err(DisaggregationError::MappingError {
                key,
                trip_index: None,
            }),
        }
    }

    pub fn get(&self, key: &GroupKey) -> Option<&CumulativeDistribution> {
        self.distributions.get(key)
    }

    pub fn contains_segment(&self, segment: &Segment) -> bool {
        self.segments.contains(segment)
    }

    /// known segments, sorted.
    pub fn segments(&self) -> Vec<&Segment> {
        self.segments.iter().sorted().collect_vec()
    }

    pub fn n_distributions(&self) -> usize {
        self.distributions.len()
    }

    pub fn degenerate_groups(&self) -> &[GroupKey] {
        &self.degenerate_groups
    }
}
