use crate::model::{size_term::ZoneSize, zone::FineZoneId};
use crate::model::DisaggregationError;
use itertools::Itertools;

/// a discrete distribution over the fine zones of one group, stored as running sums
/// ordered by ascending fine zone id. zones with zero probability are not stored, so
/// the cumulative values are strictly increasing and the last is 1.0 up to rounding.
/// never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct CumulativeDistribution {
    fine_zones: Vec<FineZoneId>,
    cumulative: Vec<f64>,
}

impl CumulativeDistribution {
    pub fn fine_zones(&self) -> &[FineZoneId] {
        &self.fine_zones
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn len(&self) -> usize {
        self.fine_zones.len()
    }

    /// a built distribution holds at least one zone.
    pub fn is_empty(&self) -> bool {
        self.fine_zones.is_empty()
    }

    /// the per-zone probabilities recovered from the running sums.
    pub fn probabilities(&self) -> Vec<(FineZoneId, f64)> {
        let mut previous = 0.0;
        self.fine_zones
            .iter()
            .zip(self.cumulative.iter())
            .map(|(id, c)| {
                let p = c - previous;
                previous = *c;
                (*id, p)
            })
            .collect_vec()
    }
}

/// normalizes the sizes of one group into probabilities, drops zones with no
/// probability, sorts by fine zone id and computes the running sum.
pub fn build_distribution(
    members: &[ZoneSize],
) -> Result<CumulativeDistribution, DisaggregationError> {
    let total: f64 = members.iter().map(|m| m.size).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(DisaggregationError::BuildError(format!(
            "cannot normalize {} fine zones with total size {total}",
            members.len()
        )));
    }

    let positive = members
        .iter()
        .map(|m| (m.fine_zone, m.size / total))
        .filter(|(_, p)| *p > 0.0)
        .sorted_by_key(|(id, _)| *id)
        .collect_vec();
    if positive.is_empty() {
        return Err(DisaggregationError::BuildError(format!(
            "no fine zone of {} has a positive probability",
            members.len()
        )));
    }

    let mut fine_zones = Vec::with_capacity(positive.len());
    let mut cumulative = Vec::with_capacity(positive.len());
    let mut running = 0.0;
    for (id, p) in positive.into_iter() {
        running += p;
        fine_zones.push(id);
        cumulative.push(running);
    }

    Ok(CumulativeDistribution {
        fine_zones,
        cumulative,
    })
}
