use super::{DisaggregationConfig, DisaggregationResult, UnmappedTrip, UnmappedTripPolicy};
use crate::model::{
    probability::{GroupKey, ProbabilityModel},
    sampling::{sample, DrawStream, TripDraws},
    segment::{Segment, SegmentClassifier},
    trip::{DisaggregatedTrip, Trip},
    DisaggregationError,
};
use itertools::Itertools;
use rayon::prelude::*;

/// samples a fine origin and destination zone for every trip of a trip list.
///
/// a run happens in three phases:
///   1. classify every trip end into a segment and confirm that each segment has
///      coefficients. an unknown segment fails the run before any sampling.
///   2. generate the draws from a single seeded stream in trip-list order.
///   3. sample each trip independently against the read-only [`ProbabilityModel`].
///      results are collected by trip index, so parallelism does not change them.
pub struct DisaggregationPipeline<'m> {
    model: &'m ProbabilityModel,
    classifier: SegmentClassifier,
    policy: UnmappedTripPolicy,
    seed: u64,
}

impl<'m> DisaggregationPipeline<'m> {
    pub fn new(model: &'m ProbabilityModel, config: &DisaggregationConfig) -> Self {
        DisaggregationPipeline {
            model,
            classifier: SegmentClassifier::new(&config.income_segmented_purpose),
            policy: config.on_unmapped,
            seed: config.seed,
        }
    }

    /// origin and destination segment of every trip.
    pub fn classify(&self, trips: &[Trip]) -> Result<Vec<(Segment, Segment)>, DisaggregationError> {
        let segments = trips
            .par_iter()
            .map(|t| {
                let origin = self.classifier.classify(&t.origin_purpose, t.income);
                let destination = self.classifier.classify(&t.destination_purpose, t.income);
                (origin, destination)
            })
            .collect::<Vec<_>>();

        let unknown = segments
            .iter()
            .enumerate()
            .flat_map(|(idx, (o, d))| [(idx, o), (idx, d)])
            .filter(|(_, s)| !self.model.contains_segment(s))
            .collect_vec();
        if let Some((trip_index, segment)) = unknown.first() {
            let distinct = unknown.iter().map(|(_, s)| s.as_str()).unique().join(", ");
            log::error!(
                "{} trip ends reference segments missing from the size coefficients: {distinct}",
                unknown.len()
            );
            return Err(DisaggregationError::ConfigurationError {
                segment: (*segment).clone(),
                trip_index: *trip_index,
            });
        }
        Ok(segments)
    }

    /// runs classification and confirms every trip end has a distribution without
    /// sampling. returns each unmapped trip end in trip-list order.
    pub fn validate(&self, trips: &[Trip]) -> Result<Vec<UnmappedTrip>, DisaggregationError> {
        let segments = self.classify(trips)?;
        let model = self.model;
        let unmapped = trips
            .iter()
            .zip(segments)
            .enumerate()
            .flat_map(|(trip_index, (trip, (o, d)))| {
                [
                    GroupKey::new(o, trip.origin_zone),
                    GroupKey::new(d, trip.destination_zone),
                ]
                .into_iter()
                .filter(move |key| model.get(key).is_none())
                .map(move |key| UnmappedTrip { trip_index, key })
            })
            .collect_vec();
        Ok(unmapped)
    }

    /// samples every trip. with [`UnmappedTripPolicy::Fail`] the first unmapped trip, by
    /// trip index, fails the whole run.
    pub fn run<'t>(
        &self,
        trips: &'t [Trip],
    ) -> Result<DisaggregationResult<'t>, DisaggregationError> {
        let start = std::time::Instant::now();
        let segments = self.classify(trips)?;
        let draws = DrawStream::new(self.seed).trip_draws(trips.len());
        log::info!(
            "sampling fine zones for {} trips with seed {}",
            trips.len(),
            self.seed
        );

        let outcomes = trips
            .par_iter()
            .zip(segments.into_par_iter())
            .zip(draws.par_iter())
            .enumerate()
            .map(|(idx, ((trip, (o, d)), draw))| self.sample_trip(idx, trip, o, d, draw))
            .collect::<Vec<_>>();

        let mut result = DisaggregationResult {
            trips: Vec::with_capacity(trips.len()),
            unmapped: vec![],
        };
        for outcome in outcomes.into_iter() {
            match (outcome, self.policy) {
                (Ok(trip), _) => result.trips.push(trip),
                (Err(unmapped), UnmappedTripPolicy::Skip) => {
                    for u in unmapped.iter() {
                        log::warn!(
                            "skipping trip {}: no fine zone distribution for {}",
                            u.trip_index,
                            u.key
                        );
                    }
                    result.unmapped.extend(unmapped);
                }
                (Err(unmapped), UnmappedTripPolicy::Fail) => {
                    return Err(first_mapping_error(unmapped));
                }
            }
        }

        log::info!(
            "sampled {} trips ({} skipped) in {:?}",
            result.trips.len(),
            result.unmapped.len(),
            start.elapsed()
        );
        Ok(result)
    }

    /// samples both ends of one trip. when a trip end has no distribution, every
    /// unmapped end of the trip is returned, origin first.
    fn sample_trip<'t>(
        &self,
        trip_index: usize,
        trip: &'t Trip,
        origin_segment: Segment,
        destination_segment: Segment,
        draws: &TripDraws,
    ) -> Result<DisaggregatedTrip<'t>, Vec<UnmappedTrip>> {
        let origin_key = GroupKey::new(origin_segment, trip.origin_zone);
        let destination_key = GroupKey::new(destination_segment, trip.destination_zone);
        match (self.model.get(&origin_key), self.model.get(&destination_key)) {
            (Some(origin), Some(destination)) => Ok(DisaggregatedTrip {
                trip_index,
                trip,
                origin_fine_zone: sample(origin, draws.origin),
                destination_fine_zone: sample(destination, draws.destination),
                origin_segment: origin_key.segment,
                destination_segment: destination_key.segment,
            }),
            (origin, destination) => {
                let unmapped = [(origin_key, origin), (destination_key, destination)]
                    .into_iter()
                    .filter(|(_, d)| d.is_none())
                    .map(|(key, _)| UnmappedTrip { trip_index, key })
                    .collect_vec();
                Err(unmapped)
            }
        }
    }
}

fn first_mapping_error(unmapped: Vec<UnmappedTrip>) -> DisaggregationError {
    match unmapped.into_iter().next() {
        Some(UnmappedTrip { trip_index, key }) => DisaggregationError::MappingError {
            key,
            trip_index: Some(trip_index),
        },
        None => DisaggregationError::BuildError(String::from(
            "trip failed to sample without an unmapped trip end",
        )),
    }
}
