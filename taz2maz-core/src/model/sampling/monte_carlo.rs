use crate::model::{probability::CumulativeDistribution, zone::FineZoneId};

/// binary search for the first position whose cumulative value is greater than or
/// equal to `draw` (the leftmost insertion point). a draw that lands exactly on a
/// boundary selects the zone ending at that boundary, not the next one.
///
/// when `draw` exceeds every value, which only happens through rounding of the final
/// running sum, the last position is returned.
pub fn search_left(cumulative: &[f64], draw: f64) -> usize {
    let idx = cumulative.partition_point(|c| *c < draw);
    idx.min(cumulative.len().saturating_sub(1))
}

/// maps a uniform draw in `[0, 1)` to a fine zone of the distribution.
pub fn sample(distribution: &CumulativeDistribution, draw: f64) -> FineZoneId {
    let idx = search_left(distribution.cumulative(), draw);
    distribution.fine_zones()[idx]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{probability::build_distribution, size_term::ZoneSize};

    fn distribution(values: &[(u64, f64)]) -> CumulativeDistribution {
        let sizes = values
            .iter()
            .map(|(id, s)| ZoneSize {
                fine_zone: FineZoneId(*id),
                size: *s,
            })
            .collect::<Vec<_>>();
        build_distribution(&sizes).expect("test invariant failed")
    }

    #[test]
    fn test_search_is_left_biased() {
        let cumulative = [0.25, 0.5, 1.0];
        assert_eq!(search_left(&cumulative, 0.0), 0);
        assert_eq!(search_left(&cumulative, 0.25), 0);
        assert_eq!(search_left(&cumulative, 0.2500001), 1);
        assert_eq!(search_left(&cumulative, 0.5), 1);
        assert_eq!(search_left(&cumulative, 0.75), 2);
    }

    #[test]
    fn test_search_past_the_end_clamps() {
        let cumulative = [0.5, 0.9999999999];
        assert_eq!(search_left(&cumulative, 0.99999999999), 1);
    }

    #[test]
    fn test_zero_draw_selects_lowest_positive_zone() {
        let d = distribution(&[(5, 0.0), (9, 1.0), (7, 3.0)]);
        assert_eq!(sample(&d, 0.0), FineZoneId(7));
    }

    #[test]
    fn test_draw_near_one_selects_highest_zone() {
        let d = distribution(&[(5, 2.0), (9, 1.0), (7, 3.0)]);
        assert_eq!(sample(&d, 1.0 - f64::EPSILON), FineZoneId(9));
    }

    #[test]
    fn test_uniform_three_zone_group() {
        let d = distribution(&[(1, 0.001), (2, 0.001), (3, 0.001)]);
        assert_eq!(sample(&d, 0.10), FineZoneId(1));
        assert_eq!(sample(&d, 0.50), FineZoneId(2));
        assert_eq!(sample(&d, 0.90), FineZoneId(3));
    }

    #[test]
    fn test_boundary_draw_selects_boundary_zone() {
        let d = distribution(&[(1, 1.0), (2, 1.0)]);
        assert_eq!(d.cumulative(), &[0.5, 1.0]);
        assert_eq!(sample(&d, 0.5), FineZoneId(1));
    }
}
