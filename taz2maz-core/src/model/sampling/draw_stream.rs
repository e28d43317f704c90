use rand::prelude::*;

/// the uniform draws used to sample one trip's origin and destination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TripDraws {
    pub origin: f64,
    pub destination: f64,
}

/// a seeded stream of uniform draws on `[0, 1)`. trips consume the stream in trip-list
/// order, origin draw first and destination draw second, so the draws of trip `i` are
/// the stream values `2i` and `2i + 1`.
pub struct DrawStream {
    rng: StdRng,
}

impl DrawStream {
    pub fn new(seed: u64) -> DrawStream {
        DrawStream {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_draw(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    pub fn next_trip(&mut self) -> TripDraws {
        let origin = self.next_draw();
        let destination = self.next_draw();
        TripDraws {
            origin,
            destination,
        }
    }

    /// draws for the next `n_trips` trips.
    pub fn trip_draws(&mut self, n_trips: usize) -> Vec<TripDraws> {
        (0..n_trips).map(|_| self.next_trip()).collect()
    }
}
