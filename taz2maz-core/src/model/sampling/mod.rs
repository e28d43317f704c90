mod draw_stream;
mod monte_carlo;

pub use draw_stream::{DrawStream, TripDraws};
pub use monte_carlo::{sample, search_left};
