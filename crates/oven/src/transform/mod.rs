//! The transform library.
//!
//! Each transform validates its intensity, derives the codec parameters and
//! makes a single codec call. Parameter derivation is exposed separately as
//! pure functions so the numeric policy can be tested without images.
//!
//! | Transform | Intensity domain | Derived parameter |
//! |---|---|---|
//! | [`stretch`] | any (bounded by output size) | `W * (1 + i/200)` x `H / (1 + i/200)` |
//! | [`saturate`] | `>= -100` | multiplier `1 + i/100` |
//! | [`reduce_file_size`] | integer in `1..=100` | quality `100 - (i - 1)` |
//! | [`reduce_resolution`] | `>= 0` | both sides times `1 / (0.01 * i + 1)`, at least 1 |

mod reduce_file_size;
mod reduce_resolution;
mod saturate;
mod stretch;

pub use reduce_file_size::{quality_for, reduce_file_size};
pub use reduce_resolution::{reduce_resolution, reduced_dimensions, resolution_multiplier};
pub use saturate::{saturate, saturation_multiplier};
pub use stretch::{stretch, stretch_dimensions, MAX_HEIGHT, MAX_WIDTH};
