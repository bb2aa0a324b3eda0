//! Wire types for the Luma Dream Machine API (photon image generation).

pub mod generation;
