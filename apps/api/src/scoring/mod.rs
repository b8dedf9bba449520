// Scoring core: fit, rigor, competitiveness, bucketing, recommendation and search.
// Everything except `handlers` is pure and synchronous.

pub mod bucket;
pub mod competitiveness;
pub mod fit;
pub mod handlers;
pub mod recommend;
pub mod rigor;
pub mod search;
