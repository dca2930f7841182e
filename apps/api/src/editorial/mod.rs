// Editorial selection & trending lifecycle.
// trending/selection/paywall are pure; listing/publishing talk to the store.

pub mod handlers;
pub mod listing;
pub mod paywall;
pub mod publishing;
pub mod selection;
pub mod trending;
