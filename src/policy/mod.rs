//! Policy trait and implementations.

pub mod greedy;
pub mod random;
pub mod trait_;

pub use greedy::GreedyPolicy;
pub use random::RandomPolicy;
pub use trait_::Policy;
