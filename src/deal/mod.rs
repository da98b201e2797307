//! Dealing policies: how the deck is ordered and whether starting hands are
//! rebalanced.
//!
//! Both concerns are trait-based so they can be swapped per session:
//! - `ShuffleStrategy`: `UniformShuffle`, `RankSortedShuffle`
//! - `DealBiasPolicy`: `FairDeal`, `WeightedTowardPlayer`
//!
//! `ShuffleKind` and `DealBias` are the serializable forms used in
//! `TongitsConfig`.

pub mod policy;
pub mod shuffle;

pub use policy::{
    hand_strength, DealAdjustment, DealBias, DealBiasPolicy, FairDeal, WeightedTowardPlayer,
    PAIR_BONUS, TRIPLE_BONUS,
};
pub use shuffle::{shuffle, RankSortedShuffle, ShuffleKind, ShuffleStrategy, UniformShuffle};
