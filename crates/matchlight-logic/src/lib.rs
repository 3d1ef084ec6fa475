//! Pure economy logic for Matchlight.
//!
//! This crate contains all reward and cost math that is independent of any
//! storage, state container, or runtime. Functions take plain data and
//! return results, making them unit-testable and portable across the core
//! engine, the headless harness, and any future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`combo`] | Black-dog task qualification and combo bonus math |
//! | [`costs`] | Energy and spirit cost tiers |
//! | [`rewards`] | Quality scaling, early-finish boost, sawdust multiplier |
//! | [`streak`] | Daily-task streak rule over calendar dates |

pub mod combo;
pub mod costs;
pub mod rewards;
pub mod streak;

pub use costs::Tier;
