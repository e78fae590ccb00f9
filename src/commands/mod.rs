//! Editor-level operations composed from the changelog core.
//!
//! Each operation reads a [`Document`](crate::document::Document) and returns
//! a plan: the edits to apply and where the cursor goes. Nothing is mutated
//! here, so a failed operation never leaves a half-edited changelog.

pub mod continue_bullet;
pub mod new_entry;
pub mod update_date;

pub use continue_bullet::plan_continuation;
pub use new_entry::{plan_new_entry, NewEntryPlan, NewEntryRequest};
pub use update_date::{plan_date_update, DateUpdatePlan};
