//! Named validation scenarios.

pub mod dam_break;
pub mod free_fall;
pub mod opposed_pair;
pub mod rigid_translation;
