//! CLI command implementations.

mod enrich;
mod roster;
mod vendors;

pub use enrich::cmd_enrich;
pub use roster::{cmd_select, cmd_show};
pub use vendors::cmd_vendors;
