//! Persistence for the roster and the vendor list.

mod roster;
mod vendors;

pub use roster::{Roster, RosterError};
pub use vendors::{load_vendor_list, read_vendor_list, VendorListError, VENDOR_COLUMN};
