//! File I/O
//!
//! - [`table`]: raw sensor CSV exports and labeled datasets
//! - [`save`] / [`load`]: policy artifacts in JSON or YAML

mod format;
mod load;
mod save;
pub mod table;

pub use format::{PolicyFormat, SaveConfig};
pub use load::{load_policy, policy_from_str};
pub use save::{policy_to_string, save_policy};
pub use table::{read_dataset, write_dataset, RawTable};
