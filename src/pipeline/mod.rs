//! Pipeline entry points for calendar operations.
//!
//! - `run_sync`: Fetch the feed into an application state
//! - `run_list`: Print the list view
//! - `run_month`: Print the month grid
//! - `run_show`: Print one event in detail
//! - `run_validate`: Check configuration

pub mod list;
pub mod month;
pub mod show;
pub mod sync;
pub mod validate;

pub use list::{render_list, run_list};
pub use month::{render_month, run_month};
pub use show::{render_detail, run_show};
pub use sync::{run_sync, sync_with};
pub use validate::run_validate;
