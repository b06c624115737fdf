mod best_pos;
mod heading;
mod hw_monitor;
mod rx_status;
mod rx_status_event;
mod time;
mod version;

pub use best_pos::*;
pub use heading::*;
pub use hw_monitor::*;
pub use rx_status::*;
pub use rx_status_event::*;
pub use time::*;
pub use version::*;
