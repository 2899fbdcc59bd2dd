//! Time calls and record them as rows of a Markdown table.
//!
//! [`timer`] measures how long a computation takes; [`row`] appends a
//! description of the call to a log file. The two are independent: callers
//! time first, then log.

pub mod row;
pub mod timer;

pub use row::{log_row, Row};
pub use timer::{timed, timed_async, try_timed, try_timed_async, Timed};
