//! Embassy tasks

mod control;

pub use control::{control_task, Board, Display};
