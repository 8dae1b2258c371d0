//! CLI Commands

pub mod complaints;
pub mod levels;
pub mod classify;

pub use complaints::ComplaintsCommand;
pub use levels::LevelsCommand;
pub use classify::ClassifyCommand;
