pub mod classify;
pub mod compare;
pub mod completion;
pub mod config;
