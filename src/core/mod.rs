pub mod cors;
pub mod health;
pub mod launcher;
pub mod process_group;
pub mod readiness;
pub mod signal;
