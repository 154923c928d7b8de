// Shared Infrastructure

pub mod logging;
