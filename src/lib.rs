// SIGAP PPKS - Guided intake and report-drafting engine
// Library exports

pub mod config;
pub mod crisis;
pub mod curhat;
pub mod dates;
pub mod engine;
pub mod flow;
pub mod gateway;
pub mod providers;
