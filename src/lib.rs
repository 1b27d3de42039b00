// The binary entry point is main.rs; the library target carries the whole
// module tree so integration tests and benchmarks can drive the engine.
pub mod app;
pub mod config;
pub mod corpus;
pub mod event;
pub mod keyboard;
pub mod session;
pub mod store;
pub mod ui;
