//! Kisan is a terminal chatbot client that answers farming questions through
//! a hosted text-generation API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns configuration, the session state machine, the transcript,
//!   the prompt template, and the keyword gate.
//! - [`api`] defines the inference wire payloads and the HTTP client that
//!   converts remote failures into typed results.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`cli`] parses arguments and performs startup checks before the
//!   terminal enters raw mode.
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`) and
//! routes through [`cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
