//! Taskdesk: backend for a desktop to-do application.
//!
//! Tasks and the dark mode preference are persisted in `PostgreSQL`. A front
//! end talks to [`app::TaskDeskApp`], whose entry points never surface raw
//! errors.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`task`]: Task creation, completion toggling, editing, and listing
//! - [`settings`]: The single preferences record
//! - [`storage`]: Connection pool and schema bootstrap
//! - [`config`]: JSON configuration loading
//! - [`app`]: Front-end command boundary and startup wiring
//! - [`telemetry`]: Tracing subscriber setup

pub mod app;
pub mod config;
pub mod settings;
pub mod storage;
pub mod task;
pub mod telemetry;
