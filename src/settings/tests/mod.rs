//! Unit tests for the settings context.
