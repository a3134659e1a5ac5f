//! Unit tests for suite configuration.
//!
//! - [`helpers`] - Shared fixtures and helper functions
//! - [`types_tests`] - Defaults, serialisation and tag matching
//! - [`layer_precedence_tests`] - `MergeComposer` layer precedence tests
//! - [`loader_tests`] - Environment collection and loader validation

mod helpers;
