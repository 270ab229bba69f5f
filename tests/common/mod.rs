//! Common test utilities shared across test types
//!
//! - `fixtures.rs` - working-tree builder with file-age backdating
