//! Integration tests for the rewrite core.

mod behaviour;
