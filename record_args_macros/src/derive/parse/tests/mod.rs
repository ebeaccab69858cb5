//! Unit tests for attribute parsing helpers.
