//! Tests for the rental lifecycle service.
