//! Shared test utilities for alm-store unit tests.
