//! Integration tests for the processor module
//!
//! Tests the complete cleaning pipeline over synthetic BRFSS extracts.
