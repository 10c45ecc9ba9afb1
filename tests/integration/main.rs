//! Integration tests for the scrubline binary

mod helpers;

mod cli_test;
mod config_test;
mod thumbs_test;
