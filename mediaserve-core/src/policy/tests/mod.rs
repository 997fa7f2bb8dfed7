mod cors_tests;
mod engine_tests;
