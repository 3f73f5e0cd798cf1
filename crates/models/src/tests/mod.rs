/// CRUD and relation tests against a live Postgres (skipped when unreachable)
pub mod crud_tests;
