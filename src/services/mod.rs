pub mod earthquake_api;
