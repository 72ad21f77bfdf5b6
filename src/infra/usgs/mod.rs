mod client;

pub use client::{USGS_BASE_URL, UsgsFeedClient};
