mod client;

pub use client::EarthquakesApiClient;
