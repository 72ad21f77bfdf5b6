pub mod earthquakes;
pub mod usgs;
