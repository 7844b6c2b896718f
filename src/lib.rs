//! hoodscout - Collect and classify OpenStreetMap points of interest into
//! neighborhood-character categories

pub mod api;
pub mod classify;
pub mod config;
pub mod domain;
pub mod osm;
pub mod pipeline;
