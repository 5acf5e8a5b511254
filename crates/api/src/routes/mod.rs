//! HTTP Route Handlers

pub mod climate;
pub mod datasets;
pub mod districts;
pub mod feedback;
pub mod fire;
pub mod predictions;
