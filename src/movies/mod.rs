// src/movies/mod.rs
//! Presentation layer: catalog results shaped as cards with favorite status

pub mod cards;
pub mod handlers;
pub mod routes;


pub use routes::movies_routes;
