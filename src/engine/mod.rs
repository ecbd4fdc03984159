// Motor de decodificación con implementaciones específicas por plataforma

#[cfg(target_arch = "wasm32")]
pub mod web;

pub mod traits;

pub use traits::{CaptureSinks, DecodeEngine};
