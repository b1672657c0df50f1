pub mod blend;
pub mod classify;
pub mod engine;
pub mod service;

pub use blend::{blend, blend_weight, top_k};
pub use classify::{classify, respond};
pub use engine::{Engine, Index};
pub use service::FaqService;
