mod edge;
mod node;

pub(crate) mod drawer;

pub use drawer::DrawContext;
