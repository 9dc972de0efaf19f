pub mod overlay_canvas;
pub mod overlay_renderer;
pub mod overlay_writer;
