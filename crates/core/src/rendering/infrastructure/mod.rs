pub mod font_resolver;
pub mod image_canvas;
pub mod image_overlay_writer;
