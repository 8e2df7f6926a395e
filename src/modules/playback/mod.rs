pub mod rodio_backend;
pub mod silent_surface;
