pub mod enqueue;
pub mod feed;
pub mod og_image;
pub mod platform;
pub mod resolution;
