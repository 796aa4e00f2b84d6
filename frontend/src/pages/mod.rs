pub mod authors;
pub mod events;
pub mod timeline;
