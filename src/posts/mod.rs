pub mod dtos;
pub mod handlers;
pub mod view;

pub use view::PostView;
