pub mod images;
pub mod reading;

pub use images::{AltTextReport, ResponsiveImage, audit_images, validate_alt_text};
pub use reading::{calculate_reading_time, suggest_tags};
