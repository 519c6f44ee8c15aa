pub mod jsonld;
pub mod keywords;
pub mod links;
pub mod meta;
pub mod sitemap;

pub use jsonld::blog_posting_jsonld;
pub use keywords::generate_keywords;
pub use links::add_internal_links;
pub use meta::{build_meta_tags, canonical_url, optimize_description, optimize_title};
pub use sitemap::generate_sitemap;
