//! Static site output.
//!
//! - **Templates**: embedded defaults with per-file directory overrides
//! - **Pages**: index, static pages and one page per podcast
//! - **Sitemap**: search engine indexing (`sitemap.xml`)

pub mod pages;
pub mod sitemap;
pub mod templates;

pub use pages::write_site;
pub use templates::TemplateCache;
