//! Configuration section definitions.
//!
//! Each module corresponds to a section in `podpage.toml`:
//!
//! | Module    | TOML Section              | Purpose                          |
//! |-----------|---------------------------|----------------------------------|
//! | `site`    | `[site]`                  | Title, public URL, sitemap floor |
//! | `build`   | `[build]`                 | Paths, cache age, cover size     |
//! | `entries` | `[[pages]]`, `[[podcasts]]` | Static pages and the podcast list |

mod build;
mod entries;
mod site;

pub use build::BuildSectionConfig;
pub use entries::{PageEntry, PodcastEntry};
pub use site::SiteSectionConfig;
