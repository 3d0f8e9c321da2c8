//! Utility modules shared by the feed pipeline and the site generator.

pub mod date;
pub mod html;
pub mod mtime;
pub mod plural;
pub mod slug;
pub mod url;
