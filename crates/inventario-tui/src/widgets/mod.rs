//! Reusable pieces drawn around and over the tab panels.

pub mod banners;
pub mod form;
pub mod stats_header;
