//! Landing page generation: rendering, HTML emission and registry patching.
//!
//! The pipeline is deliberately file-based. Pages are written under the
//! configured pages directory and two Rust source files in the consuming
//! site (the route slug registry and the sitemap module) are patched in
//! place through text anchors, so manual entries in those files survive
//! regeneration.

pub mod emitter;
pub mod html;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod schema;
pub mod sitemap;

pub use emitter::{WriteOutcome, write_page};
pub use html::page_html;
pub use pipeline::{
    GenerationSummary, PageFailure, PageRequest, PageResult, PatchOutcome, SinglePageReport,
    generate_all, generate_one,
};
pub use registry::{RegistryPatch, patch_route_registry, read_registry_slugs, seed_route_registry};
pub use render::{PageOverrides, PageSpec, RelatedPage, render_page};
pub use sitemap::{SitemapPatch, patch_sitemap, read_sitemap_urls, seed_sitemap};
