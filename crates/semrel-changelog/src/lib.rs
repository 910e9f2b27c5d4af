//! Markdown changelog rendering.
//!
//! Renders classified commits into a release title and a Markdown body.
//! Section order follows the rule table of the analyzer.

mod error;
mod options;
mod renderer;
mod template;

pub use error::{RenderError, RenderResult};
pub use options::{
    ChangelogOptions, DATE_FORMAT, DEFAULT_TITLE_TEMPLATE, DockerOptions, GeneratedChangelog,
    NpmOptions, TemplateConfig,
};
pub use renderer::ChangelogRenderer;
pub use template::render_template;
