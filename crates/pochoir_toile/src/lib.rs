//! Toile - The canvas Pochoir paints on.
//!
//! An in-memory [`RenderTree`](pochoir_relief::RenderTree) implementation.
//! It is what the test suites mount templates into, and it is small enough
//! to serve as a reference for hosts backed by a real DOM.
//!
//! ```
//! use pochoir_relief::RenderTree;
//! use pochoir_toile::Document;
//!
//! let doc = Document::parse(r#"<div id="app"><p>{{ msg }}</p></div>"#).unwrap();
//! let app = doc.query_selector("#app").unwrap();
//! assert_eq!(doc.inner_html(app), "<p>{{ msg }}</p>");
//! ```

mod document;
mod parse;
mod serialize;

pub use document::Document;
pub use parse::ParseError;
