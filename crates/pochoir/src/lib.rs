//! # Pochoir
//!
//! A small reactive template binding runtime written in Rust.
//!
//! Pochoir observes a data object, walks a template mounted in a render tree
//! once, and keeps the two in sync: text interpolations and `v-model`
//! inputs re-render when the data they read changes, and `v-model` / event
//! bindings write back into the data.
//!
//! ```
//! use pochoir::{App, AppOptions};
//! use pochoir::toile::Document;
//!
//! let doc = Document::parse(r#"<div id="app"><p>Hello {{ name }}</p></div>"#).unwrap();
//! let app = App::mount(
//!     AppOptions::new("#app").data(serde_json::json!({ "name": "World" })),
//!     doc.clone(),
//! )
//! .unwrap();
//! assert_eq!(doc.inner_html(app.root()), "<p>World</p>");
//!
//! app.data().set("name", "Pochoir").unwrap();
//! assert_eq!(doc.inner_html(app.root()), "<p>Pochoir</p>");
//! ```
//!
//! ## Crates
//!
//! - [`carton`] - Shared collections and string helpers
//! - [`relief`] - Node handles, the render tree trait, options and errors
//! - [`croquis`] - Observation, dependency registries and watchers
//! - [`atelier`] - Template compiler and binding strategies
//! - [`toile`] - In-memory render tree

pub mod config;

use std::rc::Rc;

use pochoir_atelier::{BindingContext, Compiler, El, Method, Methods};
use pochoir_croquis::{observe_json, EvalScope, ObjectRef, Watcher};
use pochoir_relief::{CompilerOptions, Event, NodeId, RenderTree, Result};

pub use config::{load_config, CompilerConfig, PochoirConfig, POCHOIR_CONFIG_SCHEMA};

/// Shared collections and string helpers.
pub use pochoir_carton as carton;

/// Node handles, the render tree trait, options and errors.
pub use pochoir_relief as relief;

/// Observation, dependency registries and watchers.
pub use pochoir_croquis as croquis;

/// Template compiler and binding strategies.
pub use pochoir_atelier as atelier;

/// In-memory render tree.
pub use pochoir_toile as toile;

/// What to mount, against which data and handlers.
pub struct AppOptions {
    pub el: El,
    pub data: serde_json::Value,
    pub methods: Methods,
    pub options: CompilerOptions,
}

impl AppOptions {
    pub fn new(el: impl Into<El>) -> Self {
        Self {
            el: el.into(),
            data: serde_json::Value::Object(Default::default()),
            methods: Methods::default(),
            options: CompilerOptions::default(),
        }
    }

    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Declare an event handler usable from `v-on:<event>` / `@<event>`.
    pub fn method(
        mut self,
        name: &str,
        handler: impl Fn(&ObjectRef, &Event) -> Result<()> + 'static,
    ) -> Self {
        let handler: Method = Rc::new(handler);
        self.methods.insert(name.into(), handler);
        self
    }

    pub fn options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }

    /// Apply the compiler section of a loaded configuration file.
    pub fn config(self, config: &PochoirConfig) -> Self {
        self.options(config.compiler.to_options())
    }
}

/// A mounted application.
#[derive(Debug)]
pub struct App {
    compiler: Compiler,
}

impl App {
    /// Observe `options.data`, then compile `options.el` in `host`.
    pub fn mount(options: AppOptions, host: Rc<dyn RenderTree>) -> Result<Self> {
        let AppOptions {
            el,
            data,
            methods,
            options,
        } = options;

        let scope = EvalScope::new();
        let data = observe_json(data, &scope);
        let ctx = BindingContext::new(data, scope, methods, host);
        let compiler = Compiler::with_options(el, ctx, &options)?;

        tracing::debug!(root = %compiler.root(), watchers = compiler.watchers().len(), "mounted");
        Ok(Self { compiler })
    }

    /// The observed data object.
    pub fn data(&self) -> &ObjectRef {
        &self.compiler.context().data
    }

    pub fn watchers(&self) -> &[Rc<Watcher>] {
        self.compiler.watchers()
    }

    pub fn root(&self) -> NodeId {
        self.compiler.root()
    }

    pub fn context(&self) -> &BindingContext {
        self.compiler.context()
    }

    /// Detach every watcher from the data. The rendered tree keeps its last
    /// state and event listeners stay attached.
    pub fn teardown(&self) {
        for watcher in self.compiler.watchers() {
            watcher.teardown();
        }
        tracing::debug!(root = %self.root(), "torn down");
    }
}
