//! Text binding.

use std::rc::Rc;

use pochoir_croquis::{get_value, Watcher};
use pochoir_relief::{Error, Result};

use super::BindingSite;
use crate::Compiler;

/// Bind a node's text content.
///
/// With an interpolation, a watcher rewrites the text whenever the captured
/// expression changes, and the text is replaced by the expression's current
/// value right away. Without any open delimiter, the whole value is read
/// once as a property path and never updated. Content with an open
/// delimiter that does not match the pattern is written out verbatim.
pub fn bind_text(compiler: &mut Compiler, site: BindingSite<'_>) -> Result<()> {
    let ctx = compiler.context().clone();
    let node = site.node;

    let value = if compiler.interpolation().has_open_delimiter(site.value) {
        let Some(expression) = compiler.interpolation().capture(site.value) else {
            tracing::debug!(%node, raw = site.value, "unmatched interpolation");
            ctx.host.set_text_content(node, site.value)?;
            return Ok(());
        };
        let host = Rc::clone(&ctx.host);
        let watcher = Watcher::new(expression, &ctx.data, &ctx.scope, move |value| {
            host.set_text_content(node, &value.to_display_string())
                .map_err(Error::from)
        });
        tracing::debug!(%node, expression, watcher = %watcher.id(), "text binding");
        let value = watcher.value();
        compiler.push_watcher(watcher);
        value
    } else {
        tracing::debug!(%node, path = site.value, "static text");
        get_value(&ctx.data, site.value)
    };

    ctx.host.set_text_content(node, &value.to_display_string())?;
    Ok(())
}
