//! Two-way input binding.
//!
//! Besides the two update directions, binding writes the current data value
//! into the node's `value` property at once, so an input shows its bound
//! value before the first change.

use std::rc::Rc;

use pochoir_carton::String;
use pochoir_croquis::{set_value, Value, Watcher};
use pochoir_relief::{Error, Event, Result};

use super::BindingSite;
use crate::Compiler;

/// Property of an input-like node that `v-model` drives
pub const MODEL_PROPERTY: &str = "value";

/// Event that carries user input back into the data
pub const MODEL_EVENT: &str = "input";

/// Bind `node.value` to a data path in both directions.
///
/// Data to tree: a watcher writes every new value into the node. Tree to
/// data: an `input` listener writes the node's current value back to the
/// same path. Each direction re-triggers the other once at most; the second
/// write carries an equal value and stops there.
pub fn bind_model(compiler: &mut Compiler, site: BindingSite<'_>) -> Result<()> {
    let ctx = compiler.context().clone();
    let node = site.node;
    let expression = String::from(site.value.trim());

    let host = Rc::clone(&ctx.host);
    let watcher = Watcher::new(expression.clone(), &ctx.data, &ctx.scope, move |value| {
        host.set_property(node, MODEL_PROPERTY, &value.to_display_string())
            .map_err(Error::from)
    });
    tracing::debug!(%node, expression = %expression, watcher = %watcher.id(), "model binding");

    ctx.host
        .set_property(node, MODEL_PROPERTY, &watcher.value().to_display_string())?;
    compiler.push_watcher(watcher);

    let host = Rc::clone(&ctx.host);
    let data = Rc::clone(&ctx.data);
    ctx.host.add_event_listener(
        node,
        MODEL_EVENT,
        Rc::new(move |event: &Event| -> Result<()> {
            let input = host
                .property(event.target, MODEL_PROPERTY)?
                .unwrap_or_default();
            set_value(&data, &expression, Value::String(input))
        }),
    )?;
    Ok(())
}
