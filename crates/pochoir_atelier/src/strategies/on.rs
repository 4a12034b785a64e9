//! Event binding.

use std::rc::Rc;

use pochoir_carton::is_blank;
use pochoir_relief::{CompilerError, ErrorCode, Event, Result};

use super::BindingSite;
use crate::Compiler;

/// Attach the declared method named by the attribute value as a listener
/// for the site's event. The method runs with the data object as receiver.
pub fn bind_on(compiler: &mut Compiler, site: BindingSite<'_>) -> Result<()> {
    let ctx = compiler.context().clone();
    let node = site.node;

    let Some(event) = site.event.filter(|event| !is_blank(event)) else {
        return Err(
            CompilerError::new(ErrorCode::MissingEventName, Some(node), site.source).into(),
        );
    };
    let method_name = site.value.trim();
    let Some(method) = ctx.method(method_name) else {
        return Err(CompilerError::new(ErrorCode::UnknownMethod, Some(node), site.source).into());
    };

    tracing::debug!(%node, event, method = method_name, "event binding");
    let data = Rc::clone(&ctx.data);
    ctx.host.add_event_listener(
        node,
        event,
        Rc::new(move |event: &Event| -> Result<()> { method(&data, event) }),
    )?;
    Ok(())
}
