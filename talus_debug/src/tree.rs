// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text dumps of computed layout trees.

use std::fmt::Write;

use talus_core::{ElementId, ElementKind, LayoutContext, LayoutError};

/// Renders the subtree under `root` as indented text, one element per line.
///
/// Each line shows the slot index, kind, container-relative rect, and, when
/// the content does not fit, the overflow. Dirty elements are flagged with
/// `*`.
///
/// ```text
/// #0 container (0, 0) 200x100
///   #1 text (10, 10) 50x20
///   #2 container (60, 10) 50x50 overflow=12x0 *
/// ```
pub fn dump_tree(ctx: &LayoutContext, root: ElementId) -> Result<String, LayoutError> {
    let mut out = String::new();
    dump_element(ctx, root, 0, &mut out)?;
    Ok(out)
}

fn dump_element(
    ctx: &LayoutContext,
    id: ElementId,
    depth: usize,
    out: &mut String,
) -> Result<(), LayoutError> {
    let store = ctx.store();
    let rect = ctx.rect(id)?;
    let kind = match store.kind(id)? {
        ElementKind::Container => "container",
        ElementKind::Text => "text",
        ElementKind::Image => "image",
    };
    let _ = write!(
        out,
        "{:indent$}#{} {kind} ({}, {}) {}x{}",
        "",
        id.index(),
        rect.x0,
        rect.y0,
        rect.width(),
        rect.height(),
        indent = depth * 2,
    );
    if let Some(key) = store.key(id)? {
        let _ = write!(out, " key={key:?}");
    }
    let overflow = ctx.overflow(id)?;
    if overflow.width > 0.0 || overflow.height > 0.0 {
        let _ = write!(out, " overflow={}x{}", overflow.width, overflow.height);
    }
    if store.is_dirty(id)? {
        out.push_str(" *");
    }
    out.push('\n');
    for child in store.children(id)? {
        dump_element(ctx, child, depth + 1, out)?;
    }
    Ok(())
}
