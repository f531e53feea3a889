//! `docgate tree`: the page tree as one viewer sees it.

use crate::{
    access::Resolver,
    cli::ViewerArgs,
    config::{DocsConfig, Viewers},
    log,
    source::{Snapshot, load_snapshot},
    tree::{PageNode, TreeFilter, count_nodes},
    viewer::ViewerContext,
};
use anyhow::{Context, Result, bail};

/// Turn viewer flags into a viewer context.
pub fn viewer_context(args: &ViewerArgs, viewers: &Viewers) -> Result<ViewerContext> {
    if args.admin {
        return Ok(ViewerContext::admin());
    }
    if let Some(clients) = &args.clients {
        return Ok(ViewerContext::member(clients.iter().map(|c| c.trim())));
    }
    if let Some(name) = &args.viewer {
        if !viewers.contains(name) {
            let known: Vec<_> = viewers.names().collect();
            bail!("unknown viewer `{name}` (configured: {})", known.join(", "));
        }
        return Ok(ViewerContext::build(Some(name.as_str()), viewers));
    }
    Ok(ViewerContext::anonymous())
}

/// Filter the snapshot's tree for `ctx`.
pub fn visible_tree(snapshot: &Snapshot, ctx: &ViewerContext, client_root: &str) -> Vec<PageNode> {
    let mut resolver = Resolver::new(&snapshot.index);
    TreeFilter::new(&mut resolver, ctx)
        .client_root(client_root)
        .filter_forest(&snapshot.tree)
}

/// Print the visible tree as JSON on stdout.
pub fn render_tree(config: &DocsConfig, args: &ViewerArgs, compact: bool) -> Result<()> {
    let ctx = viewer_context(args, &config.viewers)?;
    let snapshot = load_snapshot(config).context("Failed to load content")?;

    let visible = visible_tree(&snapshot, &ctx, &config.access.client_root);
    log!(
        "tree";
        "{} of {} nodes visible",
        count_nodes(&visible),
        count_nodes(&snapshot.tree)
    );

    let json = if compact {
        serde_json::to_string(&visible)?
    } else {
        serde_json::to_string_pretty(&visible)?
    };
    println!("{json}");
    Ok(())
}
