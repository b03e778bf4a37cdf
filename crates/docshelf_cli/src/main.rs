//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `docshelf_core` linkage with a seeded sample workspace.
//! - Print the tree and one breadcrumb walk deterministically.
//! - Write core log events under the system temp dir.

use docshelf_core::{default_log_level, init_logging, DocumentNode, StoreOptions, TreeStore};

fn main() {
    println!("docshelf_core version={}", docshelf_core::core_version());

    let log_dir = std::env::temp_dir().join("docshelf-logs");
    match log_dir.to_str() {
        Some(dir) => {
            if let Err(err) = init_logging(default_log_level(), dir) {
                eprintln!("docshelf_core logging disabled: {err}");
            }
        }
        None => eprintln!("docshelf_core logging disabled: non utf-8 temp dir"),
    }

    let options = StoreOptions {
        seed_sample: true,
        ..StoreOptions::default()
    };
    let mut store = match TreeStore::with_options(&options) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("docshelf_core seed failed: {err}");
            std::process::exit(1);
        }
    };

    for node in store.walk_depth_first() {
        println!("{}{}", indent(&store, node), describe(node));
    }

    let deepest = store
        .walk_depth_first()
        .into_iter()
        .filter(|node| node.is_folder())
        .max_by_key(|node| depth(&store, node))
        .map(|node| node.id);
    if let Some(folder_id) = deepest {
        let path = store
            .navigate_to(Some(folder_id))
            .iter()
            .map(|crumb| crumb.name.as_str())
            .collect::<Vec<_>>()
            .join(" > ");
        println!("breadcrumbs: {path}");
    }
}

fn describe(node: &DocumentNode) -> String {
    match node.file_attributes() {
        Some(file) => format!(
            "{} [{}, {:?}{}]",
            node.name,
            file.file_type.label(),
            file.processing_status,
            file.size_label
                .as_deref()
                .map(|size| format!(", {size}"))
                .unwrap_or_default()
        ),
        None => format!("{}/ ({} items)", node.name, node.children().len()),
    }
}

fn depth(store: &TreeStore, node: &DocumentNode) -> usize {
    let mut depth = 0;
    let mut cursor = node.parent_id;
    while let Some(parent_id) = cursor {
        depth += 1;
        cursor = store.find_by_id(parent_id).and_then(|parent| parent.parent_id);
    }
    depth
}

fn indent(store: &TreeStore, node: &DocumentNode) -> String {
    "  ".repeat(depth(store, node))
}
