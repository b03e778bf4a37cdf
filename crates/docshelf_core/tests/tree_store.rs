use docshelf_core::{
    DocumentNode, FileDraft, FileType, NodeId, NodeKind, ProcessingStatus, TreeErrorKind,
    TreeServiceError, TreeStore,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

fn setup() -> TreeStore {
    TreeStore::new()
}

fn ids(nodes: &[DocumentNode]) -> Vec<NodeId> {
    nodes.iter().map(|node| node.id).collect()
}

/// Checks id uniqueness, parent/child consistency and acyclicity.
fn assert_forest_invariants(store: &TreeStore) {
    let walked = store.walk_depth_first();
    assert_eq!(walked.len(), store.len(), "every stored node must be reachable");

    let mut seen = HashSet::new();
    for node in &walked {
        assert!(seen.insert(node.id), "duplicate id {}", node.id);
        assert!(!node.name.trim().is_empty());
        match node.parent_id {
            None => {
                let roots = store.list_children_of(None).unwrap();
                assert_eq!(ids(&roots).iter().filter(|id| **id == node.id).count(), 1);
            }
            Some(parent_id) => {
                let parent = store.find_by_id(parent_id).expect("parent must exist");
                assert!(parent.is_folder());
                let linked = parent.children().iter().filter(|id| **id == node.id).count();
                assert_eq!(linked, 1);
            }
        }
    }

    for node in &walked {
        let mut visited = HashSet::new();
        let mut cursor = Some(node.id);
        while let Some(current) = cursor {
            assert!(visited.insert(current), "cycle through {current}");
            cursor = store.find_by_id(current).and_then(|n| n.parent_id);
        }
    }
}

fn state_of(store: &TreeStore) -> HashMap<NodeId, DocumentNode> {
    store
        .walk_depth_first()
        .into_iter()
        .map(|node| (node.id, node.clone()))
        .collect()
}

#[test]
fn create_appends_in_order_and_assigns_unique_ids() {
    let mut store = setup();
    let docs = store.create_folder(None, "Docs").unwrap();
    let mut created = vec![];
    for index in 0..25 {
        let node = if index % 2 == 0 {
            store.create_folder(Some(docs.id), format!("folder {index}")).unwrap()
        } else {
            store
                .create_file(Some(docs.id), FileDraft::new(format!("file {index}"), FileType::Json))
                .unwrap()
        };
        created.push(node.id);
    }

    let children = store.list_children_of(Some(docs.id)).unwrap();
    assert_eq!(ids(&children), created);
    let unique: HashSet<_> = store.walk_depth_first().iter().map(|node| node.id).collect();
    assert_eq!(unique.len(), 26);
    assert_forest_invariants(&store);
}

#[test]
fn create_file_composes_name_and_starts_processing() {
    let mut store = setup();
    let file = store
        .create_file(
            None,
            FileDraft::new("  Quarterly report ", FileType::Spreadsheet).with_size_label(" 3 MB "),
        )
        .unwrap();

    assert_eq!(file.name, "Quarterly report.xlsx");
    assert_eq!(file.kind(), NodeKind::File);
    assert_eq!(file.parent_id, None);
    let attributes = file.file_attributes().unwrap();
    assert_eq!(attributes.file_type, FileType::Spreadsheet);
    assert_eq!(attributes.processing_status, ProcessingStatus::Processing);
    assert_eq!(attributes.size_label.as_deref(), Some("3 MB"));
}

#[test]
fn create_rejects_blank_names_and_bad_parents() {
    let mut store = setup();
    let err = store.create_folder(None, "   ").unwrap_err();
    assert_eq!(err, TreeServiceError::InvalidDisplayName);
    assert_eq!(err.kind(), TreeErrorKind::Validation);

    let err = store
        .create_file(None, FileDraft::new("\t", FileType::Text))
        .unwrap_err();
    assert_eq!(err.kind(), TreeErrorKind::Validation);

    let unknown = Uuid::new_v4();
    let err = store.create_folder(Some(unknown), "x").unwrap_err();
    assert!(matches!(err, TreeServiceError::ParentNotFound(id) if id == unknown));
    assert_eq!(err.kind(), TreeErrorKind::NotFound);

    let file = store
        .create_file(None, FileDraft::new("a", FileType::Text))
        .unwrap();
    let err = store.create_folder(Some(file.id), "nested").unwrap_err();
    assert!(matches!(err, TreeServiceError::ParentMustBeFolder(id) if id == file.id));
    assert_eq!(err.kind(), TreeErrorKind::Validation);

    assert_eq!(store.len(), 1);
}

#[test]
fn rename_updates_name_only() {
    let mut store = setup();
    let docs = store.create_folder(None, "Docs").unwrap();
    let file = store
        .create_file(Some(docs.id), FileDraft::new("a", FileType::Markdown))
        .unwrap();

    let renamed = store.rename(file.id, "  b.md  ").unwrap();
    assert_eq!(renamed.name, "b.md");
    assert_eq!(renamed.id, file.id);
    assert_eq!(renamed.parent_id, Some(docs.id));
    assert_eq!(renamed.created_at, file.created_at);
    assert_eq!(renamed.content, file.content);
    assert!(renamed.updated_at >= file.updated_at);
    assert_eq!(store.child_count(docs.id).unwrap(), 1);
}

#[test]
fn rename_keeps_sibling_position() {
    let mut store = setup();
    let docs = store.create_folder(None, "Docs").unwrap();
    let first = store
        .create_file(Some(docs.id), FileDraft::new("a", FileType::Text))
        .unwrap();
    let second = store
        .create_file(Some(docs.id), FileDraft::new("b", FileType::Text))
        .unwrap();

    store.rename(first.id, "z.txt").unwrap();
    let order: Vec<_> = store
        .list_children_of(Some(docs.id))
        .unwrap()
        .into_iter()
        .map(|node| node.id)
        .collect();
    assert_eq!(order, vec![first.id, second.id]);
    assert_eq!(ids(&store.list_children_of(None).unwrap()), vec![docs.id]);
}

#[test]
fn rename_to_same_name_is_accepted() {
    let mut store = setup();
    let docs = store.create_folder(None, "Docs").unwrap();
    let renamed = store.rename(docs.id, "Docs").unwrap();

    assert_eq!(renamed.name, docs.name);
    assert_eq!(renamed.id, docs.id);
    assert_eq!(renamed.parent_id, docs.parent_id);
    assert_eq!(renamed.created_at, docs.created_at);
    assert_eq!(renamed.content, docs.content);
}

#[test]
fn rename_rejects_unknown_id_and_blank_name() {
    let mut store = setup();
    let docs = store.create_folder(None, "Docs").unwrap();
    let unknown = Uuid::new_v4();

    let err = store.rename(unknown, "x").unwrap_err();
    assert!(matches!(err, TreeServiceError::NodeNotFound(id) if id == unknown));

    let err = store.rename(docs.id, "  ").unwrap_err();
    assert_eq!(err, TreeServiceError::InvalidDisplayName);
    assert_eq!(store.find_by_id(docs.id).unwrap().name, "Docs");
}

#[test]
fn delete_removes_whole_subtree() {
    let mut store = setup();
    let top = store.create_folder(None, "Top").unwrap();
    let mid = store.create_folder(Some(top.id), "Mid").unwrap();
    let leaf = store
        .create_file(Some(mid.id), FileDraft::new("leaf", FileType::Pdf))
        .unwrap();
    let sibling = store
        .create_file(Some(top.id), FileDraft::new("sibling", FileType::Text))
        .unwrap();
    let other = store.create_folder(None, "Other").unwrap();

    let removed: HashSet<_> = store.delete(top.id).unwrap().into_iter().collect();
    assert_eq!(removed, HashSet::from([top.id, mid.id, leaf.id, sibling.id]));

    for id in [top.id, mid.id, leaf.id, sibling.id] {
        assert!(store.find_by_id(id).is_none());
    }
    assert_eq!(ids(&store.list_children_of(None).unwrap()), vec![other.id]);
    assert_forest_invariants(&store);
}

#[test]
fn delete_unknown_id_is_not_found() {
    let mut store = setup();
    store.create_folder(None, "Docs").unwrap();
    let unknown = Uuid::new_v4();
    let err = store.delete(unknown).unwrap_err();
    assert!(matches!(err, TreeServiceError::NodeNotFound(id) if id == unknown));
    assert_eq!(err.offending_id(), Some(unknown));
    assert_eq!(store.len(), 1);
}

#[test]
fn move_file_to_root_empties_old_folder() {
    let mut store = setup();
    let docs = store.create_folder(None, "Docs").unwrap();
    let file = store
        .create_file(Some(docs.id), FileDraft::new("a", FileType::Text))
        .unwrap();
    assert_eq!(file.name, "a.txt");

    let moved = store.move_node(file.id, None).unwrap();
    assert_eq!(moved.parent_id, None);

    assert!(store.list_children_of(Some(docs.id)).unwrap().is_empty());
    let root_names: Vec<_> = store
        .list_children_of(None)
        .unwrap()
        .into_iter()
        .map(|node| node.name)
        .collect();
    assert!(root_names.contains(&"a.txt".to_string()));
    assert_forest_invariants(&store);
}

#[test]
fn move_preserves_subtree_verbatim() {
    let mut store = setup();
    let source = store.create_folder(None, "Source").unwrap();
    let moving = store.create_folder(Some(source.id), "Moving").unwrap();
    let inner = store.create_folder(Some(moving.id), "Inner").unwrap();
    store
        .create_file(Some(inner.id), FileDraft::new("deep", FileType::Json))
        .unwrap();
    store
        .create_file(Some(moving.id), FileDraft::new("shallow", FileType::Pdf))
        .unwrap();
    let target = store.create_folder(None, "Target").unwrap();

    let before = state_of(&store);
    let moved = store.move_node(moving.id, Some(target.id)).unwrap();
    let after = state_of(&store);

    assert_eq!(moved.parent_id, Some(target.id));
    assert_eq!(before.len(), after.len());
    for (id, old) in &before {
        let new = &after[id];
        if *id == moving.id {
            assert_eq!(new.name, old.name);
            assert_eq!(new.content, old.content);
        } else if *id == source.id || *id == target.id {
            continue;
        } else {
            assert_eq!(new, old, "descendant {id} must be untouched");
        }
    }
    assert!(after[&source.id].children().is_empty());
    assert_eq!(after[&target.id].children(), &[moving.id]);
    assert_forest_invariants(&store);
}

#[test]
fn move_rejects_self_and_descendant_destinations() {
    let mut store = setup();
    let folder = store.create_folder(None, "F").unwrap();
    let child = store.create_folder(Some(folder.id), "Child").unwrap();
    let grandchild = store.create_folder(Some(child.id), "Grandchild").unwrap();
    let before = state_of(&store);

    for destination in [folder.id, child.id, grandchild.id] {
        let err = store.move_node(folder.id, Some(destination)).unwrap_err();
        assert_eq!(err.kind(), TreeErrorKind::Cycle);
        assert!(matches!(
            err,
            TreeServiceError::CycleDetected { node_id, parent_id }
                if node_id == folder.id && parent_id == destination
        ));
    }
    assert_eq!(state_of(&store), before);
}

#[test]
fn move_two_root_folders_then_reverse_is_cycle() {
    let mut store = setup();
    let a = store.create_folder(None, "A").unwrap();
    let b = store.create_folder(None, "B").unwrap();

    store.move_node(a.id, Some(b.id)).unwrap();
    let before = state_of(&store);

    let err = store.move_node(b.id, Some(a.id)).unwrap_err();
    assert_eq!(err.kind(), TreeErrorKind::Cycle);
    assert_eq!(state_of(&store), before);
    assert_forest_invariants(&store);
}

#[test]
fn move_file_onto_itself_is_invalid_operation() {
    let mut store = setup();
    let file = store
        .create_file(None, FileDraft::new("a", FileType::Text))
        .unwrap();
    let err = store.move_node(file.id, Some(file.id)).unwrap_err();
    assert_eq!(err, TreeServiceError::SelfDrop(file.id));
    assert_eq!(err.kind(), TreeErrorKind::InvalidOperation);
}

#[test]
fn move_to_missing_or_file_destination_is_not_found() {
    let mut store = setup();
    let docs = store.create_folder(None, "Docs").unwrap();
    let file = store
        .create_file(Some(docs.id), FileDraft::new("a", FileType::Text))
        .unwrap();
    let other_file = store
        .create_file(None, FileDraft::new("b", FileType::Text))
        .unwrap();
    let before = state_of(&store);

    let unknown = Uuid::new_v4();
    let err = store.move_node(file.id, Some(unknown)).unwrap_err();
    assert_eq!(err.kind(), TreeErrorKind::NotFound);
    assert_eq!(err.offending_id(), Some(unknown));

    let err = store.move_node(file.id, Some(other_file.id)).unwrap_err();
    assert_eq!(err, TreeServiceError::DestinationNotFolder(other_file.id));
    assert_eq!(err.kind(), TreeErrorKind::NotFound);

    let err = store.move_node(unknown, None).unwrap_err();
    assert_eq!(err, TreeServiceError::NodeNotFound(unknown));

    assert_eq!(state_of(&store), before);
}

#[test]
fn accepted_move_sequences_keep_forest_acyclic() {
    let mut store = setup();
    let mut folders = Vec::new();
    for index in 0..8 {
        let parent = folders.last().copied();
        folders.push(store.create_folder(parent, format!("F{index}")).unwrap().id);
    }

    // Every ordered pair: descendants are rejected, everything else commits.
    for &node in &folders {
        for &destination in &folders {
            match store.move_node(node, Some(destination)) {
                Ok(moved) => assert_eq!(moved.parent_id, Some(destination)),
                Err(err) => assert_eq!(err.kind(), TreeErrorKind::Cycle),
            }
            assert_forest_invariants(&store);
        }
    }
    assert_eq!(store.len(), folders.len());
}

#[test]
fn set_processing_status_updates_files_only() {
    let mut store = setup();
    let docs = store.create_folder(None, "Docs").unwrap();
    let file = store
        .create_file(Some(docs.id), FileDraft::new("a", FileType::Pdf))
        .unwrap();

    let updated = store
        .set_processing_status(file.id, ProcessingStatus::Error)
        .unwrap();
    assert_eq!(
        updated.file_attributes().unwrap().processing_status,
        ProcessingStatus::Error
    );

    let err = store
        .set_processing_status(docs.id, ProcessingStatus::Processed)
        .unwrap_err();
    assert_eq!(err, TreeServiceError::NodeMustBeFile(docs.id));
    assert_eq!(err.kind(), TreeErrorKind::Validation);
}

#[test]
fn list_children_of_file_or_unknown_is_rejected() {
    let mut store = setup();
    let file = store
        .create_file(None, FileDraft::new("a", FileType::Text))
        .unwrap();
    let empty = store.create_folder(None, "Empty").unwrap();

    assert!(store.list_children_of(Some(empty.id)).unwrap().is_empty());
    assert_eq!(store.child_count(empty.id).unwrap(), 0);

    let err = store.list_children_of(Some(file.id)).unwrap_err();
    assert_eq!(err.kind(), TreeErrorKind::Validation);
    let err = store.list_children_of(Some(Uuid::new_v4())).unwrap_err();
    assert_eq!(err.kind(), TreeErrorKind::NotFound);
}

#[test]
fn walk_depth_first_visits_folders_before_descendants() {
    let mut store = setup();
    let a = store.create_folder(None, "A").unwrap();
    let a1 = store.create_folder(Some(a.id), "A1").unwrap();
    let a1x = store
        .create_file(Some(a1.id), FileDraft::new("x", FileType::Text))
        .unwrap();
    let a2 = store
        .create_file(Some(a.id), FileDraft::new("a2", FileType::Text))
        .unwrap();
    let b = store.create_folder(None, "B").unwrap();

    let order: Vec<_> = store.walk_depth_first().iter().map(|node| node.id).collect();
    assert_eq!(order, vec![a.id, a1.id, a1x.id, a2.id, b.id]);
}
