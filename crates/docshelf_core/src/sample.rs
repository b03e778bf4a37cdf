//! Built-in sample workspace.
//!
//! Seeds the same starter layout the document panel ships with, so demos and
//! smoke runs have something to navigate:
//!
//! ```text
//! Documents/
//!   API Documentation.pdf      2.5 MB  processed
//!   User Guides/
//!     Getting Started.docx     1.8 MB  processed
//! Templates/
//!   Email Template.txt         0.5 MB  processing
//! ```

use crate::model::node::{FileType, NodeId, ProcessingStatus};
use crate::repo::tree_repo::TreeRepository;
use crate::service::tree_service::{FileDraft, TreeServiceResult};
use crate::store::TreeStore;
use log::info;

/// Ids of the seeded nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleWorkspace {
    pub documents: NodeId,
    pub api_documentation: NodeId,
    pub user_guides: NodeId,
    pub getting_started: NodeId,
    pub templates: NodeId,
    pub email_template: NodeId,
}

/// Appends the sample workspace to the store's root level.
pub fn seed_sample_workspace<R: TreeRepository>(
    store: &mut TreeStore<R>,
) -> TreeServiceResult<SampleWorkspace> {
    let documents = store.create_folder(None, "Documents")?.id;
    let api_documentation = store
        .create_file(
            Some(documents),
            FileDraft::new("API Documentation", FileType::Pdf).with_size_label("2.5 MB"),
        )?
        .id;
    store.set_processing_status(api_documentation, ProcessingStatus::Processed)?;

    let user_guides = store.create_folder(Some(documents), "User Guides")?.id;
    let getting_started = store
        .create_file(
            Some(user_guides),
            FileDraft::new("Getting Started", FileType::Word).with_size_label("1.8 MB"),
        )?
        .id;
    store.set_processing_status(getting_started, ProcessingStatus::Processed)?;

    let templates = store.create_folder(None, "Templates")?.id;
    let email_template = store
        .create_file(
            Some(templates),
            FileDraft::new("Email Template", FileType::Text).with_size_label("0.5 MB"),
        )?
        .id;

    info!("event=sample_seed module=sample status=ok nodes=6");
    Ok(SampleWorkspace {
        documents,
        api_documentation,
        user_guides,
        getting_started,
        templates,
        email_template,
    })
}
