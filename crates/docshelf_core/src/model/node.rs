//! Document tree node model.
//!
//! # Responsibility
//! - Define the canonical file/folder record owned by the tree store.
//! - Keep kind-specific attributes in one tagged enum so a folder can never
//!   carry file metadata and a file can never carry children.
//!
//! # Invariants
//! - `id` is stable for the node lifetime and never reused.
//! - `created_at` is set once at construction.
//! - `parent_id == None` means the node lives at root level.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable document tree node identifier.
pub type NodeId = Uuid;

/// Kind discriminator for tree nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Leaf entry with document metadata.
    File,
    /// Container entry owning an ordered list of children.
    Folder,
}

/// Processing pipeline state reported for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    /// Newly created or re-queued; not yet indexed.
    Processing,
    /// Indexed successfully.
    Processed,
    /// Pipeline gave up on this file.
    Error,
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Text,
    Markdown,
    Pdf,
    Word,
    Spreadsheet,
    Json,
}

impl FileType {
    /// Every selectable file type, in picker order.
    pub const ALL: [FileType; 6] = [
        FileType::Text,
        FileType::Markdown,
        FileType::Pdf,
        FileType::Word,
        FileType::Spreadsheet,
        FileType::Json,
    ];

    /// Canonical extension appended to new file names (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
            Self::Pdf => "pdf",
            Self::Word => "docx",
            Self::Spreadsheet => "xlsx",
            Self::Json => "json",
        }
    }

    /// Human-readable picker label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Text File (.txt)",
            Self::Markdown => "Markdown (.md)",
            Self::Pdf => "PDF Document (.pdf)",
            Self::Word => "Word Document (.docx)",
            Self::Spreadsheet => "Excel Spreadsheet (.xlsx)",
            Self::Json => "JSON File (.json)",
        }
    }

    /// Parses an extension, case-insensitively, with or without leading dot.
    ///
    /// Legacy `doc`/`xls` extensions map onto Word/Spreadsheet.
    pub fn from_extension(value: &str) -> Option<Self> {
        let normalized = value.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "txt" => Some(Self::Text),
            "md" => Some(Self::Markdown),
            "pdf" => Some(Self::Pdf),
            "docx" | "doc" => Some(Self::Word),
            "xlsx" | "xls" => Some(Self::Spreadsheet),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Composes `<base>.<extension>` for a new file.
    pub fn compose_name(self, base: &str) -> String {
        format!("{base}.{}", self.extension())
    }
}

/// File-only attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttributes {
    pub file_type: FileType,
    pub processing_status: ProcessingStatus,
    /// Display size such as `2.5 MB`; absent until the pipeline reports one.
    pub size_label: Option<String>,
}

/// Folder-only attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderAttributes {
    /// Owned child ids in display order.
    pub children: Vec<NodeId>,
}

/// Kind-specific payload of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeContent {
    File(FileAttributes),
    Folder(FolderAttributes),
}

/// Document tree record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Stable node id.
    pub id: NodeId,
    /// Trimmed, non-empty display name.
    pub name: String,
    /// Owning folder id. `None` means root-level node.
    pub parent_id: Option<NodeId>,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Epoch ms modification timestamp.
    pub updated_at: i64,
    /// Kind-specific attributes, serialized inline with a `kind` tag.
    #[serde(flatten)]
    pub content: NodeContent,
}

impl DocumentNode {
    /// Creates an empty folder with a generated id.
    pub fn new_folder(parent_id: Option<NodeId>, name: impl Into<String>) -> Self {
        Self::with_content(
            parent_id,
            name,
            NodeContent::Folder(FolderAttributes::default()),
        )
    }

    /// Creates a file with a generated id.
    ///
    /// The caller composes the final `<base>.<extension>` name.
    pub fn new_file(
        parent_id: Option<NodeId>,
        name: impl Into<String>,
        attributes: FileAttributes,
    ) -> Self {
        Self::with_content(parent_id, name, NodeContent::File(attributes))
    }

    fn with_content(parent_id: Option<NodeId>, name: impl Into<String>, content: NodeContent) -> Self {
        let now = now_epoch_ms();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parent_id,
            created_at: now,
            updated_at: now,
            content,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.content {
            NodeContent::File(_) => NodeKind::File,
            NodeContent::Folder(_) => NodeKind::Folder,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == NodeKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind() == NodeKind::File
    }

    /// Child ids for folders; always empty for files.
    pub fn children(&self) -> &[NodeId] {
        match &self.content {
            NodeContent::Folder(folder) => &folder.children,
            NodeContent::File(_) => &[],
        }
    }

    /// File metadata, or `None` for folders.
    pub fn file_attributes(&self) -> Option<&FileAttributes> {
        match &self.content {
            NodeContent::File(file) => Some(file),
            NodeContent::Folder(_) => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.content {
            NodeContent::Folder(folder) => Some(&mut folder.children),
            NodeContent::File(_) => None,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = now_epoch_ms().max(self.updated_at);
    }
}

/// Current wall clock in epoch milliseconds.
///
/// Clocks set before 1970 collapse to `0` instead of failing.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{DocumentNode, FileAttributes, FileType, NodeKind, ProcessingStatus};

    #[test]
    fn from_extension_accepts_aliases_and_dots() {
        assert_eq!(FileType::from_extension(".PDF"), Some(FileType::Pdf));
        assert_eq!(FileType::from_extension("doc"), Some(FileType::Word));
        assert_eq!(FileType::from_extension("xls"), Some(FileType::Spreadsheet));
        assert_eq!(FileType::from_extension("exe"), None);
    }

    #[test]
    fn every_file_type_round_trips_through_its_extension() {
        for file_type in FileType::ALL {
            assert_eq!(FileType::from_extension(file_type.extension()), Some(file_type));
        }
    }

    #[test]
    fn labels_name_the_extension() {
        for file_type in FileType::ALL {
            let suffix = format!("(.{})", file_type.extension());
            assert!(file_type.label().ends_with(&suffix), "{}", file_type.label());
        }
    }

    #[test]
    fn folder_has_no_file_attributes_and_file_has_no_children() {
        let folder = DocumentNode::new_folder(None, "Docs");
        assert_eq!(folder.kind(), NodeKind::Folder);
        assert!(folder.file_attributes().is_none());
        assert!(folder.children().is_empty());

        let file = DocumentNode::new_file(
            Some(folder.id),
            FileType::Markdown.compose_name("notes"),
            FileAttributes {
                file_type: FileType::Markdown,
                processing_status: ProcessingStatus::Processing,
                size_label: None,
            },
        );
        assert_eq!(file.name, "notes.md");
        assert!(file.is_file());
        assert!(file.children().is_empty());
        assert_eq!(file.created_at, file.updated_at);
    }
}
