//! Named-blob project container.
//!
//! A saved project is a list of named byte blobs: a version tag followed by
//! the encoded metadata, code and layout. This module only assembles and
//! looks up blobs; where the container lives is the caller's business.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    BlockCodeError, BlockProgram, LayoutError, LayoutNode, MetadataError, MetadataRecord,
    decode_code, decode_layout, decode_metadata, encode_code, encode_layout, encode_metadata,
};

/// Name of the blob holding the format version tag.
pub const VERSION_BLOB: &str = "whinstone-ver";
/// Format version written by [`save_project`].
pub const FORMAT_VERSION: &str = "1.0";
pub const METADATA_BLOB: &str = "metadata";
pub const CODE_BLOB: &str = "code";
pub const LAYOUT_BLOB: &str = "layout";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("required blob '{name}' is missing from the project")]
    MissingBlob { name: String },
    #[error("unsupported format version '{found}' (expected 1.0)")]
    UnsupportedVersion { found: String },
    #[error("layout blob: {0}")]
    Layout(#[from] LayoutError),
    #[error("code blob: {0}")]
    Code(#[from] BlockCodeError),
    #[error("metadata blob: {0}")]
    Metadata(#[from] MetadataError),
}

/// One named blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl ProjectFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Project as stored: an ordered list of named blobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProject {
    pub files: Vec<ProjectFile>,
}

impl RawProject {
    /// First blob called `name`, if any.
    pub fn file(&self, name: &str) -> Option<&ProjectFile> {
        self.files.iter().find(|file| file.name == name)
    }

    fn require(&self, name: &str) -> Result<&[u8], ProjectError> {
        self.file(name)
            .map(|file| file.data.as_slice())
            .ok_or_else(|| ProjectError::MissingBlob {
                name: name.to_string(),
            })
    }
}

/// Decoded project contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub metadata: MetadataRecord,
    pub code: BlockProgram,
    pub layout: LayoutNode,
}

/// Encode all three artifacts into a version-tagged container.
///
/// # Examples
/// ```
/// use whinstone_core::{BlockProgram, LayoutNode, MetadataRecord, load_project, save_project};
///
/// let metadata = MetadataRecord {
///     name: "Hello".to_string(),
///     package_id: "com.example.hello".to_string(),
///     version_name: "1.0".to_string(),
///     version_code: 1,
/// };
/// let code = BlockProgram { collection_name: "blocks-view".to_string(), blocks: Vec::new() };
/// let layout = LayoutNode::new("LinearLayout");
///
/// let raw = save_project(&metadata, &code, &layout)?;
/// let project = load_project(&raw)?;
/// assert_eq!(project.layout, layout);
/// # Ok::<(), whinstone_core::ProjectError>(())
/// ```
#[tracing::instrument(skip_all, fields(package_id = %metadata.package_id))]
pub fn save_project(
    metadata: &MetadataRecord,
    code: &BlockProgram,
    layout: &LayoutNode,
) -> Result<RawProject, ProjectError> {
    let files = vec![
        ProjectFile::new(VERSION_BLOB, FORMAT_VERSION.as_bytes().to_vec()),
        ProjectFile::new(METADATA_BLOB, encode_metadata(metadata)?),
        ProjectFile::new(CODE_BLOB, encode_code(code)?),
        ProjectFile::new(LAYOUT_BLOB, encode_layout(layout)?),
    ];
    Ok(RawProject { files })
}

/// Reject containers tagged with a version this crate does not write.
/// Untagged containers are accepted.
pub fn check_version(project: &RawProject) -> Result<(), ProjectError> {
    match project.file(VERSION_BLOB) {
        Some(file) if file.data == FORMAT_VERSION.as_bytes() => Ok(()),
        Some(file) => Err(ProjectError::UnsupportedVersion {
            found: String::from_utf8_lossy(&file.data).into_owned(),
        }),
        None => {
            tracing::warn!("project has no version tag, assuming {FORMAT_VERSION}");
            Ok(())
        }
    }
}

pub fn parse_layout(project: &RawProject) -> Result<LayoutNode, ProjectError> {
    Ok(decode_layout(project.require(LAYOUT_BLOB)?)?)
}

pub fn parse_code(project: &RawProject) -> Result<BlockProgram, ProjectError> {
    Ok(decode_code(project.require(CODE_BLOB)?)?)
}

pub fn parse_metadata(project: &RawProject) -> Result<MetadataRecord, ProjectError> {
    Ok(decode_metadata(project.require(METADATA_BLOB)?)?)
}

/// Check the version tag and decode every artifact.
#[tracing::instrument(skip_all, fields(files = project.files.len()))]
pub fn load_project(project: &RawProject) -> Result<Project, ProjectError> {
    check_version(project)?;
    Ok(Project {
        metadata: parse_metadata(project)?,
        code: parse_code(project)?,
        layout: parse_layout(project)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Block, LayoutAttribute, Rgb};

    fn sample() -> (MetadataRecord, BlockProgram, LayoutNode) {
        let metadata = MetadataRecord {
            name: "Hello".to_string(),
            package_id: "com.example.hello".to_string(),
            version_name: "1.0".to_string(),
            version_code: 2,
        };
        let code = BlockProgram {
            collection_name: "blocks-view".to_string(),
            blocks: vec![Block::new("toast", Rgb::new(10, 20, 30)).with_parameter("Hello World")],
        };
        let layout = LayoutNode::new("LinearLayout")
            .with_attribute(LayoutAttribute::new("android", "orientation", "vertical"));
        (metadata, code, layout)
    }

    #[test]
    fn save_writes_blobs_in_order() {
        let (metadata, code, layout) = sample();
        let raw = save_project(&metadata, &code, &layout).unwrap();
        let names: Vec<_> = raw.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, [VERSION_BLOB, METADATA_BLOB, CODE_BLOB, LAYOUT_BLOB]);
        assert_eq!(raw.file(VERSION_BLOB).unwrap().data, b"1.0");
    }

    #[test]
    fn load_round_trips() {
        let (metadata, code, layout) = sample();
        let raw = save_project(&metadata, &code, &layout).unwrap();
        let project = load_project(&raw).unwrap();
        assert_eq!(project.metadata, metadata);
        assert_eq!(project.code, code);
        assert_eq!(project.layout, layout);
    }

    #[test]
    fn missing_blob_is_reported_by_name() {
        let (metadata, code, layout) = sample();
        let mut raw = save_project(&metadata, &code, &layout).unwrap();
        raw.files.retain(|f| f.name != CODE_BLOB);
        let err = parse_code(&raw).unwrap_err();
        assert!(matches!(err, ProjectError::MissingBlob { ref name } if name == CODE_BLOB));
        assert!(parse_layout(&raw).is_ok());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let (metadata, code, layout) = sample();
        let mut raw = save_project(&metadata, &code, &layout).unwrap();
        raw.files[0].data = b"2.0".to_vec();
        let err = load_project(&raw).unwrap_err();
        assert!(matches!(err, ProjectError::UnsupportedVersion { ref found } if found == "2.0"));
    }

    #[test]
    fn untagged_project_still_loads() {
        let (metadata, code, layout) = sample();
        let mut raw = save_project(&metadata, &code, &layout).unwrap();
        raw.files.remove(0);
        assert!(load_project(&raw).is_ok());
    }

    #[test]
    fn encode_failure_surfaces_blob_kind() {
        let (mut metadata, code, layout) = sample();
        metadata.version_code = 300;
        let err = save_project(&metadata, &code, &layout).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::Metadata(MetadataError::VersionCodeOutOfRange { value: 300 })
        ));
    }
}
