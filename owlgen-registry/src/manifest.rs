//! Package manifest discovery and parsing.
//!
//! Two manifest formats mark a package directory:
//!
//! - `manifest.xml` (rosbuild): dependencies are `<depend package="..."/>`
//!   attributes, and the package name is the directory name.
//! - `package.xml` (catkin): dependencies are the text of `<depend>`,
//!   `<build_depend>` and `<run_depend>` elements, and the package name is
//!   the text of `<name>`.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{Error, Result};

pub const MANIFEST_FILE: &str = "manifest.xml";
pub const PACKAGE_FILE: &str = "package.xml";

const DEPEND_TAGS: &[&[u8]] = &[b"depend", b"build_depend", b"run_depend"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// `manifest.xml`
    Rosbuild,
    /// `package.xml`
    Catkin,
}

impl ManifestFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ManifestFormat::Rosbuild => MANIFEST_FILE,
            ManifestFormat::Catkin => PACKAGE_FILE,
        }
    }
}

/// A parsed package manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub format: ManifestFormat,
    /// Name declared inside the manifest (catkin only).
    pub name: Option<String>,
    /// Direct dependencies, in declaration order without duplicates.
    pub depends: Vec<String>,
}

/// Locate the manifest marking `dir` as a package root.
///
/// `manifest.xml` takes precedence when both are present.
pub fn find_manifest(dir: &Path) -> Option<(ManifestFormat, PathBuf)> {
    [ManifestFormat::Rosbuild, ManifestFormat::Catkin]
        .into_iter()
        .map(|format| (format, dir.join(format.file_name())))
        .find(|(_, path)| path.is_file())
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    pub fn read(format: ManifestFormat, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(format, &content).map_err(|message| Error::manifest(path, message))
    }

    /// Parse manifest content.
    pub fn parse(format: ManifestFormat, content: &str) -> std::result::Result<Self, String> {
        let mut reader = Reader::from_str(content);
        let mut depends = IndexSet::new();
        let mut name = None;
        // element whose text is being collected, with the text so far
        let mut capture: Option<(Vec<u8>, String)> = None;
        let mut depth = 0usize;

        loop {
            match reader.read_event().map_err(|e| e.to_string())? {
                Event::Start(e) => {
                    depth += 1;
                    let tag = e.name().as_ref().to_vec();
                    match format {
                        ManifestFormat::Rosbuild if tag == b"depend" => {
                            if let Some(dep) = package_attr(&e)? {
                                depends.insert(dep);
                            }
                        }
                        ManifestFormat::Catkin
                            if tag == b"name" && depth == 2
                                || DEPEND_TAGS.contains(&tag.as_slice()) =>
                        {
                            capture = Some((tag, String::new()));
                        }
                        _ => {}
                    }
                }
                Event::Empty(e) => {
                    if format == ManifestFormat::Rosbuild && e.name().as_ref() == b"depend" {
                        if let Some(dep) = package_attr(&e)? {
                            depends.insert(dep);
                        }
                    }
                }
                Event::Text(t) => {
                    if let Some((_, text)) = capture.as_mut() {
                        text.push_str(&String::from_utf8_lossy(&t));
                    }
                }
                Event::End(e) => {
                    depth = depth.saturating_sub(1);
                    if let Some((tag, text)) = capture.take() {
                        if e.name().as_ref() != tag.as_slice() {
                            capture = Some((tag, text));
                            continue;
                        }
                        let text = text.trim().to_string();
                        if text.is_empty() {
                            continue;
                        }
                        if tag == b"name" {
                            name = Some(text);
                        } else {
                            depends.insert(text);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Self {
            format,
            name,
            depends: depends.into_iter().collect(),
        })
    }
}

fn package_attr(e: &BytesStart<'_>) -> std::result::Result<Option<String>, String> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        if attr.key.as_ref() == b"package" {
            let value = String::from_utf8_lossy(&attr.value).trim().to_string();
            return Ok((!value.is_empty()).then_some(value));
        }
    }
    Ok(None)
}
