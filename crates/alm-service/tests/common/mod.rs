//! Shared setup for service scenario tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use alm_config::AlmanacConfig;
use alm_core::entities::Research;
use alm_core::ids::ResearchId;
use alm_core::requests::{EntryCreateRequest, ResearchCreateRequest};
use alm_service::Almanac;

/// `posts` allows `article`; `notes` ("Field Notes") allows `note` and `article`.
pub const BLOG_TEMPLATE: &str = r"key: blog
name: Blog
description: Posts and notes
categories:
  - name: posts
    display_name: Posts
    entry_types: [article]
  - name: notes
    display_name: Field Notes
    entry_types: [note, article]
entry_types:
  article:
    display_name: Article
    default_status: draft
    statuses:
      - value: draft
        display_name: Draft
      - value: published
        display_name: Published
  note:
    display_name: Quick Note
    default_status: open
    statuses:
      - value: open
        display_name: Open
      - value: done
        display_name: Done
";

pub struct TestAlmanac {
    pub dir: tempfile::TempDir,
    pub almanac: Almanac,
}

impl TestAlmanac {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn researches_dir(&self) -> PathBuf {
        self.dir.path().join(".researches")
    }

    /// Every `.md` file under the researches directory.
    pub fn markdown_files(&self) -> Vec<PathBuf> {
        fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
            let Ok(read_dir) = fs::read_dir(dir) else {
                return;
            };
            for entry in read_dir.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    walk(&path, out);
                } else if path.extension().is_some_and(|e| e == "md") {
                    out.push(path);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.researches_dir(), &mut out);
        out
    }

    pub fn create_blog_research(&self, title: &str) -> (Research, ResearchId) {
        let research = self
            .almanac
            .researches()
            .create(&ResearchCreateRequest {
                template_id: "blog".into(),
                title: title.into(),
                description: format!("{title} notes"),
                ..Default::default()
            })
            .unwrap();
        let id = ResearchId::new(research.id.as_str()).unwrap();
        (research, id)
    }
}

pub fn almanac() -> TestAlmanac {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join(".templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("blog.yaml"), BLOG_TEMPLATE).unwrap();

    let almanac = Almanac::open(&AlmanacConfig::rooted_at(dir.path())).unwrap();
    TestAlmanac { dir, almanac }
}

pub fn entry_request(category: &str, entry_type: &str, content: &str) -> EntryCreateRequest {
    EntryCreateRequest {
        category: category.into(),
        entry_type: entry_type.into(),
        content: content.into(),
        ..Default::default()
    }
}
