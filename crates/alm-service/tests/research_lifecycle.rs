//! Research creation, update, memory, and deletion through `ResearchService`.

mod common;

use std::fs;

use pretty_assertions::assert_eq;

use alm_core::filters::ResearchFilters;
use alm_core::ids::ResearchId;
use alm_core::pagination::Pagination;
use alm_core::requests::{ResearchCreateRequest, ResearchMemory, ResearchUpdateRequest};
use alm_core::responses::ResearchView;
use alm_service::ServiceError;

use common::{almanac, entry_request};

#[test]
fn create_lays_out_the_research_directory() {
    let t = almanac();
    let (research, rid) = t.create_blog_research("Async Rust");

    assert_eq!(rid.as_str(), "async-rust");
    assert_eq!(research.template, "blog");
    assert_eq!(research.status, "draft");
    assert_eq!(research.entry_dirs, vec!["posts", "notes"]);

    let dir = t.researches_dir().join("async-rust");
    assert!(dir.join("research.yaml").is_file());
    assert!(dir.join("posts").is_dir());
    assert!(dir.join("notes").is_dir());
    assert!(t.almanac.researches().exists(&rid));
}

#[test]
fn create_rejects_unknown_template_and_blank_title() {
    let t = almanac();
    let researches = t.almanac.researches();

    let err = researches
        .create(&ResearchCreateRequest {
            template_id: "wiki".into(),
            title: "Nope".into(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::TemplateNotFound(key) if key == "wiki"));

    let err = researches
        .create(&ResearchCreateRequest {
            template_id: "blog".into(),
            title: "  ".into(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(!t.researches_dir().exists());
}

#[test]
fn entry_dirs_cannot_leave_the_research() {
    let t = almanac();
    let researches = t.almanac.researches();

    let err = researches
        .create(&ResearchCreateRequest {
            template_id: "blog".into(),
            title: "Escape".into(),
            entry_dirs: vec!["../../escaped-create".into()],
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(!t.researches_dir().exists());

    let (research, rid) = t.create_blog_research("Contained");
    let outside = t.root().join("escaped-update");
    let err = researches
        .update(
            &rid,
            &ResearchUpdateRequest {
                entry_dirs: Some(vec![outside.display().to_string()]),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(!outside.exists());
    assert_eq!(researches.get(&rid).unwrap().entry_dirs, research.entry_dirs);
}

#[test]
fn same_title_twice_gets_a_distinct_id() {
    let t = almanac();
    let (_, first) = t.create_blog_research("Twice");
    let (_, second) = t.create_blog_research("Twice");

    assert_eq!(first.as_str(), "twice");
    assert_ne!(first, second);
    assert!(second.as_str().starts_with("twice-"));
}

#[test]
fn update_merges_only_given_fields() {
    let t = almanac();
    let (research, rid) = t.create_blog_research("Mergeable");
    let researches = t.almanac.researches();

    let updated = researches
        .update(
            &rid,
            &ResearchUpdateRequest {
                status: Some("active".into()),
                memory: Some(vec![ResearchMemory {
                    record: "prefer tokio".into(),
                }]),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.status, "active");
    assert_eq!(updated.memory, vec!["prefer tokio"]);
    assert_eq!(updated.name, research.name);
    assert_eq!(updated.entry_dirs, research.entry_dirs);

    assert_eq!(researches.get(&rid).unwrap(), updated);
}

#[test]
fn update_without_changes_returns_current_research() {
    let t = almanac();
    let (research, rid) = t.create_blog_research("Unchanged");
    let same = t
        .almanac
        .researches()
        .update(&rid, &ResearchUpdateRequest::default())
        .unwrap();
    assert_eq!(same, research);
}

#[test]
fn update_of_missing_research_is_not_found() {
    let t = almanac();
    let err = t
        .almanac
        .researches()
        .update(
            &ResearchId::new("ghost").unwrap(),
            &ResearchUpdateRequest {
                title: Some("x".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::ResearchNotFound(id) if id == "ghost"));
}

#[test]
fn add_memory_appends() {
    let t = almanac();
    let (_, rid) = t.create_blog_research("Memory");
    let researches = t.almanac.researches();

    researches.add_memory(&rid, "first").unwrap();
    let research = researches.add_memory(&rid, "second").unwrap();
    assert_eq!(research.memory, vec!["first", "second"]);
    assert!(matches!(
        researches.add_memory(&rid, " "),
        Err(ServiceError::Validation(_))
    ));
}

#[test]
fn delete_missing_research_returns_false() {
    let t = almanac();
    assert!(
        !t.almanac
            .researches()
            .delete(&ResearchId::new("never-existed").unwrap())
            .unwrap()
    );
}

#[test]
fn delete_removes_the_whole_tree() {
    let t = almanac();
    let (_, rid) = t.create_blog_research("Doomed");
    t.almanac
        .entries()
        .create_entry(&rid, &entry_request("posts", "article", "content"))
        .unwrap();
    fs::write(t.researches_dir().join("doomed/scratch.txt"), "notes").unwrap();

    assert!(t.almanac.researches().delete(&rid).unwrap());
    assert!(!t.researches_dir().join("doomed").exists());
    assert!(!t.almanac.researches().exists(&rid));
}

#[test]
fn find_all_and_list_apply_filters() {
    let t = almanac();
    t.create_blog_research("Alpha Study");
    t.create_blog_research("Beta Study");
    let (_, gamma) = t.create_blog_research("Gamma");
    let researches = t.almanac.researches();
    researches
        .update(
            &gamma,
            &ResearchUpdateRequest {
                tags: Some(vec!["focus".into()]),
                ..Default::default()
            },
        )
        .unwrap();

    let studies = researches
        .find_all(&ResearchFilters {
            name_contains: Some("study".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(studies.len(), 2);

    let tagged = researches
        .find_all(&ResearchFilters {
            tags: Some(vec!["focus".into()]),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].id, "gamma");

    let page = researches
        .list(&ResearchFilters::default(), &Pagination { limit: 2, offset: 0 })
        .unwrap();
    assert_eq!(page.total_count, 3);
    assert!(page.has_more);

    let err = researches
        .list(&ResearchFilters::default(), &Pagination { limit: 0, offset: 0 })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn research_view_uses_public_key_names() {
    let t = almanac();
    let (research, _) = t.create_blog_research("Viewed");
    let view = ResearchView::from(&research);

    assert_eq!(view.research_id, "viewed");
    assert_eq!(view.research_type, "blog");
    assert_eq!(view.metadata.description, "Viewed notes");
}
