//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{Oid, Repository, Signature};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use commit_suggest::{Endpoint, Presenter, ViewModel};

/// Diff used by the end-to-end scenarios.
pub const SAMPLE_DIFF: &str = "diff --git a/x.py b/x.py\n@@ -1,2 +1,2 @@\n-foo\n+bar";

/// Route the HTTP client posts to.
pub const GENERATE_ROUTE: &str = "/api/commit/generate";

/// Response body matching [`SAMPLE_DIFF`].
pub fn sample_response() -> Value {
    json!({
        "commitMessage": "fix: correct foo to bar",
        "alternatives": ["fix: update value", "chore: adjust logic"],
        "typeLabels": ["fix"],
        "prTitle": "Fix bar",
        "prBody": "Changes bar"
    })
}

/// Endpoint pointing at a mock server.
pub fn endpoint_for(server: &MockServer) -> Endpoint {
    Endpoint::parse(&server.uri()).expect("Mock server URI should be a valid endpoint")
}

/// Mount a generate route answering with `template`, expected `times` times.
pub async fn mount_generate(server: &MockServer, template: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path(GENERATE_ROUTE))
        .respond_with(template)
        .expect(times)
        .mount(server)
        .await;
}

/// Presenter that records everything it is shown.
#[derive(Default)]
pub struct RecordingPresenter {
    pub progress: Vec<String>,
    pub views: Vec<ViewModel>,
    pub errors: Vec<String>,
}

impl Presenter for RecordingPresenter {
    fn progress(&mut self, message: &str) {
        self.progress.push(message.to_string());
    }

    fn present(&mut self, view: &ViewModel) {
        self.views.push(view.clone());
    }

    fn present_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    ///
    /// Sets a local identity so the `git` binary can commit in it.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open repo config");
            config
                .set_str("user.name", "Test User")
                .expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config
                .set_bool("commit.gpgsign", false)
                .expect("Failed to disable signing");
        }
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the repository root.
    pub fn write_file(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("Failed to write test file");
    }

    /// Add a file to the index.
    pub fn stage(&self, name: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_path(Path::new(name))
            .expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Write, stage and commit a file. Returns the commit OID.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Oid {
        self.write_file(name, content);
        self.stage(name);

        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Message of the commit HEAD points to.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .expect("Failed to read HEAD")
            .peel_to_commit()
            .expect("HEAD is not a commit")
            .message()
            .unwrap_or_default()
            .to_string()
    }
}
