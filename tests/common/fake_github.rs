//! In-memory repository implementing `GithubApi`.
//!
//! Files pushed by commits or the contents API become part of the root
//! listing, so publish followed by sync behaves like the real service.

use std::collections::BTreeMap;
use std::sync::Mutex;

use folio::domain::entities::GithubConfig;
use folio::domain::ports::{FileUpload, GithubApi, GithubError, GithubResult, RepoEntry, TreeEntry};

#[derive(Default)]
struct Repo {
    /// path → content
    files: BTreeMap<String, String>,
    /// blob sha → content
    blobs: BTreeMap<String, String>,
    /// tree sha → entries
    trees: BTreeMap<String, Vec<TreeEntry>>,
    /// commit sha → tree sha
    commits: BTreeMap<String, String>,
    head: String,
    next: usize,
    list_calls: usize,
}

impl Repo {
    fn sha(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{}{:04}", prefix, self.next)
    }
}

pub struct FakeGithub {
    repo: Mutex<Repo>,
}

impl FakeGithub {
    pub fn new() -> Self {
        let mut repo = Repo::default();
        repo.head = "c0000".to_string();
        repo.commits.insert("c0000".to_string(), "t0000".to_string());
        Self {
            repo: Mutex::new(repo),
        }
    }

    /// Repository already holding `files` (path, content)
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let fake = Self::new();
        {
            let mut repo = fake.repo.lock().unwrap();
            for (path, content) in files {
                repo.files.insert(path.to_string(), content.to_string());
            }
        }
        fake
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.repo.lock().unwrap().files.get(path).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.repo.lock().unwrap().files.len()
    }

    pub fn commit_count(&self) -> usize {
        // the seeded root commit is not counted
        self.repo.lock().unwrap().commits.len() - 1
    }

    pub fn list_calls(&self) -> usize {
        self.repo.lock().unwrap().list_calls
    }
}

fn not_found(what: &str) -> GithubError {
    GithubError::Api {
        status: 404,
        message: format!("{} Not Found", what),
    }
}

impl GithubApi for FakeGithub {
    fn check_repository(&self, _config: &GithubConfig) -> GithubResult<()> {
        Ok(())
    }

    fn list_contents(&self, _config: &GithubConfig, path: &str) -> GithubResult<Vec<RepoEntry>> {
        let mut repo = self.repo.lock().unwrap();
        repo.list_calls += 1;
        assert_eq!(path, "", "only the root listing is expected");

        let mut entries = Vec::new();
        let mut dirs = Vec::new();
        for file in repo.files.keys() {
            match file.split_once('/') {
                Some((dir, _)) => {
                    if !dirs.contains(&dir.to_string()) {
                        dirs.push(dir.to_string());
                    }
                }
                None => entries.push(RepoEntry::file(file.clone())),
            }
        }
        for dir in dirs {
            let mut entry = RepoEntry::file(dir);
            entry.kind = "dir".to_string();
            entries.push(entry);
        }
        Ok(entries)
    }

    fn branch_head(&self, _config: &GithubConfig, _branch: &str) -> GithubResult<String> {
        Ok(self.repo.lock().unwrap().head.clone())
    }

    fn commit_tree(&self, _config: &GithubConfig, commit_sha: &str) -> GithubResult<String> {
        self.repo
            .lock()
            .unwrap()
            .commits
            .get(commit_sha)
            .cloned()
            .ok_or_else(|| not_found("commit"))
    }

    fn create_blob(&self, _config: &GithubConfig, content: &str) -> GithubResult<String> {
        let mut repo = self.repo.lock().unwrap();
        let sha = repo.sha("b");
        repo.blobs.insert(sha.clone(), content.to_string());
        Ok(sha)
    }

    fn create_tree(
        &self,
        _config: &GithubConfig,
        _base_tree: &str,
        entries: &[TreeEntry],
    ) -> GithubResult<String> {
        let mut repo = self.repo.lock().unwrap();
        let sha = repo.sha("t");
        repo.trees.insert(sha.clone(), entries.to_vec());
        Ok(sha)
    }

    fn create_commit(
        &self,
        _config: &GithubConfig,
        _message: &str,
        tree: &str,
        parents: &[String],
    ) -> GithubResult<String> {
        let mut repo = self.repo.lock().unwrap();
        assert_eq!(parents, [repo.head.clone()], "commits build on the branch head");
        let sha = repo.sha("c");
        repo.commits.insert(sha.clone(), tree.to_string());
        Ok(sha)
    }

    fn update_branch(&self, _config: &GithubConfig, _branch: &str, sha: &str) -> GithubResult<()> {
        let mut repo = self.repo.lock().unwrap();
        let tree = repo.commits.get(sha).cloned().ok_or_else(|| not_found("commit"))?;
        let entries = repo.trees.get(&tree).cloned().unwrap_or_default();
        for entry in entries {
            let content = repo.blobs.get(&entry.sha).cloned().unwrap_or_default();
            repo.files.insert(entry.path, content);
        }
        repo.head = sha.to_string();
        Ok(())
    }

    fn file_sha(
        &self,
        _config: &GithubConfig,
        path: &str,
        _branch: &str,
    ) -> GithubResult<Option<String>> {
        let repo = self.repo.lock().unwrap();
        Ok(repo.files.get(path).map(|_| format!("sha-{}", path)))
    }

    fn put_file(&self, _config: &GithubConfig, upload: &FileUpload) -> GithubResult<()> {
        use base64::Engine;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&upload.content_base64)
            .map_err(|e| GithubError::Decode(e.to_string()))?;
        let mut repo = self.repo.lock().unwrap();
        repo.files.insert(
            upload.path.clone(),
            String::from_utf8_lossy(&bytes).into_owned(),
        );
        Ok(())
    }
}
