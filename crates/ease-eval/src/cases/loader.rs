//! Case loading from YAML/JSON files
//!
//! A case file holds either a list of cases or a single case. A directory is
//! walked for `.yaml`, `.yml` and `.json` files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use walkdir::WalkDir;

use super::EvalCase;

#[derive(Deserialize)]
#[serde(untagged)]
enum CaseFile {
    Many(Vec<EvalCase>),
    One(Box<EvalCase>),
}

impl CaseFile {
    fn into_cases(self) -> Vec<EvalCase> {
        match self {
            CaseFile::Many(cases) => cases,
            CaseFile::One(case) => vec![*case],
        }
    }
}

/// Loader for evaluation cases
pub struct CaseLoader {
    path: PathBuf,
}

impl CaseLoader {
    /// Create a loader for a case file or a directory of case files
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a loader for the sample cases shipped with this crate
    pub fn builtin() -> Self {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        Self::new(Path::new(manifest_dir).join("cases"))
    }

    /// Path this loader reads from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every case.
    ///
    /// A single file must parse. In a directory, files that fail to parse are
    /// skipped with a warning and the cases are sorted by id.
    pub fn load_all(&self) -> Result<Vec<EvalCase>> {
        if self.path.is_file() {
            let cases = Self::load_case_file(&self.path)?;
            Self::check_unique(&cases)?;
            return Ok(cases);
        }

        if !self.path.is_dir() {
            bail!("Case path does not exist: {}", self.path.display());
        }

        let mut cases = Vec::new();
        for entry in WalkDir::new(&self.path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if Self::is_case_file(path) {
                match Self::load_case_file(path) {
                    Ok(loaded) => cases.extend(loaded),
                    Err(e) => {
                        tracing::warn!("Failed to load cases from {:?}: {:#}", path, e);
                    }
                }
            }
        }

        cases.sort_by(|a, b| a.id.cmp(&b.id));
        Self::check_unique(&cases)?;

        tracing::debug!(count = cases.len(), path = %self.path.display(), "loaded cases");
        Ok(cases)
    }

    /// Load cases whose id is in `ids`
    pub fn load_by_ids(&self, ids: &[String]) -> Result<Vec<EvalCase>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|c| ids.contains(&c.id))
            .collect())
    }

    /// Load cases carrying a tag
    pub fn load_by_tag(&self, tag: &str) -> Result<Vec<EvalCase>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|c| c.has_tag(tag))
            .collect())
    }

    /// List the ids of every case
    pub fn list_case_ids(&self) -> Result<Vec<String>> {
        Ok(self.load_all()?.into_iter().map(|c| c.id).collect())
    }

    fn load_case_file(path: &Path) -> Result<Vec<EvalCase>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read case file: {:?}", path))?;

        if content.trim().is_empty() {
            bail!("Case file is empty: {:?}", path);
        }

        let file: CaseFile = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON cases: {:?}", path))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML cases: {:?}", path))?
        };

        let mut cases = file.into_cases();
        if cases.is_empty() {
            bail!("Case file holds no cases: {:?}", path);
        }

        let base_dir = path.parent().map(Path::to_path_buf);
        for case in &mut cases {
            case.validate()
                .with_context(|| format!("Invalid case '{}' in {:?}", case.id, path))?;
            case.base_dir = base_dir.clone();
        }

        Ok(cases)
    }

    fn is_case_file(path: &Path) -> bool {
        if !path.is_file() {
            return false;
        }

        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml") | Some("json")
        )
    }

    fn check_unique(cases: &[EvalCase]) -> Result<()> {
        let mut seen = HashSet::new();
        for case in cases {
            if !seen.insert(case.id.as_str()) {
                bail!("Duplicate case id: {}", case.id);
            }
        }
        Ok(())
    }
}

/// Load cases from a YAML string holding a list or a single case
pub fn load_cases_from_yaml(yaml: &str) -> Result<Vec<EvalCase>> {
    if yaml.trim().is_empty() {
        bail!("Case YAML is empty");
    }

    let file: CaseFile = serde_yaml::from_str(yaml)?;
    let cases = file.into_cases();
    if cases.is_empty() {
        bail!("Case YAML holds no cases");
    }

    for case in &cases {
        case.validate()
            .with_context(|| format!("Invalid case '{}'", case.id))?;
    }
    CaseLoader::check_unique(&cases)?;
    Ok(cases)
}
