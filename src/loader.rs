use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::model::QuizDefinition;
use crate::texts::InterfaceTextBundle;

pub const TEXTS_FILENAME: &str = "system_texts.json";

/// The only error surface that crosses to the user: either the source
/// collaborator could not supply the data, or the data parsed but violates
/// a structural requirement. Both are fatal to the session.
#[derive(Debug)]
pub enum LoadError {
    Unavailable(String),
    Malformed(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Unavailable(msg) => write!(f, "quiz data unavailable: {}", msg),
            LoadError::Malformed(msg) => write!(f, "quiz data malformed: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug)]
pub struct LoadedQuiz {
    pub quiz: QuizDefinition,
    pub texts: InterfaceTextBundle,
    /// Directory image locators are resolved against.
    pub base_dir: PathBuf,
}

/// Resolve, read, parse and validate both input documents. Nothing renders
/// before this returns; a failure replaces the whole session with one
/// visible error message.
pub fn load(path_or_dir: &str, texts_override: Option<&str>) -> Result<LoadedQuiz, LoadError> {
    let quiz_path = resolve_quiz_path(path_or_dir)?;
    let base_dir = quiz_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let texts_path = match texts_override {
        Some(p) => PathBuf::from(p),
        None => base_dir.join(TEXTS_FILENAME),
    };

    debug!(
        "loading quiz from {} and texts from {}",
        quiz_path.display(),
        texts_path.display()
    );

    let quiz_raw = fs::read_to_string(&quiz_path).map_err(|e| {
        LoadError::Unavailable(format!("cannot read {}: {}", quiz_path.display(), e))
    })?;
    let texts_raw = fs::read_to_string(&texts_path).map_err(|e| {
        LoadError::Unavailable(format!("cannot read {}: {}", texts_path.display(), e))
    })?;

    let quiz: QuizDefinition = serde_json::from_str(&quiz_raw).map_err(|e| {
        LoadError::Malformed(format!("invalid quiz JSON ({}): {}", quiz_path.display(), e))
    })?;
    let texts: InterfaceTextBundle = serde_json::from_str(&texts_raw).map_err(|e| {
        LoadError::Malformed(format!(
            "invalid texts JSON ({}): {}",
            texts_path.display(),
            e
        ))
    })?;

    validate(&quiz)?;

    info!(
        "loaded quiz {} \"{}\" with {} questions",
        quiz.quiz_number,
        quiz.series_title,
        quiz.questions.len()
    );

    Ok(LoadedQuiz {
        quiz,
        texts,
        base_dir,
    })
}

/// Eager structural validation. A question with no answers or no correct
/// answer is a content-authoring error; it is rejected up front rather
/// than left to surface as a rendering artifact mid-session.
pub fn validate(quiz: &QuizDefinition) -> Result<(), LoadError> {
    if quiz.questions.is_empty() {
        return Err(LoadError::Malformed("quiz has no questions".to_string()));
    }
    for (i, q) in quiz.questions.iter().enumerate() {
        if q.answers.is_empty() {
            return Err(LoadError::Malformed(format!(
                "question {} has no answer options",
                i + 1
            )));
        }
        if q.correct_count() == 0 {
            return Err(LoadError::Malformed(format!(
                "question {} has no correct answer",
                i + 1
            )));
        }
    }
    Ok(())
}

fn resolve_quiz_path(path_or_dir: &str) -> Result<PathBuf, LoadError> {
    let path = PathBuf::from(path_or_dir);
    if path.is_file() {
        return Ok(path);
    }
    if path.is_dir() {
        return find_quiz_file(&path);
    }
    Err(LoadError::Unavailable(format!(
        "path not found: {}",
        path.display()
    )))
}

/// A directory must contain exactly one quiz .json beside the texts
/// bundle.
fn find_quiz_file(dir: &Path) -> Result<PathBuf, LoadError> {
    let entries = fs::read_dir(dir).map_err(|e| {
        LoadError::Unavailable(format!("cannot read directory {}: {}", dir.display(), e))
    })?;

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| LoadError::Unavailable(format!("error reading entry: {}", e)))?;
        let path = entry.path();
        let is_json = path.extension().map_or(false, |e| e == "json");
        let is_texts = path
            .file_name()
            .map_or(false, |n| n == TEXTS_FILENAME);
        if path.is_file() && is_json && !is_texts {
            candidates.push(path);
        }
    }

    match candidates.len() {
        0 => Err(LoadError::Unavailable(format!(
            "no quiz .json file found in {}",
            dir.display()
        ))),
        1 => Ok(candidates.remove(0)),
        _ => {
            let names: Vec<String> = candidates
                .iter()
                .map(|p| {
                    format!(
                        "  - {}",
                        p.file_name().unwrap_or_default().to_string_lossy()
                    )
                })
                .collect();
            Err(LoadError::Unavailable(format!(
                "multiple quiz files found, specify one:\n{}",
                names.join("\n")
            )))
        }
    }
}

/// Image locators are opaque paths resolved relative to the quiz file.
pub fn resolve_image(base_dir: &Path, locator: &str) -> PathBuf {
    let path = Path::new(locator);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
