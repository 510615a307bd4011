use std::process::{Command, Stdio};

use thiserror::Error;

pub const BLOCKED_TERMS: &[&str] = &["nudity", "violence", "sexually explicit", "offensive"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the selected model '{model}' blocked the request because it mentions '{term}'")]
pub struct ContentRejected {
    pub model: String,
    pub term: &'static str,
}

/// Capability to discover locally installed language models.
pub trait ModelCatalog {
    fn is_available(&self) -> bool;
    fn list_models(&self) -> Vec<String>;
}

/// Talks to a model runner CLI such as `ollama` through blocking subprocesses.
#[derive(Debug, Clone)]
pub struct OllamaCli {
    program: String,
}

impl OllamaCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ModelCatalog for OllamaCli {
    fn is_available(&self) -> bool {
        let status = Command::new("which")
            .arg(&self.program)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) => status.success(),
            Err(error) => {
                tracing::debug!(program = %self.program, %error, "availability probe failed");
                false
            }
        }
    }

    fn list_models(&self) -> Vec<String> {
        let output = match Command::new(&self.program)
            .arg("list")
            .stderr(Stdio::null())
            .output()
        {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                tracing::warn!(program = %self.program, status = %output.status, "model listing failed");
                return Vec::new();
            }
            Err(error) => {
                tracing::warn!(program = %self.program, %error, "could not run model listing");
                return Vec::new();
            }
        };

        parse_model_list(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Extracts model names from `list` output: the header line is skipped and the
/// first whitespace separated token of every remaining line is a model name.
pub fn parse_model_list(output: &str) -> Vec<String> {
    output
        .trim()
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Outcome of the "is a model around to enhance the prompt?" negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enhancement {
    /// The model runner executable is not installed.
    Unavailable,
    /// The runner is installed but reports no models.
    NoModels,
    /// Models exist but the user declined to pick one.
    Skipped,
    Ready(String),
}

impl Enhancement {
    pub fn model(&self) -> Option<&str> {
        match self {
            Enhancement::Ready(model) => Some(model.as_str()),
            _ => None,
        }
    }

    /// Runs the keyword check when a model was chosen; passes otherwise.
    pub fn review(&self, text: &str) -> Result<(), ContentRejected> {
        match self {
            Enhancement::Ready(model) => check_content(model, text),
            _ => Ok(()),
        }
    }
}

/// Installed models, or the reason there are none to offer.
pub fn discover<C>(catalog: &C) -> Result<Vec<String>, Enhancement>
where
    C: ModelCatalog + ?Sized,
{
    if !catalog.is_available() {
        return Err(Enhancement::Unavailable);
    }
    let models = catalog.list_models();
    if models.is_empty() {
        return Err(Enhancement::NoModels);
    }
    tracing::debug!(count = models.len(), "discovered local models");
    Ok(models)
}

/// Maps the user's answer to the numbered model menu onto an [`Enhancement`].
pub fn choose(models: &[String], input: &str) -> Enhancement {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return Enhancement::Skipped;
    }
    match input.parse::<usize>() {
        Ok(number) if (1..=models.len()).contains(&number) => {
            Enhancement::Ready(models[number - 1].clone())
        }
        _ => Enhancement::Skipped,
    }
}

/// Case-insensitive scan of `text` for any of the [`BLOCKED_TERMS`].
///
/// This is keyword matching only; the model itself is never consulted.
pub fn check_content(model: &str, text: &str) -> Result<(), ContentRejected> {
    let folded = text.to_lowercase();
    match BLOCKED_TERMS.iter().find(|term| folded.contains(**term)) {
        Some(term) => Err(ContentRejected {
            model: model.to_string(),
            term: *term,
        }),
        None => Ok(()),
    }
}
