use std::sync::{Arc, Mutex};

use pdf_pod::{GenerationTask, ScriptGenerator};

#[derive(Clone)]
pub struct MockGenerator {
    pub script: String,
    pub title: String,
    pub description: String,
    pub calls: Arc<Mutex<Vec<(GenerationTask, String)>>>,
    pub fail_with: Option<String>,
}

impl MockGenerator {
    pub fn new(script: &str, title: &str, description: &str) -> Self {
        Self {
            script: script.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            script: String::new(),
            title: String::new(),
            description: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

/// Generator with a deliberately tiny context window, for exercising the
/// truncation path without feeding in 110k characters.
#[derive(Clone)]
pub struct ShortContextGenerator {
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl ShortContextGenerator {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl ScriptGenerator for ShortContextGenerator {
    const CONTEXT_WINDOW_LIMIT: usize = 12;
    const GENERATION_MODEL: &str = "mock-gpt";
    type Error = anyhow::Error;

    async fn generate(
        &self,
        _task: GenerationTask,
        paper_text: &str,
    ) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push(paper_text.to_string());
        Ok("generated".to_string())
    }
}

impl ScriptGenerator for MockGenerator {
    const GENERATION_MODEL: &str = "mock-gpt";
    type Error = anyhow::Error;

    async fn generate(
        &self,
        task: GenerationTask,
        paper_text: &str,
    ) -> Result<String, Self::Error> {
        self.calls
            .lock()
            .unwrap()
            .push((task, paper_text.to_string()));
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(match task {
            GenerationTask::Script => self.script.clone(),
            GenerationTask::Title => self.title.clone(),
            GenerationTask::Description => self.description.clone(),
        })
    }
}
