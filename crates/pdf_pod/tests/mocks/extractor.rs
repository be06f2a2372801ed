use std::sync::{Arc, Mutex};

use pdf_pod::DocumentExtractor;

#[derive(Clone)]
pub struct MockExtractor {
    pub pages: Vec<String>,
    pub calls: Arc<Mutex<Vec<Vec<u8>>>>,
    pub fail_with: Option<String>,
}

impl MockExtractor {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| p.to_string()).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            pages: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl DocumentExtractor for MockExtractor {
    type Error = anyhow::Error;

    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, Self::Error> {
        self.calls.lock().unwrap().push(pdf_bytes.to_vec());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.pages.clone())
    }
}
