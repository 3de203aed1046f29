#![allow(dead_code)]

use medlog_core::Entry;
use medlog_extract::{CompletionClient, ExtractError};
use medlog_store::Paths;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tempfile::TempDir;

pub fn temp_paths() -> (TempDir, Paths) {
    let temp = TempDir::new().unwrap();
    let paths = Paths::from_dir(temp.path());
    (temp, paths)
}

pub fn sample_entries(texts: &[&str]) -> Vec<Entry> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| Entry {
            id: 1_700_000_000_000 + i as i64,
            text: t.to_string(),
            timestamp: "2025-01-01 08:00:00".to_string(),
        })
        .collect()
}

/// Completion endpoint replaying scripted replies; once the script runs out
/// every call fails like an unreachable endpoint.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    replies: Rc<RefCell<VecDeque<Result<String, ExtractError>>>>,
    pub prompts: Rc<RefCell<Vec<String>>>,
}

impl ScriptedClient {
    pub fn new(replies: &[&str]) -> Self {
        let client = Self::default();
        for reply in replies {
            client.push(Ok(reply.to_string()));
        }
        client
    }

    pub fn push(&self, reply: Result<String, ExtractError>) {
        self.replies.borrow_mut().push_back(reply);
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl CompletionClient for ScriptedClient {
    fn complete(&self, prompt: &str, _max_tokens: u32) -> Result<String, ExtractError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(ExtractError::EmptyReply))
    }
}
