//! Deterministic stand-ins for the text-generation and GIF-search services.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::generation::preferences::{BlogPreferences, PreferencesForm};
use crate::gif_search::{GifResult, GifSearch, GifSearchError};
use crate::llm_client::{LlmError, OutputSchema, TextGenerator};

/// One recorded call to a `ScriptedTextGenerator`.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub prompt: String,
    pub schema: Option<String>,
}

type Responder = Box<dyn Fn(&RecordedCall) -> Result<String, LlmError> + Send + Sync>;

enum Script {
    Queue(Mutex<VecDeque<String>>),
    Fail(u16),
    Respond(Responder),
}

/// Text generator that replays canned output and records every call.
pub struct ScriptedTextGenerator {
    script: Script,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTextGenerator {
    /// Answers calls with `responses`, in order.
    pub fn new(responses: Vec<String>) -> Self {
        Self::with_script(Script::Queue(Mutex::new(responses.into())))
    }

    /// Every call fails with an API error of the given status.
    pub fn failing(status: u16) -> Self {
        Self::with_script(Script::Fail(status))
    }

    /// Answers each call by inspecting it; order independent.
    pub fn responding<F>(f: F) -> Self
    where
        F: Fn(&RecordedCall) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self::with_script(Script::Respond(Box::new(f)))
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: RecordedCall) -> Result<String, LlmError> {
        let result = match &self.script {
            Script::Queue(queue) => Ok(queue
                .lock()
                .unwrap()
                .pop_front()
                .expect("ScriptedTextGenerator ran out of responses")),
            Script::Fail(status) => Err(LlmError::Api {
                status: *status,
                message: "scripted failure".to_string(),
            }),
            Script::Respond(f) => f(&call),
        };
        self.calls.lock().unwrap().push(call);
        result
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        self.answer(RecordedCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
            schema: None,
        })
    }

    async fn generate_structured(
        &self,
        system: &str,
        prompt: &str,
        schema: &OutputSchema,
    ) -> Result<String, LlmError> {
        self.answer(RecordedCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
            schema: Some(schema.name.to_string()),
        })
    }
}

/// GIF search keyed by exact query. Unknown queries return no hits.
pub struct ScriptedGifSearch {
    hits: HashMap<String, Vec<GifResult>>,
    delays: HashMap<String, Duration>,
    unauthorized: bool,
    queries: Mutex<Vec<String>>,
}

impl ScriptedGifSearch {
    pub fn new<I, Q, U>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Q, U)>,
        Q: Into<String>,
        U: Into<String>,
    {
        let hits = entries
            .into_iter()
            .map(|(q, url)| (q.into(), vec![gif(url)]))
            .collect();
        Self {
            hits,
            delays: HashMap::new(),
            unauthorized: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            unauthorized: true,
            ..Self::new(Vec::<(String, String)>::new())
        }
    }

    /// Holds the answer for `query` back by `delay`.
    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn with_hits(mut self, query: &str, hits: Vec<GifResult>) -> Self {
        self.hits.insert(query.to_string(), hits);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl GifSearch for ScriptedGifSearch {
    async fn search(&self, query: &str) -> Result<Vec<GifResult>, GifSearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if self.unauthorized {
            return Err(GifSearchError::Unauthorized { status: 401 });
        }
        Ok(self.hits.get(query).cloned().unwrap_or_default())
    }
}

pub fn gif(url: impl Into<String>) -> GifResult {
    let url = url.into();
    GifResult {
        id: url.rsplit('/').next().unwrap_or_default().to_string(),
        title: String::new(),
        url,
    }
}

/// The "Gym Fail" preferences used across pipeline tests.
pub fn gym_fail_preferences() -> BlogPreferences {
    BlogPreferences::from_form(PreferencesForm {
        topic: "Gym Fail".to_string(),
        narrator: "You".to_string(),
        audience: "Gen Z".to_string(),
        humor_styles: vec!["Sarcastic".to_string()],
        gif_type: vec![],
        gif_frequency: Some("Let the bot decide".to_string()),
        blog_length: Some("Short (300–500 words)".to_string()),
        sensitive_topics: None,
        funny_incident: None,
        title_style: Some("Punny".to_string()),
        ending_style: Some("Just end with a laugh".to_string()),
    })
    .unwrap()
}
