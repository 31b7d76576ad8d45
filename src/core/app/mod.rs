//! The interactive chat session.
//!
//! [`ChatSession`] owns everything one run of the device needs: settings,
//! the completion client, the speech pipeline, the pending input line and
//! the transcript. Each keypress is handled to completion, including any
//! network call or playback it triggers, before the next one is read.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::api::models::ProbeOutcome;
use crate::api::transport::HttpTransport;
use crate::api::CompletionClient;
use crate::audio::AudioDriver;
use crate::commands::{process_input, CommandResult};
use crate::core::config::{Settings, SettingsStore};
use crate::core::constants::FALLBACK_MODEL;
use crate::core::speech::{SpeechOutcome, SpeechPipeline};
use crate::ui::keypad::Keypress;
use crate::utils::line_editor::{apply_line_edit_action, LineEditOutcome};
use crate::utils::logging::LoggingState;

pub mod conversation;
pub mod session;
pub mod ui_state;


pub use conversation::ConversationController;
pub use session::SessionContext;
pub use ui_state::UiState;

pub struct ChatSession {
    pub session: SessionContext,
    pub ui: UiState,
    speech: SpeechPipeline,
}

impl ChatSession {
    pub fn new(
        store: SettingsStore,
        transport: Arc<dyn HttpTransport>,
        driver: Option<Box<dyn AudioDriver>>,
        system_prompt: impl Into<String>,
    ) -> Self {
        let settings = store.settings();
        let client = CompletionClient::new(
            Arc::clone(&transport),
            settings.lm_studio_base_url.as_str(),
            settings.bearer_token().map(str::to_string),
        );
        let speech = SpeechPipeline::from_settings(transport, settings, driver);
        let logging = if settings.logging_enabled {
            LoggingState::new(Some(settings.chat_log_path()))
        } else {
            LoggingState::disabled()
        };

        Self {
            session: SessionContext {
                store,
                client,
                system_prompt: system_prompt.into(),
                logging,
            },
            ui: UiState {
                needs_redraw: true,
                ..UiState::default()
            },
            speech,
        }
    }

    pub fn conversation(&mut self) -> ConversationController<'_> {
        ConversationController::new(&mut self.session, &mut self.ui)
    }

    pub fn settings(&self) -> &Settings {
        self.session.settings()
    }

    pub fn speech(&self) -> &SpeechPipeline {
        &self.speech
    }

    /// Startup work before the first keypress: connectivity check, chat log
    /// header, and loading a default model when none is remembered.
    pub async fn start(&mut self) -> ProbeOutcome {
        if let Err(err) = self.session.logging.start_session() {
            warn!(error = %err, "Failed to write chat log header");
        }

        let probe = self.session.client.probe().await;
        if !probe.is_reachable() {
            self.ui.set_status("Server not reachable");
        }

        if !self.session.has_model() {
            info!(model = FALLBACK_MODEL, "No model remembered; loading fallback");
            self.load_model(FALLBACK_MODEL).await;
        }
        probe
    }

    /// Feed one keypress through the line editor, dispatching on submit.
    pub async fn on_keypress(&mut self, key: Keypress) {
        self.ui.clear_status();
        match apply_line_edit_action(&mut self.ui.input, key.into()) {
            LineEditOutcome::Continue { redraw } => {
                if redraw {
                    self.ui.needs_redraw = true;
                }
            }
            LineEditOutcome::Submit(line) => {
                self.ui.needs_redraw = true;
                self.dispatch(&line).await;
            }
        }
    }

    pub async fn dispatch(&mut self, line: &str) {
        let result = process_input(line);
        match &result {
            CommandResult::Ignore => {}
            CommandResult::ListModels => self.list_models().await,
            CommandResult::LoadModel(name) => self.load_model(name).await,
            CommandResult::ShowHelp(text) => self.ui.set_status(text.as_str()),
            CommandResult::ProcessAsMessage(text) => self.chat_turn(text).await,
            CommandResult::Usage(_) | CommandResult::Unknown(_) => {
                if let Some(diagnostic) = result.diagnostic() {
                    warn!(line, "{diagnostic}");
                    self.ui.set_status(diagnostic);
                }
            }
        }
    }

    async fn list_models(&mut self) {
        match self.session.client.fetch_models().await {
            Ok(models) => {
                let ids: Vec<&str> = models
                    .data
                    .iter()
                    .map(|model| model.id.as_str())
                    .collect();
                info!(count = ids.len(), models = ?ids, "Available models");
                if ids.is_empty() {
                    self.ui.set_status("No models available");
                } else {
                    self.ui.set_status(format!("Models: {}", ids.join(", ")));
                }
            }
            Err(err) => {
                error!(error = %err, "Failed to fetch models");
                self.ui.set_status(format!("Model list failed: {err}"));
            }
        }
    }

    async fn load_model(&mut self, name: &str) {
        match self.session.client.load_model(name).await {
            Ok(()) => {
                info!(model = name, "Model loaded");
                // The label always mirrors settings, so it updates even if the save fails.
                match self.session.remember_model(name) {
                    Ok(()) => self.ui.set_status(format!("Loaded {name}")),
                    Err(err) => {
                        warn!(error = %err, "Failed to persist last used model");
                        self.ui.set_status(format!("Loaded {name} (settings not saved)"));
                    }
                }
            }
            Err(err) => {
                error!(model = name, error = %err, "Failed to load model");
                self.ui.set_status(format!("Load failed: {err}"));
            }
        }
    }

    async fn chat_turn(&mut self, text: &str) {
        let messages = self.conversation().add_user_message(text);
        let model = self.session.model_for_request();

        let reply = match self.session.client.complete_chat(&model, messages).await {
            Ok(reply) => reply,
            Err(err) => {
                error!(model = %model, error = %err, "Chat request failed");
                self.ui.set_status(format!("Chat failed: {err}"));
                return;
            }
        };

        self.conversation().add_assistant_message(&reply);

        if !self.speech.is_enabled() {
            return;
        }
        match self.speech.speak(&reply).await {
            Ok(SpeechOutcome::Played { bytes }) => info!(bytes, "Reply spoken"),
            Ok(SpeechOutcome::Skipped) => {}
            Err(err) => {
                warn!(error = %err, "Speech failed");
                self.ui.set_status(format!("Speech failed: {err}"));
            }
        }
    }
}
