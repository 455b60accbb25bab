//! Conversation runtime executor

use super::traits::{Clock, RandomSource, StdRandom, SystemClock};
use super::{ChatEvent, Snapshot};
use crate::config::{ChatConfig, ConfigError};
use crate::message::{History, MessageId, Sender};
use crate::state_machine::{transition, ChatContext, ChatState, Effect, Event};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

const BROADCAST_CAPACITY: usize = 128;

struct Shared<C, R> {
    context: ChatContext,
    clock: C,
    random: R,
    inner: Mutex<Inner>,
    broadcast_tx: broadcast::Sender<ChatEvent>,
}

struct Inner {
    state: ChatState,
    history: History,
    /// Token for the scheduled reply, if one is pending
    reply_cancel_token: Option<CancellationToken>,
    closed: bool,
}

impl<C, R> Shared<C, R> {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A single chat thread.
///
/// This is the only writer of its message history. Collaborators drive it
/// through [`Conversation::submit`] and read it through
/// [`Conversation::snapshot`] or [`Conversation::subscribe`]. Dropping the
/// conversation tears it down and cancels any pending reply.
///
/// `submit` schedules the reply on the ambient Tokio runtime and ignores
/// submissions made outside one.
pub struct Conversation<C, R>
where
    C: Clock + 'static,
    R: RandomSource + 'static,
{
    shared: Arc<Shared<C, R>>,
}

impl Conversation<SystemClock, StdRandom> {
    /// Production conversation: wall clock, entropy (or seeded) random
    pub fn from_config(config: &ChatConfig) -> Result<Self, ConfigError> {
        let context = ChatContext::from_config(config)?;
        let random = config
            .seed
            .map_or_else(StdRandom::from_entropy, StdRandom::seeded);
        Ok(Self::new(context, SystemClock, random))
    }
}

impl<C, R> Conversation<C, R>
where
    C: Clock + 'static,
    R: RandomSource + 'static,
{
    pub fn new(context: ChatContext, clock: C, random: R) -> Self {
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CAPACITY);

        let mut history = History::default();
        if let Some(greeting) = &context.greeting {
            history.append(Sender::Bot, greeting.clone(), None, clock.now());
        }

        tracing::info!(conv_id = %context.conversation_id, "Conversation opened");

        Self {
            shared: Arc::new(Shared {
                context,
                clock,
                random,
                inner: Mutex::new(Inner {
                    state: ChatState::Idle,
                    history,
                    reply_cancel_token: None,
                    closed: false,
                }),
                broadcast_tx,
            }),
        }
    }

    /// Start a user turn. Blank text, text sent while the bot is composing,
    /// and text sent after teardown are ignored.
    ///
    /// The reply is scheduled on the current Tokio runtime. Without one the
    /// submission is dropped and the conversation stays idle.
    pub fn submit(&self, text: &str) {
        if tokio::runtime::Handle::try_current().is_err() {
            tracing::error!(
                conv_id = %self.shared.context.conversation_id,
                "No Tokio runtime to schedule a reply on, ignoring submission"
            );
            return;
        }

        let mut inner = self.shared.lock();
        let event = Event::UserSubmit {
            message_id: inner.history.next_id(),
            text: text.to_string(),
        };
        Self::apply(&self.shared, &mut inner, event);
    }

    /// Read-only view of the conversation
    pub fn snapshot(&self) -> Snapshot {
        let inner = self.shared.lock();
        Snapshot {
            messages: inner.history.messages().to_vec(),
            composing: inner.state.is_composing(),
        }
    }

    pub fn state(&self) -> ChatState {
        self.shared.lock().state.clone()
    }

    /// Stream of appended messages and composing changes
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.shared.broadcast_tx.subscribe()
    }

    pub fn conversation_id(&self) -> &str {
        &self.shared.context.conversation_id
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    /// Tear down: cancel any pending reply and ignore all further input
    pub fn close(&self) {
        let mut inner = self.shared.lock();
        if inner.closed {
            return;
        }
        Self::apply(&self.shared, &mut inner, Event::Teardown);
        inner.closed = true;
        tracing::info!(conv_id = %self.shared.context.conversation_id, "Conversation closed");
    }

    /// Run one event through the state machine and execute its effects.
    /// Caller holds the lock, so effects of one event are never interleaved
    /// with another.
    fn apply(shared: &Arc<Shared<C, R>>, inner: &mut Inner, event: Event) {
        let conv_id = &shared.context.conversation_id;
        if inner.closed {
            tracing::debug!(conv_id = %conv_id, ?event, "Conversation closed, ignoring event");
            return;
        }

        let result = match transition(&inner.state, &shared.context, event) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(conv_id = %conv_id, error = %e, "Event rejected");
                return;
            }
        };

        inner.state = result.new_state;

        for effect in result.effects {
            Self::execute_effect(shared, inner, effect);
        }
    }

    fn execute_effect(shared: &Arc<Shared<C, R>>, inner: &mut Inner, effect: Effect) {
        let conv_id = &shared.context.conversation_id;
        match effect {
            Effect::AppendUserMessage { text, emotion } => {
                let message = inner
                    .history
                    .append(Sender::User, text, Some(emotion), shared.clock.now());
                tracing::info!(
                    conv_id = %conv_id,
                    message_id = %message.id,
                    emotion = %emotion,
                    "User message appended"
                );
                let _ = shared.broadcast_tx.send(ChatEvent::MessageAppended { message });
            }

            Effect::ScheduleReply { turn } => {
                let delay = shared.context.delay.sample(shared.random.unit());
                let cancel_token = CancellationToken::new();
                if let Some(previous) = inner.reply_cancel_token.replace(cancel_token.clone()) {
                    previous.cancel();
                }

                // Arm the timer now so a stepped clock sees it immediately
                let sleep = shared.clock.sleep(delay);
                let weak = Arc::downgrade(shared);

                tracing::info!(
                    conv_id = %conv_id,
                    turn = %turn,
                    delay_ms = %delay.as_millis(),
                    "Reply scheduled"
                );

                tokio::spawn(async move {
                    tokio::select! {
                        biased;

                        () = cancel_token.cancelled() => {
                            tracing::debug!(turn = %turn, "Pending reply cancelled");
                        }

                        () = sleep => {
                            Self::deliver_reply(&weak, &cancel_token, turn);
                        }
                    }
                });
            }

            Effect::AppendBotReply { intent } => {
                let text = shared.context.bank.draw(intent, &shared.random).to_string();
                let message = inner
                    .history
                    .append(Sender::Bot, text, None, shared.clock.now());
                inner.reply_cancel_token = None;
                tracing::info!(
                    conv_id = %conv_id,
                    message_id = %message.id,
                    intent = %intent,
                    "Bot reply appended"
                );
                let _ = shared.broadcast_tx.send(ChatEvent::MessageAppended { message });
            }

            Effect::CancelReply { turn } => {
                if let Some(token) = inner.reply_cancel_token.take() {
                    token.cancel();
                }
                tracing::info!(conv_id = %conv_id, turn = %turn, "Reply cancelled");
            }

            Effect::NotifyComposing { composing } => {
                let _ = shared
                    .broadcast_tx
                    .send(ChatEvent::ComposingChanged { composing });
            }
        }
    }

    /// Timer fired: re-enter the state machine unless the turn was cancelled
    /// or the conversation is gone
    fn deliver_reply(weak: &Weak<Shared<C, R>>, cancel_token: &CancellationToken, turn: MessageId) {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let mut inner = shared.lock();
        // Cancellation happens under this lock, so the check cannot race it
        if cancel_token.is_cancelled() {
            tracing::debug!(turn = %turn, "Reply fired after cancellation, dropping");
            return;
        }
        Self::apply(&shared, &mut inner, Event::ReplyDue { turn });
    }
}

impl<C, R> Drop for Conversation<C, R>
where
    C: Clock + 'static,
    R: RandomSource + 'static,
{
    fn drop(&mut self) {
        self.close();
    }
}
