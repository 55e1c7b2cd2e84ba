use std::{sync::Arc, time::Duration};

use futures::{FutureExt, StreamExt};
use hlab_api::{
    ApiClient, ClusterResource, Container, ContainerAction, Document, MediaRequest, Node,
    Recommendation, Resource, Script, SshTest, StorageMount, Zpool,
};
use hlab_keymap::{
    conversion,
    message::{KeySequence, KeymapMessage, Mode},
    MessageResolver,
};
use tokio::{
    select,
    sync::{
        mpsc::{self, Receiver, Sender},
        Mutex,
    },
    time::MissedTickBehavior,
};
use tokio_util::sync::CancellationToken;

use crate::{
    error::AppError,
    task::{Task, TaskManager},
};

#[derive(Debug)]
pub struct Envelope {
    pub messages: Vec<Message>,
    pub sequence: KeySequence,
    pub source: MessageSource,
}

#[derive(Debug, Eq, PartialEq)]
pub enum MessageSource {
    Task,
    Timer,
    User,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    ContainerActionFinished {
        id: String,
        action: ContainerAction,
        result: Result<(), String>,
    },
    Documents(PanelEvent<Document>),
    Keymap(KeymapMessage),
    MediaRequests(PanelEvent<MediaRequest>),
    NotificationExpired(usize),
    Polled(PollResult),
    PoolDeleted {
        name: String,
        result: Result<String, String>,
    },
    RecommendationImplemented {
        id: u64,
        result: Result<(), String>,
    },
    RecommendationLoaded(u64, Result<Recommendation, String>),
    Resize(u16, u16),
    ScriptHighlighted(u64, String),
    Scripts(PanelEvent<Script>),
    SshTested(Result<SshTest, String>),
    Tick,
    Yanked(Result<(), String>),
}

/// Result of a single status check.
#[derive(Clone, Debug, PartialEq)]
pub enum PollResult {
    Containers(Result<Vec<Container>, String>),
    Nodes(Result<Vec<Node>, String>),
    Recommendations(Result<Vec<Recommendation>, String>),
    Resources(Result<Vec<ClusterResource>, String>),
    StorageInfo(Result<Vec<StorageMount>, String>),
    Zpools(Result<Vec<Zpool>, String>),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadIntent {
    Edit,
    View,
}

/// Result of a panel request, routed back to the panel of `E`.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelEvent<E: Resource> {
    Created(Result<u64, String>),
    Deleted(u64, Result<(), String>),
    Listed(Result<Vec<E>, String>),
    Loaded(u64, LoadIntent, Result<E, String>),
    Updated(u64, Result<(), String>),
}

pub struct Emitter {
    cancellation: CancellationToken,
    tasks: TaskManager,
    pub receiver: Receiver<Envelope>,
    resolver: Arc<Mutex<MessageResolver>>,
}

impl Emitter {
    pub fn start(client: ApiClient, poll_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let resolver = Arc::new(Mutex::new(MessageResolver::default()));
        let cancellation = CancellationToken::new();

        start_crossterm_listener(cancellation.child_token(), resolver.clone(), sender.clone());
        start_poll_ticker(cancellation.child_token(), poll_interval, sender.clone());

        Self {
            cancellation,
            tasks: TaskManager::new(sender, client),
            receiver,
            resolver,
        }
    }

    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.cancellation.cancel();
        self.tasks.finishing().await
    }

    pub async fn set_current_mode(&mut self, mode: Mode) {
        let mut resolver = self.resolver.lock().await;
        resolver.mode = mode;
    }

    pub fn run(&mut self, task: Task) {
        self.tasks.run(task);
    }
}

fn start_poll_ticker(
    cancellation: CancellationToken,
    period: Duration,
    sender: Sender<Envelope>,
) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            select! {
                _ = cancellation.cancelled() => break,
                _ = interval.tick() => {
                    let envelope = Envelope {
                        messages: vec![Message::Tick],
                        sequence: KeySequence::None,
                        source: MessageSource::Timer,
                    };

                    if !forward(&sender, envelope).await {
                        break;
                    }
                }
            }
        }
    });
}

fn start_crossterm_listener(
    cancellation: CancellationToken,
    resolver_mutex: Arc<Mutex<MessageResolver>>,
    sender: Sender<Envelope>,
) {
    tokio::spawn(async move {
        let mut reader = crossterm::event::EventStream::new();

        loop {
            let crossterm_event = reader.next().fuse();

            select! {
                _ = cancellation.cancelled() => break,
                Some(Ok(event)) = crossterm_event => {
                    if let Some(envelope) = handle_crossterm_event(&resolver_mutex, event).await {
                        if !forward(&sender, envelope).await {
                            break;
                        }
                    }
                }
            }
        }
    });
}

/// Returns false once the receiving loop is gone.
async fn forward(sender: &Sender<Envelope>, envelope: Envelope) -> bool {
    match sender.send(envelope).await {
        Ok(()) => true,
        Err(error) => {
            let envelope = error.0;
            tracing::error!(
                "sending {:?} messages failed: {:?}",
                envelope.source,
                envelope.messages
            );
            false
        }
    }
}

async fn handle_crossterm_event(
    resolver_mutex: &Arc<Mutex<MessageResolver>>,
    event: crossterm::event::Event,
) -> Option<Envelope> {
    match event {
        crossterm::event::Event::Key(key) => {
            let key = conversion::to_key(&key)?;

            let mut resolver = resolver_mutex.lock().await;
            let (messages, sequence) = resolver.add_key(key);

            Some(Envelope {
                messages: messages.into_iter().map(Message::Keymap).collect(),
                sequence,
                source: MessageSource::User,
            })
        }
        crossterm::event::Event::Resize(x, y) => Some(Envelope {
            messages: vec![Message::Resize(x, y)],
            sequence: KeySequence::None,
            source: MessageSource::User,
        }),
        crossterm::event::Event::FocusLost
        | crossterm::event::Event::FocusGained
        | crossterm::event::Event::Paste(_)
        | crossterm::event::Event::Mouse(_) => None,
    }
}

#[cfg(test)]
mod test {
    use hlab_keymap::message::KeySequence;
    use tokio::sync::mpsc;

    use super::{Envelope, Message, MessageSource};

    fn tick() -> Envelope {
        Envelope {
            messages: vec![Message::Tick],
            sequence: KeySequence::None,
            source: MessageSource::Timer,
        }
    }

    #[tokio::test]
    async fn forward_delivers_while_receiver_is_alive() {
        let (sender, mut receiver) = mpsc::channel(1);

        assert!(super::forward(&sender, tick()).await);
        assert_eq!(
            receiver.recv().await.map(|envelope| envelope.messages),
            Some(vec![Message::Tick])
        );
    }

    #[tokio::test]
    async fn forward_stops_once_receiver_is_dropped() {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);

        assert!(!super::forward(&sender, tick()).await);
    }
}
