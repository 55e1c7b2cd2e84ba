use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use arboard::Clipboard;
use hlab_api::{ApiClient, ContainerAction, Document, MediaRequest, Resource, Script};
use hlab_keymap::message::KeySequence;
use tokio::{sync::mpsc::Sender, task::JoinSet};

use crate::{
    entity::PanelEntity,
    error::AppError,
    event::{Envelope, LoadIntent, Message, MessageSource, PanelEvent, PollResult},
    model::notification::NOTIFICATION_LIFETIME,
    poll::Check,
};

mod syntax;

#[derive(Clone, Debug, PartialEq)]
pub enum Task {
    ContainerAction(String, ContainerAction),
    DeletePool(String),
    Documents(PanelTask<Document>),
    ExpireNotification(usize),
    HighlightScript {
        id: u64,
        script_type: String,
        content: String,
    },
    ImplementRecommendation(u64),
    LoadRecommendation(u64),
    MediaRequests(PanelTask<MediaRequest>),
    Poll(Check),
    PollDelayed(Duration, Check),
    Scripts(PanelTask<Script>),
    TestSsh,
    YankToClipboard(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum PanelTask<E: Resource> {
    Create(E::Payload),
    Delete(u64),
    List,
    Load(u64, LoadIntent),
    Update(u64, E::Payload),
}

pub struct TaskManager {
    client: ApiClient,
    clipboard: Arc<Mutex<Option<Clipboard>>>,
    sender: Sender<Envelope>,
    tasks: JoinSet<Result<(), AppError>>,
}

impl TaskManager {
    pub fn new(sender: Sender<Envelope>, client: ApiClient) -> Self {
        Self {
            client,
            clipboard: Arc::new(Mutex::new(None)),
            sender,
            tasks: JoinSet::new(),
        }
    }

    pub async fn finishing(&mut self) -> Result<(), AppError> {
        self.tasks.abort_all();

        let mut errors = Vec::new();
        while let Some(task) = self.tasks.join_next().await {
            match task {
                Ok(Ok(())) => (),
                Ok(Err(error)) => {
                    tracing::error!("task result returned error: {:?}", error);
                    errors.push(error)
                }
                Err(error) if error.is_cancelled() => (),
                Err(error) => {
                    tracing::error!("task failed: {:?}", error);
                }
            };
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Aggregate(errors))
        }
    }

    /// Spawns the task next to all running ones. Equal tasks are not merged.
    pub fn run(&mut self, task: Task) {
        self.collect_finished();

        tracing::debug!("running task: {:?}", task);

        let client = self.client.clone();
        let sender = self.sender.clone();
        match task {
            Task::ContainerAction(id, action) => {
                self.tasks.spawn(async move {
                    let result = client
                        .container_action(&id, action)
                        .await
                        .map_err(|err| {
                            err.reason_or(&format!("Failed to {} container", action.as_str()))
                        });

                    emit(&sender, Message::ContainerActionFinished { id, action, result }).await
                });
            }
            Task::DeletePool(name) => {
                self.tasks.spawn(async move {
                    let result = client
                        .delete_zpool(&name)
                        .await
                        .map_err(|err| err.reason_or("Failed to delete ZFS pool"));

                    emit(&sender, Message::PoolDeleted { name, result }).await
                });
            }
            Task::Documents(task) => self.run_panel_task(task),
            Task::ExpireNotification(id) => {
                self.tasks.spawn(async move {
                    tokio::time::sleep(NOTIFICATION_LIFETIME).await;
                    emit(&sender, Message::NotificationExpired(id)).await
                });
            }
            Task::HighlightScript {
                id,
                script_type,
                content,
            } => {
                self.tasks.spawn(async move {
                    let highlighted = tokio::task::spawn_blocking(move || {
                        syntax::highlight(&script_type, &content)
                    })
                    .await;

                    match highlighted {
                        Ok(Some(highlighted)) => {
                            emit(&sender, Message::ScriptHighlighted(id, highlighted)).await
                        }
                        Ok(None) => Ok(()),
                        Err(error) => {
                            tracing::error!("highlighting script {} failed: {:?}", id, error);
                            Ok(())
                        }
                    }
                });
            }
            Task::ImplementRecommendation(id) => {
                self.tasks.spawn(async move {
                    let result = client
                        .implement_recommendation(id)
                        .await
                        .map_err(|err| err.reason_or("Failed to implement recommendation"));

                    emit(&sender, Message::RecommendationImplemented { id, result }).await
                });
            }
            Task::LoadRecommendation(id) => {
                self.tasks.spawn(async move {
                    let result = client
                        .recommendation(id)
                        .await
                        .map_err(|err| err.reason_or("Failed to load recommendation"));

                    emit(&sender, Message::RecommendationLoaded(id, result)).await
                });
            }
            Task::MediaRequests(task) => self.run_panel_task(task),
            Task::Poll(check) => {
                self.tasks.spawn(async move {
                    let message = poll(&client, check).await;
                    emit(&sender, message).await
                });
            }
            Task::PollDelayed(delay, check) => {
                self.tasks.spawn(async move {
                    tokio::time::sleep(delay).await;

                    let message = poll(&client, check).await;
                    emit(&sender, message).await
                });
            }
            Task::Scripts(task) => self.run_panel_task(task),
            Task::TestSsh => {
                self.tasks.spawn(async move {
                    let result = client
                        .test_ssh()
                        .await
                        .map_err(|err| err.reason_or("SSH connection test failed"));

                    emit(&sender, Message::SshTested(result)).await
                });
            }
            Task::YankToClipboard(content) => {
                let clipboard = self.clipboard.clone();
                self.tasks.spawn(async move {
                    let result = set_clipboard_text(&clipboard, content).map_err(|err| {
                        tracing::error!("copying to clipboard failed: {:?}", err);
                        "Failed to copy script to clipboard".to_owned()
                    });

                    emit(&sender, Message::Yanked(result)).await
                });
            }
        };
    }

    fn run_panel_task<E: PanelEntity>(&mut self, task: PanelTask<E>) {
        let client = self.client.clone();
        let sender = self.sender.clone();

        self.tasks.spawn(async move {
            let event = run_panel_request(&client, task).await;
            emit(&sender, E::message(event)).await
        });
    }

    fn collect_finished(&mut self) {
        while let Some(task) = self.tasks.try_join_next() {
            match task {
                Ok(Ok(())) => (),
                Ok(Err(error)) => tracing::error!("task result returned error: {:?}", error),
                Err(error) => tracing::error!("task failed: {:?}", error),
            }
        }
    }
}

async fn emit(sender: &Sender<Envelope>, message: Message) -> Result<(), AppError> {
    sender
        .send(Envelope {
            messages: vec![message],
            sequence: KeySequence::None,
            source: MessageSource::Task,
        })
        .await?;

    Ok(())
}

async fn poll(client: &ApiClient, check: Check) -> Message {
    match check {
        Check::Documents => Message::Documents(PanelEvent::Listed(
            client.list::<Document>().await.map_err(|e| e.reason()),
        )),
        Check::DockerContainers => Message::Polled(PollResult::Containers(
            client.containers().await.map_err(|e| e.reason()),
        )),
        Check::MediaRequests => Message::MediaRequests(PanelEvent::Listed(
            client.list::<MediaRequest>().await.map_err(|e| e.reason()),
        )),
        Check::ProxmoxNodes => {
            Message::Polled(PollResult::Nodes(client.nodes().await.map_err(|e| e.reason())))
        }
        Check::ProxmoxResources => Message::Polled(PollResult::Resources(
            client.resources().await.map_err(|e| e.reason()),
        )),
        Check::Recommendations => Message::Polled(PollResult::Recommendations(
            client.recommendations().await.map_err(|e| e.reason()),
        )),
        Check::Scripts => Message::Scripts(PanelEvent::Listed(
            client.list::<Script>().await.map_err(|e| e.reason()),
        )),
        Check::StorageInfo => Message::Polled(PollResult::StorageInfo(
            client.storage_info().await.map_err(|e| e.reason()),
        )),
        Check::ZfsPools => {
            Message::Polled(PollResult::Zpools(client.zpools().await.map_err(|e| e.reason())))
        }
    }
}

async fn run_panel_request<E: Resource>(client: &ApiClient, task: PanelTask<E>) -> PanelEvent<E> {
    let name = E::NAME.to_lowercase();
    match task {
        PanelTask::Create(payload) => PanelEvent::Created(
            client
                .create::<E>(&payload)
                .await
                .map_err(|e| e.reason_or(&format!("Failed to create {}", name))),
        ),
        PanelTask::Delete(id) => PanelEvent::Deleted(
            id,
            client
                .delete::<E>(id)
                .await
                .map_err(|e| e.reason_or(&format!("Failed to delete {}", name))),
        ),
        PanelTask::List => PanelEvent::Listed(client.list::<E>().await.map_err(|e| e.reason())),
        PanelTask::Load(id, intent) => PanelEvent::Loaded(
            id,
            intent,
            client
                .get::<E>(id)
                .await
                .map_err(|e| e.reason_or(&format!("Failed to load {}", name))),
        ),
        PanelTask::Update(id, payload) => PanelEvent::Updated(
            id,
            client
                .update::<E>(id, &payload)
                .await
                .map_err(|e| e.reason_or(&format!("Failed to update {}", name))),
        ),
    }
}

fn set_clipboard_text(
    clipboard: &Mutex<Option<Clipboard>>,
    content: String,
) -> Result<(), AppError> {
    let mut guard = match clipboard.lock() {
        Ok(it) => it,
        Err(poisoned) => poisoned.into_inner(),
    };

    if guard.is_none() {
        *guard = Some(Clipboard::new()?);
    }

    if let Some(clipboard) = guard.as_mut() {
        clipboard.set_text(content)?;
    }

    Ok(())
}
