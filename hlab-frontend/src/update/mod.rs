use hlab_api::{ContainerAction, Document, MediaRequest, Script, SshTest};
use hlab_keymap::message::{KeySequence, KeymapMessage, Mode};
use ratatui::layout::Rect;

use crate::{
    action::Action,
    entity::PanelEntity,
    event::{Envelope, Message},
    layout::AppLayout,
    model::{ConfirmDialog, Highlight, Model, Page, PanelMode},
    poll::Poller,
    task::Task,
};

use self::navigation::Direction;

mod dialog;
mod mode;
mod navigation;
mod notification;
mod panel;
mod poll;
mod recommendation;

#[tracing::instrument(skip(model))]
pub fn update_model(model: &mut Model, envelope: Envelope) -> Vec<Action> {
    match &envelope.sequence {
        KeySequence::Completed(_) => model.key_sequence.clear(),
        KeySequence::Changed(sequence) => model.key_sequence = sequence.to_owned(),
        KeySequence::None => {}
    };

    envelope
        .messages
        .into_iter()
        .flat_map(|message| update_with_message(model, message))
        .collect()
}

fn update_with_message(model: &mut Model, message: Message) -> Vec<Action> {
    match message {
        Message::ContainerActionFinished { id, action, result } => {
            dialog::container_finished(model, id, action, result)
        }
        Message::Documents(event) => panel::on_event(model, event),
        Message::Keymap(message) => keymap(model, message),
        Message::MediaRequests(event) => panel::on_event(model, event),
        Message::NotificationExpired(id) => notification::expired(model, id),
        Message::Polled(result) => poll::update(model, result),
        Message::PoolDeleted { name, result } => dialog::pool_deleted(model, name, result),
        Message::RecommendationImplemented { id, result } => {
            recommendation::implemented(model, id, result)
        }
        Message::RecommendationLoaded(id, result) => recommendation::loaded(model, id, result),
        Message::Resize(x, y) => {
            model.layout = AppLayout::new(Rect::new(0, 0, x, y));
            Vec::new()
        }
        Message::ScriptHighlighted(id, content) => {
            if matches!(&model.scripts.mode, PanelMode::Viewing(script) if script.id == id) {
                model.highlight = Some(Highlight {
                    script_id: id,
                    content,
                });
            }
            Vec::new()
        }
        Message::Scripts(event) => panel::on_event(model, event),
        Message::SshTested(result) => ssh_tested(model, result),
        Message::Tick => {
            notification::prune(model);
            Poller::tick().into_iter().map(Action::Task).collect()
        }
        Message::Yanked(Ok(())) => notification::success(model, "Script copied to clipboard"),
        Message::Yanked(Err(reason)) => notification::danger(model, reason),
    }
}

fn keymap(model: &mut Model, message: KeymapMessage) -> Vec<Action> {
    match model.mode {
        Mode::Dialog => dialog_keymap(model, message),
        Mode::Insert => insert_keymap(model, message),
        Mode::Navigation => navigation_keymap(model, message),
    }
}

fn dialog_keymap(model: &mut Model, message: KeymapMessage) -> Vec<Action> {
    match message {
        KeymapMessage::Confirm => dialog::confirm(model),
        KeymapMessage::Cancel => dialog::cancel(model),
        _ => Vec::new(),
    }
}

fn insert_keymap(model: &mut Model, message: KeymapMessage) -> Vec<Action> {
    match model.page {
        Page::Documents => form_keymap::<Document>(model, message),
        Page::Scripts => form_keymap::<Script>(model, message),
        Page::MediaRequests => form_keymap::<MediaRequest>(model, message),
        Page::Dashboard | Page::Docker | Page::Storage | Page::Recommendations => {
            mode::change(model, Mode::Navigation)
        }
    }
}

fn form_keymap<E: PanelEntity>(model: &mut Model, message: KeymapMessage) -> Vec<Action> {
    match message {
        KeymapMessage::Buffer(message) => {
            if let Some(buffer) = E::panel(model)
                .form_mut()
                .and_then(|form| form.focused_buffer_mut())
            {
                hlab_buffer::update(buffer, vec![&message]);
            }
            Vec::new()
        }
        KeymapMessage::Cancel => panel::cancel::<E>(model),
        KeymapMessage::NextField => {
            if let Some(form) = E::panel(model).form_mut() {
                form.focus_next();
            }
            Vec::new()
        }
        KeymapMessage::PreviousField => {
            if let Some(form) = E::panel(model).form_mut() {
                form.focus_previous();
            }
            Vec::new()
        }
        KeymapMessage::Submit => panel::submit::<E>(model),
        _ => Vec::new(),
    }
}

fn navigation_keymap(model: &mut Model, message: KeymapMessage) -> Vec<Action> {
    match message {
        KeymapMessage::Quit => vec![Action::Quit],
        KeymapMessage::NextPage => {
            let page = model.page.next();
            navigation::show_page(model, page)
        }
        KeymapMessage::PreviousPage => {
            let page = model.page.previous();
            navigation::show_page(model, page)
        }
        KeymapMessage::ShowPage(index) => match Page::from_index(index) {
            Some(page) => navigation::show_page(model, page),
            None => Vec::new(),
        },
        KeymapMessage::SelectFirst => navigation::select(model, Direction::First),
        KeymapMessage::SelectLast => navigation::select(model, Direction::Last),
        KeymapMessage::SelectNext => navigation::select(model, Direction::Next),
        KeymapMessage::SelectPrevious => navigation::select(model, Direction::Previous),
        KeymapMessage::Refresh => Poller::refresh(model.page)
            .into_iter()
            .map(Action::Task)
            .collect(),
        KeymapMessage::Start => container_action(model, ContainerAction::Start),
        KeymapMessage::Stop => container_action(model, ContainerAction::Stop),
        KeymapMessage::Restart => container_action(model, ContainerAction::Restart),
        KeymapMessage::TestConnection if model.page == Page::Storage => {
            let mut actions = notification::info(model, "Testing SSH connection...");
            actions.push(Action::Task(Task::TestSsh));
            actions
        }
        KeymapMessage::Implement if model.page == Page::Recommendations => {
            recommendation::implement(model)
        }
        KeymapMessage::Yank if model.page == Page::Scripts => yank_script(model),
        KeymapMessage::Delete if model.page == Page::Storage => dialog::delete_pool(model),
        KeymapMessage::OpenSelected if model.page == Page::Recommendations => {
            recommendation::open(model)
        }
        KeymapMessage::Cancel if model.page == Page::Recommendations => {
            recommendation::close(model)
        }
        message => match model.page {
            Page::Documents => panel_keymap::<Document>(model, message),
            Page::Scripts => panel_keymap::<Script>(model, message),
            Page::MediaRequests => panel_keymap::<MediaRequest>(model, message),
            Page::Dashboard | Page::Docker | Page::Storage | Page::Recommendations => Vec::new(),
        },
    }
}

fn panel_keymap<E: PanelEntity>(model: &mut Model, message: KeymapMessage) -> Vec<Action> {
    match message {
        KeymapMessage::Cancel => panel::cancel::<E>(model),
        KeymapMessage::Create => panel::start_create::<E>(model),
        KeymapMessage::Delete => panel::delete_current::<E>(model),
        KeymapMessage::Edit => panel::start_edit_current::<E>(model),
        KeymapMessage::OpenSelected => panel::select_current::<E>(model),
        _ => Vec::new(),
    }
}

fn container_action(model: &mut Model, action: ContainerAction) -> Vec<Action> {
    if model.page == Page::Docker && model.dialog == ConfirmDialog::Idle {
        dialog::container_action(model, action)
    } else {
        Vec::new()
    }
}

fn yank_script(model: &mut Model) -> Vec<Action> {
    match &model.scripts.mode {
        PanelMode::Viewing(script) => {
            vec![Action::Task(Task::YankToClipboard(script.script_content.clone()))]
        }
        PanelMode::Placeholder | PanelMode::Editing(_) => Vec::new(),
    }
}

fn ssh_tested(model: &mut Model, result: Result<SshTest, String>) -> Vec<Action> {
    match result {
        Ok(test) if test.success => notification::success(model, test.message),
        Ok(test) => notification::danger(model, test.message),
        Err(reason) => notification::danger(model, reason),
    }
}

#[cfg(test)]
mod test {
    use hlab_api::{Container, ContainerAction, Document};
    use hlab_keymap::message::{KeySequence, KeymapMessage, Mode};

    use crate::{
        action::Action,
        event::{Envelope, Message, MessageSource},
        model::{Level, Model, Page},
        task::{PanelTask, Task},
    };

    fn keys(messages: Vec<KeymapMessage>) -> Envelope {
        Envelope {
            messages: messages.into_iter().map(Message::Keymap).collect(),
            sequence: KeySequence::Completed(String::new()),
            source: MessageSource::User,
        }
    }

    fn tasks(actions: Vec<Action>) -> Vec<Task> {
        actions
            .into_iter()
            .filter_map(|action| match action {
                Action::Task(Task::ExpireNotification(_)) => None,
                Action::Task(task) => Some(task),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn container_stop_key_flow_posts_once_after_confirm() {
        let mut model = Model {
            page: Page::Docker,
            ..Default::default()
        };
        model.containers.replace(Ok(vec![Container {
            id: "abc123".to_owned(),
            name: "plex".to_owned(),
            status: "Up 2 days".to_owned(),
            ..Default::default()
        }]));

        let actions = super::update_model(&mut model, keys(vec![KeymapMessage::Stop]));
        assert_eq!(actions, vec![Action::ModeChanged(Mode::Dialog)]);

        let actions = super::update_model(&mut model, keys(vec![KeymapMessage::Confirm]));
        assert_eq!(
            tasks(actions),
            vec![Task::ContainerAction(
                "abc123".to_owned(),
                ContainerAction::Stop
            )]
        );
    }

    #[test]
    fn document_with_empty_content_is_not_sent() {
        let mut model = Model {
            page: Page::Documents,
            ..Default::default()
        };

        super::update_model(&mut model, keys(vec![KeymapMessage::Create]));
        assert_eq!(model.mode, Mode::Insert);

        let typed = vec![KeymapMessage::Buffer(
            hlab_buffer::message::BufferMessage::Modification(
                1,
                hlab_buffer::message::TextModification::Insert("T".to_owned()),
            ),
        )];
        super::update_model(&mut model, keys(typed));

        let actions = super::update_model(&mut model, keys(vec![KeymapMessage::Submit]));

        assert!(tasks(actions).is_empty());
        assert!(model.documents.is_editing());
        assert_eq!(
            model.notifications.entries.last().map(|n| (n.level, n.text.as_str())),
            Some((Level::Danger, "Title and content are required"))
        );
    }

    #[test]
    fn delete_key_opens_dialog_without_task() {
        let mut model = Model {
            page: Page::Documents,
            ..Default::default()
        };
        model.documents.list.replace(Ok(vec![Document {
            id: 1,
            title: "Backups".to_owned(),
            ..Default::default()
        }]));

        let actions = super::update_model(&mut model, keys(vec![KeymapMessage::Delete]));
        assert!(tasks(actions).is_empty());

        let actions = super::update_model(&mut model, keys(vec![KeymapMessage::Confirm]));
        assert_eq!(tasks(actions), vec![Task::Documents(PanelTask::Delete(1))]);
    }

    #[test]
    fn tick_polls_every_check() {
        let mut model = Model::default();
        let envelope = Envelope {
            messages: vec![Message::Tick],
            sequence: KeySequence::None,
            source: MessageSource::Timer,
        };

        let actions = super::update_model(&mut model, envelope);
        assert_eq!(tasks(actions).len(), crate::poll::Check::ALL.len());
    }

    #[test]
    fn changed_sequence_is_shown_until_completed() {
        let mut model = Model::default();
        super::update_model(
            &mut model,
            Envelope {
                messages: Vec::new(),
                sequence: KeySequence::Changed("d".to_owned()),
                source: MessageSource::User,
            },
        );
        assert_eq!(model.key_sequence, "d");

        super::update_model(&mut model, keys(Vec::new()));
        assert!(model.key_sequence.is_empty());
    }
}
