use action::ActionResult;
use error::AppError;
use event::Emitter;
use hlab_api::ApiClient;
use layout::AppLayout;
use model::Model;
use settings::Settings;
use terminal::TerminalWrapper;
use update::update_model;
use view::render_model;

mod action;
mod entity;
pub mod error;
mod event;
pub mod form;
mod layout;
mod model;
mod poll;
pub mod settings;
mod task;
mod terminal;
mod update;
mod view;

pub async fn run(settings: Settings) -> Result<(), AppError> {
    let client = ApiClient::new(&settings.api_url, settings.request_timeout)?;

    let mut terminal = TerminalWrapper::start()?;
    let mut emitter = Emitter::start(client, settings.poll_interval);

    let mut model = Model {
        layout: AppLayout::new(terminal.size()?),
        page: settings.startup_page,
        settings,
        ..Default::default()
    };

    tracing::debug!("starting with model state: {:?}", model);

    let mut result = Vec::new();
    if let Err(error) = render_model(&mut terminal, &model) {
        result.push(error);
    } else {
        while let Some(envelope) = emitter.receiver.recv().await {
            tracing::debug!("received messages: {:?}", envelope.messages);

            let actions = update_model(&mut model, envelope);
            let exec = action::exec(&mut emitter, actions).await;

            if let Err(error) = render_model(&mut terminal, &model) {
                result.push(error);
                break;
            }

            if exec == ActionResult::Quit {
                break;
            }
        }
    }

    if let Err(error) = emitter.shutdown().await {
        result.push(error);
    }

    if let Err(error) = terminal.shutdown() {
        result.push(error);
    }

    if result.is_empty() {
        Ok(())
    } else {
        Err(AppError::Aggregate(result))
    }
}
