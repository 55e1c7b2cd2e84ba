use crate::{
    action::Action,
    event::PollResult,
    model::{sort_recommendations, Model, Snapshot, TargetKind},
};

/// Writes a check result into the region that check owns. Nothing else in
/// the model is touched.
#[tracing::instrument(skip(model, result))]
pub fn update(model: &mut Model, result: PollResult) -> Vec<Action> {
    match result {
        PollResult::Containers(result) => {
            log_failure("docker containers", &result);
            model.busy.clear_settled(TargetKind::Container);
            model.containers.replace(result);
        }
        PollResult::Nodes(result) => {
            log_failure("proxmox nodes", &result);
            model.nodes = Snapshot::from_result(result);
        }
        PollResult::Recommendations(result) => {
            log_failure("recommendations", &result);

            let result = result.map(|mut recommendations| {
                sort_recommendations(&mut recommendations);
                recommendations
            });

            if let (Ok(recommendations), Some(detail)) =
                (&result, model.recommendations.detail.as_mut())
            {
                if let Some(current) = recommendations.iter().find(|r| r.id == detail.id) {
                    *detail = current.clone();
                }
            }

            model.busy.clear_settled(TargetKind::Recommendation);
            model.recommendations.list.replace(result);
        }
        PollResult::Resources(result) => {
            log_failure("proxmox resources", &result);
            model.resources = Snapshot::from_result(result);
        }
        PollResult::StorageInfo(result) => {
            log_failure("storage info", &result);
            model.storage = Snapshot::from_result(result);
        }
        PollResult::Zpools(result) => {
            log_failure("zfs pools", &result);
            model.busy.clear_settled(TargetKind::Pool);
            model.zpools.replace(result);
        }
    }

    Vec::new()
}

fn log_failure<T>(check: &str, result: &Result<T, String>) {
    if let Err(reason) = result {
        tracing::error!("{} check failed: {}", check, reason);
    }
}

#[cfg(test)]
mod test {
    use std::{
        io::Write,
        sync::{Arc, Mutex},
    };

    use hlab_api::{Container, Node, StorageMount};

    use crate::{
        event::PollResult,
        model::{dashboard, Model, Snapshot},
    };

    #[test]
    fn failed_check_only_changes_its_region() {
        let mut model = Model::default();
        super::update(
            &mut model,
            PollResult::Nodes(Ok(vec![Node {
                node: "pve".to_owned(),
                ..Default::default()
            }])),
        );
        super::update(
            &mut model,
            PollResult::StorageInfo(Ok(vec![StorageMount::default()])),
        );

        let nodes = model.nodes.clone();
        let storage = model.storage.clone();
        let resources = model.resources.clone();
        let zpools = model.zpools.clone();

        super::update(
            &mut model,
            PollResult::Containers(Err("db down".to_owned())),
        );

        assert_eq!(model.nodes, nodes);
        assert_eq!(model.storage, storage);
        assert_eq!(model.resources, resources);
        assert_eq!(model.zpools, zpools);
        assert_eq!(model.containers.rows.reason(), Some("db down"));
    }

    #[test]
    fn failed_containers_render_connection_error_badge() {
        let mut model = Model::default();
        super::update(
            &mut model,
            PollResult::Containers(Err("db down".to_owned())),
        );

        assert_eq!(
            dashboard::badge(&model.containers.rows, "containers"),
            Some("Connection Error".to_owned())
        );
    }

    #[test]
    fn empty_containers_are_ready_not_failed() {
        let mut model = Model::default();
        super::update(&mut model, PollResult::Containers(Ok(Vec::<Container>::new())));

        assert!(matches!(
            &model.containers.rows,
            Snapshot::Ready { payload, .. } if payload.is_empty()
        ));
        assert_eq!(
            dashboard::badge(&model.containers.rows, "containers"),
            Some("Connected (0 containers)".to_owned())
        );
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn text(&self) -> String {
            let bytes = self.0.lock().map(|it| it.clone()).unwrap_or_default();
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if let Ok(mut bytes) = self.0.lock() {
                bytes.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn failed_check_logs_backend_reason() {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut model = Model::default();
            super::update(
                &mut model,
                PollResult::Containers(Err("db down".to_owned())),
            );
        });

        let text = log.text();
        assert!(text.contains("ERROR"), "{}", text);
        assert!(text.contains("docker containers check failed: db down"), "{}", text);
    }
}
