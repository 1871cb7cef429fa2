use std::sync::Arc;

use flume::{Receiver, Sender};
use futures::{FutureExt as _, future::BoxFuture};
use tracing::{debug, warn};

use super::CreateWalletManagerReconcileMessage;
use super::state::{State, WalletFormKind};
use crate::{
    form,
    task::AbortableTask,
    verifier::{SeedVerifier, VerifierError},
};

type Message = CreateWalletManagerReconcileMessage;

/// Keeps `custom_seed_is_normal` in sync with the live seed text without
/// blocking input.
///
/// One watcher loop lives per manager instance; re-initializing the form
/// replaces it wholesale. A newly pushed text replaces any in-flight check,
/// so a superseded check never gets to report its result.
#[derive(Debug)]
pub(crate) struct SeedWatcher {
    sender: Sender<String>,
    _task: AbortableTask<()>,
}

impl SeedWatcher {
    pub fn start(
        state: impl Into<State>,
        verifier: Arc<dyn SeedVerifier>,
        reconciler: Sender<Message>,
    ) -> Self {
        let (sender, receiver) = flume::unbounded();
        let task = AbortableTask::spawn(watch(receiver, state.into(), verifier, reconciler));

        Self { sender, _task: task }
    }

    /// Feed a new seed text into the validation stream.
    pub fn push(&self, seed: &str) {
        self.sender.send(seed.to_string()).ok();
    }
}

async fn watch(
    receiver: Receiver<String>,
    state: State,
    verifier: Arc<dyn SeedVerifier>,
    reconciler: Sender<Message>,
) {
    let mut in_flight: Option<BoxFuture<'static, Result<(), VerifierError>>> = None;

    loop {
        tokio::select! {
            changed = receiver.recv_async() => {
                let Ok(seed) = changed else { break };
                in_flight = Some(check(&state, &verifier, seed));
            }

            result = async { in_flight.as_mut().expect("guarded by is_some").await },
                if in_flight.is_some() =>
            {
                in_flight = None;
                apply(&state, &reconciler, result);
            }
        }
    }
}

/// Decide, against the state at arrival time, whether this text needs a
/// verifier round trip or can be classified normal on the spot.
fn check(
    state: &State,
    verifier: &Arc<dyn SeedVerifier>,
    seed: String,
) -> BoxFuture<'static, Result<(), VerifierError>> {
    let needs_verification = {
        let state = state.read();
        let fields_match =
            form::seed_match(&state.fields, state.entry_mode.is_assisted()).is_none();

        !state.entry_mode.is_assisted()
            && (fields_match || state.kind == WalletFormKind::Recover)
    };

    if !needs_verification {
        return futures::future::ready(Ok(())).boxed();
    }

    let verifier = verifier.clone();
    async move { verifier.verify(&seed).await }.boxed()
}

fn apply(state: &State, reconciler: &Sender<Message>, result: Result<(), VerifierError>) {
    let normal = match result {
        Ok(()) => true,

        Err(error) if error.is_malformed() => {
            debug!("seed flagged by verifier: {error}");
            false
        }

        // fail open, a transient failure never blocks the user
        Err(error) => {
            warn!("seed verification unavailable: {error}");
            true
        }
    };

    state.write().custom_seed_is_normal = normal;
    reconciler.try_send(Message::SeedClassified { normal }).ok();
}
