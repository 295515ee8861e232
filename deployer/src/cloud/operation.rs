//! Long-running operations driven through the client library poller

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use google_cloud_lro::{Poller, PollingResult};
use google_cloud_run_v2::model::Service;
use tracing::{debug, warn};

use crate::deploy::api::PendingOperation;
use crate::errors::DeployError;

/// An operation the control plane accepted and is still working on
pub struct PolledOperation<P, M> {
    label: String,
    poller: P,
    completed: Option<Service>,
    poll_interval: Duration,
    _metadata: PhantomData<fn() -> M>,
}

/// Send the request behind `poller` and return once the control plane has accepted it
///
/// A rejected request surfaces here; failures of the accepted operation only
/// surface from [`PendingOperation::wait`].
pub async fn submit<P, M>(
    mut poller: P,
    label: String,
    poll_interval: Duration,
) -> Result<Box<dyn PendingOperation>, DeployError>
where
    P: Poller<Service, M> + Send + 'static,
    M: Send + 'static,
{
    let completed = match poller.poll().await {
        Some(PollingResult::Completed(result)) => Some(result?),
        Some(PollingResult::PollingError(e)) => return Err(e.into()),
        Some(_) => None,
        None => {
            return Err(DeployError::RequestError(format!(
                "{}: no operation was started",
                label
            )))
        }
    };
    debug!("{} accepted", label);

    Ok(Box::new(PolledOperation {
        label,
        poller,
        completed,
        poll_interval,
        _metadata: PhantomData,
    }))
}

#[async_trait]
impl<P, M> PendingOperation for PolledOperation<P, M>
where
    P: Poller<Service, M> + Send + 'static,
    M: Send + 'static,
{
    async fn wait(self: Box<Self>) -> Result<Service, DeployError> {
        let mut this = *self;
        if let Some(service) = this.completed.take() {
            return Ok(service);
        }

        loop {
            tokio::time::sleep(this.poll_interval).await;
            match this.poller.poll().await {
                Some(PollingResult::Completed(result)) => return Ok(result?),
                Some(PollingResult::PollingError(e)) => {
                    warn!("Polling {} failed, trying again: {}", this.label, e)
                }
                Some(_) => debug!(
                    "{} still running, polling again in {:?}",
                    this.label, this.poll_interval
                ),
                None => {
                    return Err(DeployError::OperationError(format!(
                        "{} finished without a result",
                        this.label
                    )))
                }
            }
        }
    }
}
