use crate::builder::build_index;
use crate::client::DocumentClient;
use crate::discovery::discover;
use crate::error::{BootstrapError, PartialIndexFailure};
use engine::{Phase, SearchSession};

#[derive(Debug)]
pub struct BootstrapSummary {
    pub documents: usize,
    pub items: usize,
    pub partial: Option<PartialIndexFailure>,
}

/// Discovery followed by the index build, publishing both into `session`.
///
/// `Ok(None)` means another bootstrap owns discovery (or it already ran). Errors are
/// terminal for the session: nothing retries them.
pub async fn bootstrap(
    session: &SearchSession,
    client: &DocumentClient,
) -> Result<Option<BootstrapSummary>, BootstrapError> {
    let Some(descriptors) = discover(session, client).await? else {
        return Ok(None);
    };

    session.set_phase(Phase::Building);
    let built = match build_index(client, &descriptors).await {
        Ok(built) => built,
        Err(failure) => {
            tracing::error!(error = %failure, "index build failed; search stays unavailable");
            session.record_failures(failure.failures.iter().map(|f| f.record()).collect());
            session.set_phase(Phase::BuildFailed);
            return Err(failure.into());
        }
    };

    if let Some(p) = &built.partial {
        session.record_failures(p.records());
    }
    let items = built.index.len();
    session.install_index(built.index);
    Ok(Some(BootstrapSummary { documents: descriptors.len(), items, partial: built.partial }))
}
