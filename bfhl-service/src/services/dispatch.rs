use crate::error::BfhlError;
use crate::models::{BfhlData, BfhlRequest};
use crate::services::metrics::record_provider_latency;
use crate::services::numeric::{self, NumericError};
use crate::services::providers::{answer_in_one_word, TextProvider};
use std::time::Instant;

/// Run one validated request to completion. Either the whole result or an
/// error; never a partial answer.
pub async fn dispatch(
    request: BfhlRequest,
    provider: &dyn TextProvider,
) -> Result<BfhlData, BfhlError> {
    let data = match request {
        BfhlRequest::Fibonacci(n) => {
            compute(move || numeric::fibonacci(n).map(BfhlData::Sequence)).await?
        }
        BfhlRequest::Prime(values) => {
            compute(move || Ok(BfhlData::Numbers(numeric::filter_primes(&values)))).await?
        }
        BfhlRequest::Lcm(values) => {
            compute(move || numeric::lcm_of(&values).map(BfhlData::Number)).await?
        }
        BfhlRequest::Hcf(values) => {
            compute(move || numeric::hcf_of(&values).map(BfhlData::Number)).await?
        }
        BfhlRequest::Ai(prompt) => {
            let start = Instant::now();
            let result = answer_in_one_word(provider, &prompt).await;
            record_provider_latency(
                provider.name(),
                provider.model(),
                start.elapsed().as_secs_f64(),
            );
            BfhlData::Word(result?)
        }
    };
    Ok(data)
}

/// Run CPU-bound number work on the blocking pool so a large input never
/// holds a runtime worker.
async fn compute<F>(work: F) -> Result<BfhlData, BfhlError>
where
    F: FnOnce() -> Result<BfhlData, NumericError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| BfhlError::Internal(format!("numeric task failed: {}", e)))?;
    Ok(result?)
}
