use shavukha_common::error::{CheckoutError, OrderError};
use shavukha_common::host::HostPlatform;
use shavukha_common::id::RemoteId;
use shavukha_common::order::{OrderOutcome, OrderRequest};
use shavukha_common::session::ShopSession;

use crate::api::ShopApi;

/// Post one order and classify the result. Never retries.
pub async fn dispatch_order<A: ShopApi>(api: &A, request: &OrderRequest) -> OrderOutcome {
    let result = api.post_order(request).await;
    match &result {
        Ok(body) => tracing::info!("Order submission result: {body}"),
        Err(OrderError::Rejected { status, body }) => {
            tracing::error!("Error response ({status}): {body}");
        }
        Err(e) => tracing::error!("Error submitting order: {e}"),
    }
    OrderOutcome::from_result(request.delivery_type, &result)
}

/// Full submit: validate the open form, post the order, apply the outcome to
/// the session (cart, form, main button, popup).
pub async fn submit_order<A: ShopApi, H: HostPlatform>(
    session: &mut ShopSession<H>,
    api: &A,
    user_id: Option<RemoteId>,
) -> Result<OrderOutcome, CheckoutError> {
    let request = session.begin_order(user_id)?;
    let outcome = dispatch_order(api, &request).await;
    session.apply_outcome(&outcome);
    Ok(outcome)
}
