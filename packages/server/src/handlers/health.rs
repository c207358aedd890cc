/// Liveness probe.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    operation_id = "liveness",
    responses((status = 200, description = "Server is up", body = String, content_type = "text/plain")),
)]
pub async fn liveness() -> &'static str {
    "Server is Running!"
}
