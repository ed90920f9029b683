use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use dekor::prelude::*;

use crate::models::{CreateUser, User};

/// Reject requests without an Authorization header.
pub async fn require_auth(req: Request, next: Next) -> Response {
    if req.headers().get("authorization").is_none() {
        return ApiError::Unauthorized("missing bearer token".into()).into_response();
    }
    next.run(req).await
}

#[derive(Default)]
pub struct HealthController;

#[controller("health")]
impl HealthController {
    #[get("/")]
    async fn ping(&self) -> JsonResult<serde_json::Value> {
        Ok(Json(serde_json::json!({ "status": "up" })))
    }
}

/// In-memory user CRUD. Reads are public, writes sit behind `require_auth`.
#[derive(Default)]
pub struct UserController {
    store: Mutex<Vec<User>>,
    next_id: AtomicU64,
}

#[controller("users")]
impl UserController {
    #[get("/")]
    async fn list(&self) -> JsonResult<Vec<User>> {
        Ok(Json(self.store.lock().unwrap().clone()))
    }

    #[get("/{id}")]
    async fn find(&self, mut req: Request) -> JsonResult<User> {
        let Path(id) = req
            .extract_parts::<Path<u64>>()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        self.store
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .map(Json)
            .ok_or_else(|| ApiError::NotFound(format!("no user with id {id}")))
    }

    #[middleware(require_auth)]
    #[post("/")]
    async fn create(&self, req: Request) -> ApiResult<(StatusCode, Json<User>)> {
        let Json(body) = req
            .extract::<Json<CreateUser>, _>()
            .await
            .map_err(|e| ApiError::UnprocessableEntity {
                message: "invalid request body".into(),
                errors: vec![serde_json::json!(e.to_string())],
            })?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let user = User {
            id,
            name: body.name,
            email: body.email,
        };
        self.store.lock().unwrap().push(user.clone());
        Ok((StatusCode::CREATED, Json(user)))
    }

    // Middleware before or after the verb annotation makes no difference.
    #[delete("/{id}")]
    #[middleware(require_auth)]
    async fn remove(&self, mut req: Request) -> StatusResult {
        let Path(id) = req
            .extract_parts::<Path<u64>>()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        let mut store = self.store.lock().unwrap();
        let before = store.len();
        store.retain(|u| u.id != id);
        if store.len() == before {
            return Err(ApiError::NotFound(format!("no user with id {id}")));
        }
        Ok(StatusCode::NO_CONTENT)
    }
}
