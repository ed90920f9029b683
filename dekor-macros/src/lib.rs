extern crate proc_macro;
use proc_macro::TokenStream;

pub(crate) mod codegen;
pub(crate) mod crate_path;
pub(crate) mod parsing;

/// Attribute macro on an `impl` block - turns it into a routable controller.
///
/// The optional argument is the controller's route prefix, written without a
/// leading slash. It composes with the application's global prefix when the
/// controller is registered.
///
/// # Method annotations
///
/// Inside the impl block you can annotate methods with:
///
/// - **HTTP verbs**: [`get`], [`post`], [`put`], [`delete`], [`patch`],
///   [`options`], [`head`]
/// - **Middleware**: [`middleware`]
///
/// Verb and middleware annotations on the same method merge into a single
/// route no matter which is written first. Handlers must be `async`, take
/// `&self` and at most one `Request` parameter, and return
/// `Result<impl IntoResponse, ApiError>` (see `ApiResult`).
///
/// # Example
///
/// ```ignore
/// use dekor::prelude::*;
///
/// #[derive(Default)]
/// pub struct UserController {
///     repo: UserRepo,
/// }
///
/// #[controller("users")]
/// impl UserController {
///     #[get("/")]
///     async fn list(&self) -> JsonResult<Vec<User>> {
///         Ok(Json(self.repo.all()))
///     }
///
///     #[middleware(require_auth)]
///     #[post("/")]
///     async fn create(&self, req: Request) -> JsonResult<User> {
///         // ...
///         # unimplemented!()
///     }
/// }
/// ```
///
/// # What is generated
///
/// - The original `impl` block with the route annotations stripped.
/// - `impl Controller for Name` - metadata replay in source order, plus
///   name-to-method binding used during registration. Construction delegates
///   to `Default`.
#[proc_macro_attribute]
pub fn controller(args: TokenStream, input: TokenStream) -> TokenStream {
    codegen::expand(args, input)
}

// ---------------------------------------------------------------------------
// No-op attributes — consumed by #[controller] from the token stream.
// Declared here for IDE support (rust-analyzer), cargo doc, and to prevent
// "cannot find attribute" errors when used outside #[controller].
// ---------------------------------------------------------------------------

/// Register a **GET** route handler.
///
/// ```ignore
/// #[get("/users/{id}")]
/// async fn find(&self, req: Request) -> JsonResult<User> {
///     Ok(Json(self.repo.find(&req)?))
/// }
/// ```
#[proc_macro_attribute]
pub fn get(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Register a **POST** route handler.
///
/// ```ignore
/// #[post("/users")]
/// async fn create(&self, req: Request) -> JsonResult<User> {
///     Ok(Json(self.repo.create(&req)?))
/// }
/// ```
#[proc_macro_attribute]
pub fn post(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Register a **PUT** route handler.
///
/// ```ignore
/// #[put("/users/{id}")]
/// async fn update(&self, req: Request) -> JsonResult<User> {
///     Ok(Json(self.repo.update(&req)?))
/// }
/// ```
#[proc_macro_attribute]
pub fn put(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Register a **DELETE** route handler.
///
/// ```ignore
/// #[delete("/users/{id}")]
/// async fn remove(&self, req: Request) -> StatusResult {
///     self.repo.remove(&req)?;
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
#[proc_macro_attribute]
pub fn delete(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Register a **PATCH** route handler.
///
/// ```ignore
/// #[patch("/users/{id}")]
/// async fn patch(&self, req: Request) -> JsonResult<User> {
///     Ok(Json(self.repo.patch(&req)?))
/// }
/// ```
#[proc_macro_attribute]
pub fn patch(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Register an **OPTIONS** route handler.
#[proc_macro_attribute]
pub fn options(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Register a **HEAD** route handler.
#[proc_macro_attribute]
pub fn head(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Attach middleware functions to a route handler.
///
/// Each argument is an `async fn(Request, Next) -> impl IntoResponse`.
/// Middleware run in declaration order ahead of the handler; repeated
/// `#[middleware]` annotations append to the same chain, and the annotation
/// may appear before or after the verb annotation.
///
/// ```ignore
/// async fn require_auth(req: Request, next: Next) -> Response {
///     if req.headers().get("authorization").is_none() {
///         return ApiError::Unauthorized("missing token".into()).into_response();
///     }
///     next.run(req).await
/// }
///
/// #[middleware(require_auth)]
/// #[get("/profile")]
/// async fn profile(&self) -> JsonResult<Profile> { ... }
/// ```
#[proc_macro_attribute]
pub fn middleware(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}
