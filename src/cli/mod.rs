//! Command-line navigation.
//!
//! A run opens one location, applies any parameter changes, renders the
//! resulting view and reports where the user ended up. Handlers live in:
//! - [`auth`]: login, registration and logout
//! - [`books`]: catalog, book detail and the add/edit forms
//! - [`transactions`]: transaction list, detail and checkout
//!
//! Output formatting utilities are in [`output`].

use std::io::Write;
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{AuthGateway, BookGateway, ClientError, HttpGateway, TransactionGateway};
use crate::config::LitshopConfig;
use crate::routes::Route;
use crate::session::{SessionState, SessionStore};
use crate::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use crate::view::{History, Location, ParamUpdate};

pub mod auth;
pub mod books;
pub mod output;
pub mod transactions;

/// Gateways a navigation may call.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    /// Authentication endpoints.
    pub auth: &'a dyn AuthGateway,
    /// Book and genre endpoints.
    pub books: &'a dyn BookGateway,
    /// Transaction endpoints.
    pub transactions: &'a dyn TransactionGateway,
}

impl<'a> Services<'a> {
    /// Uses one HTTP gateway for every resource family.
    #[must_use]
    pub fn http(gateway: &'a HttpGateway) -> Self {
        Self {
            auth: gateway,
            books: gateway,
            transactions: gateway,
        }
    }
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Location to open.
    pub location: Location,
    /// Parameter changes applied after opening it.
    pub updates: Vec<ParamUpdate>,
    /// Confirms deletion on a book detail page.
    pub delete: bool,
    /// Email for the login and register forms.
    pub email: Option<String>,
    /// Password for the login and register forms.
    pub password: Option<String>,
    /// Username for the register form.
    pub username: Option<String>,
}

impl NavigationRequest {
    /// Builds a request for `location` with no changes or credentials.
    #[must_use]
    pub const fn open(location: Location) -> Self {
        Self {
            location,
            updates: Vec::new(),
            delete: false,
            email: None,
            password: None,
            username: None,
        }
    }

    /// Reads the request from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRoute`] when the route or a `set`
    /// entry is malformed.
    pub fn from_config(config: &LitshopConfig) -> Result<Self, ClientError> {
        Ok(Self {
            location: config.location()?,
            updates: config.param_updates()?,
            delete: config.delete,
            email: config.email.clone(),
            password: config.password.clone(),
            username: config.username.clone(),
        })
    }
}

/// Opens locations against the bookstore API.
pub struct Navigator<'a> {
    services: Services<'a>,
    store: &'a SessionStore,
    session: Option<SessionState>,
    signed_in: bool,
    telemetry: Arc<dyn TelemetrySink>,
}

impl<'a> Navigator<'a> {
    /// Creates a navigator. The user counts as signed in when a session is
    /// present.
    #[must_use]
    pub fn new(
        services: Services<'a>,
        store: &'a SessionStore,
        session: Option<SessionState>,
    ) -> Self {
        let signed_in = session.is_some();
        Self {
            services,
            store,
            session,
            signed_in,
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Overrides whether the user counts as signed in, for a configured
    /// token without a stored session.
    #[must_use]
    pub const fn with_signed_in(mut self, signed_in: bool) -> Self {
        self.signed_in = signed_in;
        self
    }

    /// Routes list-view telemetry to `sink`.
    #[must_use]
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = sink;
        self
    }

    /// Opens the requested location and renders it to `out`.
    ///
    /// Guarded routes redirect first. When a protected view fails because
    /// the session is missing or expired, the session is cleared and the
    /// navigation ends at `/login`.
    ///
    /// # Errors
    ///
    /// Returns validation, API, network and I/O errors from the view.
    pub async fn open<W: Write>(
        &mut self,
        request: NavigationRequest,
        out: &mut W,
    ) -> Result<Location, ClientError> {
        let (route, history) = self.guard(request.location.clone())?;
        let protected = route.requires_auth();
        let result = self.dispatch(route, history, &request, out).await;

        match result {
            Ok(history) => Ok(history.current().clone()),
            Err(error) if protected && error.requires_login() => self.expire(&error, out),
            Err(error) => Err(error),
        }
    }

    fn guard(&self, location: Location) -> Result<(Route, History), ClientError> {
        let requested = Route::parse(location.path());
        let mut route = requested.clone();
        if route == Route::Home {
            route = if self.signed_in {
                Route::Books
            } else {
                Route::Login
            };
        }
        if let Some(redirect) = route.redirect(self.signed_in) {
            route = redirect;
        }

        if route == requested {
            return Ok((route, History::new(location)));
        }
        info!(from = %location, to = %route, "redirecting");
        let target = Location::at(&route.to_string())?;
        Ok((route, History::new(target)))
    }

    async fn dispatch<W: Write>(
        &mut self,
        route: Route,
        history: History,
        request: &NavigationRequest,
        out: &mut W,
    ) -> Result<History, ClientError> {
        match route {
            Route::Books => books::catalog(self, history, &request.updates, out).await,
            Route::Transactions => {
                transactions::list(self, history, &request.updates, out).await
            }
            page => {
                let updated = with_updates(history, &request.updates);
                self.dispatch_page(page, updated, request, out).await
            }
        }
    }

    async fn dispatch_page<W: Write>(
        &mut self,
        route: Route,
        history: History,
        request: &NavigationRequest,
        out: &mut W,
    ) -> Result<History, ClientError> {
        match route {
            Route::Login => auth::login(self, history, request, out).await,
            Route::Register => auth::register(self, history, request, out).await,
            Route::Logout => auth::logout(self, history, out),
            Route::AddBook => books::add(self, history, &request.updates, out).await,
            Route::BookDetail(id) => books::detail(self, &id, history, request.delete, out).await,
            Route::EditBook(id) => {
                books::edit(self, &id, history, &request.updates, out).await
            }
            Route::Checkout => transactions::checkout(self, history, out).await,
            Route::TransactionDetail(id) => transactions::detail(self, &id, history, out).await,
            Route::NotFound(path) => Err(ClientError::NotFound {
                resource: format!("page {path}"),
            }),
            Route::Home | Route::Books | Route::Transactions => Err(ClientError::InvalidRoute(
                format!("{route} is not a page route"),
            )),
        }
    }

    fn expire<W: Write>(
        &mut self,
        error: &ClientError,
        out: &mut W,
    ) -> Result<Location, ClientError> {
        warn!(%error, "session rejected; signing out");
        self.store.clear()?;
        self.session = None;
        self.signed_in = false;
        output::write_line(out, &format!("Please sign in again ({error})."))?;
        Location::at(&Route::Login.to_string())
    }
}

fn with_updates(history: History, updates: &[ParamUpdate]) -> History {
    if updates.is_empty() {
        return history;
    }
    let mut query = history.current().query().clone();
    for update in updates {
        query.insert(&update.key, &update.value);
    }
    let mut updated = history;
    let location = updated.current().clone().with_query(query);
    updated.replace(location);
    updated
}

/// Runs one navigation from configuration, rendering to `out`.
///
/// Returns the location the navigation ended at, which is also written
/// after the view.
///
/// # Errors
///
/// Returns configuration, session and view errors.
pub async fn run<W: Write>(config: &LitshopConfig, out: &mut W) -> Result<Location, ClientError> {
    let request = NavigationRequest::from_config(config)?;
    let store = config.session_store();
    let session = store.load()?;
    let configured = config.token()?;
    let signed_in = configured.is_some() || session.is_some();
    let token = configured.map_or_else(
        || session.as_ref().map(SessionState::bearer).transpose(),
        |token| Ok(Some(token)),
    )?;

    let gateway = HttpGateway::new(config.api_base()?, token, config.timeout())?;
    let telemetry: Arc<dyn TelemetrySink> = if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    };

    let mut navigator = Navigator::new(Services::http(&gateway), &store, session)
        .with_signed_in(signed_in)
        .with_telemetry(telemetry);
    let location = navigator.open(request, out).await?;
    output::write_location(out, &location)?;
    Ok(location)
}
