//! Page flows around the simulator: sign-up, sign-in and ticker processing.
//!
//! Each flow returns the [`Route`] to show next. Failures are reported to
//! the notifier and returned as errors; the caller stays on the current page.

use tracing::{info, warn};

use crate::{
    api::RiskBackend,
    consts::{PROCESSING_FAILED, PROCESS_TICKER_FAILED, SIGNIN_FAILED, SIGNUP_FAILED},
    notify::{Notice, Notifier, Operation},
    prelude::*,
    session::Session,
    types::{SignInRequest, SignUpRequest},
    Error,
};

/// Pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignUp,
    SignIn,
    /// Ticker processing in progress
    Loading,
    Simulate,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::SignUp => "/",
            Route::SignIn => "/signin",
            Route::Loading => "/loading",
            Route::Simulate => "/simulate",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

fn require_field(value: &str, name: &'static str, notifier: &dyn Notifier) -> Result<()> {
    if value.trim().is_empty() {
        let err = Error::MissingField(name);
        notifier.notify(Notice::validation(err.to_string()));
        return Err(err);
    }
    Ok(())
}

/// Register a user. Success leads to the sign-in page.
pub async fn register(
    backend: &dyn RiskBackend,
    notifier: &dyn Notifier,
    form: &SignUpRequest,
) -> Result<Route> {
    require_field(&form.username, "username", notifier)?;
    require_field(&form.password, "password", notifier)?;
    require_field(&form.ticker, "ticker", notifier)?;

    match backend.sign_up(form).await {
        Ok(()) => {
            info!(username = %form.username, ticker = %form.ticker, "User registered");
            Ok(Route::SignIn)
        }
        Err(err) => {
            warn!(username = %form.username, error = %err, "Sign-up failed");
            notifier.notify(Notice::failed(
                Operation::SignUp,
                err.user_message(SIGNUP_FAILED),
            ));
            Err(err)
        }
    }
}

/// Authenticate and store the user's ticker in the session.
pub async fn sign_in(
    backend: &dyn RiskBackend,
    notifier: &dyn Notifier,
    session: &mut Session,
    form: &SignInRequest,
) -> Result<Route> {
    require_field(&form.username, "username", notifier)?;
    require_field(&form.password, "password", notifier)?;

    match backend.sign_in(form).await {
        Ok(response) => {
            session.set_ticker(response.ticker);
            info!(username = %form.username, ticker = ?session.ticker(), "Signed in");
            Ok(Route::Loading)
        }
        Err(err) => {
            warn!(username = %form.username, error = %err, "Sign-in failed");
            notifier.notify(Notice::failed(
                Operation::SignIn,
                err.user_message(SIGNIN_FAILED),
            ));
            Err(err)
        }
    }
}

/// Loading page: extract risks for the session's ticker.
///
/// Without a ticker this redirects to sign-in without touching the network.
pub async fn prepare_risks(
    backend: &dyn RiskBackend,
    notifier: &dyn Notifier,
    session: &mut Session,
) -> Result<Route> {
    let ticker = match session.require_ticker() {
        Ok(ticker) => ticker.to_string(),
        Err(err) => {
            notifier.notify(Notice::validation(err.to_string()));
            return Ok(Route::SignIn);
        }
    };

    info!(ticker = %ticker, "Processing ticker");
    match backend.process_ticker(&ticker).await {
        Ok(response) => match response.risk_names() {
            Some(risks) => {
                info!(ticker = %ticker, risks = risks.len(), "Ticker processed");
                session.set_risks(risks);
                Ok(Route::Simulate)
            }
            None => {
                warn!(ticker = %ticker, "Ticker processing returned no risks field");
                notifier.notify(Notice::failed(Operation::ProcessTicker, PROCESSING_FAILED));
                Err(Error::UnexpectedResponse(
                    "process_ticker response has no risks field".to_string(),
                ))
            }
        },
        Err(err) => {
            warn!(ticker = %ticker, error = %err, "Ticker processing failed");
            let message = match &err {
                Error::Http { .. } => err.user_message(PROCESSING_FAILED),
                _ => PROCESS_TICKER_FAILED.to_string(),
            };
            notifier.notify(Notice::failed(Operation::ProcessTicker, message));
            Err(err)
        }
    }
}

/// The simulator page requires a signed-in ticker.
pub fn simulator_route(session: &Session) -> Route {
    if session.ticker().is_some() {
        Route::Simulate
    } else {
        Route::SignIn
    }
}
