/// Session lifecycle signals broadcast by the API client
///
/// `LoginRequired` takes the place of a redirect to the login screen: the
/// persisted session is gone and the operator has to authenticate again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    Refreshed,
    LoginRequired,
    LoggedOut,
}
