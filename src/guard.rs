//! Which pages each role may open.

use hostel_shared::account::Role;

use crate::Session;

/// Pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    /// Public hostel list and details.
    Hostels,
    StudentBookings,
    StudentReservations,
    StudentReports,
    ManagerVerification,
    ManagerHostels,
    ManagerBookings,
    ManagerReservations,
    ManagerFees,
    AdminVerifications,
    AdminFees,
    AdminReports,
    AdminUsers,
    Chat,
}

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any logged in account.
    Authenticated,
    Roles(&'static [Role]),
}

/// Where to send a visitor who may not open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Home,
}

impl Route {
    pub fn access(self) -> Access {
        use Role::*;

        match self {
            Route::Home | Route::Login | Route::Register | Route::Hostels => Access::Public,
            Route::Chat => Access::Authenticated,
            Route::StudentBookings | Route::StudentReservations | Route::StudentReports => {
                Access::Roles(&[Student])
            }
            Route::ManagerVerification
            | Route::ManagerHostels
            | Route::ManagerBookings
            | Route::ManagerReservations
            | Route::ManagerFees => Access::Roles(&[Manager]),
            Route::AdminVerifications | Route::AdminFees | Route::AdminReports => {
                Access::Roles(&[Admin, Subadmin])
            }
            Route::AdminUsers => Access::Roles(&[Admin]),
        }
    }

    /// The page a role lands on after logging in.
    pub fn landing(role: Role) -> Self {
        match role {
            Role::Admin => Route::AdminUsers,
            Role::Subadmin => Route::AdminVerifications,
            Role::Manager => Route::ManagerVerification,
            Role::Student => Route::Hostels,
        }
    }
}

/// Checks whether the session may open `route`.
///
/// Terminated accounts are treated like a wrong role.
pub fn guard(session: &Session, route: Route) -> Result<(), Redirect> {
    let access = route.access();
    if access == Access::Public {
        return Ok(());
    }

    let user = session.current_user().ok_or(Redirect::Login)?;
    if user.is_terminated {
        return Err(Redirect::Home);
    }

    match access {
        Access::Roles(roles) if !roles.contains(&user.role) => Err(Redirect::Home),
        _ => Ok(()),
    }
}

/// Like [`guard`], but as a crate error for view constructors.
pub(crate) fn require(session: &Session, route: Route) -> Result<(), crate::Error> {
    guard(session, route).map_err(|redirect| match redirect {
        Redirect::Login => crate::Error::NotLoggedIn,
        Redirect::Home => crate::Error::PermissionDenied,
    })
}
