//! Page routes the front end navigates to.

use std::fmt;

/// A page of the user directory a controller can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// List view with search and delete.
    UserList,
}

impl Route {
    /// Path of the page.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::Route;
    ///
    /// assert_eq!(Route::UserList.path(), "/");
    /// ```
    pub fn path(self) -> &'static str {
        match self {
            Self::UserList => "/",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
