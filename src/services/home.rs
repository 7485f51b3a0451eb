use serde::Serialize;

use crate::domain::auth::{Screen, SessionUser};
use crate::services::ensure_screen;

/// Navigation entry shown on the home page and the menu.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub path: &'static str,
    pub system: bool,
}

/// Screens the user may open, in menu order.
pub fn available_screens(user: &SessionUser) -> Vec<NavItem> {
    Screen::ALL
        .iter()
        .copied()
        .filter(|screen| ensure_screen(user, *screen).is_ok())
        .map(|screen| NavItem {
            title: screen.title(),
            path: screen.path(),
            system: screen.is_system(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{manager, officer};

    #[test]
    fn officers_without_capability_only_see_home() {
        let items = available_screens(&officer(&[]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path, "/home");
    }

    #[test]
    fn managers_see_every_screen() {
        let items = available_screens(&manager());
        assert_eq!(items.len(), Screen::ALL.len());
        assert!(items.iter().any(|item| item.system));
    }
}
